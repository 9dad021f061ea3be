use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_priority_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use order_priority::config::AppConfig;
use order_priority::error::AppError;
use order_priority::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_priority_routes(config.scoring.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        silence_threshold_days = config.scoring.silence_threshold_days,
        financing_pending_threshold_days = config.scoring.financing_pending_threshold_days,
        high_value_threshold = config.scoring.high_value_threshold,
        "order priority service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
