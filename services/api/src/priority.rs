use crate::infra::{parse_instant, resolve_now};
use chrono::{DateTime, Utc};
use clap::Args;
use order_priority::config::AppConfig;
use order_priority::error::AppError;
use order_priority::workflows::priority::list::{write_priority_csv_to_path, write_priority_json};
use order_priority::workflows::priority::{
    calculate_risk_score, determine_next_best_action, generate_priority_list,
    get_all_applicable_actions, Order, PriorityList,
};
use order_priority::workflows::snapshot::OrderSnapshotImporter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PriorityListArgs {
    /// Order snapshot exported from the order system (JSON)
    #[arg(long)]
    pub(crate) orders: PathBuf,
    /// Evaluation instant, RFC 3339 or YYYY-MM-DD (defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Only print the top N items
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Also write the full list as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Print the list as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExplainArgs {
    /// Order snapshot exported from the order system (JSON)
    #[arg(long)]
    pub(crate) orders: PathBuf,
    /// Identifier of the order to explain
    #[arg(long)]
    pub(crate) order_id: String,
    /// Evaluation instant, RFC 3339 or YYYY-MM-DD (defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
}

pub(crate) fn run_priority_list(args: PriorityListArgs) -> Result<(), AppError> {
    let PriorityListArgs {
        orders,
        now,
        limit,
        csv,
        json,
    } = args;

    let scoring = AppConfig::load()?.scoring;
    let orders = OrderSnapshotImporter::from_path(orders)?;
    let list = generate_priority_list(&orders, &scoring, resolve_now(now));

    if let Some(path) = csv {
        write_priority_csv_to_path(&list, &path)?;
        eprintln!("wrote {} item(s) to {}", list.items.len(), path.display());
    }

    if json {
        print_json(&list)?;
    } else {
        render_priority_list(&list, limit);
    }

    Ok(())
}

pub(crate) fn run_priority_explain(args: ExplainArgs) -> Result<(), AppError> {
    let ExplainArgs {
        orders,
        order_id,
        now,
    } = args;

    let scoring = AppConfig::load()?.scoring;
    let now = resolve_now(now);
    let orders = OrderSnapshotImporter::from_path(orders)?;
    let order = find_order(&orders, &order_id)?;

    let score = calculate_risk_score(order, &scoring, now);
    println!(
        "Order {} | {} | {} | {}",
        order.id,
        order.customer.name,
        order.vehicle.display_name(),
        order.status.label()
    );
    println!(
        "Risk score {} ({}) | fulfillment probability {}%",
        score.value,
        score.level.label(),
        score.fulfillment_probability()
    );

    if score.factors.is_empty() {
        println!("\nRisk factors: none");
    } else {
        println!("\nRisk factors");
        for factor in &score.factors {
            println!(
                "- [{:>2}] {}: {}",
                factor.impact,
                factor.factor.label(),
                factor.description
            );
        }
    }

    match determine_next_best_action(order, &scoring, now) {
        Some(action) => println!(
            "\nNext best action: {} via {} ({})\n  {}",
            action.action,
            action.channel.label(),
            action.urgency.label(),
            action.reasoning
        ),
        None => println!("\nNext best action: none"),
    }

    let applicable = get_all_applicable_actions(order, &scoring, now);
    if !applicable.is_empty() {
        println!("\nMatching rules (evaluation order)");
        for entry in &applicable {
            println!(
                "- p{} {} ({}): {}",
                entry.priority, entry.rule_id, entry.rule_name, entry.action.action
            );
        }
    }

    Ok(())
}

pub(crate) fn find_order<'a>(orders: &'a [Order], order_id: &str) -> Result<&'a Order, AppError> {
    orders
        .iter()
        .find(|order| order.id.0 == order_id)
        .ok_or_else(|| AppError::OrderNotFound(order_id.to_string()))
}

pub(crate) fn print_json(list: &PriorityList<'_>) -> Result<(), AppError> {
    write_priority_json(list, std::io::stdout().lock())?;
    Ok(())
}

pub(crate) fn render_priority_list(list: &PriorityList<'_>, limit: Option<usize>) {
    let summary = &list.summary;

    println!("Daily priority list for {}", list.date);
    println!(
        "{} active order(s): {} high, {} medium, {} low risk | {} action(s) due",
        summary.total_orders,
        summary.high_risk,
        summary.medium_risk,
        summary.low_risk,
        summary.total_actions
    );
    println!(
        "Average risk {:.1} | average fulfillment {:.1}% | pipeline {:.2} | at risk {:.2}",
        summary.stats.average_risk_score,
        summary.stats.average_fulfillment_probability,
        summary.stats.total_order_value,
        summary.stats.at_risk_order_value
    );

    if !summary.urgency_load.is_empty() {
        println!("\nWorkload by urgency");
        for entry in &summary.urgency_load {
            println!("- {}: {}", entry.urgency_label, entry.actions);
        }
    }

    if !summary.channel_load.is_empty() {
        println!("\nWorkload by channel");
        for entry in &summary.channel_load {
            println!("- {}: {}", entry.channel_label, entry.actions);
        }
    }

    if list.items.is_empty() {
        println!("\nNo active orders to prioritize");
        return;
    }

    println!("\nRanked orders");
    let shown = limit.unwrap_or(list.items.len());
    for item in list.items.iter().take(shown) {
        let order = item.order.order;
        println!(
            "{:>3}. {} | {} | {} | risk {} ({}) | fulfillment {}%",
            item.rank,
            order.id,
            order.customer.name,
            order.vehicle.display_name(),
            item.risk_score,
            item.risk_level.label(),
            item.fulfillment_probability()
        );
        println!(
            "     -> {} via {} ({})",
            item.next_best_action.action,
            item.next_best_action.channel.label(),
            item.next_best_action.urgency.label()
        );
        if let Some(factor) = item.risk_factors.first() {
            println!("     top factor: {}", factor.description);
        }
    }

    if shown < list.items.len() {
        println!("... {} more", list.items.len() - shown);
    }
}
