use crate::infra::{parse_instant, resolve_now};
use crate::priority::{print_json, render_priority_list};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use order_priority::config::AppConfig;
use order_priority::error::AppError;
use order_priority::workflows::priority::{
    generate_priority_list, Activity, ActivityKind, ContactChannel, Customer, FinancingStatus,
    Order, OrderId, OrderStatus, Sentiment, Vehicle,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation instant for the sample book (defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Print the list as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { now, json } = args;

    let scoring = AppConfig::load()?.scoring;
    let now = resolve_now(now);
    let orders = sample_orders(now);
    let list = generate_priority_list(&orders, &scoring, now);

    if json {
        return print_json(&list);
    }

    println!("Order prioritization demo ({} sample orders)\n", orders.len());
    render_priority_list(&list, None);
    Ok(())
}

struct SampleOrder {
    id: &'static str,
    status: OrderStatus,
    financing: FinancingStatus,
    amount: f64,
    age_days: i64,
    idle_days: i64,
    last_contact_days_ago: u32,
    delivery_offset_days: Option<i64>,
    customer: &'static str,
    channel: ContactChannel,
    vehicle: (&'static str, &'static str, u16),
    sentiment: Option<(Sentiment, i64)>,
}

const SAMPLE_BOOK: [SampleOrder; 6] = [
    SampleOrder {
        id: "DEMO-001",
        status: OrderStatus::FinancingPending,
        financing: FinancingStatus::Pending,
        amount: 185_000.0,
        age_days: 21,
        idle_days: 4,
        last_contact_days_ago: 14,
        delivery_offset_days: Some(-3),
        customer: "Valeria Ortiz",
        channel: ContactChannel::Whatsapp,
        vehicle: ("Toyota", "RAV4 Hybrid", 2025),
        sentiment: Some((Sentiment::Negative, 1)),
    },
    SampleOrder {
        id: "DEMO-002",
        status: OrderStatus::FinancingPending,
        financing: FinancingStatus::Pending,
        amount: 96_500.0,
        age_days: 9,
        idle_days: 5,
        last_contact_days_ago: 11,
        delivery_offset_days: Some(10),
        customer: "Marcos Ibarra",
        channel: ContactChannel::Call,
        vehicle: ("Nissan", "Kicks", 2024),
        sentiment: Some((Sentiment::Neutral, 2)),
    },
    SampleOrder {
        id: "DEMO-003",
        status: OrderStatus::ReadyForDelivery,
        financing: FinancingStatus::Approved,
        amount: 142_000.0,
        age_days: 30,
        idle_days: 1,
        last_contact_days_ago: 1,
        delivery_offset_days: Some(2),
        customer: "Renata Salas",
        channel: ContactChannel::Whatsapp,
        vehicle: ("Mazda", "CX-30", 2025),
        sentiment: Some((Sentiment::Positive, 1)),
    },
    SampleOrder {
        id: "DEMO-004",
        status: OrderStatus::New,
        financing: FinancingStatus::Cash,
        amount: 38_900.0,
        age_days: 1,
        idle_days: 1,
        last_contact_days_ago: 1,
        delivery_offset_days: None,
        customer: "Diego Fuentes",
        channel: ContactChannel::Sms,
        vehicle: ("Kia", "Rio", 2024),
        sentiment: None,
    },
    SampleOrder {
        id: "DEMO-005",
        status: OrderStatus::Negotiating,
        financing: FinancingStatus::Cash,
        amount: 415_000.0,
        age_days: 6,
        idle_days: 2,
        last_contact_days_ago: 5,
        delivery_offset_days: Some(20),
        customer: "Andrea Beltran",
        channel: ContactChannel::Email,
        vehicle: ("BMW", "X5", 2025),
        sentiment: Some((Sentiment::Positive, 5)),
    },
    SampleOrder {
        id: "DEMO-006",
        status: OrderStatus::Delivered,
        financing: FinancingStatus::Approved,
        amount: 120_000.0,
        age_days: 45,
        idle_days: 3,
        last_contact_days_ago: 3,
        delivery_offset_days: Some(-3),
        customer: "Tomas Rivera",
        channel: ContactChannel::Call,
        vehicle: ("Honda", "CR-V", 2024),
        sentiment: Some((Sentiment::Positive, 3)),
    },
];

/// Small order book positioned relative to `now` so the demo always shows live signals.
pub(crate) fn sample_orders(now: DateTime<Utc>) -> Vec<Order> {
    SAMPLE_BOOK
        .iter()
        .map(|sample| {
            let (make, model, year) = sample.vehicle;
            let activities = sample
                .sentiment
                .map(|(sentiment, days_ago)| Activity {
                    id: format!("{}-act-1", sample.id),
                    kind: ActivityKind::Call,
                    summary: format!("{} call with customer", sentiment.label()),
                    performed_at: Some(now - Duration::days(days_ago)),
                    sentiment: Some(sentiment),
                })
                .into_iter()
                .collect();

            Order {
                id: OrderId(sample.id.to_string()),
                status: sample.status,
                financing_status: sample.financing,
                total_amount: sample.amount,
                created_at: Some(now - Duration::days(sample.age_days)),
                updated_at: Some(now - Duration::days(sample.idle_days)),
                expected_delivery_date: sample
                    .delivery_offset_days
                    .map(|offset| now + Duration::days(offset)),
                last_contact_days_ago: sample.last_contact_days_ago,
                customer: Customer {
                    id: format!("{}-cust", sample.id),
                    name: sample.customer.to_string(),
                    phone: None,
                    email: None,
                    preferred_channel: sample.channel,
                },
                vehicle: Vehicle {
                    id: format!("{}-veh", sample.id),
                    make: make.to_string(),
                    model: model.to_string(),
                    year,
                    vin: None,
                },
                activities,
            }
        })
        .collect()
}
