use super::views::PriorityList;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum PriorityExportError {
    #[error("failed to write priority export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode priority CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode priority JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct PriorityRow<'a> {
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Order ID")]
    order_id: &'a str,
    #[serde(rename = "Customer")]
    customer: &'a str,
    #[serde(rename = "Vehicle")]
    vehicle: String,
    #[serde(rename = "Status")]
    status: &'static str,
    #[serde(rename = "Risk Score")]
    risk_score: u8,
    #[serde(rename = "Risk Level")]
    risk_level: &'static str,
    #[serde(rename = "Fulfillment Probability")]
    fulfillment_probability: u8,
    #[serde(rename = "Top Factor")]
    top_factor: &'a str,
    #[serde(rename = "Next Action")]
    action: &'a str,
    #[serde(rename = "Channel")]
    channel: &'static str,
    #[serde(rename = "Urgency")]
    urgency: &'static str,
    #[serde(rename = "Order Value")]
    total_amount: f64,
}

/// Writes one CSV row per priority item, in rank order, with a header row.
pub fn write_priority_csv<W: Write>(
    list: &PriorityList<'_>,
    writer: W,
) -> Result<(), PriorityExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for item in &list.items {
        let order = item.order.order;
        csv_writer.serialize(PriorityRow {
            rank: item.rank,
            order_id: &order.id.0,
            customer: &order.customer.name,
            vehicle: order.vehicle.display_name(),
            status: order.status.label(),
            risk_score: item.risk_score,
            risk_level: item.risk_level.label(),
            fulfillment_probability: item.fulfillment_probability(),
            top_factor: item
                .risk_factors
                .first()
                .map(|factor| factor.description.as_str())
                .unwrap_or(""),
            action: &item.next_best_action.action,
            channel: item.next_best_action.channel.label(),
            urgency: item.next_best_action.urgency.label(),
            total_amount: order.total_amount,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_priority_csv_to_path<P: AsRef<Path>>(
    list: &PriorityList<'_>,
    path: P,
) -> Result<(), PriorityExportError> {
    let file = std::fs::File::create(path)?;
    write_priority_csv(list, file)
}

/// Pretty-printed JSON of the whole list, newline terminated.
pub fn write_priority_json<W: Write>(
    list: &PriorityList<'_>,
    mut writer: W,
) -> Result<(), PriorityExportError> {
    serde_json::to_writer_pretty(&mut writer, list)?;
    writeln!(writer)?;
    Ok(())
}
