use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

const SECONDS_PER_DAY: i64 = 86_400;

/// Stable identifier assigned to a purchase order by the dealership system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    Contacted,
    Negotiating,
    FinancingPending,
    FinancingApproved,
    ReadyForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Negotiating => "Negotiating",
            Self::FinancingPending => "Financing Pending",
            Self::FinancingApproved => "Financing Approved",
            Self::ReadyForDelivery => "Ready for Delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Delivered and cancelled orders admit no further sales action.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    pub const fn vehicle_ready(self) -> bool {
        matches!(self, Self::FinancingApproved | Self::ReadyForDelivery)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancingStatus {
    Pending,
    Approved,
    Cash,
    Rejected,
}

impl FinancingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Cash => "Cash",
            Self::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactChannel {
    Call,
    Whatsapp,
    Email,
    Sms,
    InPerson,
}

impl ContactChannel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Call,
            Self::Whatsapp,
            Self::Email,
            Self::Sms,
            Self::InPerson,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Call => "Phone Call",
            Self::Whatsapp => "WhatsApp",
            Self::Email => "Email",
            Self::Sms => "SMS",
            Self::InPerson => "In Person",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Call,
    Message,
    Email,
    Visit,
    #[default]
    Note,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub preferred_channel: ContactChannel,
}

impl Customer {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
}

impl Vehicle {
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

/// Logged interaction with the customer. Only the sentiment feeds scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(default)]
    pub kind: ActivityKind,
    #[serde(default)]
    pub summary: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub performed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

/// Fully hydrated purchase order as handed over by the order system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub financing_status: FinancingStatus,
    pub total_amount: f64,
    #[serde(
        default,
        deserialize_with = "lenient_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub last_contact_days_ago: u32,
    pub customer: Customer,
    pub vehicle: Vehicle,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Order {
    /// Sentiment of the most recent timestamped activity that recorded one.
    ///
    /// Activities sharing the latest timestamp resolve to the one listed last.
    /// Activities whose timestamp could not be read are ignored.
    pub fn latest_sentiment(&self) -> Option<Sentiment> {
        self.activities
            .iter()
            .filter_map(|activity| Some((activity.performed_at?, activity.sentiment?)))
            .max_by_key(|(performed_at, _)| *performed_at)
            .map(|(_, sentiment)| sentiment)
    }

    /// `None` when the creation timestamp is missing or unreadable.
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<i64> {
        self.created_at
            .map(|created_at| whole_days_between(created_at, now))
    }

    pub fn days_since_update(&self, now: DateTime<Utc>) -> Option<i64> {
        self.updated_at
            .map(|updated_at| whole_days_between(updated_at, now))
    }

    /// Whole days the financing application has been waiting.
    ///
    /// `None` unless financing is pending and the last update time is known.
    pub fn financing_pending_days(&self, now: DateTime<Utc>) -> Option<i64> {
        if self.financing_status == FinancingStatus::Pending {
            self.days_since_update(now)
        } else {
            None
        }
    }

    pub fn delivery_overdue(&self, now: DateTime<Utc>) -> bool {
        self.expected_delivery_date
            .map(|expected| expected < now)
            .unwrap_or(false)
    }

    /// Whole days past the promised delivery date; zero when not overdue.
    pub fn days_late(&self, now: DateTime<Utc>) -> i64 {
        self.expected_delivery_date
            .filter(|expected| *expected < now)
            .map(|expected| whole_days_between(expected, now))
            .unwrap_or(0)
    }
}

/// Floored number of whole days from `from` to `to`; negative when `to` precedes `from`.
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Unreadable timestamps (wrong type, empty, unparseable) become `None` instead of failing the order.
fn lenient_optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(parse_timestamp))
}

/// Parses RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
