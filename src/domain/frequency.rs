use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

use crate::utils::parse;

/// Due-date recurrence rule for a contract.
///
/// Persisted as `{ "kind": <token>, "value": <scalar or array> }`. Older
/// records stored the value as a bare number, a numeric string, or an array
/// of either; deserialization accepts all of those and normalizes through
/// the `utils::parse` fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrequencyRule {
    /// Due on fixed days of the month (1-31, clamped to each month's length).
    MonthlyDates(Vec<u32>),
    /// Due on a fixed weekday, Sunday = 0.
    WeeklyDay(u32),
    /// Due every N days after the anchor.
    IntervalDays(i64),
}

const KIND_MONTHLY: &str = "monthly_date";
const KIND_WEEKLY: &str = "weekly_day";
const KIND_INTERVAL: &str = "interval_days";

impl FrequencyRule {
    fn from_raw(raw: RawFrequency) -> Option<FrequencyRule> {
        match raw.kind.as_deref() {
            Some(KIND_MONTHLY) => Some(FrequencyRule::MonthlyDates(parse::month_days(&raw.value))),
            Some(KIND_WEEKLY) => Some(FrequencyRule::WeeklyDay(parse::weekday_or_default(
                &raw.value,
            ))),
            Some(KIND_INTERVAL) => Some(FrequencyRule::IntervalDays(parse::interval_or_default(
                &raw.value,
            ))),
            other => {
                tracing::warn!(kind = ?other, "unknown recurrence kind, contract has no due date");
                None
            }
        }
    }

    /// Presentation-ready label, e.g. "Monthly on 5, 20" or "Every 10 days".
    pub fn label(&self) -> String {
        match self {
            FrequencyRule::MonthlyDates(days) => {
                let list: Vec<String> = days.iter().map(|d| d.to_string()).collect();
                format!("Monthly on {}", list.join(", "))
            }
            FrequencyRule::WeeklyDay(day) => {
                let names = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
                let name = names.get(*day as usize).copied().unwrap_or("?");
                format!("Weekly on {}", name)
            }
            FrequencyRule::IntervalDays(days) => format!("Every {} days", days),
        }
    }
}

#[derive(serde::Deserialize)]
struct RawFrequency {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    value: Value,
}

impl Serialize for FrequencyRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FrequencyRule", 2)?;
        match self {
            FrequencyRule::MonthlyDates(days) => {
                state.serialize_field("kind", KIND_MONTHLY)?;
                state.serialize_field("value", days)?;
            }
            FrequencyRule::WeeklyDay(day) => {
                state.serialize_field("kind", KIND_WEEKLY)?;
                state.serialize_field("value", day)?;
            }
            FrequencyRule::IntervalDays(interval) => {
                state.serialize_field("kind", KIND_INTERVAL)?;
                state.serialize_field("value", interval)?;
            }
        }
        state.end()
    }
}

/// Lenient deserializer for optional frequency fields: unknown or malformed
/// rules become `None` instead of failing the whole record.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<FrequencyRule>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawFrequency>::deserialize(deserializer)?;
    Ok(raw.and_then(FrequencyRule::from_raw))
}
