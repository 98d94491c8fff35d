//! Schedule Calculator: derives a contract's next due date from its
//! recurrence rule and payment-history anchor. Pure and leaf-level; the
//! ledger engine is its only in-crate caller.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{Contract, FrequencyRule};
use crate::utils::parse::{DEFAULT_INTERVAL_DAYS, DEFAULT_WEEKDAY};

const MONTHLY_SCAN_MONTHS: u32 = 12;
const WEEKLY_SCAN_DAYS: i64 = 7;
/// Candidates past this point are treated as "never found".
const FAR_FUTURE_YEAR: i32 = 3000;

/// Computes the next due date, or `None` when the contract has no usable
/// rule or no candidate inside the scan horizon.
///
/// The result is always strictly after the anchor date. Out-of-range rule
/// values fall back to the same defaults deserialization applies, so rules
/// built in memory behave like persisted ones.
pub fn next_due_date(contract: &Contract) -> Option<NaiveDate> {
    let anchor = anchor_date(contract);
    let candidate = match contract.frequency.as_ref()? {
        FrequencyRule::MonthlyDates(days) => next_monthly(anchor, days),
        FrequencyRule::WeeklyDay(target) => next_weekly(anchor, normalize_weekday(*target)),
        FrequencyRule::IntervalDays(interval) => {
            anchor.checked_add_signed(Duration::days(normalize_interval(*interval)))
        }
    }?;
    let sentinel = NaiveDate::from_ymd_opt(FAR_FUTURE_YEAR, 1, 1).expect("valid sentinel date");
    if candidate > sentinel {
        return None;
    }
    Some(candidate)
}

/// The reference date the next due date is computed from: the last paid
/// date when one exists, otherwise the day before the loan started (so the
/// first due date may fall on the start date itself). Contracts without a
/// start date anchor at the epoch and read as always overdue.
pub fn anchor_date(contract: &Contract) -> NaiveDate {
    if let Some(last_paid) = contract.last_paid_date {
        return last_paid;
    }
    match contract.loan_start_date {
        Some(start) => start - Duration::days(1),
        None => NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date"),
    }
}

/// Scans forward month by month. The first month holding any candidate
/// strictly after the anchor wins, and the earliest candidate within that
/// month is returned. Requested days clamp to the month's length.
fn next_monthly(anchor: NaiveDate, days: &[u32]) -> Option<NaiveDate> {
    let mut year = anchor.year();
    let mut month = anchor.month();

    for _ in 0..MONTHLY_SCAN_MONTHS {
        let month_len = days_in_month(year, month);
        let best = days
            .iter()
            .filter_map(|&day| NaiveDate::from_ymd_opt(year, month, day.min(month_len)))
            .filter(|candidate| *candidate > anchor)
            .min();
        if best.is_some() {
            return best;
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    None
}

/// Scans the seven days after the anchor for the target weekday
/// (Sunday = 0). The anchor day itself never qualifies.
fn next_weekly(anchor: NaiveDate, target: u32) -> Option<NaiveDate> {
    (1..=WEEKLY_SCAN_DAYS)
        .map(|offset| anchor + Duration::days(offset))
        .find(|date| date.weekday().num_days_from_sunday() == target)
}

/// A non-positive interval would place the due date at or before the anchor.
fn normalize_interval(interval: i64) -> i64 {
    if interval > 0 {
        interval
    } else {
        DEFAULT_INTERVAL_DAYS
    }
}

fn normalize_weekday(target: u32) -> u32 {
    if target <= 6 {
        target
    } else {
        DEFAULT_WEEKDAY
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).expect("valid fallback"));
    (first_next - Duration::days(1)).day()
}
