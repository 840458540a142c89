//! Quarterly contract roll resolution.
//!
//! Index futures liquidity shifts to the next quarterly contract around the
//! third Friday of the expiring month. This module resolves which contract
//! is front month at a given instant, using the third Friday at 00:00 UTC
//! as the roll point. The real exchange roll happens in exchange-local time
//! the prior evening; the UTC-midnight simplification is intentional and
//! must not be "corrected", since downstream symbols depend on it.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

use crate::month_code::{ContractCode, MonthCode};

/// Third Friday of the given month, at 00:00 UTC.
///
/// `month` must be a valid one-based calendar month.
pub fn third_friday_utc(year: i32, month: u32) -> DateTime<Utc> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .expect("delivery months are valid calendar months");
    let days_to_friday = (Weekday::Fri.num_days_from_monday() + 7
        - first.weekday().num_days_from_monday())
        % 7;
    let third = first + Days::new(u64::from(days_to_friday) + 14);
    Utc.from_utc_datetime(&third.and_time(NaiveTime::MIN))
}

/// Resolve the active quarterly contract at a given instant.
///
/// Starting from the instant's month, advance to the next quarterly month
/// (inclusive of the current month when it is one). If the instant is on or
/// after that month's third-Friday roll point, advance one more quarter,
/// wrapping the year past December.
///
/// The comparison is `>=`: a timestamp exactly at the roll point already
/// belongs to the next contract. Total function; every input maps to a
/// valid code.
pub fn active_quarterly_at(at: DateTime<Utc>) -> ContractCode {
    let mut year = at.year();
    let mut month = at.month();

    // Quarterly delivery months are 3, 6, 9, 12.
    while month % 3 != 0 {
        month += 1;
    }

    if at >= third_friday_utc(year, month) {
        month += 3;
        if month > 12 {
            month -= 12;
            year += 1;
        }
    }

    ContractCode::new(
        MonthCode::ALL[(month - 1) as usize],
        (year.rem_euclid(10)) as u8,
    )
}

/// Active quarterly contract right now.
pub fn active_quarterly_now() -> ContractCode {
    active_quarterly_at(Utc::now())
}

/// Contract code for the instant's own calendar month, with no roll
/// handling. Not used by the quarterly roll logic; serial products
/// (monthly expiries) use it directly.
pub fn monthly_code_at(at: DateTime<Utc>) -> ContractCode {
    ContractCode::new(
        MonthCode::ALL[(at.month() - 1) as usize],
        (at.year().rem_euclid(10)) as u8,
    )
}

/// Monthly contract code right now.
pub fn monthly_code_now() -> ContractCode {
    monthly_code_at(Utc::now())
}
