use chrono::NaiveDate;

use crate::calendar::FAR_FUTURE;
use crate::decimal::Money;
use crate::types::{RentPeriod, Tenant};

/// rent in effect for a tenant on a calendar date.
///
/// with no schedule the base `rent_amount` applies. otherwise periods are
/// ordered by start date descending and the first whose inclusive range
/// contains `date` wins, so the most recent amendment takes precedence when
/// periods overlap. a date before every period falls back to the base rent.
pub fn resolve_rent(tenant: &Tenant, date: NaiveDate) -> Money {
    if tenant.rent_schedule.is_empty() {
        return tenant.rent_amount;
    }

    let mut periods: Vec<&RentPeriod> = tenant.rent_schedule.iter().collect();
    periods.sort_by(|a, b| b.start_date.cmp(&a.start_date));

    for period in periods {
        let end = period.end_date.unwrap_or(FAR_FUTURE);
        if date >= period.start_date && date <= end {
            return period.amount;
        }
    }

    tenant.rent_amount
}
