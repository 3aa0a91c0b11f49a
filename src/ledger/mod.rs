pub mod arrears;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::calendar::{YearMonth, FAR_FUTURE};
use crate::decimal::Money;
use crate::schedule::resolve_rent;
use crate::types::{Payment, PaymentStatus, Tenant};

pub use arrears::{portfolio_arrears, tenant_arrears, PortfolioArrears, TenantArrears};

/// derived paid/due/remaining figures for one tenant-month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatus {
    pub month: YearMonth,
    pub paid: Money,
    pub expected_rent: Money,
    pub remaining: Money,
    pub status: PaymentStatus,
}

/// aggregate a tenant's payments for one calendar month.
///
/// only payments carrying the tenant's id and the target month label are
/// summed; the caller may pass the full payment set unfiltered. duplicate
/// payment records must be deduplicated by the caller. expected rent is
/// resolved at the month's mid-month representative date, so a schedule
/// change effective on or before the 15th governs the whole month.
pub fn monthly_status(
    tenant: &Tenant,
    payments: &[Payment],
    target_month: YearMonth,
) -> MonthlyStatus {
    let paid: Money = payments
        .iter()
        .filter(|p| p.tenant_id == tenant.id && p.target_month == target_month)
        .map(|p| p.amount)
        .sum();

    let expected_rent = resolve_rent(tenant, target_month.mid_month());
    let remaining = expected_rent.saturating_sub(paid);

    let status = if paid >= expected_rent {
        PaymentStatus::Paid
    } else if paid.is_zero() {
        PaymentStatus::Unpaid
    } else {
        PaymentStatus::Partial
    };

    MonthlyStatus {
        month: target_month,
        paid,
        expected_rent,
        remaining,
        status,
    }
}

/// the `count` most recent calendar months, current month first.
///
/// "now" is captured once from the injected clock and anchored to day 1 of
/// the month before subtracting, so end-of-month dates cannot roll over into
/// the wrong month. duplicate labels are dropped if they ever occur.
pub fn recent_months(count: usize, time: &SafeTimeProvider) -> Vec<YearMonth> {
    let anchor = YearMonth::containing(time.now().date_naive());
    let mut months: Vec<YearMonth> = Vec::with_capacity(count);

    for back in 0..count {
        if let Some(month) = anchor.minus_months(back as u32) {
            if !months.contains(&month) {
                months.push(month);
            }
        }
    }

    months
}

/// the next rent due date: the first day of the following month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentDue {
    pub due_date: NaiveDate,
    pub days_until: i64,
}

pub fn next_rent_due(time: &SafeTimeProvider) -> RentDue {
    let today = time.now().date_naive();
    let due_date = YearMonth::containing(today)
        .last_day()
        .succ_opt()
        .unwrap_or(FAR_FUTURE);

    RentDue {
        due_date,
        days_until: (due_date - today).num_days(),
    }
}
