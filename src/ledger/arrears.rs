use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{monthly_status, MonthlyStatus};
use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::types::{Payment, Tenant, TenantId};

/// one tenant's position across a window of calendar months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantArrears {
    pub tenant_id: TenantId,
    pub tenant_name: String,
    /// per-month statuses in the same order as the requested window
    pub months: Vec<MonthlyStatus>,
    pub total_expected: Money,
    pub total_paid: Money,
    pub total_outstanding: Money,
    /// months in the window not fully covered by payments
    pub months_behind: usize,
}

impl TenantArrears {
    pub fn is_in_arrears(&self) -> bool {
        self.total_outstanding.is_positive()
    }
}

/// portfolio-wide rollup of the same window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioArrears {
    pub rows: Vec<TenantArrears>,
    pub total_expected: Money,
    pub total_paid: Money,
    pub total_outstanding: Money,
    pub tenants_in_arrears: usize,
}

/// derive one tenant's month-by-month position for a window of months
pub fn tenant_arrears(
    tenant: &Tenant,
    payments: &[Payment],
    months: &[YearMonth],
) -> TenantArrears {
    let statuses: Vec<MonthlyStatus> = months
        .iter()
        .map(|month| monthly_status(tenant, payments, *month))
        .collect();

    let total_expected: Money = statuses.iter().map(|s| s.expected_rent).sum();
    let total_paid: Money = statuses.iter().map(|s| s.paid).sum();
    let total_outstanding: Money = statuses.iter().map(|s| s.remaining).sum();
    let months_behind = statuses
        .iter()
        .filter(|s| s.remaining.is_positive())
        .count();

    TenantArrears {
        tenant_id: tenant.id.clone(),
        tenant_name: tenant.name.clone(),
        months: statuses,
        total_expected,
        total_paid,
        total_outstanding,
        months_behind,
    }
}

/// roll the whole tenant roster up over a window of months
pub fn portfolio_arrears(
    tenants: &[Tenant],
    payments: &[Payment],
    months: &[YearMonth],
) -> PortfolioArrears {
    let rows: Vec<TenantArrears> = tenants
        .iter()
        .map(|tenant| tenant_arrears(tenant, payments, months))
        .collect();

    let total_expected: Money = rows.iter().map(|r| r.total_expected).sum();
    let total_paid: Money = rows.iter().map(|r| r.total_paid).sum();
    let total_outstanding: Money = rows.iter().map(|r| r.total_outstanding).sum();
    let tenants_in_arrears = rows.iter().filter(|r| r.is_in_arrears()).count();

    debug!(
        tenants = rows.len(),
        months = months.len(),
        %total_outstanding,
        tenants_in_arrears,
        "portfolio arrears derived"
    );

    PortfolioArrears {
        rows,
        total_expected,
        total_paid,
        total_outstanding,
        tenants_in_arrears,
    }
}
