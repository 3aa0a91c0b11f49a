use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::YearMonth;
use crate::compliance::{scan_properties, ComplianceAlert};
use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::ledger::{
    monthly_status, next_rent_due, portfolio_arrears, recent_months, MonthlyStatus,
    PortfolioArrears, RentDue,
};
use crate::schedule::resolve_rent;
use crate::types::{Payment, Property, Tenant};

/// an in-memory snapshot of the records streamed in by the storage
/// collaborator. the ledger never mutates it; every derivation reads the
/// snapshot and returns plain values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl PortfolioSnapshot {
    pub fn new(properties: Vec<Property>, tenants: Vec<Tenant>, payments: Vec<Payment>) -> Self {
        Self {
            properties,
            tenants,
            payments,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn tenant(&self, id: &str) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.id == id)
    }

    pub fn property(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// the property a tenant lives at; `None` when the reference dangles
    pub fn property_of(&self, tenant: &Tenant) -> Option<&Property> {
        tenant
            .property_id
            .as_deref()
            .and_then(|id| self.property(id))
    }

    pub fn tenants_at(&self, property_id: &str) -> Vec<&Tenant> {
        self.tenants
            .iter()
            .filter(|t| t.property_id.as_deref() == Some(property_id))
            .collect()
    }

    /// a tenant's payments, most recent receipt first
    pub fn tenant_payments(&self, tenant_id: &str) -> Vec<&Payment> {
        let mut payments: Vec<&Payment> = self
            .payments
            .iter()
            .filter(|p| p.tenant_id == tenant_id)
            .collect();
        payments.sort_by(|a, b| b.date_received.cmp(&a.date_received));
        payments
    }

    pub fn monthly_status_for(&self, tenant_id: &str, month: YearMonth) -> Option<MonthlyStatus> {
        self.tenant(tenant_id)
            .map(|tenant| monthly_status(tenant, &self.payments, month))
    }

    /// rent currently in effect for a tenant
    pub fn current_rent(&self, tenant_id: &str, time: &SafeTimeProvider) -> Option<Money> {
        self.tenant(tenant_id)
            .map(|tenant| resolve_rent(tenant, time.now().date_naive()))
    }

    /// total rent currently in effect across the roster
    pub fn rent_roll(&self, time: &SafeTimeProvider) -> Money {
        let today = time.now().date_naive();
        self.tenants
            .iter()
            .map(|tenant| resolve_rent(tenant, today))
            .sum()
    }
}

/// serializable read model for the landlord dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub months: Vec<YearMonth>,
    pub arrears: PortfolioArrears,
    pub compliance_alerts: Vec<ComplianceAlert>,
    pub rent_roll: Money,
    pub next_due: RentDue,
    pub generated_at: DateTime<Utc>,
}

impl DashboardView {
    /// derive the dashboard from a snapshot at the clock's current instant
    pub fn build(
        snapshot: &PortfolioSnapshot,
        time: &SafeTimeProvider,
        config: &LedgerConfig,
    ) -> Self {
        let months = recent_months(config.dashboard_months, time);
        let arrears = portfolio_arrears(&snapshot.tenants, &snapshot.payments, &months);
        let compliance_alerts = scan_properties(
            &snapshot.properties,
            time.now().date_naive(),
            config.expiry_warning_days,
        );
        let rent_roll = snapshot.rent_roll(time);

        debug!(
            tenants = snapshot.tenants.len(),
            properties = snapshot.properties.len(),
            alerts = compliance_alerts.len(),
            %rent_roll,
            "dashboard view built"
        );

        Self {
            months,
            arrears,
            compliance_alerts,
            rent_roll,
            next_due: next_rent_due(time),
            generated_at: time.now(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
