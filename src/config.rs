use serde::{Deserialize, Serialize};

use crate::compliance::DEFAULT_EXPIRY_WARNING_DAYS;
use crate::errors::{LedgerError, Result};

/// template-service credentials for outbound email; injected by the caller,
/// never embedded. absent config routes messages to a mailto fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    pub service_id: String,
    pub payment_template_id: String,
    pub report_template_id: String,
    pub public_key: String,
}

impl EmailConfig {
    /// a receipt can only go through the template service when the service
    /// id, payment template and key are all present
    pub fn can_send_receipts(&self) -> bool {
        !self.service_id.is_empty()
            && !self.payment_template_id.is_empty()
            && !self.public_key.is_empty()
    }

    pub fn can_send_reports(&self) -> bool {
        !self.service_id.is_empty()
            && !self.report_template_id.is_empty()
            && !self.public_key.is_empty()
    }
}

/// landlord bank details quoted in rent reminder messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub account_name: String,
    pub sort_code: String,
    pub account_number: String,
}

/// one entry in the compliance document catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRequirement {
    pub id: String,
    pub name: String,
    pub mandatory: bool,
}

impl ComplianceRequirement {
    fn new(id: &str, name: &str, mandatory: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            mandatory,
        }
    }
}

/// injected configuration for the whole ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<BankDetails>,
    pub compliance_requirements: Vec<ComplianceRequirement>,
    /// documents flag this many days before expiry
    pub expiry_warning_days: i64,
    /// months shown on the default dashboard window
    pub dashboard_months: usize,
    /// months shown when full history is requested
    pub history_months: usize,
}

impl LedgerConfig {
    /// the standard UK lettings catalogue and display windows
    pub fn uk_default() -> Self {
        Self {
            email: None,
            bank: None,
            compliance_requirements: vec![
                ComplianceRequirement::new("gas", "Gas Safety Certificate", true),
                ComplianceRequirement::new("epc", "Energy Performance Certificate (EPC)", true),
                ComplianceRequirement::new(
                    "eicr",
                    "Electrical Installation Condition Report",
                    true,
                ),
                ComplianceRequirement::new("insurance", "Building Insurance", false),
                ComplianceRequirement::new("pat", "PAT Testing", false),
            ],
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
            dashboard_months: 3,
            history_months: 12,
        }
    }

    /// sanity-check injected values before use
    pub fn validate(&self) -> Result<()> {
        if self.expiry_warning_days < 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: format!(
                    "expiry_warning_days must not be negative, got {}",
                    self.expiry_warning_days
                ),
            });
        }
        if self.history_months < self.dashboard_months {
            return Err(LedgerError::InvalidConfiguration {
                message: format!(
                    "history_months ({}) must cover dashboard_months ({})",
                    self.history_months, self.dashboard_months
                ),
            });
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::uk_default()
    }
}
