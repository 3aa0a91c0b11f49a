use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::calendar::YearMonth;

/// opaque identifiers assigned by the storage collaborator; records created
/// locally (offline mode) get a generated id until the store supplies one
pub type TenantId = String;
pub type PropertyId = String;
pub type PaymentId = String;
pub type DocumentId = String;

fn local_id(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4())
}

/// paid/partial/unpaid classification for one tenant-month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// payments cover the expected rent in full
    Paid,
    /// something paid, but short of the expected rent
    Partial,
    /// nothing paid against a non-zero expectation
    Unpaid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Unpaid => "unpaid",
        };
        f.write_str(s)
    }
}

/// compliance document standing relative to its expiry date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    Valid,
    #[serde(rename = "warning")]
    ExpiringSoon,
    Expired,
}

/// a dated rate-change entry: rent effective over an inclusive date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentPeriod {
    pub start_date: NaiveDate,
    /// absent means open-ended / ongoing
    #[serde(default, deserialize_with = "empty_as_none")]
    pub end_date: Option<NaiveDate>,
    pub amount: Money,
}

impl RentPeriod {
    /// validated constructor: rejects inverted ranges and negative amounts.
    /// overlaps with other periods are allowed; resolution order decides.
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>, amount: Money) -> Result<Self> {
        if let Some(end) = end_date {
            if end < start_date {
                return Err(LedgerError::InvalidPeriodRange {
                    start: start_date,
                    end,
                });
            }
        }
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount { amount });
        }
        Ok(Self {
            start_date,
            end_date,
            amount,
        })
    }
}

/// a renter record with base rent and optional dated rate-change schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// base rent, used when no schedule period matches
    #[serde(default)]
    pub rent_amount: Money,
    #[serde(default)]
    pub rent_schedule: Vec<RentPeriod>,
    /// weak reference; may dangle after the property is deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_link: Option<String>,
}

impl Tenant {
    /// validated constructor for locally-created tenants
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        rent_amount: Money,
        property_id: Option<PropertyId>,
    ) -> Result<Self> {
        if rent_amount.is_negative() {
            return Err(LedgerError::NegativeAmount {
                amount: rent_amount,
            });
        }
        Ok(Self {
            id: local_id("local-t-"),
            name: name.into(),
            email: email.into(),
            phone: None,
            rent_amount,
            rent_schedule: Vec::new(),
            property_id,
            contract_link: None,
        })
    }
}

/// a recorded sum credited against a specific rental month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub tenant_id: TenantId,
    pub amount: Money,
    /// payment method tag, free-form ("Cash", "Bank Transfer", ...)
    #[serde(rename = "type")]
    pub method: String,
    /// the rental month this payment counts toward, independent of receipt date
    pub target_month: YearMonth,
    /// actual receipt timestamp, for ordering and display only
    pub date_received: DateTime<Utc>,
}

impl Payment {
    /// validated constructor for locally-recorded payments; stamps the
    /// receipt time from the injected clock
    pub fn new(
        tenant_id: TenantId,
        amount: Money,
        method: impl Into<String>,
        target_month: YearMonth,
        time: &SafeTimeProvider,
    ) -> Result<Self> {
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount { amount });
        }
        Ok(Self {
            id: local_id("local-p-"),
            tenant_id,
            amount,
            method: method.into(),
            target_month,
            date_received: time.now(),
        })
    }
}

/// a compliance document slot on a property (certificate, report, policy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceDocument {
    pub id: DocumentId,
    pub name: String,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub uploaded: bool,
    #[serde(default)]
    pub link: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub visible_to_tenant: bool,
}

/// a managed property with its compliance document checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub folder_link: String,
    #[serde(default)]
    pub compliance: Vec<ComplianceDocument>,
}

impl Property {
    /// locally-created property with a seeded compliance checklist
    pub fn new(
        address: impl Into<String>,
        compliance: Vec<ComplianceDocument>,
        time: &SafeTimeProvider,
    ) -> Self {
        Self {
            id: local_id("local-"),
            address: address.into(),
            created_at: Some(time.now()),
            folder_link: String::new(),
            compliance,
        }
    }
}

// the store writes absent dates as empty strings; treat "" and null as None
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
