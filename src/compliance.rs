use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ComplianceRequirement;
use crate::types::{ComplianceDocument, ComplianceStatus, Property};

/// days before expiry at which a document starts flagging
pub const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 30;

/// whole days from today until the document expires; negative once past
pub fn days_until_expiry(doc: &ComplianceDocument, today: NaiveDate) -> Option<i64> {
    doc.expiry_date.map(|expiry| (expiry - today).num_days())
}

/// classify a document against its expiry date. a document with no expiry
/// date recorded has nothing to flag and reads as valid.
pub fn document_status(
    doc: &ComplianceDocument,
    today: NaiveDate,
    warning_days: i64,
) -> ComplianceStatus {
    match days_until_expiry(doc, today) {
        None => ComplianceStatus::Valid,
        Some(days) if days < 0 => ComplianceStatus::Expired,
        Some(days) if days <= warning_days => ComplianceStatus::ExpiringSoon,
        Some(_) => ComplianceStatus::Valid,
    }
}

/// an expiring or expired document surfaced for the landlord dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceAlert {
    /// `ExpiringSoon` or `Expired`; valid documents never produce alerts
    pub severity: ComplianceStatus,
    pub message: String,
    pub property_address: String,
    pub document_name: String,
}

/// sweep every property's uploaded documents and collect expiry alerts.
/// documents that were never uploaded, or carry no expiry date, are skipped.
pub fn scan_properties(
    properties: &[Property],
    today: NaiveDate,
    warning_days: i64,
) -> Vec<ComplianceAlert> {
    let mut alerts = Vec::new();

    for property in properties {
        for doc in &property.compliance {
            if !doc.uploaded {
                continue;
            }
            let Some(days) = days_until_expiry(doc, today) else {
                continue;
            };
            let Some(expiry) = doc.expiry_date else {
                continue;
            };

            if days < 0 {
                alerts.push(ComplianceAlert {
                    severity: ComplianceStatus::Expired,
                    message: format!("{} expired on {}", doc.name, expiry.format("%d/%m/%Y")),
                    property_address: property.address.clone(),
                    document_name: doc.name.clone(),
                });
            } else if days <= warning_days {
                alerts.push(ComplianceAlert {
                    severity: ComplianceStatus::ExpiringSoon,
                    message: format!("{} expires in {} days", doc.name, days),
                    property_address: property.address.clone(),
                    document_name: doc.name.clone(),
                });
            }
        }
    }

    debug!(
        properties = properties.len(),
        alerts = alerts.len(),
        "compliance scan complete"
    );

    alerts
}

/// mandatory documents a property is still missing
pub fn missing_mandatory(property: &Property) -> Vec<&ComplianceDocument> {
    property
        .compliance
        .iter()
        .filter(|doc| doc.mandatory && !doc.uploaded)
        .collect()
}

/// fresh document checklist for a new property, seeded from the configured
/// requirement catalogue
pub fn checklist_for(requirements: &[ComplianceRequirement]) -> Vec<ComplianceDocument> {
    requirements
        .iter()
        .map(|req| ComplianceDocument {
            id: req.id.clone(),
            name: req.name.clone(),
            mandatory: req.mandatory,
            uploaded: false,
            link: String::new(),
            expiry_date: None,
            visible_to_tenant: false,
        })
        .collect()
}
