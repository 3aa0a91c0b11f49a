use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::compliance::ComplianceAlert;
use crate::config::{BankDetails, EmailConfig};
use crate::calendar::MonthDateRange;
use crate::decimal::Money;
use crate::ledger::MonthlyStatus;
use crate::types::{ComplianceStatus, Payment, Tenant};

/// a composed outbound email; dispatch belongs to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub to: String,
    pub to_name: String,
    pub subject: String,
    pub body: String,
}

/// which template a message should go out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    PaymentReceipt,
    ComplianceReport,
}

/// how a composed message should leave the system: through the configured
/// template service, or as a pre-encoded mailto link the caller can open
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchRoute {
    Template {
        service_id: String,
        template_id: String,
        public_key: String,
    },
    Mailto {
        href: String,
    },
}

/// pick the dispatch route for a message. falls back to a mailto link when
/// the template service is not (or only partially) configured.
pub fn route_for(
    email: Option<&EmailConfig>,
    kind: MessageKind,
    message: &EmailMessage,
) -> DispatchRoute {
    if let Some(config) = email {
        let (ready, template_id) = match kind {
            MessageKind::PaymentReceipt => {
                (config.can_send_receipts(), &config.payment_template_id)
            }
            MessageKind::ComplianceReport => {
                (config.can_send_reports(), &config.report_template_id)
            }
        };
        if ready {
            return DispatchRoute::Template {
                service_id: config.service_id.clone(),
                template_id: template_id.clone(),
                public_key: config.public_key.clone(),
            };
        }
    }

    DispatchRoute::Mailto {
        href: mailto_href(message),
    }
}

/// receipt for one recorded payment, quoting the month's running totals
pub fn payment_receipt(
    tenant: &Tenant,
    payment: &Payment,
    status: &MonthlyStatus,
    range: &MonthDateRange,
    signature: &str,
) -> EmailMessage {
    let subject = format!("Rent Payment Receipt - {} ({})", tenant.name, range.label);
    let body = format!(
        "Rent Payment received for {} to {} of £{}.\n\n\
         Total Paid for {}: £{}\n\
         Payment remaining for this month: £{}.\n\n\
         Kind regards,\n{}",
        range.formatted_start(),
        range.formatted_end(),
        payment.amount,
        range.label,
        status.paid,
        status.remaining,
        signature,
    );

    EmailMessage {
        to: tenant.email.clone(),
        to_name: tenant.name.clone(),
        subject,
        body,
    }
}

/// expiry report for the landlord, one line per alert
pub fn compliance_report(to: &str, alerts: &[ComplianceAlert]) -> EmailMessage {
    let lines: Vec<String> = alerts
        .iter()
        .map(|alert| {
            format!(
                "- [{}] {}: {}",
                severity_tag(alert.severity),
                alert.property_address,
                alert.message
            )
        })
        .collect();

    EmailMessage {
        to: to.to_string(),
        to_name: String::new(),
        subject: "Compliance Document Expiry Report".to_string(),
        body: format!(
            "Here is your compliance document status report:\n\n{}",
            lines.join("\n")
        ),
    }
}

fn severity_tag(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Valid => "VALID",
        ComplianceStatus::ExpiringSoon => "WARNING",
        ComplianceStatus::Expired => "EXPIRED",
    }
}

/// how a tenant is asked to settle any amount beyond the transfer requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainderPreference {
    Cash,
    BankTransfer,
}

/// rent reminder text for WhatsApp/SMS, quoting the landlord's bank details
pub fn rent_reminder(
    transfer_amount: Money,
    expected_rent: Money,
    preference: RemainderPreference,
    bank: &BankDetails,
) -> String {
    let mut message = format!(
        "Your rent is due. Please send a payment via bank transfer of £{} to the following account:\n\
         {}\nSort Code: {}\nAccount: {}",
        transfer_amount, bank.account_name, bank.sort_code, bank.account_number,
    );

    let remainder = expected_rent.saturating_sub(transfer_amount);
    if remainder.is_positive() {
        match preference {
            RemainderPreference::Cash => {
                message.push_str(&format!("\n\nPlease pay the remaining £{remainder} in cash."));
            }
            RemainderPreference::BankTransfer => {
                message.push_str(&format!(
                    "\n\nPlease pay the remaining £{remainder} via bank transfer at a different date."
                ));
            }
        }
    }

    message
}

/// normalize a phone number for wa.me: digits only, leading 0 swapped for
/// the UK country code, bare national numbers prefixed with 44
pub fn normalize_uk_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    if let Some(rest) = digits.strip_prefix('0') {
        return Some(format!("44{rest}"));
    }
    if digits.starts_with("44") {
        return Some(digits);
    }
    Some(format!("44{digits}"))
}

/// wa.me deep link with the reminder text pre-filled
pub fn whatsapp_link(phone: &str, text: &str) -> Option<String> {
    let phone = normalize_uk_phone(phone)?;
    Some(format!("https://wa.me/{phone}?text={}", encode_component(text)))
}

/// sms: link for the platform's default messaging app
pub fn sms_link(phone: &str, text: &str) -> Option<String> {
    let trimmed = phone.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("sms:{trimmed}?body={}", encode_component(text)))
}

/// mailto: link carrying the full message, for the no-template fallback
pub fn mailto_href(message: &EmailMessage) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        message.to,
        encode_component(&message.subject),
        encode_component(&message.body),
    )
}

/// stored links may be missing a scheme; default them to https
pub fn ensure_protocol(link: &str) -> String {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return trimmed.to_string();
    }
    format!("https://{trimmed}")
}

// percent-encode a query component; form encoding turns spaces into '+',
// which mail clients render literally, so swap them for %20
fn encode_component(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::{SafeTimeProvider, TimeSource};

    use crate::ledger::monthly_status;
    use crate::types::PaymentStatus;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap(),
        ))
    }

    fn tenant() -> Tenant {
        let mut tenant = Tenant::new(
            "Jane Doe",
            "jane@example.com",
            Money::from_major(1000),
            None,
        )
        .unwrap();
        tenant.phone = Some("07700 900123".to_string());
        tenant
    }

    fn bank() -> BankDetails {
        BankDetails {
            account_name: "A Landlord".to_string(),
            sort_code: "20-00-00".to_string(),
            account_number: "12345678".to_string(),
        }
    }

    #[test]
    fn test_payment_receipt_wording() {
        let tenant = tenant();
        let payment = Payment::new(
            tenant.id.clone(),
            Money::from_major(700),
            "Bank Transfer",
            "2024-06".parse().unwrap(),
            &test_time(),
        )
        .unwrap();
        let status = monthly_status(&tenant, std::slice::from_ref(&payment), payment.target_month);
        assert_eq!(status.status, PaymentStatus::Partial);

        let range = payment.target_month.date_range();
        let message = payment_receipt(&tenant, &payment, &status, &range, "A Landlord");

        assert_eq!(message.to, "jane@example.com");
        assert_eq!(
            message.subject,
            "Rent Payment Receipt - Jane Doe (June 2024)"
        );
        assert!(message
            .body
            .contains("Rent Payment received for 01/06/2024 to 30/06/2024 of £700"));
        assert!(message.body.contains("Total Paid for June 2024: £700"));
        assert!(message.body.contains("Payment remaining for this month: £300."));
        assert!(message.body.ends_with("Kind regards,\nA Landlord"));
    }

    #[test]
    fn test_compliance_report_lines() {
        let alerts = vec![
            ComplianceAlert {
                severity: ComplianceStatus::Expired,
                message: "EPC expired on 01/05/2024".to_string(),
                property_address: "12 High Street".to_string(),
                document_name: "EPC".to_string(),
            },
            ComplianceAlert {
                severity: ComplianceStatus::ExpiringSoon,
                message: "EICR expires in 14 days".to_string(),
                property_address: "5 Mill Lane".to_string(),
                document_name: "EICR".to_string(),
            },
        ];

        let message = compliance_report("landlord@example.com", &alerts);
        assert_eq!(message.subject, "Compliance Document Expiry Report");
        assert!(message
            .body
            .contains("- [EXPIRED] 12 High Street: EPC expired on 01/05/2024"));
        assert!(message
            .body
            .contains("- [WARNING] 5 Mill Lane: EICR expires in 14 days"));
    }

    #[test]
    fn test_rent_reminder_remainder_options() {
        let full = rent_reminder(
            Money::from_major(1000),
            Money::from_major(1000),
            RemainderPreference::Cash,
            &bank(),
        );
        assert!(full.contains("bank transfer of £1000"));
        assert!(full.contains("Sort Code: 20-00-00"));
        assert!(!full.contains("remaining"));

        let split_cash = rent_reminder(
            Money::from_major(600),
            Money::from_major(1000),
            RemainderPreference::Cash,
            &bank(),
        );
        assert!(split_cash.contains("Please pay the remaining £400 in cash."));

        let split_transfer = rent_reminder(
            Money::from_major(600),
            Money::from_major(1000),
            RemainderPreference::BankTransfer,
            &bank(),
        );
        assert!(split_transfer
            .contains("Please pay the remaining £400 via bank transfer at a different date."));
    }

    #[test]
    fn test_normalize_uk_phone() {
        assert_eq!(
            normalize_uk_phone("07700 900123"),
            Some("447700900123".to_string())
        );
        assert_eq!(
            normalize_uk_phone("+44 7700 900123"),
            Some("447700900123".to_string())
        );
        assert_eq!(
            normalize_uk_phone("7700900123"),
            Some("447700900123".to_string())
        );
        assert_eq!(normalize_uk_phone("no digits"), None);
    }

    #[test]
    fn test_whatsapp_link_encodes_text() {
        let link = whatsapp_link("07700 900123", "Your rent is due").unwrap();
        assert_eq!(
            link,
            "https://wa.me/447700900123?text=Your%20rent%20is%20due"
        );
        assert_eq!(whatsapp_link("", "hi"), None);
    }

    #[test]
    fn test_mailto_href_encoding() {
        let message = EmailMessage {
            to: "jane@example.com".to_string(),
            to_name: "Jane".to_string(),
            subject: "Receipt & thanks".to_string(),
            body: "Line one\nLine two + extras".to_string(),
        };
        let href = mailto_href(&message);
        assert!(href.starts_with("mailto:jane@example.com?subject="));
        assert!(href.contains("Receipt%20%26%20thanks"));
        assert!(href.contains("Line%20one%0ALine%20two%20%2B%20extras"));
    }

    #[test]
    fn test_route_falls_back_to_mailto() {
        let message = EmailMessage {
            to: "jane@example.com".to_string(),
            to_name: "Jane".to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
        };

        match route_for(None, MessageKind::PaymentReceipt, &message) {
            DispatchRoute::Mailto { href } => assert!(href.starts_with("mailto:")),
            other => panic!("expected mailto fallback, got {other:?}"),
        }

        let config = EmailConfig {
            service_id: "service_1".to_string(),
            payment_template_id: "template_pay".to_string(),
            report_template_id: String::new(),
            public_key: "key".to_string(),
        };
        match route_for(Some(&config), MessageKind::PaymentReceipt, &message) {
            DispatchRoute::Template { template_id, .. } => {
                assert_eq!(template_id, "template_pay")
            }
            other => panic!("expected template route, got {other:?}"),
        }
        // report template missing, so reports still fall back
        match route_for(Some(&config), MessageKind::ComplianceReport, &message) {
            DispatchRoute::Mailto { .. } => {}
            other => panic!("expected mailto fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_protocol() {
        assert_eq!(
            ensure_protocol("example.com/docs"),
            "https://example.com/docs"
        );
        assert_eq!(
            ensure_protocol("  https://example.com  "),
            "https://example.com"
        );
        assert_eq!(ensure_protocol("http://example.com"), "http://example.com");
        assert_eq!(ensure_protocol(""), "");
    }
}
