pub mod activity;
pub mod calendar;
pub mod compliance;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod ledger;
pub mod notify;
pub mod schedule;
pub mod snapshot;
pub mod types;

// re-export key types
pub use activity::{ActivityEvent, ActivityKind, ActivityLog};
pub use calendar::{MonthDateRange, YearMonth, FAR_FUTURE};
pub use compliance::{
    checklist_for, days_until_expiry, document_status, missing_mandatory, scan_properties,
    ComplianceAlert, DEFAULT_EXPIRY_WARNING_DAYS,
};
pub use config::{BankDetails, ComplianceRequirement, EmailConfig, LedgerConfig};
pub use decimal::Money;
pub use errors::{LedgerError, Result};
pub use ledger::{
    monthly_status, next_rent_due, portfolio_arrears, recent_months, tenant_arrears,
    MonthlyStatus, PortfolioArrears, RentDue, TenantArrears,
};
pub use notify::{
    compliance_report, ensure_protocol, mailto_href, normalize_uk_phone, payment_receipt,
    rent_reminder, route_for, sms_link, whatsapp_link, DispatchRoute, EmailMessage, MessageKind,
    RemainderPreference,
};
pub use schedule::resolve_rent;
pub use snapshot::{DashboardView, PortfolioSnapshot};
pub use types::{
    ComplianceDocument, ComplianceStatus, DocumentId, Payment, PaymentId, PaymentStatus, Property,
    PropertyId, RentPeriod, Tenant, TenantId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
