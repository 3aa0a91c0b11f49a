use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Tenant, TenantId};

/// what a tenant did in the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Login,
    Logout,
    Navigation,
    PaymentViewed,
    DocumentViewed,
}

/// one recorded tenant action, shaped for the activity-log store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub event_id: Uuid,
    pub tenant_id: TenantId,
    pub tenant_name: String,
    pub kind: ActivityKind,
    pub details: String,
    /// supplied by the outer layer when it knows them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn new(
        tenant: &Tenant,
        kind: ActivityKind,
        details: impl Into<String>,
        time: &SafeTimeProvider,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            tenant_id: tenant.id.clone(),
            tenant_name: tenant.name.clone(),
            kind,
            details: details.into(),
            ip_address: None,
            user_agent: None,
            timestamp: time.now(),
        }
    }
}

/// collector for activity events; the outer layer drains it to storage
#[derive(Debug, Default)]
pub struct ActivityLog {
    events: Vec<ActivityEvent>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn record(&mut self, event: ActivityEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<ActivityEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[ActivityEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
