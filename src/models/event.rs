//! Trigger payload accessors and response shapes.
//!
//! Trigger payloads are arbitrary JSON by contract, so they stay as
//! `serde_json::Value` and are inspected through the helpers here rather
//! than deserialized into a fixed shape.

use serde::Serialize;
use serde_json::Value;

/// Marker value identifying a timer-originated trigger.
pub const SCHEDULED_EVENT_SOURCE: &str = "aws.events";

/// Action value requesting an on-demand full sync.
pub const FULL_SYNC_ACTION: &str = "sync_users";

/// True if the payload carries the scheduled-event source tag.
pub fn is_scheduled_event(event: &Value) -> bool {
    event.get("source").and_then(Value::as_str) == Some(SCHEDULED_EVENT_SOURCE)
}

/// True if the payload explicitly requests a full sync.
pub fn is_full_sync_action(event: &Value) -> bool {
    event.get("action").and_then(Value::as_str) == Some(FULL_SYNC_ACTION)
}

/// Extract the user identifier from a confirmation event.
pub fn user_name(event: &Value) -> Option<&str> {
    event.get("userName").and_then(Value::as_str)
}

/// Extract the email attribute from a confirmation event.
pub fn email_attribute(event: &Value) -> Option<&str> {
    event
        .pointer("/request/userAttributes/email")
        .and_then(Value::as_str)
}

/// Response returned for scheduled or manual full-sync triggers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SyncResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl SyncResponse {
    pub fn completed() -> Self {
        Self {
            status_code: 200,
            body: "Full user sync completed successfully".to_string(),
        }
    }

    pub fn failed() -> Self {
        Self {
            status_code: 500,
            body: "Full user sync completed with errors".to_string(),
        }
    }
}
