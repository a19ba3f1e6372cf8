use crate::{
    convert,
    models::{Properties, SystemProperties},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single tracked event as sent to `/api/v0/event`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Event {
    #[serde(with = "convert::timestamp")]
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) session_id: String,
    pub(crate) event_name: String,
    pub(crate) system_props: SystemProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) props: Option<Properties>,
}
