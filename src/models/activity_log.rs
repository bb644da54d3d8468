use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only audit record of a status change or automation deliberation.
/// Never mutated or deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: i64,
    pub application_id: i64,
    pub action: String,
    pub previous_status: Option<String>,
    pub new_status: Option<String>,
    pub comment: Option<String>,
    pub updated_by_id: i64,
    pub is_automated: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivityLog {
    pub application_id: i64,
    pub action: String,
    pub previous_status: Option<String>,
    pub new_status: Option<String>,
    pub comment: Option<String>,
    pub updated_by_id: i64,
    pub is_automated: bool,
}
