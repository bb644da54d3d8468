use crate::models::application::Application;
use crate::services::automation_service::{AutomationItemError, AutomationOutcome};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationResponse {
    pub message: String,
    pub processed: Vec<Application>,
    pub errors: Vec<AutomationItemError>,
}

impl From<AutomationOutcome> for AutomationResponse {
    fn from(value: AutomationOutcome) -> Self {
        Self {
            message: value.message(),
            processed: value.processed,
            errors: value.errors,
        }
    }
}
