use crate::dto::auth_dto::UserSummary;
use crate::models::activity_log::ActivityLog;
use crate::models::application::{Application, NewApplication};
use crate::models::job::Job;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    #[validate(range(min = 1, message = "Job ID must be a positive integer"))]
    pub job_id: i64,
}

/// Detailed submission with applicant-supplied profile fields. `job_id`,
/// `name` and `email` are checked in the handler so the missing-field error
/// matches the documented message rather than a deserializer complaint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDetailedApplicationPayload {
    pub job_id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub having_skills: Vec<String>,
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: String,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: Application,
    pub job: Option<Job>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetails {
    #[serde(flatten)]
    pub application: Application,
    pub job: Option<Job>,
    pub applicant: Option<UserSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[serde(flatten)]
    pub activity: ActivityLog,
    pub updated_by: Option<UserSummary>,
}

impl CreateDetailedApplicationPayload {
    pub fn into_new_application(self, job_id: i64) -> NewApplication {
        NewApplication {
            job_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            location: self.location,
            cover_letter: self.cover_letter,
            having_skills: self.having_skills,
            resume_url: self.resume_url,
        }
    }
}
