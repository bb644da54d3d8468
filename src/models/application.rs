use crate::models::status::normalize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An application submitted by an applicant against a job posting.
///
/// `status` is stored as a label so legacy records survive reads; every read
/// and write path runs it through the status normalizer, and only the state
/// machine mutates it (together with `updated_at`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub applicant_id: i64,
    pub status: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub cover_letter: Option<String>,
    pub having_skills: Vec<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Returns the canonically-labelled view of this record.
    pub fn canonicalized(mut self) -> Self {
        self.status = normalize(&self.status).to_string();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub job_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub cover_letter: Option<String>,
    pub having_skills: Vec<String>,
    pub resume_url: Option<String>,
}

impl NewApplication {
    /// A bare application carrying only the job reference.
    pub fn for_job(job_id: i64) -> Self {
        Self {
            job_id,
            name: None,
            email: None,
            phone: None,
            location: None,
            cover_letter: None,
            having_skills: Vec::new(),
            resume_url: None,
        }
    }
}
