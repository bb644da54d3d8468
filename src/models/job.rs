use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    Technical,
    #[serde(rename = "Non-Technical")]
    NonTechnical,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Technical => "Technical",
            JobType::NonTechnical => "Non-Technical",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job posting. Read-only once created; the core only consumes its
/// `required_skills` and `job_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub required_skills: Vec<String>,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub created_by_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub required_skills: Vec<String>,
    #[serde(rename = "type")]
    pub job_type: JobType,
}
