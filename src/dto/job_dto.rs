use crate::models::job::{JobType, NewJob};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(rename = "type")]
    pub job_type: JobType,
}

impl From<CreateJobPayload> for NewJob {
    fn from(value: CreateJobPayload) -> Self {
        Self {
            title: value.title,
            company: value.company,
            description: value.description,
            requirements: value.requirements,
            required_skills: value.required_skills,
            job_type: value.job_type,
        }
    }
}
