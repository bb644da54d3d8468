pub mod application_service;
pub mod automation_service;
pub mod job_service;
pub mod skills_match;
pub mod user_service;
