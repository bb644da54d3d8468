pub mod mem;

use crate::error::Result;
use crate::models::activity_log::{ActivityLog, NewActivityLog};
use crate::models::application::{Application, NewApplication};
use crate::models::job::{Job, NewJob};
use crate::models::user::{NewUser, User};
use async_trait::async_trait;

pub use mem::MemStore;

/// Persistence gateway contract: CRUD-by-id plus query-by-foreign-key over
/// the four record collections. Ids are sequential integers allocated per
/// collection; list reads come back newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create_user(&self, user: NewUser) -> Result<User>;

    async fn create_job(&self, job: NewJob, created_by_id: i64) -> Result<Job>;
    async fn get_jobs(&self) -> Result<Vec<Job>>;
    async fn get_job_by_id(&self, id: i64) -> Result<Option<Job>>;

    async fn create_application(
        &self,
        application: NewApplication,
        applicant_id: i64,
    ) -> Result<Application>;
    async fn get_applications_by_applicant(&self, applicant_id: i64) -> Result<Vec<Application>>;
    async fn get_applications_by_job(&self, job_id: i64) -> Result<Vec<Application>>;
    async fn get_all_applications(&self) -> Result<Vec<Application>>;
    async fn get_application_by_id(&self, id: i64) -> Result<Option<Application>>;
    /// Persists a new status label and refreshes `updated_at`.
    async fn update_application_status(&self, id: i64, status: &str) -> Result<Application>;

    async fn create_activity_log(&self, log: NewActivityLog) -> Result<ActivityLog>;
    async fn get_activity_logs_by_application(
        &self,
        application_id: i64,
    ) -> Result<Vec<ActivityLog>>;
}
