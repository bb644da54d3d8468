use crate::error::{Error, Result};
use crate::models::activity_log::{ActivityLog, NewActivityLog};
use crate::models::application::{Application, NewApplication};
use crate::models::job::{Job, NewJob};
use crate::models::status::ApplicationStatus;
use crate::models::user::{NewUser, User};
use crate::storage::Storage;
use crate::utils::time::now;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

const USERS_SEQ: &str = "users";
const JOBS_SEQ: &str = "jobs";
const APPLICATIONS_SEQ: &str = "applications";
const ACTIVITY_LOGS_SEQ: &str = "activitylogs";

#[derive(Debug, Default)]
struct Collections {
    counters: HashMap<&'static str, i64>,
    users: BTreeMap<i64, User>,
    jobs: BTreeMap<i64, Job>,
    applications: BTreeMap<i64, Application>,
    activity_logs: BTreeMap<i64, ActivityLog>,
}

impl Collections {
    /// Atomic increment-and-fetch against the per-collection counter record.
    /// Callers hold the store's write lock, so no retry loop is needed.
    fn next_seq(&mut self, name: &'static str) -> i64 {
        let seq = self.counters.entry(name).or_insert(0);
        *seq += 1;
        *seq
    }
}

/// In-process document store backing the persistence gateway. Collections are
/// created exactly once here; repeated bootstrap of the process state is a
/// no-op by construction.
#[derive(Debug, Default)]
pub struct MemStore {
    inner: RwLock<Collections>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn created_desc<T>(mut items: Vec<T>, key: impl Fn(&T) -> (DateTime<Utc>, i64)) -> Vec<T> {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

#[async_trait]
impl Storage for MemStore {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(Error::BadRequest("Email already exists".to_string()));
        }
        let id = inner.next_seq(USERS_SEQ);
        let record = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            role: user.role,
            created_at: now(),
        };
        inner.users.insert(id, record.clone());
        Ok(record)
    }

    async fn create_job(&self, job: NewJob, created_by_id: i64) -> Result<Job> {
        let mut inner = self.inner.write().await;
        let id = inner.next_seq(JOBS_SEQ);
        let record = Job {
            id,
            title: job.title,
            company: job.company,
            description: job.description,
            requirements: job.requirements,
            required_skills: job.required_skills,
            job_type: job.job_type,
            created_by_id,
            created_at: now(),
        };
        inner.jobs.insert(id, record.clone());
        Ok(record)
    }

    async fn get_jobs(&self) -> Result<Vec<Job>> {
        let inner = self.inner.read().await;
        Ok(created_desc(
            inner.jobs.values().cloned().collect(),
            |j: &Job| (j.created_at, j.id),
        ))
    }

    async fn get_job_by_id(&self, id: i64) -> Result<Option<Job>> {
        let inner = self.inner.read().await;
        Ok(inner.jobs.get(&id).cloned())
    }

    async fn create_application(
        &self,
        application: NewApplication,
        applicant_id: i64,
    ) -> Result<Application> {
        let mut inner = self.inner.write().await;
        let id = inner.next_seq(APPLICATIONS_SEQ);
        let created_at = now();
        let record = Application {
            id,
            job_id: application.job_id,
            applicant_id,
            status: ApplicationStatus::Applied.as_str().to_string(),
            name: application.name,
            email: application.email,
            phone: application.phone,
            location: application.location,
            cover_letter: application.cover_letter,
            having_skills: application.having_skills,
            resume_url: application.resume_url,
            created_at,
            updated_at: created_at,
        };
        inner.applications.insert(id, record.clone());
        Ok(record)
    }

    async fn get_applications_by_applicant(&self, applicant_id: i64) -> Result<Vec<Application>> {
        let inner = self.inner.read().await;
        Ok(created_desc(
            inner
                .applications
                .values()
                .filter(|a| a.applicant_id == applicant_id)
                .cloned()
                .collect(),
            |a: &Application| (a.created_at, a.id),
        ))
    }

    async fn get_applications_by_job(&self, job_id: i64) -> Result<Vec<Application>> {
        let inner = self.inner.read().await;
        Ok(created_desc(
            inner
                .applications
                .values()
                .filter(|a| a.job_id == job_id)
                .cloned()
                .collect(),
            |a: &Application| (a.created_at, a.id),
        ))
    }

    async fn get_all_applications(&self) -> Result<Vec<Application>> {
        let inner = self.inner.read().await;
        Ok(created_desc(
            inner.applications.values().cloned().collect(),
            |a: &Application| (a.created_at, a.id),
        ))
    }

    async fn get_application_by_id(&self, id: i64) -> Result<Option<Application>> {
        let inner = self.inner.read().await;
        Ok(inner.applications.get(&id).cloned())
    }

    async fn update_application_status(&self, id: i64, status: &str) -> Result<Application> {
        let mut inner = self.inner.write().await;
        let record = inner
            .applications
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        record.status = status.to_string();
        record.updated_at = now();
        Ok(record.clone())
    }

    async fn create_activity_log(&self, log: NewActivityLog) -> Result<ActivityLog> {
        let mut inner = self.inner.write().await;
        let id = inner.next_seq(ACTIVITY_LOGS_SEQ);
        let record = ActivityLog {
            id,
            application_id: log.application_id,
            action: log.action,
            previous_status: log.previous_status,
            new_status: log.new_status,
            comment: log.comment,
            updated_by_id: log.updated_by_id,
            is_automated: log.is_automated,
            created_at: now(),
        };
        inner.activity_logs.insert(id, record.clone());
        Ok(record)
    }

    async fn get_activity_logs_by_application(
        &self,
        application_id: i64,
    ) -> Result<Vec<ActivityLog>> {
        let inner = self.inner.read().await;
        Ok(created_desc(
            inner
                .activity_logs
                .values()
                .filter(|l| l.application_id == application_id)
                .cloned()
                .collect(),
            |l: &ActivityLog| (l.created_at, l.id),
        ))
    }
}
