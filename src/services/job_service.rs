use crate::error::{Error, Result};
use crate::models::job::{Job, NewJob};
use crate::storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn Storage>,
}

impl JobService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub async fn create(&self, job: NewJob, created_by_id: i64) -> Result<Job> {
        let job = self.store.create_job(job, created_by_id).await?;
        tracing::info!(job_id = job.id, title = %job.title, "job posted");
        Ok(job)
    }

    pub async fn list(&self) -> Result<Vec<Job>> {
        self.store.get_jobs().await
    }

    pub async fn get(&self, id: i64) -> Result<Job> {
        self.find(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn find(&self, id: i64) -> Result<Option<Job>> {
        self.store.get_job_by_id(id).await
    }
}
