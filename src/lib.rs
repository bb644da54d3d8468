pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, automation_service::AutomationService,
    job_service::JobService, user_service::UserService,
};
use crate::storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub user_service: UserService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub automation_service: AutomationService,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        let user_service = UserService::new(store.clone());
        let job_service = JobService::new(store.clone());
        let application_service = ApplicationService::new(store.clone());
        let automation_service =
            AutomationService::new(store.clone(), application_service.clone());

        Self {
            store,
            user_service,
            job_service,
            application_service,
            automation_service,
        }
    }
}
