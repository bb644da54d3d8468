use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::models::job::{Job, JobType};
use crate::models::status::ApplicationStatus;
use crate::models::user::User;
use crate::services::application_service::ApplicationService;
use crate::services::skills_match::{is_ready_for_review, match_counts, match_rate};
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationItemError {
    pub application_id: i64,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationOutcome {
    pub processed: Vec<Application>,
    pub errors: Vec<AutomationItemError>,
}

impl AutomationOutcome {
    pub fn message(&self) -> String {
        let mut message = format!("Processed {} applications", self.processed.len());
        if !self.errors.is_empty() {
            message.push_str(&format!(", {} errors", self.errors.len()));
        }
        message
    }
}

/// Batch engine behind the Bot Mimic role. Walks a snapshot of all
/// applications, advances technical ones along the
/// Applied -> Reviewed -> Interview -> Offer chain, and records every
/// deliberation through the state machine, including the ones that hold an
/// application in place.
#[derive(Clone)]
pub struct AutomationService {
    store: Arc<dyn Storage>,
    applications: ApplicationService,
}

impl AutomationService {
    pub fn new(store: Arc<dyn Storage>, applications: ApplicationService) -> Self {
        Self {
            store,
            applications,
        }
    }

    /// Runs one automation batch. Per-item failures are collected rather than
    /// aborting the batch; `processed` keeps the snapshot's iteration order
    /// and contains only applications whose status actually changed.
    pub async fn run(&self, actor: &User) -> Result<AutomationOutcome> {
        let applications = self.store.get_all_applications().await?;
        let mut outcome = AutomationOutcome::default();

        for application in applications {
            match self.process_one(&application, actor).await {
                Ok(Some(updated)) => outcome.processed.push(updated),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(
                        application_id = application.id,
                        error = %err,
                        "automation item failed"
                    );
                    outcome.errors.push(AutomationItemError {
                        application_id: application.id,
                        error: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            processed = outcome.processed.len(),
            errors = outcome.errors.len(),
            "automation batch finished"
        );
        Ok(outcome)
    }

    /// Returns `Ok(Some(updated))` when the application moved, `Ok(None)` when
    /// it was skipped or held in place.
    async fn process_one(
        &self,
        application: &Application,
        actor: &User,
    ) -> Result<Option<Application>> {
        let job = self
            .store
            .get_job_by_id(application.job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        if job.job_type != JobType::Technical {
            return Ok(None);
        }

        let current = ApplicationStatus::from_label(&application.status);
        let decision = match current {
            Some(ApplicationStatus::Applied) => Some(evaluate_applied(&job, application)),
            Some(from @ ApplicationStatus::Reviewed) => {
                Some(advance(from, ApplicationStatus::Interview))
            }
            Some(from @ ApplicationStatus::Interview) => {
                Some(advance(from, ApplicationStatus::Offer))
            }
            // Offer, Rejected and unrecognized labels are left alone.
            _ => None,
        };

        let Some((target, comment)) = decision else {
            return Ok(None);
        };

        let changed = Some(target) != current;
        let updated = self
            .applications
            .transition(application.id, target.as_str(), actor, Some(comment), true)
            .await?;

        Ok(changed.then_some(updated))
    }
}

fn advance(from: ApplicationStatus, to: ApplicationStatus) -> (ApplicationStatus, String) {
    (to, format!("Automatically progressed from {} to {}", from, to))
}

fn evaluate_applied(job: &Job, application: &Application) -> (ApplicationStatus, String) {
    let required = &job.required_skills;
    let having = &application.having_skills;

    // An empty set on either side means there is nothing to compare: the
    // application progresses unconditionally rather than being held at 0%.
    if required.is_empty() || having.is_empty() {
        return (
            ApplicationStatus::Reviewed,
            "No skills data available. Automatically progressed to Reviewed.".to_string(),
        );
    }

    let (matched, total) = match_counts(required, having);
    let percentage = (match_rate(required, having) * 100.0).round() as i64;

    if is_ready_for_review(required, having) {
        (
            ApplicationStatus::Reviewed,
            format!(
                "Skills match rate: {}% ({}/{} skills matched). Automatically progressed to Reviewed.",
                percentage, matched, total
            ),
        )
    } else {
        (
            ApplicationStatus::Applied,
            format!(
                "Skills match rate: {}% ({}/{} skills matched). Below 50% threshold, keeping as Applied.",
                percentage, matched, total
            ),
        )
    }
}
