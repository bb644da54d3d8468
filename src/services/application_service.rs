use crate::error::{Error, Result};
use crate::models::activity_log::{ActivityLog, NewActivityLog};
use crate::models::application::{Application, NewApplication};
use crate::models::job::JobType;
use crate::models::status::{normalize, ApplicationStatus};
use crate::models::user::{Role, User};
use crate::storage::Storage;
use std::sync::Arc;

const ACTION_SUBMITTED: &str = "Application submitted";
const ACTION_STATUS_UPDATE: &str = "Status Update";

/// Application status state machine. Owns every mutation of an application's
/// `status`, pairing each one with an appended activity-log row.
#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn Storage>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Creates an application in its initial `Applied` state and writes the
    /// submission audit row.
    pub async fn create(&self, application: NewApplication, applicant: &User) -> Result<Application> {
        self.store
            .get_job_by_id(application.job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        let created = self
            .store
            .create_application(application, applicant.id)
            .await?;

        self.store
            .create_activity_log(NewActivityLog {
                application_id: created.id,
                action: ACTION_SUBMITTED.to_string(),
                previous_status: None,
                new_status: Some(ApplicationStatus::Applied.as_str().to_string()),
                comment: None,
                updated_by_id: applicant.id,
                is_automated: false,
            })
            .await?;

        tracing::info!(
            application_id = created.id,
            job_id = created.job_id,
            "application submitted"
        );
        Ok(created)
    }

    /// Moves an application to `target_status` on behalf of `actor`, appending
    /// the audit row. Admins may only touch Non-Technical applications and
    /// Bot Mimic only Technical ones. A call whose target equals the current
    /// status still appends its row, so automation deliberations that hold an
    /// application in place stay observable.
    pub async fn transition(
        &self,
        id: i64,
        target_status: &str,
        actor: &User,
        comment: Option<String>,
        is_automated: bool,
    ) -> Result<Application> {
        let target = normalize(target_status);
        let target = ApplicationStatus::parse(target)
            .ok_or_else(|| Error::BadRequest(format!("Invalid status: {}", target_status)))?;

        let application = self
            .store
            .get_application_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        let job = match self.store.get_job_by_id(application.job_id).await? {
            Some(job) => job,
            None => {
                // An application referencing a missing job is a data-integrity
                // fault, not a routine miss.
                tracing::error!(
                    application_id = id,
                    job_id = application.job_id,
                    "application references a missing job"
                );
                return Err(Error::NotFound("Job not found".to_string()));
            }
        };

        if actor.role == Role::Admin && job.job_type == JobType::Technical {
            return Err(Error::Forbidden(
                "Admin can only update Non-Technical applications".to_string(),
            ));
        }
        if actor.role == Role::BotMimic && job.job_type == JobType::NonTechnical {
            return Err(Error::Forbidden(
                "Bot Mimic can only update Technical applications".to_string(),
            ));
        }

        let previous_status = normalize(&application.status).to_string();
        let updated = self
            .store
            .update_application_status(id, target.as_str())
            .await?;

        self.store
            .create_activity_log(NewActivityLog {
                application_id: id,
                action: ACTION_STATUS_UPDATE.to_string(),
                previous_status: Some(previous_status.clone()),
                new_status: Some(target.as_str().to_string()),
                comment,
                updated_by_id: actor.id,
                is_automated,
            })
            .await?;

        tracing::info!(
            application_id = id,
            from = %previous_status,
            to = %target,
            automated = is_automated,
            "application status updated"
        );
        Ok(updated)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Application>> {
        Ok(self
            .store
            .get_application_by_id(id)
            .await?
            .map(Application::canonicalized))
    }

    pub async fn list_all(&self) -> Result<Vec<Application>> {
        Ok(self
            .store
            .get_all_applications()
            .await?
            .into_iter()
            .map(Application::canonicalized)
            .collect())
    }

    pub async fn list_by_applicant(&self, applicant_id: i64) -> Result<Vec<Application>> {
        Ok(self
            .store
            .get_applications_by_applicant(applicant_id)
            .await?
            .into_iter()
            .map(Application::canonicalized)
            .collect())
    }

    /// Activity rows for one application, newest first.
    pub async fn activities(&self, application_id: i64) -> Result<Vec<ActivityLog>> {
        self.store
            .get_activity_logs_by_application(application_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::NewJob;
    use crate::models::user::NewUser;
    use crate::storage::MemStore;

    struct Fixture {
        store: Arc<dyn Storage>,
        service: ApplicationService,
        applicant: User,
        admin: User,
        bot: User,
    }

    async fn fixture() -> Fixture {
        let store: Arc<dyn Storage> = Arc::new(MemStore::new());
        let service = ApplicationService::new(store.clone());
        let applicant = seed_user(&store, "applicant@example.com", Role::Applicant).await;
        let admin = seed_user(&store, "admin@example.com", Role::Admin).await;
        let bot = seed_user(&store, "bot@example.com", Role::BotMimic).await;
        Fixture {
            store,
            service,
            applicant,
            admin,
            bot,
        }
    }

    async fn seed_user(store: &Arc<dyn Storage>, email: &str, role: Role) -> User {
        store
            .create_user(NewUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
                name: email.to_string(),
                role,
            })
            .await
            .unwrap()
    }

    async fn seed_job(fx: &Fixture, job_type: JobType) -> i64 {
        fx.store
            .create_job(
                NewJob {
                    title: "Role".to_string(),
                    company: "Acme".to_string(),
                    description: None,
                    requirements: None,
                    required_skills: vec![],
                    job_type,
                },
                fx.admin.id,
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn creation_writes_the_submission_audit_row() {
        let fx = fixture().await;
        let job_id = seed_job(&fx, JobType::Technical).await;
        let app = fx
            .service
            .create(NewApplication::for_job(job_id), &fx.applicant)
            .await
            .unwrap();

        assert_eq!(app.status, "Applied");
        let logs = fx.service.activities(app.id).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action, "Application submitted");
        assert_eq!(logs[0].new_status.as_deref(), Some("Applied"));
        assert_eq!(logs[0].previous_status, None);
        assert!(!logs[0].is_automated);
    }

    #[tokio::test]
    async fn creation_against_a_missing_job_is_not_found() {
        let fx = fixture().await;
        let err = fx
            .service
            .create(NewApplication::for_job(42), &fx.applicant)
            .await;
        assert!(matches!(err, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn admin_cannot_touch_technical_applications() {
        let fx = fixture().await;
        let job_id = seed_job(&fx, JobType::Technical).await;
        let app = fx
            .service
            .create(NewApplication::for_job(job_id), &fx.applicant)
            .await
            .unwrap();

        let err = fx
            .service
            .transition(app.id, "Reviewed", &fx.admin, None, false)
            .await;
        assert!(matches!(err, Err(Error::Forbidden(_))));

        let ok = fx
            .service
            .transition(app.id, "Reviewed", &fx.bot, None, true)
            .await
            .unwrap();
        assert_eq!(ok.status, "Reviewed");
    }

    #[tokio::test]
    async fn bot_cannot_touch_non_technical_applications() {
        let fx = fixture().await;
        let job_id = seed_job(&fx, JobType::NonTechnical).await;
        let app = fx
            .service
            .create(NewApplication::for_job(job_id), &fx.applicant)
            .await
            .unwrap();

        let err = fx
            .service
            .transition(app.id, "Reviewed", &fx.bot, None, true)
            .await;
        assert!(matches!(err, Err(Error::Forbidden(_))));

        let ok = fx
            .service
            .transition(app.id, "Reviewed", &fx.admin, None, false)
            .await
            .unwrap();
        assert_eq!(ok.status, "Reviewed");
    }

    #[tokio::test]
    async fn unknown_status_is_rejected_before_any_write() {
        let fx = fixture().await;
        let job_id = seed_job(&fx, JobType::NonTechnical).await;
        let app = fx
            .service
            .create(NewApplication::for_job(job_id), &fx.applicant)
            .await
            .unwrap();

        let err = fx
            .service
            .transition(app.id, "Ghosted", &fx.admin, None, false)
            .await;
        assert!(matches!(err, Err(Error::BadRequest(_))));
        // Only the submission row exists.
        assert_eq!(fx.service.activities(app.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn legacy_alias_targets_are_normalized_before_persistence() {
        let fx = fixture().await;
        let job_id = seed_job(&fx, JobType::NonTechnical).await;
        let app = fx
            .service
            .create(NewApplication::for_job(job_id), &fx.applicant)
            .await
            .unwrap();

        let updated = fx
            .service
            .transition(app.id, "Accepted", &fx.admin, None, false)
            .await
            .unwrap();
        assert_eq!(updated.status, "Offer");

        let logs = fx.service.activities(app.id).await.unwrap();
        assert_eq!(logs[0].new_status.as_deref(), Some("Offer"));
    }

    #[tokio::test]
    async fn same_status_transition_still_appends_an_audit_row() {
        let fx = fixture().await;
        let job_id = seed_job(&fx, JobType::Technical).await;
        let app = fx
            .service
            .create(NewApplication::for_job(job_id), &fx.applicant)
            .await
            .unwrap();

        let held = fx
            .service
            .transition(
                app.id,
                "Applied",
                &fx.bot,
                Some("holding below threshold".to_string()),
                true,
            )
            .await
            .unwrap();
        assert_eq!(held.status, "Applied");

        let logs = fx.service.activities(app.id).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "Status Update");
        assert_eq!(logs[0].previous_status.as_deref(), Some("Applied"));
        assert_eq!(logs[0].new_status.as_deref(), Some("Applied"));
        assert_eq!(logs[0].comment.as_deref(), Some("holding below threshold"));
        assert!(logs[0].is_automated);
    }

    #[tokio::test]
    async fn missing_application_and_missing_job_are_not_found() {
        let fx = fixture().await;
        let err = fx
            .service
            .transition(999, "Reviewed", &fx.admin, None, false)
            .await;
        assert!(matches!(err, Err(Error::NotFound(_))));

        // Application referencing a job that does not exist: data-integrity
        // fault surfaced as NotFound.
        let orphan = fx
            .store
            .create_application(NewApplication::for_job(999), fx.applicant.id)
            .await
            .unwrap();
        let err = fx
            .service
            .transition(orphan.id, "Reviewed", &fx.admin, None, false)
            .await;
        assert!(matches!(err, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn reads_canonicalize_legacy_status_labels() {
        let fx = fixture().await;
        let job_id = seed_job(&fx, JobType::Technical).await;
        let app = fx
            .service
            .create(NewApplication::for_job(job_id), &fx.applicant)
            .await
            .unwrap();

        // Simulate a legacy record written before the vocabulary settled.
        fx.store
            .update_application_status(app.id, "Under Review")
            .await
            .unwrap();

        let read = fx.service.get(app.id).await.unwrap().unwrap();
        assert_eq!(read.status, "Reviewed");
        let listed = fx.service.list_all().await.unwrap();
        assert_eq!(listed[0].status, "Reviewed");
    }
}
