use axum::{extract::State, response::IntoResponse, Extension, Json};

use crate::{
    dto::bot_dto::AutomationResponse,
    error::Result,
    middleware::auth::authorize,
    models::user::{Role, User},
    AppState,
};

#[axum::debug_handler]
pub async fn run_automation(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    authorize(&user, &[Role::BotMimic])?;
    let outcome = state.automation_service.run(&user).await?;
    Ok(Json(AutomationResponse::from(outcome)))
}
