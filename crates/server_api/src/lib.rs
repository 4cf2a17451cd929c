use std::sync::Arc;

use shared::{
    domain::{ProjectQuery, ProjectRecord},
    draft::Draft,
    error::{ApiError, ErrorCode},
    protocol::{BriefingAccepted, LoginResponse, ProjectListing, INVALID_ACCESS_CODE, UNAUTHORIZED},
};
use tracing::{info, warn};

pub mod auth;
pub mod briefing;
pub mod catalog;
pub mod mailer;
pub mod report;
pub mod visibility;

use auth::{AccessCodeRegistry, SessionIssuer};
use briefing::BriefingDispatcher;
use visibility::{filter_projects, tag_counts, visible_projects};

#[derive(Clone)]
pub struct ApiContext {
    pub dispatcher: Arc<BriefingDispatcher>,
    pub access_codes: Arc<AccessCodeRegistry>,
    pub sessions: Arc<SessionIssuer>,
    pub projects: Arc<Vec<ProjectRecord>>,
}

pub async fn submit_briefing(ctx: &ApiContext, draft: &Draft) -> Result<BriefingAccepted, ApiError> {
    ctx.dispatcher
        .submit(draft)
        .await
        .map_err(|err| ApiError::from(&err))?;
    Ok(BriefingAccepted { success: true })
}

pub fn login(ctx: &ApiContext, access_code: &str) -> Result<LoginResponse, ApiError> {
    let identity = ctx.access_codes.authenticate(access_code).map_err(|_| {
        warn!("login rejected: unknown access code");
        ApiError::new(ErrorCode::Unauthorized, INVALID_ACCESS_CODE)
    })?;
    let token = ctx
        .sessions
        .issue(&identity)
        .map_err(|err| ApiError::new(ErrorCode::Internal, err.to_string()))?;
    info!(client_id = %identity.id, "client logged in");
    Ok(LoginResponse {
        token,
        client_id: identity.id,
        client_name: identity.name,
    })
}

pub fn list_projects(
    ctx: &ApiContext,
    session_token: Option<&str>,
    query: &ProjectQuery,
) -> Result<ProjectListing, ApiError> {
    let token = session_token
        .ok_or_else(|| ApiError::new(ErrorCode::Unauthorized, UNAUTHORIZED))?;
    let identity = ctx
        .sessions
        .verify(token)
        .map_err(|_| ApiError::new(ErrorCode::Unauthorized, UNAUTHORIZED))?;

    let counts = tag_counts(visible_projects(&identity.id, &ctx.projects));
    let projects = filter_projects(&identity.id, &ctx.projects, query)
        .into_iter()
        .cloned()
        .collect();
    Ok(ProjectListing {
        projects,
        tag_counts: counts,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
