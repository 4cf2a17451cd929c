use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    draft::Draft,
    error::ApiError,
    protocol::{
        BriefingAccepted, LoginRequest, LoginResponse, ProjectListing, ProjectsQuery,
        BRIEFING_ROUTE, LOGIN_ROUTE, PROJECTS_ROUTE,
    },
};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid portal url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("portal answered {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("the portal acknowledged the briefing without success")]
    NotAccepted,
    #[error("log in with an access code first")]
    NotLoggedIn,
}

/// Anything that can deliver a finished briefing.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit_briefing(&self, draft: &Draft) -> Result<(), ClientError>;
}

pub struct PortalClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl PortalClient {
    /// `base_url` may carry a path prefix; routes are resolved beneath it.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http: Client::new(),
            base_url,
            token: None,
        })
    }

    pub fn endpoint(&self, route: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(route.trim_start_matches('/'))?)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Reuses a session token obtained by an earlier login.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub async fn login(&mut self, access_code: &str) -> Result<LoginResponse, ClientError> {
        let res = self
            .http
            .post(self.endpoint(LOGIN_ROUTE)?)
            .json(&LoginRequest {
                access_code: access_code.to_string(),
            })
            .send()
            .await?;
        let body: LoginResponse = ensure_success(res).await?.json().await?;
        debug!(client_id = %body.client_id, "logged in to portal");
        self.token = Some(body.token.clone());
        Ok(body)
    }

    pub async fn projects(&self, query: &ProjectsQuery) -> Result<ProjectListing, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotLoggedIn)?;
        let res = self
            .http
            .get(self.endpoint(PROJECTS_ROUTE)?)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        Ok(ensure_success(res).await?.json().await?)
    }
}

#[async_trait]
impl SubmissionTransport for PortalClient {
    async fn submit_briefing(&self, draft: &Draft) -> Result<(), ClientError> {
        let res = self
            .http
            .post(self.endpoint(BRIEFING_ROUTE)?)
            .json(draft)
            .send()
            .await?;
        let accepted: BriefingAccepted = ensure_success(res).await?.json().await?;
        if !accepted.success {
            return Err(ClientError::NotAccepted);
        }
        Ok(())
    }
}

async fn ensure_success(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|err| err.error)
        .unwrap_or(body);
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
