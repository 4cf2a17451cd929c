use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{
    draft::Draft,
    error::{ApiError, ErrorCode},
    labels::PROJECT_TYPES,
    protocol::{FAILED_TO_SUBMIT, MISSING_REQUIRED_FIELDS},
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    mailer::{MailError, Mailer, OutboundEmail},
    report::{subject, ReportError, ReportRenderer},
};

#[derive(Debug, Error)]
pub enum BriefingError {
    #[error("missing required fields")]
    MissingRequiredFields,
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("briefing delivery failed: {0}")]
    Delivery(#[source] MailError),
}

impl From<&BriefingError> for ApiError {
    fn from(value: &BriefingError) -> Self {
        match value {
            BriefingError::MissingRequiredFields => {
                ApiError::new(ErrorCode::Validation, MISSING_REQUIRED_FIELDS)
            }
            BriefingError::Report(_) => ApiError::new(ErrorCode::Internal, FAILED_TO_SUBMIT),
            BriefingError::Delivery(_) => ApiError::new(ErrorCode::Delivery, FAILED_TO_SUBMIT),
        }
    }
}

/// Fixed addresses for outbound briefings. Neither is taken from the payload.
#[derive(Debug, Clone)]
pub struct MailRouting {
    pub from: String,
    pub operator: String,
}

pub struct BriefingDispatcher {
    mailer: Arc<dyn Mailer>,
    renderer: ReportRenderer,
    routing: MailRouting,
}

impl BriefingDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, routing: MailRouting) -> Result<Self, ReportError> {
        Ok(Self {
            mailer,
            renderer: ReportRenderer::new()?,
            routing,
        })
    }

    pub fn compose(
        &self,
        draft: &Draft,
        submitted_at: DateTime<Utc>,
    ) -> Result<OutboundEmail, ReportError> {
        Ok(OutboundEmail {
            from: self.routing.from.clone(),
            to: self.routing.operator.clone(),
            reply_to: draft.email.clone(),
            subject: subject(draft),
            html: self.renderer.render(draft, submitted_at)?,
        })
    }

    /// Validates, renders and sends one email. No retries, no deduplication.
    pub async fn submit(&self, draft: &Draft) -> Result<(), BriefingError> {
        if !draft.has_required_identity() {
            warn!("briefing rejected: missing contact name, company or email");
            return Err(BriefingError::MissingRequiredFields);
        }

        let email = self.compose(draft, Utc::now()).map_err(|err| {
            error!(error = %err, "failed to render briefing report");
            err
        })?;

        if let Err(err) = self.mailer.send(&email).await {
            error!(
                error = %err,
                company = %draft.company_name,
                "briefing submission error"
            );
            return Err(BriefingError::Delivery(err));
        }

        info!(
            company = %draft.company_name,
            project_type = %PROJECT_TYPES.label(&draft.project_type),
            "briefing dispatched"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/briefing_tests.rs"]
mod tests;
