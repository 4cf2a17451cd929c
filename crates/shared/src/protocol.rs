use serde::{Deserialize, Serialize};

use crate::domain::{ClientId, ProjectRecord, ProjectTag};

pub const BRIEFING_ROUTE: &str = "/api/briefing";
pub const LOGIN_ROUTE: &str = "/api/login";
pub const PROJECTS_ROUTE: &str = "/api/projects";

pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";
pub const FAILED_TO_SUBMIT: &str = "Failed to submit briefing";
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";
pub const INVALID_ACCESS_CODE: &str = "Invalid access code";
pub const UNAUTHORIZED: &str = "Unauthorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefingAccepted {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub access_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub client_id: ClientId,
    pub client_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCounts {
    pub all: usize,
    pub proposal: usize,
    pub merchandise: usize,
    pub internal: usize,
    pub briefing: usize,
}

impl TagCounts {
    pub fn count(&self, tag: ProjectTag) -> usize {
        match tag {
            ProjectTag::Proposal => self.proposal,
            ProjectTag::Merchandise => self.merchandise,
            ProjectTag::Internal => self.internal,
            ProjectTag::Briefing => self.briefing,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectListing {
    pub projects: Vec<ProjectRecord>,
    pub tag_counts: TagCounts,
}
