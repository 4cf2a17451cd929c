use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_newtype!(ClientId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIdentity {
    pub id: ClientId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectTag {
    Merchandise,
    Proposal,
    Internal,
    Briefing,
}

impl ProjectTag {
    pub const ALL: [ProjectTag; 4] = [
        ProjectTag::Proposal,
        ProjectTag::Merchandise,
        ProjectTag::Internal,
        ProjectTag::Briefing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectTag::Merchandise => "Merchandise",
            ProjectTag::Proposal => "Proposal",
            ProjectTag::Internal => "Internal",
            ProjectTag::Briefing => "Briefing",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == raw)
    }
}

impl fmt::Display for ProjectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag selection on the hub page. `All` is not a category a record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Tag(ProjectTag),
}

impl TagFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "All" {
            return Some(TagFilter::All);
        }
        ProjectTag::parse(raw).map(TagFilter::Tag)
    }

    pub fn matches(self, tag: ProjectTag) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(wanted) => wanted == tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    pub href: String,
    pub tag: ProjectTag,
    pub date: String,
    pub client: String,
    pub allowed_clients: Vec<ClientId>,
}

impl ProjectRecord {
    pub fn is_visible_to(&self, identity: &ClientId) -> bool {
        self.allowed_clients.iter().any(|allowed| allowed == identity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectQuery {
    pub search: Option<String>,
    pub tag: TagFilter,
}
