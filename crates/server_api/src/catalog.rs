use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;
use shared::domain::ProjectRecord;
use thiserror::Error;

use crate::auth::AccessCodeEntry;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalogue '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse catalogue: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("client '{0}' has an empty access code")]
    EmptyAccessCode(String),
    #[error("access code for client '{0}' is already assigned to another client")]
    DuplicateAccessCode(String),
}

/// Deploy-time content: who may log in, and which proposals exist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortalCatalog {
    #[serde(default)]
    pub clients: Vec<AccessCodeEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

impl PortalCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: PortalCatalog = toml::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for client in &self.clients {
            if client.access_code.trim().is_empty() {
                return Err(CatalogError::EmptyAccessCode(client.id.to_string()));
            }
            if !seen.insert(client.access_code.as_str()) {
                return Err(CatalogError::DuplicateAccessCode(client.id.to_string()));
            }
        }
        Ok(())
    }
}
