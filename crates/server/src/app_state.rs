use std::sync::Arc;

use anyhow::Context;
use server_api::{
    auth::{AccessCodeRegistry, SessionConfig, SessionIssuer},
    briefing::{BriefingDispatcher, MailRouting},
    catalog::PortalCatalog,
    mailer::Mailer,
    ApiContext,
};

use crate::config::Settings;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
}

impl AppState {
    pub(crate) fn assemble(
        settings: &Settings,
        catalog: PortalCatalog,
        mailer: Arc<dyn Mailer>,
    ) -> anyhow::Result<Self> {
        let dispatcher = BriefingDispatcher::new(
            mailer,
            MailRouting {
                from: settings.mail_from.clone(),
                operator: settings.operator_address.clone(),
            },
        )
        .context("failed to compile briefing report template")?;

        Ok(Self {
            api: ApiContext {
                dispatcher: Arc::new(dispatcher),
                access_codes: Arc::new(AccessCodeRegistry::new(catalog.clients)),
                sessions: Arc::new(SessionIssuer::new(&SessionConfig {
                    secret: settings.session_secret.clone(),
                    ttl_seconds: settings.session_ttl_seconds,
                })),
                projects: Arc::new(catalog.projects),
            },
        })
    }
}
