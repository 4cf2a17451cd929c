use std::{collections::HashMap, fs, sync::Arc};

use anyhow::Context;
use server_api::{
    auth::MAX_SESSION_TTL_SECONDS,
    mailer::{Mailer, ResendMailer, SmtpConfig, SmtpMailer, DEFAULT_RESEND_API_URL},
};
use tracing::warn;

pub const DEFAULT_SESSION_SECRET: &str = "dev-session-secret";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailProvider {
    Resend,
    Smtp,
}

impl MailProvider {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "resend" => Some(MailProvider::Resend),
            "smtp" => Some(MailProvider::Smtp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub catalog_path: String,
    pub session_secret: String,
    pub session_ttl_seconds: i64,
    pub mail_provider: MailProvider,
    pub resend_api_key: String,
    pub resend_api_url: String,
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub mail_from: String,
    pub operator_address: String,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            catalog_path: "portal.toml".into(),
            session_secret: DEFAULT_SESSION_SECRET.into(),
            session_ttl_seconds: 30 * 24 * 3600,
            mail_provider: MailProvider::Resend,
            resend_api_key: String::new(),
            resend_api_url: DEFAULT_RESEND_API_URL.into(),
            smtp_host: None,
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            mail_from: "IV Strategies <onboarding@resend.dev>".into(),
            operator_address: "pedro@iv-creative.co.uk".into(),
            max_body_bytes: 64 * 1024,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());

    if settings.session_secret == DEFAULT_SESSION_SECRET {
        warn!("SESSION_SECRET is not set; using the development secret");
    }
    settings
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        warn!("server.toml is not a flat table of strings; ignoring it");
        return;
    };
    apply(settings, |key| file_cfg.get(key).cloned());
}

/// `APP__` names take precedence over plain names.
pub(crate) fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    apply(settings, |key| {
        let upper = key.to_ascii_uppercase();
        lookup(&format!("APP__{upper}")).or_else(|| lookup(&upper))
    });
    if let Some(v) = lookup("SERVER_BIND") {
        if lookup("APP__BIND_ADDR").is_none() {
            settings.server_bind = v;
        }
    }
}

fn apply(settings: &mut Settings, get: impl Fn(&str) -> Option<String>) {
    if let Some(v) = get("bind_addr") {
        settings.server_bind = v;
    }
    if let Some(v) = get("catalog_path") {
        settings.catalog_path = v;
    }
    if let Some(v) = get("session_secret") {
        settings.session_secret = v;
    }
    if let Some(v) = get("session_ttl_seconds") {
        match v.parse::<i64>() {
            Ok(parsed) if (1..=MAX_SESSION_TTL_SECONDS).contains(&parsed) => {
                settings.session_ttl_seconds = parsed
            }
            _ => warn!(value = %v, "ignoring invalid session_ttl_seconds"),
        }
    }
    if let Some(v) = get("mail_provider") {
        match MailProvider::parse(&v) {
            Some(provider) => settings.mail_provider = provider,
            None => warn!(value = %v, "ignoring unknown mail_provider"),
        }
    }
    if let Some(v) = get("resend_api_key") {
        settings.resend_api_key = v;
    }
    if let Some(v) = get("resend_api_url") {
        settings.resend_api_url = v;
    }
    if let Some(v) = get("smtp_host") {
        settings.smtp_host = Some(v);
    }
    if let Some(v) = get("smtp_port") {
        match v.parse::<u16>() {
            Ok(parsed) => settings.smtp_port = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid smtp_port"),
        }
    }
    if let Some(v) = get("smtp_username") {
        settings.smtp_username = Some(v);
    }
    if let Some(v) = get("smtp_password") {
        settings.smtp_password = Some(v);
    }
    if let Some(v) = get("mail_from") {
        settings.mail_from = v;
    }
    if let Some(v) = get("operator_address") {
        settings.operator_address = v;
    }
    if let Some(v) = get("max_body_bytes") {
        match v.parse::<usize>() {
            Ok(parsed) => settings.max_body_bytes = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid max_body_bytes"),
        }
    }
}

pub fn build_mailer(settings: &Settings) -> anyhow::Result<Arc<dyn Mailer>> {
    match settings.mail_provider {
        MailProvider::Resend => {
            if settings.resend_api_key.is_empty() {
                warn!("RESEND_API_KEY is not set; briefing delivery will fail");
            }
            Ok(Arc::new(ResendMailer::new(
                settings.resend_api_url.clone(),
                settings.resend_api_key.clone(),
            )))
        }
        MailProvider::Smtp => {
            let host = settings
                .smtp_host
                .clone()
                .context("mail_provider is smtp but smtp_host is not set")?;
            let mailer = SmtpMailer::new(&SmtpConfig {
                host: host.clone(),
                port: settings.smtp_port,
                username: settings.smtp_username.clone(),
                password: settings.smtp_password.clone(),
            })
            .with_context(|| format!("failed to configure SMTP relay '{host}'"))?;
            Ok(Arc::new(mailer))
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
