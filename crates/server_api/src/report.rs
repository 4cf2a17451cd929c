//! HTML briefing report sent to the operator mailbox.

use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use serde::Serialize;
use shared::{
    draft::Draft,
    labels::{
        BRAND_ASSETS, BUDGETS, CONTENT_READINESS, DESIGN_STYLES, PRIMARY_GOALS, PROJECT_TYPES,
        TIMELINES,
    },
};
use thiserror::Error;

const REPORT_TEMPLATE_NAME: &str = "briefing_report";
const SUBMITTED_AT_FORMAT: &str = "%A %-d %B %Y at %H:%M UTC";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid report template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),
    #[error("failed to render report: {0}")]
    Render(#[from] handlebars::RenderError),
}

pub struct ReportRenderer {
    handlebars: Handlebars<'static>,
}

#[derive(Debug, Serialize)]
struct ReportView<'a> {
    contact_name: &'a str,
    company_name: &'a str,
    email: &'a str,
    phone: &'a str,
    project_type: &'a str,
    number_of_websites: &'a str,
    has_existing_website: &'static str,
    existing_website_url: Option<&'a str>,
    primary_goal: &'a str,
    secondary_goals: &'a [String],
    target_audience: &'a str,
    unique_selling_points: Option<&'a str>,
    design_style: &'a str,
    color_preferences: Option<&'a str>,
    competitor_websites: Option<&'a str>,
    brand_assets: &'a str,
    required_features: &'a [String],
    other_features: Option<&'a str>,
    integrations: Option<&'a str>,
    content_ready: &'a str,
    content_help: &'a [String],
    number_of_pages: &'a str,
    timeline: &'a str,
    budget: &'a str,
    additional_info: Option<&'a str>,
    submitted_at: String,
}

impl ReportRenderer {
    pub fn new() -> Result<Self, ReportError> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE)
            .map_err(Box::new)?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, draft: &Draft, submitted_at: DateTime<Utc>) -> Result<String, ReportError> {
        let view = ReportView::from_draft(draft, submitted_at);
        Ok(self.handlebars.render(REPORT_TEMPLATE_NAME, &view)?)
    }
}

pub fn subject(draft: &Draft) -> String {
    format!(
        "New Website Briefing: {} - {}",
        draft.company_name,
        PROJECT_TYPES.label(&draft.project_type)
    )
}

pub fn format_submitted_at(submitted_at: DateTime<Utc>) -> String {
    submitted_at.format(SUBMITTED_AT_FORMAT).to_string()
}

impl<'a> ReportView<'a> {
    fn from_draft(draft: &'a Draft, submitted_at: DateTime<Utc>) -> Self {
        Self {
            contact_name: &draft.contact_name,
            company_name: &draft.company_name,
            email: &draft.email,
            phone: or_fallback(&draft.phone, "Not provided"),
            project_type: PROJECT_TYPES.label(&draft.project_type),
            number_of_websites: or_fallback(&draft.number_of_websites, "1"),
            has_existing_website: if draft.has_existing_site() { "Yes" } else { "No" },
            existing_website_url: non_blank(&draft.existing_website_url),
            primary_goal: PRIMARY_GOALS.label(&draft.primary_goal),
            secondary_goals: &draft.secondary_goals,
            target_audience: or_fallback(&draft.target_audience, "Not provided"),
            unique_selling_points: non_blank(&draft.unique_selling_points),
            design_style: DESIGN_STYLES.label(&draft.design_style),
            color_preferences: non_blank(&draft.color_preferences),
            competitor_websites: non_blank(&draft.competitor_websites),
            brand_assets: or_fallback(BRAND_ASSETS.label(&draft.brand_assets), "Not specified"),
            required_features: &draft.required_features,
            other_features: non_blank(&draft.other_features),
            integrations: non_blank(&draft.integrations),
            content_ready: CONTENT_READINESS.label(&draft.content_ready),
            content_help: &draft.content_help,
            number_of_pages: or_fallback(&draft.number_of_pages, "Not specified"),
            timeline: TIMELINES.label(&draft.timeline),
            budget: BUDGETS.label(&draft.budget),
            additional_info: non_blank(&draft.additional_info),
            submitted_at: format_submitted_at(submitted_at),
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    non_blank(value).unwrap_or(fallback)
}

const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 700px; margin: 0 auto; }
    .header { background: linear-gradient(135deg, #ff2d9b, #f59e0b); padding: 30px; text-align: center; }
    .header h1 { color: white; margin: 0; font-size: 24px; }
    .section { padding: 20px; border-bottom: 1px solid #eee; }
    .section h2 { color: #ff2d9b; font-size: 18px; margin-bottom: 15px; border-bottom: 2px solid #f59e0b; padding-bottom: 5px; }
    .field { margin-bottom: 12px; }
    .label { font-weight: bold; color: #555; }
    .value { color: #333; }
    .tag { display: inline-block; background: #f59e0b20; color: #b45309; padding: 4px 10px; border-radius: 4px; margin: 2px; font-size: 13px; }
    .footer { background: #1a1a1a; color: #888; padding: 20px; text-align: center; font-size: 12px; }
    .highlight { background: #ff2d9b10; border-left: 4px solid #ff2d9b; padding: 15px; margin: 10px 0; }
  </style>
</head>
<body>
  <div class="header">
    <h1>New Website Briefing Received</h1>
  </div>

  <div class="section">
    <h2>Contact Information</h2>
    <div class="field"><span class="label">Name:</span> <span class="value">{{contact_name}}</span></div>
    <div class="field"><span class="label">Company:</span> <span class="value">{{company_name}}</span></div>
    <div class="field"><span class="label">Email:</span> <span class="value"><a href="mailto:{{email}}">{{email}}</a></span></div>
    <div class="field"><span class="label">Phone:</span> <span class="value">{{phone}}</span></div>
  </div>

  <div class="section">
    <h2>Project Type</h2>
    <div class="field"><span class="label">Type:</span> <span class="value">{{project_type}}</span></div>
    <div class="field"><span class="label">Number of Websites:</span> <span class="value" style="font-weight: bold; color: #ff2d9b;">{{number_of_websites}}</span></div>
    <div class="field"><span class="label">Has Existing Website:</span> <span class="value">{{has_existing_website}}</span></div>
    {{#if existing_website_url}}<div class="field"><span class="label">Current URL(s):</span><br><span class="value" style="white-space: pre-line;">{{existing_website_url}}</span></div>{{/if}}
  </div>

  <div class="section">
    <h2>Goals &amp; Objectives</h2>
    <div class="field"><span class="label">Primary Goal:</span> <span class="value">{{primary_goal}}</span></div>
    {{#if secondary_goals}}
    <div class="field">
      <span class="label">Secondary Goals:</span><br>
      {{#each secondary_goals}}<span class="tag">{{this}}</span> {{/each}}
    </div>{{/if}}
    <div class="highlight">
      <div class="field"><span class="label">Target Audience:</span><br><span class="value">{{target_audience}}</span></div>
    </div>
    {{#if unique_selling_points}}<div class="field"><span class="label">USPs:</span><br><span class="value">{{unique_selling_points}}</span></div>{{/if}}
  </div>

  <div class="section">
    <h2>Design Preferences</h2>
    <div class="field"><span class="label">Style:</span> <span class="value">{{design_style}}</span></div>
    {{#if color_preferences}}<div class="field"><span class="label">Colour Preferences:</span> <span class="value">{{color_preferences}}</span></div>{{/if}}
    {{#if competitor_websites}}<div class="field"><span class="label">Inspiration Websites:</span><br><span class="value">{{competitor_websites}}</span></div>{{/if}}
    <div class="field"><span class="label">Brand Assets:</span> <span class="value">{{brand_assets}}</span></div>
  </div>

  <div class="section">
    <h2>Functionality &amp; Content</h2>
    {{#if required_features}}
    <div class="field">
      <span class="label">Required Features:</span><br>
      {{#each required_features}}<span class="tag">{{this}}</span> {{/each}}
    </div>{{/if}}
    {{#if other_features}}<div class="field"><span class="label">Other Features:</span><br><span class="value">{{other_features}}</span></div>{{/if}}
    {{#if integrations}}<div class="field"><span class="label">Integrations:</span><br><span class="value">{{integrations}}</span></div>{{/if}}
    <div class="field"><span class="label">Content Status:</span> <span class="value">{{content_ready}}</span></div>
    {{#if content_help}}
    <div class="field">
      <span class="label">Content Help Needed:</span><br>
      {{#each content_help}}<span class="tag">{{this}}</span> {{/each}}
    </div>{{/if}}
    <div class="field"><span class="label">Estimated Pages:</span> <span class="value">{{number_of_pages}}</span></div>
  </div>

  <div class="section">
    <h2>Timeline &amp; Budget</h2>
    <div class="highlight">
      <div class="field"><span class="label">Timeline:</span> <span class="value" style="font-size: 16px; font-weight: bold;">{{timeline}}</span></div>
      <div class="field"><span class="label">Budget:</span> <span class="value" style="font-size: 16px; font-weight: bold;">{{budget}}</span></div>
    </div>
  </div>
{{#if additional_info}}
  <div class="section">
    <h2>Additional Information</h2>
    <div class="value">{{additional_info}}</div>
  </div>
{{/if}}
  <div class="footer">
    <p>This briefing was submitted via the IV Strategies website.</p>
    <p>Submitted on: {{submitted_at}}</p>
  </div>
</body>
</html>
"#;

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
