use std::fmt::Display;

use shared::draft::{Draft, DraftError, Field};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::transport::SubmissionTransport;

pub const RETRY_MESSAGE: &str =
    "There was an error submitting your briefing. Please try again or contact us directly.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("a form needs at least one step")]
    EmptySchema,
    #[error("the briefing has already been submitted")]
    AlreadySubmitted,
    #[error("a submission is already in progress")]
    SubmissionInFlight,
    #[error("briefings are submitted from the last step (on step {current} of {total})")]
    NotOnFinalStep { current: usize, total: usize },
    #[error("required fields are missing: {}", field_keys(.0))]
    MissingRequired(Vec<Field>),
    #[error("step {step} ({title}) is not complete")]
    StepIncomplete { step: usize, title: String },
    #[error("{}", RETRY_MESSAGE)]
    SubmissionFailed,
    #[error(transparent)]
    Draft(#[from] DraftError),
}

fn field_keys(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.key())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One page of the form: a title, the fields it owns and an optional extra
/// check on top of the required-field rule.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub title: String,
    pub fields: Vec<Field>,
    check: Option<fn(&Draft) -> bool>,
}

impl StepDefinition {
    pub fn new(title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            title: title.into(),
            fields,
            check: None,
        }
    }

    pub fn with_check(mut self, check: fn(&Draft) -> bool) -> Self {
        self.check = Some(check);
        self
    }

    pub fn is_complete(&self, draft: &Draft) -> bool {
        draft.missing_required(&self.fields).is_empty()
            && self.check.map_or(true, |check| check(draft))
    }
}

#[derive(Debug, Clone)]
pub struct FormSchema {
    steps: Vec<StepDefinition>,
}

impl FormSchema {
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self, FormError> {
        if steps.is_empty() {
            return Err(FormError::EmptySchema);
        }
        Ok(Self { steps })
    }

    /// The six pages of the website briefing.
    pub fn briefing() -> Self {
        Self {
            steps: vec![
                StepDefinition::new(
                    "Contact Information",
                    vec![
                        Field::ContactName,
                        Field::CompanyName,
                        Field::Email,
                        Field::Phone,
                    ],
                ),
                StepDefinition::new(
                    "Project Type",
                    vec![
                        Field::ProjectType,
                        Field::HasExistingWebsite,
                        Field::NumberOfWebsites,
                        Field::ExistingWebsiteUrl,
                    ],
                ),
                StepDefinition::new(
                    "Goals & Objectives",
                    vec![
                        Field::PrimaryGoal,
                        Field::SecondaryGoals,
                        Field::TargetAudience,
                        Field::UniqueSellingPoints,
                    ],
                ),
                StepDefinition::new(
                    "Design Preferences",
                    vec![
                        Field::DesignStyle,
                        Field::ColorPreferences,
                        Field::CompetitorWebsites,
                        Field::BrandAssets,
                    ],
                ),
                StepDefinition::new(
                    "Functionality & Content",
                    vec![
                        Field::RequiredFeatures,
                        Field::OtherFeatures,
                        Field::Integrations,
                        Field::ContentReady,
                        Field::ContentHelp,
                        Field::NumberOfPages,
                    ],
                ),
                StepDefinition::new(
                    "Timeline & Budget",
                    vec![Field::Timeline, Field::Budget, Field::AdditionalInfo],
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 1-based lookup.
    pub fn step(&self, number: usize) -> Option<&StepDefinition> {
        number.checked_sub(1).and_then(|index| self.steps.get(index))
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    fn all_fields(&self) -> Vec<Field> {
        self.steps
            .iter()
            .flat_map(|step| step.fields.iter().copied())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Submitted,
}

/// State machine behind the briefing wizard. Steps are numbered from 1 and
/// the current step always stays within `1..=schema.len()`.
#[derive(Debug, Clone)]
pub struct BriefingForm {
    schema: FormSchema,
    draft: Draft,
    step: usize,
    phase: FormPhase,
    last_error: Option<String>,
}

impl BriefingForm {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            draft: Draft::new(),
            step: 1,
            phase: FormPhase::Editing,
            last_error: None,
        }
    }

    /// Resumes from a previously saved draft, still on step 1.
    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.draft = draft;
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.schema.len()
    }

    pub fn current_definition(&self) -> Option<&StepDefinition> {
        self.schema.step(self.step)
    }

    pub fn is_last_step(&self) -> bool {
        self.step == self.total_steps()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn advance(&mut self) -> usize {
        if self.phase == FormPhase::Editing && self.step < self.total_steps() {
            self.step += 1;
        }
        self.step
    }

    pub fn retreat(&mut self) -> usize {
        if self.phase == FormPhase::Editing && self.step > 1 {
            self.step -= 1;
        }
        self.step
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editing()?;
        self.draft.set(field, value)?;
        Ok(())
    }

    pub fn toggle(&mut self, field: Field, label: &str) -> Result<bool, FormError> {
        self.ensure_editing()?;
        Ok(self.draft.toggle(field, label)?)
    }

    pub fn progress_percent(&self) -> u8 {
        let ratio = self.step as f64 / self.total_steps() as f64;
        (ratio * 100.0).round() as u8
    }

    /// Fields of the current step that should be rendered right now.
    pub fn visible_fields(&self) -> Vec<Field> {
        self.current_definition()
            .map(|step| {
                step.fields
                    .iter()
                    .copied()
                    .filter(|field| field.is_visible(&self.draft))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn missing_fields(&self, step: usize) -> Vec<Field> {
        self.schema
            .step(step)
            .map(|definition| self.draft.missing_required(&definition.fields))
            .unwrap_or_default()
    }

    /// Moves into `Submitting` and hands back the payload to send.
    pub fn begin_submission(&mut self) -> Result<Draft, FormError> {
        self.ensure_editing()?;
        if !self.is_last_step() {
            return Err(FormError::NotOnFinalStep {
                current: self.step,
                total: self.total_steps(),
            });
        }
        let missing = self.draft.missing_required(&self.schema.all_fields());
        if !missing.is_empty() {
            debug!(missing = %field_keys(&missing), "submission blocked by required fields");
            return Err(FormError::MissingRequired(missing));
        }
        if let Some((index, step)) = self
            .schema
            .steps()
            .iter()
            .enumerate()
            .find(|(_, step)| !step.is_complete(&self.draft))
        {
            debug!(step = index + 1, "submission blocked by step check");
            return Err(FormError::StepIncomplete {
                step: index + 1,
                title: step.title.clone(),
            });
        }
        self.phase = FormPhase::Submitting;
        self.last_error = None;
        Ok(self.draft.clone())
    }

    pub fn complete_submission<E: Display>(&mut self, outcome: Result<(), E>) {
        match outcome {
            Ok(()) => {
                info!(company = %self.draft.company_name, "briefing submitted");
                self.draft = Draft::new();
                self.phase = FormPhase::Submitted;
                self.last_error = None;
            }
            Err(err) => {
                warn!(error = %err, "briefing submission failed");
                self.phase = FormPhase::Editing;
                self.last_error = Some(RETRY_MESSAGE.to_string());
            }
        }
    }

    pub async fn submit(&mut self, transport: &dyn SubmissionTransport) -> Result<(), FormError> {
        let payload = self.begin_submission()?;
        let outcome = transport.submit_briefing(&payload).await;
        let delivered = outcome.is_ok();
        self.complete_submission(outcome);
        if delivered {
            Ok(())
        } else {
            Err(FormError::SubmissionFailed)
        }
    }

    /// Abandons the session and starts over with a fresh draft.
    pub fn reset(&mut self) {
        self.draft = Draft::new();
        self.step = 1;
        self.phase = FormPhase::Editing;
        self.last_error = None;
    }

    fn ensure_editing(&self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Editing => Ok(()),
            FormPhase::Submitting => Err(FormError::SubmissionInFlight),
            FormPhase::Submitted => Err(FormError::AlreadySubmitted),
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
