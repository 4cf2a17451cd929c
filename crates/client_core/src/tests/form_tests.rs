use super::*;
use crate::transport::ClientError;
use async_trait::async_trait;
use std::sync::Mutex;

/// Replays scripted outcomes and records every payload it was handed.
#[derive(Default)]
struct ScriptedTransport {
    failures_left: Mutex<usize>,
    attempts: Mutex<Vec<Draft>>,
}

impl ScriptedTransport {
    fn failing_once() -> Self {
        Self {
            failures_left: Mutex::new(1),
            ..Self::default()
        }
    }

    fn attempts(&self) -> Vec<Draft> {
        self.attempts.lock().expect("lock").clone()
    }
}

#[async_trait]
impl SubmissionTransport for ScriptedTransport {
    async fn submit_briefing(&self, draft: &Draft) -> Result<(), ClientError> {
        self.attempts.lock().expect("lock").push(draft.clone());
        let mut failures = self.failures_left.lock().expect("lock");
        if *failures > 0 {
            *failures -= 1;
            return Err(ClientError::Rejected {
                status: 500,
                message: "Failed to submit briefing".into(),
            });
        }
        Ok(())
    }
}

fn filled_form() -> BriefingForm {
    let mut form = BriefingForm::new(FormSchema::briefing());
    for (field, value) in [
        (Field::ContactName, "Jane Doe"),
        (Field::CompanyName, "Acme"),
        (Field::Email, "jane@acme.com"),
        (Field::ProjectType, "redesign"),
        (Field::PrimaryGoal, "sell-products"),
        (Field::TargetAudience, "Small businesses"),
        (Field::DesignStyle, "modern"),
        (Field::Timeline, "asap"),
        (Field::Budget, "5k-10k"),
    ] {
        form.set(field, value).expect("set");
    }
    while !form.is_last_step() {
        form.advance();
    }
    form
}

#[test]
fn empty_schema_is_rejected() {
    assert_eq!(FormSchema::new(Vec::new()).unwrap_err(), FormError::EmptySchema);
}

#[test]
fn briefing_schema_has_six_steps_covering_every_field_once() {
    let schema = FormSchema::briefing();
    assert_eq!(schema.len(), 6);
    assert_eq!(schema.step(1).expect("first").title, "Contact Information");
    assert_eq!(schema.step(6).expect("last").title, "Timeline & Budget");
    assert!(schema.step(0).is_none());
    assert!(schema.step(7).is_none());

    let mut fields = schema.all_fields();
    fields.sort_by_key(|field| field.key());
    fields.dedup();
    assert_eq!(fields.len(), Field::ALL.len());
}

#[test]
fn navigation_is_clamped_to_the_step_range() {
    let mut form = BriefingForm::new(FormSchema::briefing());
    assert_eq!(form.retreat(), 1);
    for _ in 0..10 {
        form.advance();
    }
    assert_eq!(form.current_step(), 6);
    assert_eq!(form.advance(), 6);
    assert_eq!(form.retreat(), 5);
}

#[test]
fn advancing_is_not_gated_on_required_fields() {
    let mut form = BriefingForm::new(FormSchema::briefing());
    assert!(!form.missing_fields(1).is_empty());
    assert_eq!(form.advance(), 2);
}

#[test]
fn progress_is_rounded_percentage_of_current_step() {
    let mut form = BriefingForm::new(FormSchema::briefing());
    let mut seen = vec![form.progress_percent()];
    while !form.is_last_step() {
        form.advance();
        seen.push(form.progress_percent());
    }
    assert_eq!(seen, vec![17, 33, 50, 67, 83, 100]);
}

#[test]
fn progress_follows_a_custom_schema_length() {
    let schema = FormSchema::new(vec![
        StepDefinition::new("One", vec![Field::ContactName]),
        StepDefinition::new("Two", vec![Field::Email]),
        StepDefinition::new("Three", vec![Field::Budget]),
    ])
    .expect("schema");
    let mut form = BriefingForm::new(schema);
    assert_eq!(form.progress_percent(), 33);
    form.advance();
    assert_eq!(form.progress_percent(), 67);
}

#[test]
fn step_check_adds_to_required_rule() {
    let step = StepDefinition::new("Contact", vec![Field::ContactName])
        .with_check(|draft| draft.email.contains('@'));
    let mut draft = Draft::new();
    draft.contact_name = "Jane".into();
    assert!(!step.is_complete(&draft));
    draft.email = "jane@acme.com".into();
    assert!(step.is_complete(&draft));
}

#[test]
fn conditional_fields_follow_sibling_values() {
    let mut form = BriefingForm::new(FormSchema::briefing());
    form.advance();
    assert!(!form.visible_fields().contains(&Field::ExistingWebsiteUrl));
    form.set(Field::HasExistingWebsite, "yes").expect("set");
    assert!(form.visible_fields().contains(&Field::ExistingWebsiteUrl));

    form.advance();
    form.advance();
    form.advance();
    assert!(!form.visible_fields().contains(&Field::ContentHelp));
    form.set(Field::ContentReady, "need-help").expect("set");
    assert!(form.visible_fields().contains(&Field::ContentHelp));
}

#[test]
fn toggles_leave_labels_selected_an_odd_number_of_times() {
    let mut form = BriefingForm::new(FormSchema::briefing());
    for label in ["Blog/News", "Search", "Blog/News", "Booking", "Blog/News"] {
        form.toggle(Field::RequiredFeatures, label).expect("toggle");
    }
    assert_eq!(
        form.draft().required_features,
        vec!["Search".to_string(), "Booking".to_string(), "Blog/News".to_string()]
    );
}

#[test]
fn submission_requires_the_last_step() {
    let mut form = BriefingForm::new(FormSchema::briefing());
    assert_eq!(
        form.begin_submission().unwrap_err(),
        FormError::NotOnFinalStep {
            current: 1,
            total: 6
        }
    );
}

#[test]
fn submission_requires_all_visible_required_fields() {
    let mut form = filled_form();
    form.set(Field::Email, "   ").expect("set");
    assert_eq!(
        form.begin_submission().unwrap_err(),
        FormError::MissingRequired(vec![Field::Email])
    );
    assert_eq!(form.phase(), FormPhase::Editing);
}

#[test]
fn failing_step_check_blocks_submission() {
    let schema = FormSchema::new(vec![
        StepDefinition::new("Contact", vec![Field::ContactName, Field::Email])
            .with_check(|draft| draft.email.contains('@')),
        StepDefinition::new("Budget", vec![Field::Budget]),
    ])
    .expect("schema");
    let mut form = BriefingForm::new(schema);
    form.set(Field::ContactName, "Jane").expect("set");
    form.set(Field::Email, "no-at-sign").expect("set");
    form.set(Field::Budget, "5k-10k").expect("set");
    form.advance();

    assert_eq!(
        form.begin_submission().unwrap_err(),
        FormError::StepIncomplete {
            step: 1,
            title: "Contact".into()
        }
    );
    assert_eq!(form.phase(), FormPhase::Editing);

    form.set(Field::Email, "jane@acme.com").expect("set");
    assert!(form.begin_submission().is_ok());
    assert_eq!(form.phase(), FormPhase::Submitting);
}

#[test]
fn edits_are_refused_while_submitting() {
    let mut form = filled_form();
    form.begin_submission().expect("begin");
    assert_eq!(
        form.set(Field::Phone, "0123").unwrap_err(),
        FormError::SubmissionInFlight
    );
    assert_eq!(form.begin_submission().unwrap_err(), FormError::SubmissionInFlight);
}

#[tokio::test]
async fn successful_submission_clears_the_draft_and_locks_the_form() {
    let transport = ScriptedTransport::default();
    let mut form = filled_form();

    form.submit(&transport).await.expect("submitted");

    assert_eq!(form.phase(), FormPhase::Submitted);
    assert_eq!(form.draft(), &Draft::new());
    assert_eq!(transport.attempts().len(), 1);
    assert_eq!(transport.attempts()[0].company_name, "Acme");
    assert_eq!(
        form.toggle(Field::SecondaryGoals, "Build trust").unwrap_err(),
        FormError::AlreadySubmitted
    );
    assert_eq!(form.advance(), 6);
}

#[tokio::test]
async fn failed_submission_keeps_the_draft_for_a_retry() {
    let transport = ScriptedTransport::failing_once();
    let mut form = filled_form();
    let before = form.draft().clone();

    let err = form.submit(&transport).await.unwrap_err();
    assert_eq!(err, FormError::SubmissionFailed);
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.current_step(), 6);
    assert_eq!(form.last_error(), Some(RETRY_MESSAGE));
    assert_eq!(form.draft(), &before);

    form.submit(&transport).await.expect("retry succeeds");
    assert_eq!(form.phase(), FormPhase::Submitted);
    assert_eq!(form.last_error(), None);

    let attempts = transport.attempts();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0], attempts[1]);
}

#[test]
fn reset_starts_a_fresh_session() {
    let mut form = filled_form();
    form.begin_submission().expect("begin");
    form.complete_submission::<ClientError>(Ok(()));
    form.reset();
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.current_step(), 1);
    assert_eq!(form.draft().number_of_websites, "1");
}
