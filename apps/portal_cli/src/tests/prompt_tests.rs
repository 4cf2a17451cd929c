use super::*;
use client_core::FormSchema;
use shared::labels::{FEATURE_OPTIONS, PROJECT_TYPES};
use std::io::Cursor;

fn run_step(form: &mut BriefingForm, input: &str) -> (bool, String) {
    let mut output = Vec::new();
    let finished = {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes()), &mut output);
        prompter.fill_step(form).expect("step")
    };
    (finished, String::from_utf8(output).expect("utf8"))
}

#[test]
fn choices_accept_numbers_or_codes() {
    assert_eq!(parse_choice("2", PROJECT_TYPES.options()), Some("redesign"));
    assert_eq!(parse_choice(" ecommerce ", PROJECT_TYPES.options()), Some("ecommerce"));
    assert_eq!(parse_choice("0", PROJECT_TYPES.options()), None);
    assert_eq!(parse_choice("99", PROJECT_TYPES.options()), None);
    assert_eq!(parse_choice("hologram", PROJECT_TYPES.options()), None);
}

#[test]
fn toggles_skip_garbage_and_out_of_range_numbers() {
    assert_eq!(
        parse_toggles("1, x, 3,99", FEATURE_OPTIONS),
        vec![FEATURE_OPTIONS[0], FEATURE_OPTIONS[2]]
    );
    assert!(parse_toggles("", FEATURE_OPTIONS).is_empty());
}

#[test]
fn navigation_depends_on_position() {
    assert_eq!(parse_navigation("", false), Some(Navigation::Next));
    assert_eq!(parse_navigation("s", false), None);
    assert_eq!(parse_navigation("Submit", true), Some(Navigation::Submit));
    assert_eq!(parse_navigation("n", true), None);
    assert_eq!(parse_navigation("b", true), Some(Navigation::Back));
    assert_eq!(parse_navigation("quit", false), Some(Navigation::Quit));
}

#[test]
fn contact_step_fills_scalars_and_keeps_blanks() {
    let mut form = BriefingForm::new(FormSchema::briefing());
    let (finished, output) = run_step(&mut form, "Jane Doe\nAcme\njane@acme.com\n\n");
    assert!(finished);
    assert!(output.contains("Step 1 of 6: Contact Information (17% complete)"));
    assert_eq!(form.draft().contact_name, "Jane Doe");
    assert_eq!(form.draft().email, "jane@acme.com");
    assert_eq!(form.draft().phone, "");
}

#[test]
fn dash_clears_a_previous_answer() {
    let mut form = BriefingForm::new(FormSchema::briefing());
    run_step(&mut form, "Jane Doe\nAcme\njane@acme.com\n0123 456\n");
    assert_eq!(form.draft().phone, "0123 456");

    let (finished, output) = run_step(&mut form, "\n\n\n-\n");
    assert!(finished);
    assert!(output.contains("Phone Number [0123 456]: "));
    assert_eq!(form.draft().phone, "");
    assert_eq!(form.draft().contact_name, "Jane Doe");
}

#[test]
fn dash_clears_a_coded_choice() {
    let mut form = BriefingForm::new(FormSchema::briefing());
    form.advance();
    run_step(&mut form, "2\n2\n");
    assert_eq!(form.draft().project_type, "redesign");

    run_step(&mut form, "-\n\n");
    assert_eq!(form.draft().project_type, "");
}

#[test]
fn revealed_field_is_asked_in_the_same_pass() {
    let mut form = BriefingForm::new(FormSchema::briefing());
    form.advance();
    let (finished, _) = run_step(&mut form, "2\n1\n\nhttps://acme.example\n");
    assert!(finished);
    assert_eq!(form.draft().project_type, "redesign");
    assert_eq!(form.draft().has_existing_website, "yes");
    assert_eq!(form.draft().number_of_websites, "1");
    assert_eq!(form.draft().existing_website_url, "https://acme.example");
}

#[test]
fn exhausted_input_stops_the_step() {
    let mut form = BriefingForm::new(FormSchema::briefing());
    let (finished, _) = run_step(&mut form, "Jane\n");
    assert!(!finished);
    assert_eq!(form.draft().contact_name, "Jane");
    assert_eq!(form.draft().company_name, "");
}
