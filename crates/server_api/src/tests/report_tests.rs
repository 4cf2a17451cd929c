use super::*;
use chrono::TimeZone;

fn sample_draft() -> Draft {
    Draft {
        contact_name: "Jane Doe".into(),
        company_name: "Acme".into(),
        email: "jane@acme.com".into(),
        project_type: "redesign".into(),
        primary_goal: "sell-products".into(),
        design_style: "modern".into(),
        timeline: "asap".into(),
        budget: "5k-10k".into(),
        ..Draft::new()
    }
}

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, hour, 5, 0).unwrap()
}

#[test]
fn subject_embeds_company_and_project_type_label() {
    assert_eq!(
        subject(&sample_draft()),
        "New Website Briefing: Acme - Website Redesign"
    );
}

#[test]
fn timestamp_uses_long_british_format() {
    assert_eq!(format_submitted_at(at(15)), "Monday 19 October 2026 at 15:05 UTC");
}

#[test]
fn coded_fields_render_their_labels() {
    let html = ReportRenderer::new()
        .unwrap()
        .render(&sample_draft(), at(9))
        .unwrap();
    assert!(html.contains("Website Redesign"));
    assert!(html.contains("Sell products online"));
    assert!(html.contains("Modern &amp; Bold"));
    assert!(html.contains("£5,000 - £10,000"));
    assert!(html.contains("Submitted on: Monday 19 October 2026 at 09:05 UTC"));
}

#[test]
fn unknown_codes_are_shown_verbatim() {
    let mut draft = sample_draft();
    draft.project_type = "landing-page-blitz".into();
    draft.budget = "50k-plus".into();
    let html = ReportRenderer::new().unwrap().render(&draft, at(9)).unwrap();
    assert!(html.contains("<span class=\"value\">landing-page-blitz</span>"));
    assert!(html.contains("50k-plus"));
    assert!(subject(&draft).ends_with("- landing-page-blitz"));
}

#[test]
fn blank_optional_sections_are_omitted() {
    let html = ReportRenderer::new()
        .unwrap()
        .render(&sample_draft(), at(9))
        .unwrap();
    assert!(!html.contains("Secondary Goals:"));
    assert!(!html.contains("Required Features:"));
    assert!(!html.contains("Content Help Needed:"));
    assert!(!html.contains("USPs:"));
    assert!(!html.contains("Current URL(s):"));
    assert!(!html.contains("Additional Information"));
    assert!(html.contains("<span class=\"value\">Not provided</span>"));
    assert!(html.contains("Not specified"));
}

#[test]
fn sets_render_as_tags_and_free_text_appears_when_present() {
    let mut draft = sample_draft();
    draft.secondary_goals = vec!["Build email list".into(), "Live chat".into()];
    draft.content_help = vec!["Copywriting".into()];
    draft.existing_website_url = "https://acme.example\nhttps://shop.acme.example".into();
    draft.additional_info = "Launch before spring".into();
    let html = ReportRenderer::new().unwrap().render(&draft, at(9)).unwrap();
    assert!(html.contains("<span class=\"tag\">Build email list</span>"));
    assert!(html.contains("<span class=\"tag\">Live chat</span>"));
    assert!(html.contains("<span class=\"tag\">Copywriting</span>"));
    assert!(html.contains("Current URL(s):"));
    assert!(html.contains("<h2>Additional Information</h2>"));
    assert!(html.contains("Launch before spring"));
}

#[test]
fn submitted_values_are_html_escaped() {
    let mut draft = sample_draft();
    draft.company_name = "<script>alert(1)</script>".into();
    let html = ReportRenderer::new().unwrap().render(&draft, at(9)).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn rendering_is_stable_apart_from_the_timestamp() {
    let renderer = ReportRenderer::new().unwrap();
    let draft = sample_draft();
    let first = renderer.render(&draft, at(9)).unwrap();
    let second = renderer.render(&draft, at(17)).unwrap();
    assert_ne!(first, second);
    assert_eq!(
        first.replace(&format_submitted_at(at(9)), ""),
        second.replace(&format_submitted_at(at(17)), "")
    );
}
