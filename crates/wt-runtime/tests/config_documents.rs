//! Options and tour documents loaded from JSON and TOML.

use std::time::Duration;

use wt_core::geometry::{Rect, Size};
use wt_layout::Side;
use wt_runtime::{ConfigError, Options, PageSimulator, Tour, TourDocument};

#[test]
fn json_options_keep_defaults_for_missing_keys() {
    let options = Options::from_json_str(
        r#"{ "highlightPadding": 6, "animationDuration": 120, "rememberProgress": true }"#,
    )
    .expect("parse");
    assert_eq!(options.highlight_padding, 6.0);
    assert_eq!(options.animation_duration, Duration::from_millis(120));
    assert!(options.remember_progress);
    assert_eq!(options.scroll_duration, Duration::from_millis(500));
    assert_eq!(options.next_text, "Next →");
}

#[test]
fn json_options_round_trip() {
    let configured = Options::default()
        .scroll_offset(40.0)
        .storage_key("onboarding")
        .start_delay(Duration::from_millis(750));
    let json = serde_json::to_string(&configured).expect("serialize");
    assert!(json.contains("\"storageKey\":\"onboarding\""));
    assert!(json.contains("\"startDelay\":750"));
    assert_eq!(Options::from_json_str(&json).expect("parse"), configured);
}

#[test]
fn legacy_cookie_keys_accepted() {
    let options = Options::from_json_str(r#"{ "cookieName": "wt_old", "cookieExpiry": 7 }"#)
        .expect("parse");
    assert_eq!(options.storage_key, "wt_old");
    assert_eq!(options.storage_ttl(), Duration::from_secs(7 * 24 * 3600));
}

#[test]
fn toml_options() {
    let options = Options::from_toml_str(
        r#"
        keyboard = false
        popupOffset = 20.0
        skipText = "Later"
        "#,
    )
    .expect("parse");
    assert!(!options.keyboard);
    assert_eq!(options.popup_offset, 20.0);
    assert_eq!(options.skip_text, "Later");
}

#[test]
fn malformed_documents_are_errors() {
    assert!(matches!(
        Options::from_json_str("{ highlightPadding: }"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        Options::from_toml_str("keyboard = = true"),
        Err(ConfigError::Toml(_))
    ));
    assert!(matches!(
        Options::from_json_str(r#"{ "storageKey": "" }"#),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let err = Options::from_toml_file("/definitely/not/here.toml").expect_err("missing");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn document_configures_a_tour() {
    let doc = TourDocument::from_json_str(
        r##"{
            "options": { "showSkip": false },
            "steps": [
                { "element": "#intro", "title": "Hello", "text": "Start here" },
                { "element": "#save", "position": "left", "finishText": "Done" }
            ]
        }"##,
    )
    .expect("parse");

    let mut page = PageSimulator::new(Size::new(800.0, 600.0), 600.0);
    page.add_element("#intro", Rect::new(20.0, 20.0, 100.0, 30.0));
    page.add_element("#save", Rect::new(600.0, 300.0, 80.0, 30.0));
    let mut tour = Tour::new(page);
    tour.configure(doc.into_config()).expect("configure");

    assert_eq!(tour.step_count(), 2);
    assert!(!tour.options().show_skip);
    assert_eq!(tour.steps()[1].side, Some(Side::Left));
    assert_eq!(tour.steps()[1].labels.finish.as_deref(), Some("Done"));
}

#[test]
fn document_positions_are_lenient() {
    let doc = TourDocument::from_json_str(
        r##"{
            "steps": [
                { "element": "#a", "position": "center" },
                { "element": "#b", "position": "Top" },
                { "element": "#c", "position": "" },
                { "element": "#d", "position": null }
            ]
        }"##,
    )
    .expect("parse");
    let sides: Vec<Option<Side>> = doc.steps.iter().map(|s| s.position).collect();
    assert_eq!(sides, [None, Some(Side::Top), None, None]);

    let doc = TourDocument::from_toml_str(
        r##"
        [[steps]]
        element = "#a"
        position = "LEFT"

        [[steps]]
        element = "#b"
        position = "middle"
        "##,
    )
    .expect("parse");
    assert_eq!(doc.steps[0].position, Some(Side::Left));
    assert_eq!(doc.steps[1].position, None);
}

#[test]
fn toml_document_with_missing_target_fails() {
    let doc = TourDocument::from_toml_str(
        r##"
        [[steps]]
        element = "#ghost"
        "##,
    )
    .expect("parse");
    let mut tour = Tour::new(PageSimulator::new(Size::new(800.0, 600.0), 600.0));
    match tour.configure(doc.into_config()) {
        Err(ConfigError::TargetNotFound { index, selector }) => {
            assert_eq!(index, 0);
            assert_eq!(selector, "#ghost");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn document_from_file_picks_format_by_extension() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("tour.toml");
    std::fs::write(&path, "[[steps]]\nelement = \"#a\"\n").expect("write");
    let doc = TourDocument::from_file(&path).expect("load");
    assert_eq!(doc.steps[0].element, "#a");
    assert!(doc.options.is_none());
}
