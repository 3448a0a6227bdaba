//! One-call constructors, end to end through the prelude.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use walkthrough::prelude::*;

fn page() -> PageSimulator {
    let mut page = PageSimulator::new(Size::new(1024.0, 768.0), 2000.0);
    let nav = page.add_element("#nav", Rect::new(0.0, 0.0, 1024.0, 60.0));
    let feed = page.add_element("#feed", Rect::new(200.0, 100.0, 600.0, 500.0));
    page.set_attribute(nav, "data-wt-step", "1");
    page.set_attribute(nav, "data-wt-title", "Navigation");
    page.set_attribute(feed, "data-wt-step", "2");
    page.set_attribute(feed, "data-wt-position", "right");
    page
}

#[test]
fn attribute_tour_runs_to_the_end() {
    let mut tour = factory::from_attributes(page(), Options::default());
    let finished = Rc::new(Cell::new(false));
    let flag = finished.clone();
    tour.configure(
        TourConfig::new().callbacks(Callbacks::new().on_finish(move || flag.set(true))),
    )
    .expect("configure");

    tour.tick(Duration::ZERO);
    tour.start(None);
    tour.tick(Duration::from_millis(50));
    assert_eq!(
        tour.current_step().and_then(|s| s.title.as_deref()),
        Some("Navigation")
    );

    tour.handle_event(Event::Action(PopupAction::Next));
    tour.tick(Duration::from_millis(200));
    tour.handle_event(Event::Action(PopupAction::Finish));

    assert!(finished.get());
    assert!(!tour.is_active());
}

#[test]
fn auto_start_through_options() {
    let options = Options::default()
        .auto_start(true)
        .start_delay(Duration::from_millis(300));
    let mut tour = factory::from_attributes(page(), options);
    tour.tick(Duration::from_millis(0));
    assert!(!tour.is_active());
    tour.tick(Duration::from_millis(300));
    assert!(tour.is_active());
    assert_eq!(tour.step_count(), 2);
}

#[cfg(feature = "config-files")]
#[test]
fn file_document() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("tour.json");
    std::fs::write(
        &path,
        r##"{ "options": { "nextText": "Go" }, "steps": [ { "element": "#nav" }, { "element": "#feed" } ] }"##,
    )
    .expect("write");

    let mut tour = factory::from_file(page(), &path).expect("load");
    tour.tick(Duration::ZERO);
    tour.start(None);
    tour.tick(Duration::from_millis(50));
    assert!(tour.backend().popup_content().contains("Go"));
}

#[cfg(feature = "config-files")]
#[test]
fn missing_file_is_config_io() {
    let err = factory::from_file(page(), "/no/such/tour.json").expect_err("missing");
    assert_eq!(err.error_type(), "config");
}
