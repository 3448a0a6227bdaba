#![forbid(unsafe_code)]

//! Popup content.
//!
//! A [`PopupRenderer`] turns a step into markup. The tour hands the markup to
//! the presenter verbatim: titles and text are opaque and are not escaped.
//!
//! Controls inside the markup are wired up by tagging convention: any element
//! carrying `data-wt-action="skip|prev|next|finish"` triggers that action.
//! [`bound_actions`] finds those tags so the tour can ignore actions the
//! current popup does not offer.

use std::fmt::Write as _;

use wt_core::event::PopupAction;

use crate::options::Options;
use crate::step::Step;

/// Produces popup markup for a step.
pub trait PopupRenderer<T> {
    /// Markup for `step`, the `index`-th of `total`.
    fn render(&self, step: &Step<T>, index: usize, total: usize) -> String;
}

impl<T, F> PopupRenderer<T> for F
where
    F: Fn(&Step<T>, usize, usize) -> String,
{
    fn render(&self, step: &Step<T>, index: usize, total: usize) -> String {
        self(step, index, total)
    }
}

/// The built-in layout: header, body, progress bar, button footer.
#[derive(Debug, Clone, Copy)]
pub struct DefaultPopup<'a> {
    options: &'a Options,
}

impl<'a> DefaultPopup<'a> {
    /// Layout driven by `options` (visibility flags and default labels).
    #[must_use]
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    fn button(out: &mut String, class: &str, action: PopupAction, label: &str) {
        let _ = write!(
            out,
            r#"<button class="wt-btn {class}" {}="{}">{label}</button>"#,
            PopupAction::ATTRIBUTE,
            action.tag(),
        );
    }
}

impl<T> PopupRenderer<T> for DefaultPopup<'_> {
    fn render(&self, step: &Step<T>, index: usize, total: usize) -> String {
        let o = self.options;
        let is_first = index == 0;
        let is_last = index + 1 >= total;
        let mut out = String::from(r#"<div class="wt-popup-content">"#);

        if step.title.is_some() || o.show_progress {
            out.push_str(r#"<div class="wt-popup-header">"#);
            if let Some(title) = &step.title {
                let _ = write!(out, r#"<h3 class="wt-popup-title">{title}</h3>"#);
            }
            if o.show_progress {
                let _ = write!(
                    out,
                    r#"<div class="wt-popup-step-count">Step {} of {total}</div>"#,
                    index + 1
                );
            }
            out.push_str("</div>");
        }

        if let Some(text) = &step.text {
            let _ = write!(out, r#"<div class="wt-popup-body">{text}</div>"#);
        }

        if o.show_progress && total > 0 {
            let percent = (index + 1) as f64 / total as f64 * 100.0;
            let _ = write!(
                out,
                r#"<div class="wt-progress"><div class="wt-progress-bar" style="width: {percent}%"></div></div>"#
            );
        }

        if o.show_buttons {
            let labels = &step.labels;
            out.push_str(r#"<div class="wt-popup-footer">"#);
            if o.show_skip {
                let label = labels.skip.as_deref().unwrap_or(&o.skip_text);
                Self::button(&mut out, "wt-btn-skip", PopupAction::Skip, label);
            } else {
                out.push_str("<div></div>");
            }
            out.push_str(r#"<div class="wt-btn-group">"#);
            if !is_first {
                let label = labels.prev.as_deref().unwrap_or(&o.prev_text);
                Self::button(&mut out, "wt-btn-prev", PopupAction::Prev, label);
            }
            if is_last {
                let label = labels.finish.as_deref().unwrap_or(&o.finish_text);
                Self::button(&mut out, "wt-btn-finish", PopupAction::Finish, label);
            } else {
                let label = labels.next.as_deref().unwrap_or(&o.next_text);
                Self::button(&mut out, "wt-btn-next", PopupAction::Next, label);
            }
            out.push_str("</div></div>");
        }

        out.push_str("</div>");
        out
    }
}

/// Actions tagged in `markup`, in order of first appearance.
#[must_use]
pub fn bound_actions(markup: &str) -> Vec<PopupAction> {
    let needle = PopupAction::ATTRIBUTE;
    let mut found = Vec::new();
    let mut rest = markup;
    while let Some(pos) = rest.find(needle) {
        rest = &rest[pos + needle.len()..];
        let Some(value) = attribute_value(rest) else {
            continue;
        };
        if let Ok(action) = value.parse::<PopupAction>()
            && !found.contains(&action)
        {
            found.push(action);
        }
    }
    found
}

/// Value of an attribute whose name was just consumed: `="x"` or `='x'`.
fn attribute_value(s: &str) -> Option<&str> {
    let s = s.trim_start().strip_prefix('=')?.trim_start();
    let quote = s.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &s[1..];
    body.find(quote).map(|end| &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::ButtonLabels;

    fn step(title: Option<&str>, text: Option<&str>) -> Step<()> {
        Step {
            target: (),
            title: title.map(str::to_string),
            text: text.map(str::to_string),
            side: None,
            labels: ButtonLabels::default(),
        }
    }

    #[test]
    fn first_step_has_no_prev() {
        let options = Options::default();
        let html = DefaultPopup::new(&options).render(&step(Some("Hi"), Some("Body")), 0, 3);
        assert!(html.contains(r#"<h3 class="wt-popup-title">Hi</h3>"#));
        assert!(html.contains("Step 1 of 3"));
        assert!(html.contains("Body"));
        assert_eq!(
            bound_actions(&html),
            vec![PopupAction::Skip, PopupAction::Next]
        );
    }

    #[test]
    fn middle_and_last_steps() {
        let options = Options::default();
        let popup = DefaultPopup::new(&options);
        let middle = popup.render(&step(None, None), 1, 3);
        assert_eq!(
            bound_actions(&middle),
            vec![PopupAction::Skip, PopupAction::Prev, PopupAction::Next]
        );
        let last = popup.render(&step(None, None), 2, 3);
        assert_eq!(
            bound_actions(&last),
            vec![PopupAction::Skip, PopupAction::Prev, PopupAction::Finish]
        );
        assert!(last.contains("width: 100%"));
    }

    #[test]
    fn single_step_is_first_and_last() {
        let options = Options::default();
        let html = DefaultPopup::new(&options).render(&step(None, None), 0, 1);
        assert_eq!(
            bound_actions(&html),
            vec![PopupAction::Skip, PopupAction::Finish]
        );
    }

    #[test]
    fn flags_hide_sections() {
        let options = Options::default()
            .show_progress(false)
            .show_skip(false);
        let html = DefaultPopup::new(&options).render(&step(None, Some("x")), 0, 2);
        assert!(!html.contains("wt-popup-header"));
        assert!(!html.contains("wt-progress"));
        assert!(html.contains("<div></div>"));
        assert_eq!(bound_actions(&html), vec![PopupAction::Next]);

        let bare = Options::default().show_buttons(false);
        let html = DefaultPopup::new(&bare).render(&step(None, None), 0, 2);
        assert!(bound_actions(&html).is_empty());
    }

    #[test]
    fn per_step_labels_override_defaults() {
        let options = Options::default();
        let mut s = step(None, None);
        s.labels.next = Some("Onward".into());
        let html = DefaultPopup::new(&options).render(&s, 0, 2);
        assert!(html.contains("Onward"));
        assert!(!html.contains("Next →"));
        assert!(html.contains("Skip"));
    }

    #[test]
    fn closure_renderer() {
        let r = |s: &Step<()>, i: usize, n: usize| {
            format!("{}:{i}/{n}", s.title.as_deref().unwrap_or("-"))
        };
        assert_eq!(r.render(&step(Some("A"), None), 1, 4), "A:1/4");
    }

    #[test]
    fn scans_custom_markup() {
        let html = r#"<a data-wt-action='finish'>x</a><b data-wt-action = "next"></b>
            <i data-wt-action="bogus"></i><a data-wt-action="finish"></a>"#;
        assert_eq!(
            bound_actions(html),
            vec![PopupAction::Finish, PopupAction::Next]
        );
        assert!(bound_actions("<p>no controls</p>").is_empty());
    }
}
