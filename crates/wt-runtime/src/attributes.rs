#![forbid(unsafe_code)]

//! Steps declared in page markup.
//!
//! ```html
//! <button data-wt-step="2" data-wt-title="Save" data-wt-position="left">Save</button>
//! <nav data-wt-step="1" data-wt-text="Everything starts here.">…</nav>
//! ```
//!
//! Elements carrying the step attribute become steps, ordered by their step
//! number. Elements with equal numbers keep document order. A number that does
//! not parse counts as 0; an unknown position is ignored.

use wt_backend::TargetResolver;
use wt_layout::Side;

use crate::options::Options;
use crate::step::{ButtonLabels, Step};

/// Parse a leading decimal integer the way lenient web code does: optional
/// whitespace, optional sign, then digits; trailing junk is ignored and
/// values beyond `i64` saturate.
pub(crate) fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let run = &digits[..end];
    if run.is_empty() {
        return None;
    }
    // Overlong runs saturate so huge step numbers still sort last.
    let value = run.bytes().fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    });
    Some(value)
}

/// Collect attribute-declared steps from `source`.
pub fn scan_attribute_steps<R>(source: &R, options: &Options) -> Vec<Step<R::Target>>
where
    R: TargetResolver + ?Sized,
{
    let step_attr = options.data_attribute(&options.step_attribute);
    let title_attr = options.data_attribute(&options.title_attribute);
    let text_attr = options.data_attribute(&options.text_attribute);
    let position_attr = options.data_attribute(&options.position_attribute);

    let mut numbered: Vec<(i64, Step<R::Target>)> = source
        .annotated(&step_attr)
        .into_iter()
        .map(|(target, attrs)| {
            let get = |name: &str| {
                attrs
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.as_str())
                    .filter(|v| !v.is_empty())
            };
            let number = get(&step_attr).and_then(leading_int).unwrap_or(0);
            let step = Step {
                target,
                title: get(&title_attr).map(str::to_string),
                text: get(&text_attr).map(str::to_string),
                side: get(&position_attr).and_then(|p| p.parse::<Side>().ok()),
                labels: ButtonLabels::default(),
            };
            (number, step)
        })
        .collect();

    numbered.sort_by_key(|(number, _)| *number);
    numbered.into_iter().map(|(_, step)| step).collect()
}
