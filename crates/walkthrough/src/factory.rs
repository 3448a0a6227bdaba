#![forbid(unsafe_code)]

//! Entry points that build a ready tour in one call.
//!
//! Each function takes ownership of a backend and returns an owned
//! [`Tour`]. There is no registry: keep the tour wherever the host keeps its
//! other state and drive it with `tick` and `handle_event`.
//!
//! ```
//! use walkthrough::prelude::*;
//!
//! let mut page = PageSimulator::new(Size::new(1280.0, 800.0), 2000.0);
//! page.add_element("#search", Rect::new(40.0, 20.0, 400.0, 36.0));
//! page.add_element("#results", Rect::new(40.0, 80.0, 800.0, 600.0));
//!
//! let steps = [
//!     StepDef::selector("#search").title("Search"),
//!     StepDef::selector("#results").title("Results"),
//! ];
//! let mut tour = walkthrough::factory::start(page, steps, Options::default())?;
//! assert!(tour.is_active());
//! tour.tick(std::time::Duration::ZERO);
//! # Ok::<(), walkthrough::Error>(())
//! ```

use wt_backend::Backend;
use wt_runtime::{Options, StepDef, Tour, TourConfig};

use crate::error::Result;

/// Tour over the steps declared in page attributes.
///
/// Nothing starts; call `start` once the host is ready.
#[must_use]
pub fn from_attributes<B: Backend>(backend: B, options: Options) -> Tour<B> {
    let mut tour = Tour::with_options(backend, options);
    tour.scan_attribute_steps();
    tour
}

/// Tour built from a configuration. Options in the configuration also
/// govern construction (auto start).
pub fn from_config<B: Backend>(backend: B, config: TourConfig<B::Target>) -> Result<Tour<B>> {
    let options = config.options_ref().cloned().unwrap_or_default();
    let mut tour = Tour::with_options(backend, options);
    tour.configure(config)?;
    Ok(tour)
}

/// Tour built from a JSON document (`{ "options": {…}, "steps": [...] }`).
#[cfg(feature = "config-files")]
pub fn from_json<B: Backend>(backend: B, json: &str) -> Result<Tour<B>> {
    let doc = wt_runtime::TourDocument::from_json_str(json)?;
    from_config(backend, doc.into_config())
}

/// Tour built from a JSON or TOML file (chosen by extension).
#[cfg(feature = "config-files")]
pub fn from_file<B: Backend>(backend: B, path: impl AsRef<std::path::Path>) -> Result<Tour<B>> {
    let doc = wt_runtime::TourDocument::from_file(path)?;
    from_config(backend, doc.into_config())
}

/// Configure `steps` and start immediately.
pub fn start<B, I>(backend: B, steps: I, options: Options) -> Result<Tour<B>>
where
    B: Backend,
    I: IntoIterator<Item = StepDef<B::Target>>,
{
    let mut tour = Tour::with_options(backend, options);
    tour.configure(TourConfig::new().steps(steps))?;
    tour.start(None);
    Ok(tour)
}
