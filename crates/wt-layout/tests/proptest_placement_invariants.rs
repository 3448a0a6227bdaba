//! Property-based invariant tests for the placement solver.
//!
//! 1. `place` is deterministic: identical input, identical output
//! 2. Candidate fit flags do not depend on the order they are inspected in
//! 3. A preferred side that fits is always honoured
//! 4. When any candidate fits, the chosen side fits
//! 5. Before scroll, both coordinates are >= EDGE_MARGIN
//! 6. When the popup fits the viewport, it is fully on screen after clamping
//! 7. The arrow is always opposite the chosen side

use proptest::prelude::*;
use wt_core::geometry::{Rect, ScrollOffset, Size};
use wt_layout::{EDGE_MARGIN, PlacementInput, Side, candidates, place};

fn side_strategy() -> impl Strategy<Value = Option<Side>> {
    prop_oneof![
        Just(None),
        Just(Some(Side::Top)),
        Just(Some(Side::Bottom)),
        Just(Some(Side::Left)),
        Just(Some(Side::Right)),
    ]
}

fn input_strategy() -> impl Strategy<Value = PlacementInput> {
    (
        (-200.0f64..1400.0, -200.0f64..1400.0, 0.0f64..600.0, 0.0f64..600.0),
        (0.0f64..1400.0, 0.0f64..800.0),
        (100.0f64..1600.0, 100.0f64..1200.0),
        (0.0f64..5000.0, 0.0f64..5000.0),
        side_strategy(),
        (0.0f64..40.0, 0.0f64..40.0),
    )
        .prop_map(
            |((x, y, w, h), (pw, ph), (vw, vh), (sl, st), preferred, (padding, offset))| {
                PlacementInput {
                    target: Rect::new(x, y, w, h),
                    popup: Size::new(pw, ph),
                    viewport: Size::new(vw, vh),
                    scroll: ScrollOffset::new(sl, st),
                    preferred,
                    padding,
                    offset,
                }
            },
        )
}

proptest! {
    #[test]
    fn deterministic(input in input_strategy()) {
        prop_assert_eq!(place(&input), place(&input));
    }

    #[test]
    fn fit_flags_are_order_independent(input in input_strategy()) {
        let forward = candidates(&input);
        let mut reversed = candidates(&input);
        reversed.reverse();
        for c in forward {
            let twin = reversed.iter().find(|r| r.side == c.side).expect("same sides");
            prop_assert_eq!(c.fits, twin.fits);
        }
    }

    #[test]
    fn preferred_honoured_when_fitting(input in input_strategy()) {
        let all = candidates(&input);
        let chosen = place(&input);
        if let Some(pref) = input.preferred
            && all.iter().any(|c| c.side == pref && c.fits)
        {
            prop_assert_eq!(chosen.side, pref);
        }
    }

    #[test]
    fn chosen_fits_when_anything_fits(input in input_strategy()) {
        let all = candidates(&input);
        let chosen = place(&input);
        if all.iter().any(|c| c.fits) {
            let c = all.iter().find(|c| c.side == chosen.side).expect("chosen candidate");
            prop_assert!(c.fits);
        } else {
            prop_assert_eq!(chosen.side, Side::Bottom);
        }
    }

    #[test]
    fn clamped_within_margins(input in input_strategy()) {
        let p = place(&input);
        let left = p.left - input.scroll.left;
        let top = p.top - input.scroll.top;
        prop_assert!(left >= EDGE_MARGIN - 1e-9);
        prop_assert!(top >= EDGE_MARGIN - 1e-9);
        if input.popup.width + 2.0 * EDGE_MARGIN <= input.viewport.width {
            prop_assert!(left + input.popup.width <= input.viewport.width - EDGE_MARGIN + 1e-9);
        }
        if input.popup.height + 2.0 * EDGE_MARGIN <= input.viewport.height {
            prop_assert!(top + input.popup.height <= input.viewport.height - EDGE_MARGIN + 1e-9);
        }
    }

    #[test]
    fn arrow_opposite(input in input_strategy()) {
        let p = place(&input);
        prop_assert_eq!(p.arrow, p.side.opposite());
    }
}
