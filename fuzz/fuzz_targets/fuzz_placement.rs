#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wt_core::geometry::{Rect, ScrollOffset, Size};
use wt_layout::{EDGE_MARGIN, PlacementInput, Side, place};

#[derive(Debug, Arbitrary)]
struct Input {
    target: (i16, i16, u16, u16),
    popup: (u16, u16),
    viewport: (u16, u16),
    scroll: (u16, u16),
    preferred: Option<u8>,
    padding: i8,
    offset: u8,
}

fuzz_target!(|input: Input| {
    let preferred = input.preferred.map(|p| Side::PRIORITY[usize::from(p % 4)]);
    let placement_input = PlacementInput {
        target: Rect::new(
            f64::from(input.target.0),
            f64::from(input.target.1),
            f64::from(input.target.2),
            f64::from(input.target.3),
        ),
        popup: Size::new(f64::from(input.popup.0), f64::from(input.popup.1)),
        viewport: Size::new(f64::from(input.viewport.0), f64::from(input.viewport.1)),
        scroll: ScrollOffset::new(f64::from(input.scroll.0), f64::from(input.scroll.1)),
        preferred,
        padding: f64::from(input.padding),
        offset: f64::from(input.offset),
    };

    let first = place(&placement_input);
    let second = place(&placement_input);
    assert_eq!(first, second, "placement must be deterministic");
    assert_eq!(first.arrow, first.side.opposite());

    // The lower margin always wins the clamp.
    let left = first.left - placement_input.scroll.left;
    let top = first.top - placement_input.scroll.top;
    assert!(left >= EDGE_MARGIN, "left {left} below margin");
    assert!(top >= EDGE_MARGIN, "top {top} below margin");
});
