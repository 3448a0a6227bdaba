#![no_main]

use libfuzzer_sys::fuzz_target;
use wt_core::event::PopupAction;
use wt_runtime::bound_actions;

fuzz_target!(|data: &[u8]| {
    let Ok(markup) = std::str::from_utf8(data) else {
        return;
    };
    let actions = bound_actions(markup);
    assert!(actions.len() <= PopupAction::ALL.len());
    for (i, action) in actions.iter().enumerate() {
        assert!(!actions[i + 1..].contains(action), "duplicate {action}");
    }
});
