// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::event::TriggerEvent;
use std::path::PathBuf;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for trigger events.
pub mod strategies {
    use crate::event::TriggerEvent;
    use proptest::prelude::*;
    use std::path::PathBuf;

    /// Events drawn from a tiny alphabet so repeats are common.
    pub fn arb_trigger_event() -> impl Strategy<Value = TriggerEvent> {
        prop_oneof![
            "/bin/[ab]".prop_map(|p| TriggerEvent::Path(PathBuf::from(p))),
            "[a-c]".prop_map(TriggerEvent::Input),
        ]
    }

    pub fn arb_trigger_events() -> impl Strategy<Value = Vec<TriggerEvent>> {
        prop::collection::vec(arb_trigger_event(), 0..32)
    }
}

// ── Event factory functions ─────────────────────────────────────────────────

pub fn path_event(path: &str) -> TriggerEvent {
    TriggerEvent::Path(PathBuf::from(path))
}

pub fn input_event(input: &str) -> TriggerEvent {
    TriggerEvent::Input(input.to_string())
}

/// A syntactically valid map exchange string for the default input format.
pub fn exchange_string(body: &str) -> String {
    format!(">>>eN{body}<<<")
}
