// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros shared across the workspace.

/// Implement `Display` for an enum as a fixed label per variant.
///
/// Tuple variants take `(..)` after the name; struct variants need a
/// hand-written impl.
///
/// ```ignore
/// crate::simple_display! {
///     Stage {
///         Generate => "generate",
///         Upload => "upload",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident $(( $($ignore:tt)* ))? => $label:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant $(( $($ignore)* ))? => $label, )+
                })
            }
        }
    };
}
