//! Workspace-level behavioral specs for the `tandem` binary.
//!
//! Build the binary first (`cargo build`); specs drive it as a subprocess.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cli/mod.rs"]
mod cli;
