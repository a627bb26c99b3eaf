//! Quakerisk CLI library.
//!
//! Output views, renderers and terminal styling shared by the
//! `quakerisk-cli` binary.

pub mod output;
pub mod terminal;
