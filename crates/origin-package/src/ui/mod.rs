//! User-facing alert presentation.

pub mod dialog;
