//! Common types shared by the classport crates.
//!
//! This crate provides:
//! - The translation error taxonomy (`ConvertError`, `ErrorKind`)
//! - Pipeline stage names (`PipelineStage`) and the stage-tagged `TranslateError`

pub mod diagnostics;
pub use diagnostics::{ConvertError, ErrorKind, PipelineStage, TranslateError};
