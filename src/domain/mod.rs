//! Core domain models for hasdep
//!
//! This module contains the fundamental types used throughout the application:
//! - Manifest sections parsed from package.json
//! - The scan query built from CLI input
//! - Per-section match outcomes and version judgements

mod manifest;
mod outcome;
mod query;

pub use manifest::{DependencyMap, Manifest, MANIFEST_PATH};
pub use outcome::{DependencyKind, MatchOutcome, MatchStatus, VersionJudgement};
pub use query::{NegativeMode, RepositoryIdentity, ScanQuery};
