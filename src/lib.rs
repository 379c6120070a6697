//! hasdep - find which repositories depend on an npm package
//!
//! This library provides the core functionality for scanning the
//! package.json of one repository, or every repository of a GitHub
//! organization or user:
//! - npm version range checking
//! - Dependency lookup in `dependencies` and `devDependencies`
//! - Found / mismatch / absence reporting, including negative mode

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod github;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod version;
pub mod walker;
