//! # phpguard-core
//!
//! Core framework for linting PHP sources without a full grammar.
//!
//! This crate provides the building blocks shared by every rule:
//!
//! - [`parser`] turning source lines into a [`SourceModel`] in one pass
//! - [`model`] with the classes, functions, properties and doc blocks found
//! - [`Rule`] trait for per-file rules and [`Detector`] to run one of them
//! - [`Analyzer`] for orchestrating a run and producing a [`LintResult`]
//!
//! ## Example
//!
//! ```ignore
//! use phpguard_core::Analyzer;
//!
//! let result = Analyzer::builder()
//!     .root("./src")
//!     .rule(MyRule::new())
//!     .build()?
//!     .analyze()?;
//! result.print_report();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod detector;
mod rule;
mod types;

pub mod discovery;
pub mod gitignore;
pub mod model;
pub mod parser;
pub mod source;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::{relative_to, FileContext};
pub use detector::{DetectError, Detector};
pub use discovery::{DiscoveredFiles, Discovery, DEFAULT_EXCLUDE_DIRS};
pub use model::SourceModel;
pub use rule::{Rule, RuleBox};
pub use source::SourceError;
pub use types::{Issue, IssueDiagnostic, LintResult, RuleOutcome};
