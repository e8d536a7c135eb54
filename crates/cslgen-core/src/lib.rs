/*
 * lib.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Style assembly and rewrite rules.
 */

//! Style assembly and rewrite rules.
//!
//! This crate turns a base CSL style (by default the embedded Chicago
//! author-date template) into one customized style per publication.
//!
//! # Architecture
//!
//! ```text
//! Template ──parse──▶ StyleDocument
//!                         │ shared settings, -ja clones, metadata
//!                         ▼
//!          RuleEngine (Japanese pass, then primary pass)
//!                         │
//!                         ▼
//!                   OutputLayout ──▶ {stem}-{id}.csl
//! ```
//!
//! - [`assembler`]: prepares the working copy and runs the passes
//! - [`rule`]: the [`StyleRule`] trait and [`RulePipeline`]
//! - [`rules`]: the citation and bibliography rules
//! - [`output`]: file naming and writing

pub mod assembler;
pub mod document;
pub mod error;
pub mod locale;
pub mod macros;
pub mod metadata;
pub mod output;
pub mod rule;
pub mod rules;
pub mod template;

pub use assembler::{AssembleOptions, Assembler};
pub use document::StyleDocument;
pub use error::{Error, Result};
pub use locale::LocaleVariant;
pub use macros::MacroDictionary;
pub use output::OutputLayout;
pub use rule::{RuleContext, RulePipeline, StyleRule};
pub use rules::RuleEngine;
pub use template::{CHICAGO_AUTHOR_DATE, DEFAULT_STEM, Template};
