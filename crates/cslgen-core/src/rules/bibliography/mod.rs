/*
 * rules/bibliography/mod.rs
 * Copyright (c) 2025 cslgen contributors
 *
 * Rules that rewrite the bibliography entry.
 */

//! Rules that rewrite the bibliography entry.
//!
//! Layout-level rules come first; the macro rules after them look up the
//! layout's macro calls with the suffix of the running pass.

mod access;
mod dates;
mod layout;
mod locators;
mod names;
mod titles;

pub use access::Access;
pub use dates::IssuedDate;
pub use layout::{LayoutDelimiters, LayoutOrder};
pub use locators::{Issue, Locators, LocatorsArticle, LocatorsChapter};
pub use names::{ContainerContributors, Contributors, SecondaryContributors};
pub use titles::{CollectionTitle, ContainerTitle, Edition, Title};
