//! Configuration for cslgen.
//!
//! A configuration source lists the publications to generate styles for and
//! a grid of parameter overrides, one column per style id:
//!
//! ```yaml
//! metadata:
//!   - ids: chicago-en, chicago-ja
//!     name: Journal of Examples
//!     language: English
//! parameters:
//!   b-name-delimiter:
//!     chicago-en: "; "
//! ```
//!
//! [`ConfigTable`] loads the source, [`ConfigRecord`] resolves the cells of
//! one style id against the typed [`Param`] schema. Missing or empty cells
//! are never errors; they resolve to the parameter's default.

pub mod error;
pub mod metadata;
pub mod record;
pub mod schema;
pub mod table;
pub mod value;

pub use error::{Error, Result};
pub use metadata::{Contributor, PublicationRow};
pub use record::ConfigRecord;
pub use schema::{PARAMS, Param, ParamKind, ParamSpec};
pub use table::ConfigTable;
pub use value::ConfigValue;
