//! Validation message formatting.
//!
//! - [`format`]: the positional `%d`/`%s` template formatter.
//! - [`catalog`]: [`MessageTable`], the key → template table, with the
//!   built-in English templates and JSON/TOML loading for localizations.
//!
//! ## Quick Start
//!
//! ```
//! use uniform_rs_core::i18n::{MessageArg, MessageTable};
//!
//! let french = MessageTable::from_json_str("fr", r#"{"required": "%s est requis"}"#).unwrap();
//! let table = MessageTable::layered(&MessageTable::english(), &french);
//!
//! assert_eq!(table.format("required", &["Nom".into()]).unwrap(), "Nom est requis");
//! assert_eq!(
//!     table.format("max", &["Age".into(), MessageArg::Int(120)]).unwrap(),
//!     "Age should be less than or equal to 120"
//! );
//! ```

pub mod catalog;
pub mod format;

pub use catalog::{keys, MessageTable};
pub use format::{format_template, MessageArg};
