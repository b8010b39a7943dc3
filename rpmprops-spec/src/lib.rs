//! # rpmprops-spec
//! Field and macro extraction for RPM spec files.
//!
//! A spec file mixes `Field: value` preamble lines with `%define name value` macro
//! definitions. This crate picks out a fixed set of preamble fields and every simple
//! `%define`, stores them in a [`PropertyStore`], then expands `%{name}` references
//! between the stored values.
//!
//! ```no_run
//! use rpmprops_spec::SpecParser;
//!
//! let parser = SpecParser::new("tests/specs/p4bugzilla.spec");
//! let props = parser.parse()?;
//! println!("{}-{}", props.get("name")?.unwrap_or_default(), props.get("version")?.unwrap_or_default());
//! # Ok::<(), rpmprops_spec::SpecError>(())
//! ```
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod parser;
pub mod patterns;
pub mod resolve;
pub mod scan;
pub mod store;

pub use error::SpecError;
pub use parser::SpecParser;
pub use store::PropertyStore;
