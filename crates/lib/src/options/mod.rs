//! Option schema: the static declaration of every configurable attribute.
//!
//! - [`OptionDecl`]: one declared option
//! - [`OptionSchema`]: the set of declarations for a machine, keyed by path
//! - [`machine_schema`]: the built-in catalogue covering every deployment profile

mod machine;
mod schema;
mod types;

pub use machine::{machine_schema, paths};
pub(crate) use schema::check_type;
pub use schema::OptionSchema;
pub use types::{OptionDecl, Refinement};
