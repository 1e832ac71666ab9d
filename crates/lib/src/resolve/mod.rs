//! Resolution of a machine specification into its final configuration.
//!
//! One pass per machine:
//!
//! 1. Collect every definition as an explicit candidate; undeclared paths fail.
//! 2. Resolve `deployment.targetEnv` alone and select the profile.
//! 3. Seed every active option with its declared default and definitions.
//!    Options of other profiles keep only what the user wrote.
//! 4. Add the selected profile's forced fragments.
//! 5. Evaluate default rules in dependency order, each seeing the resolved
//!    values of what it reads.
//! 6. Pick the winner per option, type-check it, and freeze the result.

mod resolver;
mod types;

pub use resolver::{Resolver, resolve};
pub use types::{ResolvedAttr, ResolvedConfig};
