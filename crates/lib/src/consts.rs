//! Crate-wide constants.

/// Number of hex characters kept from a SHA-256 digest in an [`ObjectHash`](crate::util::hash::ObjectHash).
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

/// How the unknown sentinel is rendered in documentation and log output.
pub const UNKNOWN_SENTINEL: &str = "<unknown>";

/// Rendering used by the exporter for options without any default.
pub const NO_DEFAULT: &str = "no default";

/// Source label attached to options declared by this crate's built-in catalogue.
pub const BUILTIN_SOURCE: &str = "<builtin>";
