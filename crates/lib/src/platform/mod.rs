//! Typed system platforms.
//!
//! Lookup tables for derived defaults are keyed by platform, so the
//! `nixpkgs.system` string is parsed once into a [`Platform`] instead of being
//! compared as free-form text.

pub mod arch;
pub mod os;

use std::fmt;
use std::str::FromStr;

use arch::Arch;
use os::Os;
use thiserror::Error;

/// Failure to parse a system string such as `x86_64-linux`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePlatformError {
  #[error("unknown architecture '{0}'")]
  UnknownArch(String),

  #[error("unknown operating system '{0}'")]
  UnknownOs(String),

  #[error("system '{0}' is not of the form <arch>-<os>")]
  Malformed(String),
}

/// Platform identifier combining architecture and OS (e.g., "x86_64-linux")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  /// Create a new platform identifier
  pub const fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Returns the system string (e.g., "x86_64-linux")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl FromStr for Platform {
  type Err = ParsePlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (arch, os) = s
      .split_once('-')
      .ok_or_else(|| ParsePlatformError::Malformed(s.to_string()))?;
    Ok(Self {
      arch: arch.parse()?,
      os: os.parse()?,
    })
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}
