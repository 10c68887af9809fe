// protocol_version.rs
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Versión semántica del protocolo que habla un conector.
///
/// Sólo `major.minor.patch` participan en la comparación: el prefijo `v`,
/// el sufijo de pre-release (`-rc.1`) y la metadata de build (`+abc`) se
/// descartan al parsear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProtocolVersion {
  major: u64,
  minor: u64,
  patch: u64,
}

impl ProtocolVersion {
  /// Versión asumida cuando un conector no declara la suya.
  pub const DEFAULT: ProtocolVersion = ProtocolVersion::new(0, 2, 0);

  pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
    Self { major, minor, patch }
  }

  pub fn parse(raw: &str) -> Result<Self, DomainError> {
    let invalid = || DomainError::ValidationError(format!("Versión de protocolo inválida: '{}'", raw));
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let core = trimmed.split('+').next().unwrap_or_default();
    let core = core.split('-').next().unwrap_or_default();
    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() != 3 {
      return Err(invalid());
    }
    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(parts.iter()) {
      if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
      }
      *slot = part.parse().map_err(|_| invalid())?;
    }
    Ok(Self::new(numbers[0], numbers[1], numbers[2]))
  }

  pub fn major(&self) -> u64 {
    self.major
  }

  pub fn minor(&self) -> u64 {
    self.minor
  }

  pub fn patch(&self) -> u64 {
    self.patch
  }
}

impl fmt::Display for ProtocolVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
  }
}

impl FromStr for ProtocolVersion {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl TryFrom<String> for ProtocolVersion {
  type Error = DomainError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::parse(&value)
  }
}

impl From<ProtocolVersion> for String {
  fn from(v: ProtocolVersion) -> Self {
    v.to_string()
  }
}

/// Ventana inclusiva `[min, max]` de versiones de protocolo que la
/// plataforma puede orquestar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolVersionRange {
  min: ProtocolVersion,
  max: ProtocolVersion,
}

impl ProtocolVersionRange {
  pub fn new(min: ProtocolVersion, max: ProtocolVersion) -> Result<Self, DomainError> {
    if min > max {
      return Err(DomainError::ValidationError(format!("Rango de protocolo inválido: {} > {}", min, max)));
    }
    Ok(Self { min, max })
  }

  pub fn min(&self) -> ProtocolVersion {
    self.min
  }

  pub fn max(&self) -> ProtocolVersion {
    self.max
  }

  pub fn is_supported(&self, version: &ProtocolVersion) -> bool {
    self.min <= *version && *version <= self.max
  }
}

impl Default for ProtocolVersionRange {
  fn default() -> Self {
    Self { min: ProtocolVersion::new(0, 0, 0), max: ProtocolVersion::new(0, 3, 0) }
  }
}

impl fmt::Display for ProtocolVersionRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}, {}]", self.min, self.max)
  }
}
