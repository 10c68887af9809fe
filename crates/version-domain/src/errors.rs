// errors.rs
use thiserror::Error;

/// Errores del dominio de versiones de conectores.
///
/// `ExternalError` se usa también para fallos de almacenamiento (pool, BD,
/// mutex) de modo que las capas superiores los propaguen sin reinterpretarlos.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
  #[error("Error de validación: {0}")]
  ValidationError(String),
  #[error("Error externo: {0}")]
  ExternalError(String),
  #[error("Error de serialización: {0}")]
  SerializationError(String),
}

impl From<serde_json::Error> for DomainError {
  fn from(e: serde_json::Error) -> Self {
    Self::SerializationError(e.to_string())
  }
}
