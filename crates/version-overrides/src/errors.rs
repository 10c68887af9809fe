// Archivo: errors.rs
// Propósito: errores de la resolución de overrides y el alias Result<T>.
use thiserror::Error;
use version_domain::{DomainError, ProtocolVersionRange};

/// Errores de la resolución de overrides de versión.
///
/// Los fallos de almacenamiento, registro o flags se propagan tal cual; la
/// incompatibilidad de protocolo es siempre fatal para la llamada.
#[derive(Error, Debug)]
pub enum OverrideError {
  /// Errores del dominio o del almacén de versiones.
  #[error("Error de dominio: {0}")]
  Domain(#[from] DomainError),

  /// La versión resuelta habla un protocolo fuera del rango soportado.
  #[error("Versión de protocolo {protocol_version} de {docker_repository}:{docker_image_tag} fuera del rango soportado {range}")]
  ProtocolIncompatible {
    docker_repository: String,
    docker_image_tag: String,
    protocol_version: String,
    range: ProtocolVersionRange,
  },

  /// La versión de protocolo declarada no es una versión semántica.
  #[error("Versión de protocolo inválida '{protocol_version}' en {docker_repository}:{docker_image_tag}")]
  InvalidProtocolVersion {
    docker_repository: String,
    docker_image_tag: String,
    protocol_version: String,
  },

  /// Error al consultar el registro remoto de conectores.
  #[error("Error del registro remoto: {0}")]
  Registry(String),

  /// Error al evaluar un feature flag.
  #[error("Error de feature flags: {0}")]
  Flag(String),

  /// Configuración ausente o inválida.
  #[error("Error de configuración: {0}")]
  Config(String),
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, OverrideError>;
