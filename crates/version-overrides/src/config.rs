// Archivo: config.rs
// Propósito: configuración de la resolución leída del entorno (con soporte
// de `.env` vía dotenvy).
use crate::errors::{OverrideError, Result};
use std::path::PathBuf;
use version_domain::{ProtocolVersion, ProtocolVersionRange};

pub const PROTOCOL_VERSION_MIN_VAR: &str = "CONNECTOR_PROTOCOL_VERSION_MIN";
pub const PROTOCOL_VERSION_MAX_VAR: &str = "CONNECTOR_PROTOCOL_VERSION_MAX";
pub const REGISTRY_PATH_VAR: &str = "CONNECTOR_REGISTRY_PATH";
pub const OVERRIDES_PATH_VAR: &str = "CONNECTOR_VERSION_OVERRIDES_PATH";

/// Configuración del `OverrideResolver` y de los clientes incluidos.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolverConfig {
    /// Rango de protocolo soportado (por defecto `[0.0.0, 0.3.0]`).
    pub protocol_version_range: ProtocolVersionRange,
    /// Fichero JSON con los registros del registro remoto estático.
    pub registry_path: Option<PathBuf>,
    /// Fichero JSON con las reglas de targeting del flag de override.
    pub overrides_path: Option<PathBuf>,
}

impl ResolverConfig {
    /// Lee la configuración de las variables de entorno (cargando `.env` si
    /// existe).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env` pero con una función de búsqueda inyectada.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = ProtocolVersionRange::default();
        let min = parse_bound(&lookup, PROTOCOL_VERSION_MIN_VAR, defaults.min())?;
        let max = parse_bound(&lookup, PROTOCOL_VERSION_MAX_VAR, defaults.max())?;
        let protocol_version_range =
            ProtocolVersionRange::new(min, max).map_err(|e| OverrideError::Config(e.to_string()))?;

        let path = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Ok(Self { protocol_version_range,
                  registry_path: path(REGISTRY_PATH_VAR),
                  overrides_path: path(OVERRIDES_PATH_VAR) })
    }
}

fn parse_bound<F>(lookup: &F, key: &str, default: ProtocolVersion) -> Result<ProtocolVersion>
    where F: Fn(&str) -> Option<String>
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            ProtocolVersion::parse(&raw).map_err(|e| OverrideError::Config(format!("{}: {}", key, e)))
        }
        _ => Ok(default),
    }
}
