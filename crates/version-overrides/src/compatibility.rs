use crate::errors::{OverrideError, Result};
use version_domain::{ActorDefinitionVersion, ProtocolVersion, ProtocolVersionRange};

/// Verifica que la versión de protocolo de una versión candidata esté dentro
/// del rango soportado por la plataforma.
pub struct ProtocolCompatibilityGuard;

impl ProtocolCompatibilityGuard {
    /// Falla con `ProtocolIncompatible` si el protocolo queda fuera de
    /// `[range.min, range.max]`. Una versión sin protocolo declarado se
    /// evalúa como `ProtocolVersion::DEFAULT`.
    pub fn check(version: &ActorDefinitionVersion, range: &ProtocolVersionRange) -> Result<()> {
        let parsed = match version.protocol_version() {
            None => ProtocolVersion::DEFAULT,
            Some(raw) => ProtocolVersion::parse(raw).map_err(|_| OverrideError::InvalidProtocolVersion {
                docker_repository: version.docker_repository().to_string(),
                docker_image_tag: version.docker_image_tag().to_string(),
                protocol_version: raw.to_string(),
            })?,
        };
        if !range.is_supported(&parsed) {
            return Err(OverrideError::ProtocolIncompatible { docker_repository: version.docker_repository().to_string(),
                                                             docker_image_tag: version.docker_image_tag().to_string(),
                                                             protocol_version: parsed.to_string(),
                                                             range: *range });
        }
        Ok(())
    }
}
