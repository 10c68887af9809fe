// Archivo: resolver.rs
// Propósito: punto de entrada de la resolución de overrides. Orquesta la
// construcción del contexto, la evaluación del flag, la hidratación de la
// versión y la validación de protocolo.
use crate::compatibility::ProtocolCompatibilityGuard;
use crate::config::ResolverConfig;
use crate::context::VersionContextBuilder;
use crate::errors::Result;
use crate::hydrator::VersionHydrator;
use crate::repository::{FeatureFlagClient, RemoteDefinitionsProvider, CONNECTOR_VERSION_OVERRIDE};
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;
use version_domain::{ActorDefinitionVersion, ActorType, ProtocolVersionRange, VersionRepository};

/// Resultado de `resolve_version`: la versión a ejecutar y si proviene de un
/// override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: ActorDefinitionVersion,
    pub is_override: bool,
}

/// Decide qué versión de un conector debe ejecutarse para un actor.
///
/// No guarda estado mutable entre llamadas ni cachea resultados: cada
/// llamada reevalúa el flag y, si hay override, vuelve a consultar el
/// almacén. Puede compartirse entre hilos detrás de un `Arc`.
pub struct OverrideResolver {
    flags: Arc<dyn FeatureFlagClient>,
    hydrator: VersionHydrator,
    protocol_range: ProtocolVersionRange,
}

impl OverrideResolver {
    pub fn new(repo: Arc<dyn VersionRepository>,
               registry: Arc<dyn RemoteDefinitionsProvider>,
               flags: Arc<dyn FeatureFlagClient>,
               protocol_range: ProtocolVersionRange)
               -> Self {
        Self { flags, hydrator: VersionHydrator::new(repo, registry), protocol_range }
    }

    pub fn from_config(repo: Arc<dyn VersionRepository>,
                       registry: Arc<dyn RemoteDefinitionsProvider>,
                       flags: Arc<dyn FeatureFlagClient>,
                       config: &ResolverConfig)
                       -> Self {
        Self::new(repo, registry, flags, config.protocol_version_range)
    }

    pub fn protocol_range(&self) -> &ProtocolVersionRange {
        &self.protocol_range
    }

    /// Devuelve la versión override para el actor, si existe.
    ///
    /// - Flag vacío (o sólo espacios): `Ok(None)` sin tocar almacén ni
    ///   registro. Un valor no vacío se usa como tag sin normalizar.
    /// - Tag desconocido en almacén y registro: `Ok(None)`.
    /// - Protocolo fuera de rango: error `ProtocolIncompatible`, nunca se
    ///   degrada a "sin override".
    ///
    /// `default_version` sólo aporta el repositorio docker; no se modifica.
    pub fn get_override(&self,
                        actor_type: ActorType,
                        actor_definition_id: Uuid,
                        workspace_id: Uuid,
                        actor_id: Option<Uuid>,
                        default_version: &ActorDefinitionVersion)
                        -> Result<Option<ActorDefinitionVersion>> {
        let context = VersionContextBuilder::build_context(actor_type, actor_definition_id, workspace_id, actor_id);
        let target_tag = self.flags.string_variation(&CONNECTOR_VERSION_OVERRIDE, &context)?;
        if target_tag.trim().is_empty() {
            debug!("no version override for {} definition {} in workspace {}",
                   actor_type, actor_definition_id, workspace_id);
            return Ok(None);
        }

        let resolved = match self.hydrator.resolve(actor_type,
                                                   &actor_definition_id,
                                                   default_version.docker_repository(),
                                                   &target_tag)?
        {
            Some(v) => v,
            None => {
                warn!("version override {}:{} for definition {} not found locally or in the registry",
                      default_version.docker_repository(),
                      target_tag,
                      actor_definition_id);
                return Ok(None);
            }
        };

        ProtocolCompatibilityGuard::check(&resolved, &self.protocol_range)?;

        info!("using version override {}:{} for {} definition {} (workspace {}, actor {:?})",
              resolved.docker_repository(),
              resolved.docker_image_tag(),
              actor_type,
              actor_definition_id,
              workspace_id,
              actor_id);
        Ok(Some(resolved))
    }

    /// Versión efectiva: el override si existe, si no una copia de
    /// `default_version`.
    pub fn resolve_version(&self,
                           actor_type: ActorType,
                           actor_definition_id: Uuid,
                           workspace_id: Uuid,
                           actor_id: Option<Uuid>,
                           default_version: &ActorDefinitionVersion)
                           -> Result<ResolvedVersion> {
        let resolved = match self.get_override(actor_type, actor_definition_id, workspace_id, actor_id, default_version)? {
            Some(version) => ResolvedVersion { version, is_override: true },
            None => ResolvedVersion { version: default_version.clone(), is_override: false },
        };
        Ok(resolved)
    }
}
