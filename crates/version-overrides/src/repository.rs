// Archivo: repository.rs
// Propósito: contratos de los colaboradores externos de la resolución
// (sistema de feature flags y registro remoto de conectores). El almacén
// local de versiones (`VersionRepository`) vive en `version-domain`.
use crate::context::VersionContext;
use crate::errors::Result;
use version_domain::{ActorType, RegistryDefinitionRecord, RegistryDestinationDefinition, RegistrySourceDefinition};

/// Flag de tipo string con su valor por defecto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag {
    pub key: &'static str,
    pub default: &'static str,
}

/// Flag que, cuando alguna regla de targeting coincide, devuelve el tag de
/// imagen docker que debe usarse en lugar de la versión por defecto.
pub const CONNECTOR_VERSION_OVERRIDE: Flag = Flag { key: "connectors.versionOverride", default: "" };

/// Evaluador de feature flags.
pub trait FeatureFlagClient: Send + Sync {
    /// Evalúa `flag` para el contexto dado. Devuelve el valor por defecto
    /// del flag (cadena vacía para el override de versión) cuando ninguna
    /// regla coincide.
    fn string_variation(&self, flag: &Flag, context: &VersionContext) -> Result<String>;
}

/// Registro remoto de definiciones de conectores.
pub trait RemoteDefinitionsProvider: Send + Sync {
    fn get_source_definition_by_version(&self,
                                        docker_repository: &str,
                                        docker_image_tag: &str)
                                        -> Result<Option<RegistrySourceDefinition>>;

    fn get_destination_definition_by_version(&self,
                                             docker_repository: &str,
                                             docker_image_tag: &str)
                                             -> Result<Option<RegistryDestinationDefinition>>;

    /// Consulta el registro usando la búsqueda que corresponde al tipo de
    /// actor.
    fn get_definition_by_version(&self,
                                 actor_type: ActorType,
                                 docker_repository: &str,
                                 docker_image_tag: &str)
                                 -> Result<Option<RegistryDefinitionRecord>> {
        match actor_type {
            ActorType::Source => Ok(self.get_source_definition_by_version(docker_repository, docker_image_tag)?
                                        .map(RegistryDefinitionRecord::Source)),
            ActorType::Destination => Ok(self.get_destination_definition_by_version(docker_repository, docker_image_tag)?
                                             .map(RegistryDefinitionRecord::Destination)),
        }
    }
}
