use crate::{ActorDefinitionVersion, DomainError};
use dashmap::DashMap;
use uuid::Uuid;

/// Contrato del almacén local de versiones de definiciones de actor.
pub trait VersionRepository: Send + Sync {
    /// Busca una versión por su clave natural `(actor_definition_id, tag)`.
    fn get_actor_definition_version(&self,
                                    actor_definition_id: &Uuid,
                                    docker_image_tag: &str)
                                    -> Result<Option<ActorDefinitionVersion>, DomainError>;

    /// Busca una versión ya persistida por su `version_id`.
    fn get_actor_definition_version_by_id(&self, version_id: &Uuid) -> Result<Option<ActorDefinitionVersion>, DomainError>;

    /// Persiste `candidate` y devuelve la entidad almacenada con su
    /// `version_id`.
    ///
    /// Debe comportarse como un upsert idempotente sobre la clave natural:
    /// si ya existe una fila para `(actor_definition_id, tag)` (por ejemplo
    /// porque otra llamada concurrente ganó la carrera) se devuelve esa fila
    /// sin modificarla.
    fn write_actor_definition_version(&self, candidate: ActorDefinitionVersion) -> Result<ActorDefinitionVersion, DomainError>;

    /// Lista las versiones conocidas de una definición, ordenadas por tag.
    fn list_actor_definition_versions(&self, actor_definition_id: &Uuid) -> Result<Vec<ActorDefinitionVersion>, DomainError>;
}

/// Implementación en memoria para tests y desarrollo.
///
/// `DashMap::entry` bloquea el shard de la clave durante la inserción, así
/// que dos escrituras concurrentes de la misma clave natural producen una
/// única fila.
#[derive(Default)]
pub struct InMemoryVersionRepository {
    versions: DashMap<(Uuid, String), ActorDefinitionVersion>,
}

impl InMemoryVersionRepository {
    pub fn new() -> Self {
        Self { versions: DashMap::new() }
    }

    /// Número de filas almacenadas (útil para pruebas).
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl VersionRepository for InMemoryVersionRepository {
    fn get_actor_definition_version(&self,
                                    actor_definition_id: &Uuid,
                                    docker_image_tag: &str)
                                    -> Result<Option<ActorDefinitionVersion>, DomainError> {
        let key = (*actor_definition_id, docker_image_tag.to_string());
        Ok(self.versions.get(&key).map(|v| v.value().clone()))
    }

    fn get_actor_definition_version_by_id(&self, version_id: &Uuid) -> Result<Option<ActorDefinitionVersion>, DomainError> {
        Ok(self.versions
               .iter()
               .find(|entry| entry.value().version_id() == Some(*version_id))
               .map(|entry| entry.value().clone()))
    }

    fn write_actor_definition_version(&self, candidate: ActorDefinitionVersion) -> Result<ActorDefinitionVersion, DomainError> {
        let key = (candidate.actor_definition_id(), candidate.docker_image_tag().to_string());
        let stored = self.versions.entry(key).or_insert_with(|| {
                                                 let id = candidate.version_id().unwrap_or_else(Uuid::new_v4);
                                                 candidate.with_version_id(id)
                                             });
        Ok(stored.value().clone())
    }

    fn list_actor_definition_versions(&self, actor_definition_id: &Uuid) -> Result<Vec<ActorDefinitionVersion>, DomainError> {
        let mut out: Vec<ActorDefinitionVersion> = self.versions
                                                       .iter()
                                                       .filter(|entry| entry.key().0 == *actor_definition_id)
                                                       .map(|entry| entry.value().clone())
                                                       .collect();
        out.sort_by(|a, b| a.docker_image_tag().cmp(b.docker_image_tag()));
        Ok(out)
    }
}
