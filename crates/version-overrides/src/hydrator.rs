// Archivo: hydrator.rs
// Propósito: resolver un tag docker a una `ActorDefinitionVersion` concreta,
// trayéndola del registro remoto y persistiéndola cuando todavía no existe
// en el almacén local.
use crate::errors::Result;
use crate::repository::RemoteDefinitionsProvider;
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;
use version_domain::{ActorDefinitionVersion, ActorType, VersionRepository};

/// Hidrata versiones bajo demanda.
///
/// No toma ningún lock alrededor de la secuencia leer-traer-escribir: la
/// idempotencia ante carreras la garantiza
/// `VersionRepository::write_actor_definition_version`.
pub struct VersionHydrator {
    repo: Arc<dyn VersionRepository>,
    registry: Arc<dyn RemoteDefinitionsProvider>,
}

impl VersionHydrator {
    pub fn new(repo: Arc<dyn VersionRepository>, registry: Arc<dyn RemoteDefinitionsProvider>) -> Self {
        Self { repo, registry }
    }

    /// 1. Busca `(actor_definition_id, tag)` en el almacén local.
    /// 2. Si no existe, consulta el registro por `(docker_repository, tag)`.
    /// 3. Si el registro tampoco lo conoce devuelve `None`.
    /// 4. Si lo conoce, convierte el registro, lo persiste y devuelve la
    ///    entidad que devuelve el almacén (con su `version_id`).
    pub fn resolve(&self,
                   actor_type: ActorType,
                   actor_definition_id: &Uuid,
                   docker_repository: &str,
                   docker_image_tag: &str)
                   -> Result<Option<ActorDefinitionVersion>> {
        if let Some(existing) = self.repo.get_actor_definition_version(actor_definition_id, docker_image_tag)? {
            debug!("version {}:{} already stored for definition {}",
                   docker_repository, docker_image_tag, actor_definition_id);
            return Ok(Some(existing));
        }

        let record = match self.registry.get_definition_by_version(actor_type, docker_repository, docker_image_tag)? {
            Some(record) => record,
            None => {
                debug!("{} {}:{} not found in remote registry", actor_type, docker_repository, docker_image_tag);
                return Ok(None);
            }
        };

        let candidate = record.to_actor_definition_version()?;
        if candidate.actor_definition_id() != *actor_definition_id {
            warn!("registry entry {}:{} belongs to definition {}, requested {}",
                  docker_repository,
                  docker_image_tag,
                  candidate.actor_definition_id(),
                  actor_definition_id);
        }

        let persisted = self.repo.write_actor_definition_version(candidate)?;
        info!("persisted {}:{} from remote registry as version {:?}",
              docker_repository,
              docker_image_tag,
              persisted.version_id());
        Ok(Some(persisted))
    }
}
