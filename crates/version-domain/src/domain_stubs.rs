use crate::actor_definition_version::{AllowedHosts, SuggestedStreams};
use crate::version_repository::{InMemoryVersionRepository, VersionRepository};
use crate::{ActorDefinitionVersion, ConnectorSpecification, DomainError, ReleaseStage};
use serde_json::json;
use uuid::Uuid;

pub struct DomainStubs;

impl DomainStubs {
    /// Spec mínima con la versión de protocolo indicada.
    pub fn sample_spec(protocol_version: &str) -> ConnectorSpecification {
        ConnectorSpecification::new(Some(protocol_version.to_string()), json!({"key": "value"}))
    }

    /// Versión de ejemplo (no persistida) con metadata completa.
    pub fn sample_version(actor_definition_id: Uuid,
                          docker_repository: &str,
                          docker_image_tag: &str,
                          protocol_version: &str)
                          -> Result<ActorDefinitionVersion, DomainError> {
        let v = ActorDefinitionVersion::new(actor_definition_id,
                                            docker_repository,
                                            docker_image_tag,
                                            Self::sample_spec(protocol_version))?
                .with_documentation_url("https://airbyte.io/docs/")
                .with_release_stage(ReleaseStage::Beta)
                .with_suggested_streams(SuggestedStreams { streams: vec!["users".into()] })
                .with_allowed_hosts(AllowedHosts { hosts: vec!["https://airbyte.io".into()] });
        Ok(v)
    }

    /// Repositorio en memoria con una versión por defecto ya persistida para
    /// `actor_definition_id`. Devuelve el repo y la versión almacenada.
    pub fn sample_repo(actor_definition_id: Uuid)
                       -> Result<(InMemoryVersionRepository, ActorDefinitionVersion), DomainError> {
        let repo = InMemoryVersionRepository::new();
        let default = Self::sample_version(actor_definition_id, "airbyte/source-test", "0.1.0", "0.2.0")?;
        let stored = repo.write_actor_definition_version(default)?;
        Ok((repo, stored))
    }
}
