// registry_definition.rs
//
// Registros tal y como los publica el registro remoto de conectores y su
// conversión pura a `ActorDefinitionVersion`.
use crate::actor_definition_version::{AllowedHosts, ConnectorSpecification, NormalizationDestinationDefinitionConfig,
                                      ReleaseStage, SuggestedStreams};
use crate::{ActorDefinitionVersion, ActorType, DomainError, ProtocolVersion};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySourceDefinition {
  pub source_definition_id: Uuid,
  #[serde(default)]
  pub name: String,
  pub docker_repository: String,
  pub docker_image_tag: String,
  #[serde(default)]
  pub documentation_url: Option<String>,
  pub spec: ConnectorSpecification,
  #[serde(default)]
  pub protocol_version: Option<String>,
  #[serde(default)]
  pub release_stage: Option<ReleaseStage>,
  #[serde(default)]
  pub release_date: Option<String>,
  #[serde(default)]
  pub suggested_streams: Option<SuggestedStreams>,
  #[serde(default)]
  pub allowed_hosts: Option<AllowedHosts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDestinationDefinition {
  pub destination_definition_id: Uuid,
  #[serde(default)]
  pub name: String,
  pub docker_repository: String,
  pub docker_image_tag: String,
  #[serde(default)]
  pub documentation_url: Option<String>,
  pub spec: ConnectorSpecification,
  #[serde(default)]
  pub protocol_version: Option<String>,
  #[serde(default)]
  pub release_stage: Option<ReleaseStage>,
  #[serde(default)]
  pub release_date: Option<String>,
  #[serde(default)]
  pub allowed_hosts: Option<AllowedHosts>,
  #[serde(default)]
  pub supports_dbt: bool,
  #[serde(default)]
  pub normalization_config: Option<NormalizationDestinationDefinitionConfig>,
}

/// Definición obtenida del registro remoto para un par
/// `(docker_repository, docker_image_tag)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "actorType", rename_all = "lowercase")]
pub enum RegistryDefinitionRecord {
  Source(RegistrySourceDefinition),
  Destination(RegistryDestinationDefinition),
}

impl RegistryDefinitionRecord {
  pub fn actor_type(&self) -> ActorType {
    match self {
      RegistryDefinitionRecord::Source(_) => ActorType::Source,
      RegistryDefinitionRecord::Destination(_) => ActorType::Destination,
    }
  }

  pub fn actor_definition_id(&self) -> Uuid {
    match self {
      RegistryDefinitionRecord::Source(s) => s.source_definition_id,
      RegistryDefinitionRecord::Destination(d) => d.destination_definition_id,
    }
  }

  pub fn docker_repository(&self) -> &str {
    match self {
      RegistryDefinitionRecord::Source(s) => &s.docker_repository,
      RegistryDefinitionRecord::Destination(d) => &d.docker_repository,
    }
  }

  pub fn docker_image_tag(&self) -> &str {
    match self {
      RegistryDefinitionRecord::Source(s) => &s.docker_image_tag,
      RegistryDefinitionRecord::Destination(d) => &d.docker_image_tag,
    }
  }

  /// Convierte el registro en una versión sin `version_id`. La versión de
  /// protocolo se toma del registro, si no de la spec, y por último se usa
  /// `ProtocolVersion::DEFAULT`.
  pub fn to_actor_definition_version(&self) -> Result<ActorDefinitionVersion, DomainError> {
    match self {
      RegistryDefinitionRecord::Source(s) => {
        let mut v = ActorDefinitionVersion::new(s.source_definition_id,
                                                &s.docker_repository,
                                                &s.docker_image_tag,
                                                s.spec.clone())?
                    .with_protocol_version(protocol_or_default(&s.protocol_version, &s.spec));
        v = apply_common(v, &s.documentation_url, s.release_stage, &s.release_date, &s.allowed_hosts);
        if let Some(streams) = &s.suggested_streams {
          v = v.with_suggested_streams(streams.clone());
        }
        Ok(v)
      }
      RegistryDefinitionRecord::Destination(d) => {
        let mut v = ActorDefinitionVersion::new(d.destination_definition_id,
                                                &d.docker_repository,
                                                &d.docker_image_tag,
                                                d.spec.clone())?
                    .with_protocol_version(protocol_or_default(&d.protocol_version, &d.spec))
                    .with_supports_dbt(d.supports_dbt);
        v = apply_common(v, &d.documentation_url, d.release_stage, &d.release_date, &d.allowed_hosts);
        if let Some(cfg) = &d.normalization_config {
          v = v.with_normalization_config(cfg.clone());
        }
        Ok(v)
      }
    }
  }
}

fn protocol_or_default(explicit: &Option<String>, spec: &ConnectorSpecification) -> String {
  explicit.clone()
          .or_else(|| spec.protocol_version.clone())
          .unwrap_or_else(|| ProtocolVersion::DEFAULT.to_string())
}

fn apply_common(mut v: ActorDefinitionVersion,
                documentation_url: &Option<String>,
                release_stage: Option<ReleaseStage>,
                release_date: &Option<String>,
                allowed_hosts: &Option<AllowedHosts>)
                -> ActorDefinitionVersion {
  if let Some(url) = documentation_url {
    v = v.with_documentation_url(url.clone());
  }
  if let Some(stage) = release_stage {
    v = v.with_release_stage(stage);
  }
  if let Some(date) = release_date {
    v = v.with_release_date(date.clone());
  }
  if let Some(hosts) = allowed_hosts {
    v = v.with_allowed_hosts(hosts.clone());
  }
  v
}
