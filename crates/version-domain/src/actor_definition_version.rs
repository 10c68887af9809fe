// actor_definition_version.rs
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Etapa de publicación de una versión de conector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseStage {
  Alpha,
  Beta,
  GenerallyAvailable,
  Custom,
}

impl ReleaseStage {
  pub fn as_str(&self) -> &'static str {
    match self {
      ReleaseStage::Alpha => "alpha",
      ReleaseStage::Beta => "beta",
      ReleaseStage::GenerallyAvailable => "generally_available",
      ReleaseStage::Custom => "custom",
    }
  }
}

impl fmt::Display for ReleaseStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for ReleaseStage {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "alpha" => Ok(ReleaseStage::Alpha),
      "beta" => Ok(ReleaseStage::Beta),
      "generally_available" => Ok(ReleaseStage::GenerallyAvailable),
      "custom" => Ok(ReleaseStage::Custom),
      other => Err(DomainError::ValidationError(format!("Etapa de publicación desconocida: {}", other))),
    }
  }
}

/// Especificación publicada por el conector: versión de protocolo y
/// esquema JSON de la configuración de conexión.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorSpecification {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub protocol_version: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub documentation_url: Option<String>,
  pub connection_specification: serde_json::Value,
}

impl ConnectorSpecification {
  pub fn new(protocol_version: Option<String>, connection_specification: serde_json::Value) -> Self {
    Self { protocol_version, documentation_url: None, connection_specification }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedHosts {
  pub hosts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedStreams {
  pub streams: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationDestinationDefinitionConfig {
  pub normalization_repository: String,
  pub normalization_tag: String,
  pub normalization_integration_type: String,
}

/// Una versión publicada (inmutable) de una definición de conector.
///
/// Antes de persistirse se identifica por `(actor_definition_id,
/// docker_image_tag)`; el repositorio asigna `version_id` al escribirla.
/// Los métodos `with_*` devuelven una copia nueva, nunca modifican la
/// instancia original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorDefinitionVersion {
  version_id: Option<Uuid>,
  actor_definition_id: Uuid,
  docker_repository: String,
  docker_image_tag: String,
  spec: ConnectorSpecification,
  protocol_version: Option<String>,
  documentation_url: Option<String>,
  release_stage: Option<ReleaseStage>,
  release_date: Option<String>,
  suggested_streams: Option<SuggestedStreams>,
  allowed_hosts: Option<AllowedHosts>,
  supports_dbt: bool,
  normalization_config: Option<NormalizationDestinationDefinitionConfig>,
}

impl ActorDefinitionVersion {
  pub fn new(actor_definition_id: Uuid,
             docker_repository: &str,
             docker_image_tag: &str,
             spec: ConnectorSpecification)
             -> Result<Self, DomainError> {
    if docker_repository.trim().is_empty() {
      return Err(DomainError::ValidationError("El repositorio docker no puede estar vacío".to_string()));
    }
    if docker_image_tag.trim().is_empty() {
      return Err(DomainError::ValidationError("El tag de imagen docker no puede estar vacío".to_string()));
    }
    Ok(Self { version_id: None,
              actor_definition_id,
              docker_repository: docker_repository.trim().to_string(),
              docker_image_tag: docker_image_tag.trim().to_string(),
              protocol_version: spec.protocol_version.clone(),
              documentation_url: spec.documentation_url.clone(),
              spec,
              release_stage: None,
              release_date: None,
              suggested_streams: None,
              allowed_hosts: None,
              supports_dbt: false,
              normalization_config: None })
  }

  pub fn with_version_id(&self, version_id: Uuid) -> Self {
    let mut v = self.clone();
    v.version_id = Some(version_id);
    v
  }

  pub fn with_protocol_version(&self, protocol_version: impl Into<String>) -> Self {
    let mut v = self.clone();
    v.protocol_version = Some(protocol_version.into());
    v
  }

  pub fn with_documentation_url(&self, url: impl Into<String>) -> Self {
    let mut v = self.clone();
    v.documentation_url = Some(url.into());
    v
  }

  pub fn with_release_stage(&self, stage: ReleaseStage) -> Self {
    let mut v = self.clone();
    v.release_stage = Some(stage);
    v
  }

  pub fn with_release_date(&self, date: impl Into<String>) -> Self {
    let mut v = self.clone();
    v.release_date = Some(date.into());
    v
  }

  pub fn with_suggested_streams(&self, streams: SuggestedStreams) -> Self {
    let mut v = self.clone();
    v.suggested_streams = Some(streams);
    v
  }

  pub fn with_allowed_hosts(&self, hosts: AllowedHosts) -> Self {
    let mut v = self.clone();
    v.allowed_hosts = Some(hosts);
    v
  }

  pub fn with_supports_dbt(&self, supports_dbt: bool) -> Self {
    let mut v = self.clone();
    v.supports_dbt = supports_dbt;
    v
  }

  pub fn with_normalization_config(&self, config: NormalizationDestinationDefinitionConfig) -> Self {
    let mut v = self.clone();
    v.normalization_config = Some(config);
    v
  }

  pub fn version_id(&self) -> Option<Uuid> {
    self.version_id
  }

  pub fn actor_definition_id(&self) -> Uuid {
    self.actor_definition_id
  }

  pub fn docker_repository(&self) -> &str {
    &self.docker_repository
  }

  pub fn docker_image_tag(&self) -> &str {
    &self.docker_image_tag
  }

  pub fn spec(&self) -> &ConnectorSpecification {
    &self.spec
  }

  pub fn protocol_version(&self) -> Option<&str> {
    self.protocol_version.as_deref()
  }

  pub fn documentation_url(&self) -> Option<&str> {
    self.documentation_url.as_deref()
  }

  pub fn release_stage(&self) -> Option<ReleaseStage> {
    self.release_stage
  }

  pub fn release_date(&self) -> Option<&str> {
    self.release_date.as_deref()
  }

  pub fn suggested_streams(&self) -> Option<&SuggestedStreams> {
    self.suggested_streams.as_ref()
  }

  pub fn allowed_hosts(&self) -> Option<&AllowedHosts> {
    self.allowed_hosts.as_ref()
  }

  pub fn supports_dbt(&self) -> bool {
    self.supports_dbt
  }

  pub fn normalization_config(&self) -> Option<&NormalizationDestinationDefinitionConfig> {
    self.normalization_config.as_ref()
  }

  pub fn is_persisted(&self) -> bool {
    self.version_id.is_some()
  }

  /// Clave natural previa a la asignación de `version_id`.
  pub fn natural_key(&self) -> (Uuid, &str) {
    (self.actor_definition_id, &self.docker_image_tag)
  }

  /// Dos instancias son la misma versión lógica si comparten clave natural,
  /// aunque alguna no esté persistida todavía.
  pub fn is_same(&self, other: &ActorDefinitionVersion) -> bool {
    self.natural_key() == other.natural_key()
  }
}

impl fmt::Display for ActorDefinitionVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "ActorDefinitionVersion({}:{}, definition: {}, protocol: {})",
           self.docker_repository,
           self.docker_image_tag,
           self.actor_definition_id,
           self.protocol_version.as_deref().unwrap_or("-"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn spec() -> ConnectorSpecification {
    ConnectorSpecification::new(Some("0.2.0".into()), json!({"key": "value"}))
  }

  #[test]
  fn new_takes_protocol_version_from_spec() {
    let v = ActorDefinitionVersion::new(Uuid::new_v4(), "airbyte/source-test", "0.1.0", spec()).unwrap();
    assert_eq!(v.protocol_version(), Some("0.2.0"));
    assert!(!v.is_persisted());
  }

  #[test]
  fn new_rejects_blank_repository_or_tag() {
    assert!(ActorDefinitionVersion::new(Uuid::new_v4(), " ", "0.1.0", spec()).is_err());
    assert!(ActorDefinitionVersion::new(Uuid::new_v4(), "airbyte/source-test", "", spec()).is_err());
  }

  #[test]
  fn with_methods_leave_original_untouched() {
    let base = ActorDefinitionVersion::new(Uuid::new_v4(), "airbyte/source-test", "0.1.0", spec()).unwrap();
    let changed = base.with_protocol_version("131.1.2").with_release_stage(ReleaseStage::Beta);
    assert_eq!(base.protocol_version(), Some("0.2.0"));
    assert_eq!(base.release_stage(), None);
    assert_eq!(changed.protocol_version(), Some("131.1.2"));
    assert!(base.is_same(&changed));
  }

  #[test]
  fn same_logical_version_ignores_version_id() {
    let def = Uuid::new_v4();
    let candidate = ActorDefinitionVersion::new(def, "airbyte/source-test", "2.0.2", spec()).unwrap();
    let persisted = candidate.with_version_id(Uuid::new_v4());
    assert!(candidate.is_same(&persisted));
    assert_ne!(candidate, persisted);
    let other_tag = ActorDefinitionVersion::new(def, "airbyte/source-test", "2.0.3", spec()).unwrap();
    assert!(!candidate.is_same(&other_tag));
  }

  #[test]
  fn release_stage_round_trips_through_str() {
    for stage in [ReleaseStage::Alpha, ReleaseStage::Beta, ReleaseStage::GenerallyAvailable, ReleaseStage::Custom] {
      assert_eq!(stage.as_str().parse::<ReleaseStage>().unwrap(), stage);
    }
    assert!("stable".parse::<ReleaseStage>().is_err());
  }
}
