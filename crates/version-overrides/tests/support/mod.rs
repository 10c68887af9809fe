// Fakes deterministas que cuentan las llamadas a cada colaborador.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;
use version_domain::{ActorDefinitionVersion, DomainError, InMemoryVersionRepository, RegistryDefinitionRecord,
                     RegistryDestinationDefinition, RegistrySourceDefinition, VersionRepository};
use version_overrides::{FeatureFlagClient, Flag, OverrideError, RemoteDefinitionsProvider, VersionContext};

/// Flag client que siempre devuelve el mismo valor y guarda los contextos.
pub struct FixedFlagClient {
  value: String,
  pub seen: Mutex<Vec<(String, VersionContext)>>,
}

impl FixedFlagClient {
  pub fn new(value: &str) -> Self {
    Self { value: value.to_string(), seen: Mutex::new(Vec::new()) }
  }

  pub fn calls(&self) -> usize {
    self.seen.lock().unwrap().len()
  }
}

impl FeatureFlagClient for FixedFlagClient {
  fn string_variation(&self, flag: &Flag, context: &VersionContext) -> version_overrides::Result<String> {
    self.seen.lock().unwrap().push((flag.key.to_string(), context.clone()));
    Ok(self.value.clone())
  }
}

/// Flag client cuyo backend no responde.
pub struct FailingFlagClient;

impl FeatureFlagClient for FailingFlagClient {
  fn string_variation(&self, _flag: &Flag, _context: &VersionContext) -> version_overrides::Result<String> {
    Err(OverrideError::Flag("flag service unavailable".into()))
  }
}

/// Almacén en memoria que registra lecturas y escrituras. `fail_reads`
/// simula un fallo de E/S.
#[derive(Default)]
pub struct RecordingVersionRepository {
  inner: InMemoryVersionRepository,
  pub gets: Mutex<Vec<(Uuid, String)>>,
  pub writes: Mutex<Vec<ActorDefinitionVersion>>,
  pub fail_reads: bool,
}

impl RecordingVersionRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn failing() -> Self {
    Self { fail_reads: true, ..Self::default() }
  }

  /// Inserta una fila directamente, sin contar como escritura.
  pub fn seed(&self, version: ActorDefinitionVersion) -> ActorDefinitionVersion {
    self.inner.write_actor_definition_version(version).unwrap()
  }

  pub fn get_calls(&self) -> usize {
    self.gets.lock().unwrap().len()
  }

  pub fn write_calls(&self) -> usize {
    self.writes.lock().unwrap().len()
  }

  pub fn total_calls(&self) -> usize {
    self.get_calls() + self.write_calls()
  }

  pub fn rows(&self) -> usize {
    self.inner.len()
  }
}

impl VersionRepository for RecordingVersionRepository {
  fn get_actor_definition_version(&self,
                                  actor_definition_id: &Uuid,
                                  docker_image_tag: &str)
                                  -> Result<Option<ActorDefinitionVersion>, DomainError> {
    self.gets.lock().unwrap().push((*actor_definition_id, docker_image_tag.to_string()));
    if self.fail_reads {
      return Err(DomainError::ExternalError("db: connection refused".into()));
    }
    self.inner.get_actor_definition_version(actor_definition_id, docker_image_tag)
  }

  fn get_actor_definition_version_by_id(&self, version_id: &Uuid) -> Result<Option<ActorDefinitionVersion>, DomainError> {
    self.inner.get_actor_definition_version_by_id(version_id)
  }

  fn write_actor_definition_version(&self, candidate: ActorDefinitionVersion) -> Result<ActorDefinitionVersion, DomainError> {
    self.writes.lock().unwrap().push(candidate.clone());
    self.inner.write_actor_definition_version(candidate)
  }

  fn list_actor_definition_versions(&self, actor_definition_id: &Uuid) -> Result<Vec<ActorDefinitionVersion>, DomainError> {
    self.inner.list_actor_definition_versions(actor_definition_id)
  }
}

/// Registro remoto que cuenta las consultas por tipo.
#[derive(Default)]
pub struct RecordingRegistry {
  records: HashMap<(String, String), RegistryDefinitionRecord>,
  pub source_lookups: AtomicUsize,
  pub destination_lookups: AtomicUsize,
  pub fail: bool,
}

impl RecordingRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_record(mut self, record: RegistryDefinitionRecord) -> Self {
    self.records.insert((record.docker_repository().to_string(), record.docker_image_tag().to_string()), record);
    self
  }

  pub fn failing() -> Self {
    Self { fail: true, ..Self::default() }
  }

  pub fn calls(&self) -> usize {
    self.source_lookups.load(Ordering::SeqCst) + self.destination_lookups.load(Ordering::SeqCst)
  }

  fn find(&self, repo: &str, tag: &str) -> version_overrides::Result<Option<RegistryDefinitionRecord>> {
    if self.fail {
      return Err(OverrideError::Registry("registry unavailable".into()));
    }
    Ok(self.records.get(&(repo.to_string(), tag.to_string())).cloned())
  }
}

impl RemoteDefinitionsProvider for RecordingRegistry {
  fn get_source_definition_by_version(&self,
                                      docker_repository: &str,
                                      docker_image_tag: &str)
                                      -> version_overrides::Result<Option<RegistrySourceDefinition>> {
    self.source_lookups.fetch_add(1, Ordering::SeqCst);
    match self.find(docker_repository, docker_image_tag)? {
      Some(RegistryDefinitionRecord::Source(s)) => Ok(Some(s)),
      _ => Ok(None),
    }
  }

  fn get_destination_definition_by_version(&self,
                                           docker_repository: &str,
                                           docker_image_tag: &str)
                                           -> version_overrides::Result<Option<RegistryDestinationDefinition>> {
    self.destination_lookups.fetch_add(1, Ordering::SeqCst);
    match self.find(docker_repository, docker_image_tag)? {
      Some(RegistryDefinitionRecord::Destination(d)) => Ok(Some(d)),
      _ => Ok(None),
    }
  }
}

/// Registro de source equivalente a `version`, tal y como lo publicaría el
/// registro remoto.
pub fn source_record(version: &ActorDefinitionVersion) -> RegistryDefinitionRecord {
  RegistryDefinitionRecord::Source(RegistrySourceDefinition { source_definition_id: version.actor_definition_id(),
                                                              name: "Test Source".into(),
                                                              docker_repository: version.docker_repository()
                                                                                        .to_string(),
                                                              docker_image_tag: version.docker_image_tag().to_string(),
                                                              documentation_url:
                                                                version.documentation_url().map(str::to_string),
                                                              spec: version.spec().clone(),
                                                              protocol_version:
                                                                version.protocol_version().map(str::to_string),
                                                              release_stage: version.release_stage(),
                                                              release_date: None,
                                                              suggested_streams: version.suggested_streams().cloned(),
                                                              allowed_hosts: version.allowed_hosts().cloned() })
}

pub fn destination_record(version: &ActorDefinitionVersion) -> RegistryDefinitionRecord {
  RegistryDefinitionRecord::Destination(RegistryDestinationDefinition { destination_definition_id:
                                                                          version.actor_definition_id(),
                                                                        name: "Test Destination".into(),
                                                                        docker_repository: version.docker_repository()
                                                                                                  .to_string(),
                                                                        docker_image_tag: version.docker_image_tag()
                                                                                                 .to_string(),
                                                                        documentation_url: None,
                                                                        spec: version.spec().clone(),
                                                                        protocol_version: version.protocol_version()
                                                                                                 .map(str::to_string),
                                                                        release_stage: None,
                                                                        release_date: None,
                                                                        allowed_hosts: None,
                                                                        supports_dbt: true,
                                                                        normalization_config: None })
}
