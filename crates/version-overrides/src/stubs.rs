// Archivo: stubs.rs
// Propósito: implementaciones en memoria de los colaboradores externos
// (flags y registro remoto) para pruebas, demos y despliegues locales.
//
// Ambas pueden cargarse desde ficheros JSON; no consultan ningún servicio.
use crate::context::{ContextScope, VersionContext};
use crate::errors::{OverrideError, Result};
use crate::repository::{FeatureFlagClient, Flag, RemoteDefinitionsProvider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;
use version_domain::{RegistryDefinitionRecord, RegistryDestinationDefinition, RegistrySourceDefinition};

/// Regla de targeting: para `flag`, el scope `(context_kind, context_key)`
/// recibe `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingRule {
    pub flag: String,
    pub context_kind: String,
    pub context_key: Uuid,
    pub value: String,
}

impl TargetingRule {
    fn matches(&self, flag: &Flag, scope: &ContextScope) -> bool {
        self.flag == flag.key && self.context_kind == scope.kind() && self.context_key == scope.key()
    }
}

/// Cliente de flags con reglas fijas.
///
/// Gana la regla del scope más específico del contexto (actor, luego
/// definición, luego workspace); sin coincidencias devuelve el valor por
/// defecto del flag.
#[derive(Debug, Clone, Default)]
pub struct StaticFeatureFlagClient {
    rules: Vec<TargetingRule>,
}

impl StaticFeatureFlagClient {
    pub fn new(rules: Vec<TargetingRule>) -> Self {
        Self { rules }
    }

    /// Añade una regla para `scope` (builder).
    pub fn with_rule(mut self, flag: &Flag, scope: ContextScope, value: impl Into<String>) -> Self {
        self.rules.push(TargetingRule { flag: flag.key.to_string(),
                                        context_kind: scope.kind().to_string(),
                                        context_key: scope.key(),
                                        value: value.into() });
        self
    }

    /// Carga las reglas desde un fichero JSON con un array de
    /// `TargetingRule`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
                                                   OverrideError::Config(format!("no se pudo leer {}: {}",
                                                                                 path.display(),
                                                                                 e))
                                               })?;
        let rules: Vec<TargetingRule> =
            serde_json::from_str(&raw).map_err(|e| OverrideError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[TargetingRule] {
        &self.rules
    }
}

impl FeatureFlagClient for StaticFeatureFlagClient {
    fn string_variation(&self, flag: &Flag, context: &VersionContext) -> Result<String> {
        for scope in context.iter().rev() {
            if let Some(rule) = self.rules.iter().find(|r| r.matches(flag, scope)) {
                return Ok(rule.value.clone());
            }
        }
        Ok(flag.default.to_string())
    }
}

/// Registro remoto en memoria indexado por `(docker_repository, tag)`.
pub struct InMemoryRemoteDefinitions {
    records: Mutex<HashMap<(String, String), RegistryDefinitionRecord>>,
}

impl InMemoryRemoteDefinitions {
    pub fn new() -> Self {
        Self { records: Mutex::new(HashMap::new()) }
    }

    /// Carga registros desde un fichero JSON con un array de
    /// `RegistryDefinitionRecord` (etiquetados por `actorType`).
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
                                                   OverrideError::Config(format!("no se pudo leer {}: {}",
                                                                                 path.display(),
                                                                                 e))
                                               })?;
        let records: Vec<RegistryDefinitionRecord> =
            serde_json::from_str(&raw).map_err(|e| OverrideError::Config(format!("{}: {}", path.display(), e)))?;
        let registry = Self::new();
        for record in records {
            registry.add(record)?;
        }
        Ok(registry)
    }

    /// Publica (o reemplaza) un registro.
    pub fn add(&self, record: RegistryDefinitionRecord) -> Result<()> {
        let key = (record.docker_repository().to_string(), record.docker_image_tag().to_string());
        self.lock()?.insert(key, record);
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<(String, String), RegistryDefinitionRecord>>> {
        self.records.lock().map_err(|e| OverrideError::Registry(format!("mutex poisoned: {:?}", e)))
    }

    fn get(&self, docker_repository: &str, docker_image_tag: &str) -> Result<Option<RegistryDefinitionRecord>> {
        let records = self.lock()?;
        Ok(records.get(&(docker_repository.to_string(), docker_image_tag.to_string())).cloned())
    }
}

impl Default for InMemoryRemoteDefinitions {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteDefinitionsProvider for InMemoryRemoteDefinitions {
    fn get_source_definition_by_version(&self,
                                        docker_repository: &str,
                                        docker_image_tag: &str)
                                        -> Result<Option<RegistrySourceDefinition>> {
        match self.get(docker_repository, docker_image_tag)? {
            Some(RegistryDefinitionRecord::Source(s)) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    fn get_destination_definition_by_version(&self,
                                             docker_repository: &str,
                                             docker_image_tag: &str)
                                             -> Result<Option<RegistryDestinationDefinition>> {
        match self.get(docker_repository, docker_image_tag)? {
            Some(RegistryDefinitionRecord::Destination(d)) => Ok(Some(d)),
            _ => Ok(None),
        }
    }
}
