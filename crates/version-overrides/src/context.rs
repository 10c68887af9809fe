// Archivo: context.rs
// Propósito: construir el contexto ordenado de scopes con el que se evalúa
// el flag de override de versión.
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use version_domain::ActorType;

/// Un scope de targeting: workspace, definición o actor concreto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextScope {
    Workspace(Uuid),
    Definition { actor_type: ActorType, id: Uuid },
    Actor { actor_type: ActorType, id: Uuid },
}

impl ContextScope {
    /// Nombre del tipo de scope tal y como lo ve el sistema de flags.
    pub fn kind(&self) -> &'static str {
        match self {
            ContextScope::Workspace(_) => "workspace",
            ContextScope::Definition { actor_type: ActorType::Source, .. } => "source_definition",
            ContextScope::Definition { actor_type: ActorType::Destination, .. } => "destination_definition",
            ContextScope::Actor { actor_type: ActorType::Source, .. } => "source",
            ContextScope::Actor { actor_type: ActorType::Destination, .. } => "destination",
        }
    }

    pub fn key(&self) -> Uuid {
        match self {
            ContextScope::Workspace(id) => *id,
            ContextScope::Definition { id, .. } => *id,
            ContextScope::Actor { id, .. } => *id,
        }
    }
}

/// Secuencia ordenada de scopes: `[Workspace, Definition, Actor?]`, del
/// menos al más específico.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionContext {
    scopes: Vec<ContextScope>,
}

impl VersionContext {
    pub fn new(scopes: Vec<ContextScope>) -> Self {
        Self { scopes }
    }

    pub fn scopes(&self) -> &[ContextScope] {
        &self.scopes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContextScope> {
        self.scopes.iter()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

pub struct VersionContextBuilder;

impl VersionContextBuilder {
    /// Construye el contexto para un actor. El scope de actor sólo se añade
    /// cuando se resuelve para una instancia concreta (`actor_id` presente).
    pub fn build_context(actor_type: ActorType,
                         actor_definition_id: Uuid,
                         workspace_id: Uuid,
                         actor_id: Option<Uuid>)
                         -> VersionContext {
        let mut scopes = vec![ContextScope::Workspace(workspace_id),
                              ContextScope::Definition { actor_type, id: actor_definition_id }];
        if let Some(id) = actor_id {
            scopes.push(ContextScope::Actor { actor_type, id });
        }
        VersionContext::new(scopes)
    }
}
