//! Crate `version-overrides` — resolución de overrides de versión de
//! conectores.
//!
//! Dado un actor (source o destination) dentro de un workspace, decide qué
//! `ActorDefinitionVersion` debe ejecutarse en lugar de la versión por
//! defecto de su definición:
//!
//! - `VersionContextBuilder`: contexto ordenado de scopes para el flag.
//! - `FeatureFlagClient`: devuelve el tag override (o cadena vacía).
//! - `VersionHydrator`: busca el tag en el almacén local y, si falta, lo trae
//!   del registro remoto y lo persiste.
//! - `ProtocolCompatibilityGuard`: rechaza protocolos fuera de rango.
//! - `OverrideResolver`: orquesta todo lo anterior.
//!
//! Ejemplo rápido:
//! ```rust
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use version_domain::{ActorType, DomainStubs, ProtocolVersionRange};
//! use version_overrides::{InMemoryRemoteDefinitions, OverrideResolver, StaticFeatureFlagClient};
//!
//! let definition_id = Uuid::new_v4();
//! let (repo, default_version) = DomainStubs::sample_repo(definition_id).unwrap();
//! let resolver = OverrideResolver::new(Arc::new(repo),
//!                                      Arc::new(InMemoryRemoteDefinitions::new()),
//!                                      Arc::new(StaticFeatureFlagClient::default()),
//!                                      ProtocolVersionRange::default());
//! let over = resolver.get_override(ActorType::Source, definition_id, Uuid::new_v4(), None, &default_version)
//!                    .unwrap();
//! assert!(over.is_none());
//! ```
pub mod compatibility;
pub mod config;
pub mod context;
pub mod errors;
pub mod hydrator;
pub mod repository;
pub mod resolver;
pub mod stubs;

pub use compatibility::*;
pub use config::ResolverConfig;
pub use context::*;
pub use errors::*;
pub use hydrator::*;
pub use repository::*;
pub use resolver::*;
pub use stubs::*;
