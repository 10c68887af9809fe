mod actor_definition_version;
mod actor_type;
mod domain_stubs;
mod errors;
mod protocol_version;
mod registry_definition;
mod version_repository;

pub use actor_definition_version::{ActorDefinitionVersion, AllowedHosts, ConnectorSpecification,
                                   NormalizationDestinationDefinitionConfig, ReleaseStage, SuggestedStreams};
pub use actor_type::ActorType;
pub use domain_stubs::DomainStubs;
pub use errors::DomainError;
pub use protocol_version::{ProtocolVersion, ProtocolVersionRange};
pub use registry_definition::{RegistryDefinitionRecord, RegistryDestinationDefinition, RegistrySourceDefinition};
pub use version_repository::{InMemoryVersionRepository, VersionRepository};
