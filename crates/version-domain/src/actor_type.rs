use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tipo de actor: un conector se ejecuta como `source` o como `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Source,
    Destination,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::Source => "source",
            ActorType::Destination => "destination",
        }
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActorType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "source" => Ok(ActorType::Source),
            "destination" => Ok(ActorType::Destination),
            other => Err(DomainError::ValidationError(format!("Tipo de actor desconocido: {}", other))),
        }
    }
}
