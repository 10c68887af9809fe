//! Persistencia Diesel del almacén de versiones de conectores.
//! Expone el módulo `schema` y el repositorio `DieselVersionRepository`, que
//! implementa `version_domain::VersionRepository` sobre SQLite o Postgres
//! (feature `pg`). Las migraciones van embebidas en el binario.

pub mod schema;
mod version_persistence;

#[cfg(not(feature = "pg"))]
pub use version_persistence::new_sqlite_for_test;
pub use version_persistence::{new_from_env, DieselVersionRepository, MIGRATIONS};
