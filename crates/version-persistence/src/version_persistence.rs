use crate::schema;
use crate::schema::actor_definition_version::dsl as adv_dsl;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::Error as DieselError;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;
use version_domain::{ActorDefinitionVersion, ConnectorSpecification, DomainError, ReleaseStage, VersionRepository};
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");
#[cfg(feature = "pg")]
type DbConn = PgConnection;
#[cfg(not(feature = "pg"))]
type DbConn = SqliteConnection;
type DbPool = Pool<ConnectionManager<DbConn>>;
pub const DB_URL_VAR: &str = "CONNECTOR_DB_URL";
/// Ajustes por conexión para SQLite: sin `busy_timeout` las escrituras
/// concurrentes fallan con `database is locked` en lugar de esperar.
#[cfg(not(feature = "pg"))]
#[derive(Debug)]
struct SqlitePragmas;
#[cfg(not(feature = "pg"))]
impl diesel::r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    diesel::sql_query("PRAGMA busy_timeout = 5000;").execute(conn).map_err(diesel::r2d2::Error::QueryError)?;
    Ok(())
  }
}
/// Repo Diesel que implementa `VersionRepository`.
pub struct DieselVersionRepository {
  pool: Arc<DbPool>,
}
impl DieselVersionRepository {
  /// Abre el pool contra `database_url` y aplica las migraciones pendientes.
  pub fn new(database_url: &str) -> Result<Self, DomainError> {
    let manager = ConnectionManager::<DbConn>::new(database_url);
    let builder = Pool::builder().max_size(4);
    #[cfg(not(feature = "pg"))]
    let builder = builder.connection_customizer(Box::new(SqlitePragmas));
    let pool = builder.build(manager)
                      .map_err(|e| DomainError::ExternalError(format!("no se pudo crear el pool de conexiones: {}", e)))?;
    let repo = DieselVersionRepository { pool: Arc::new(pool) };
    repo.migrate()?;
    Ok(repo)
  }
  fn migrate(&self) -> Result<(), DomainError> {
    let mut conn = self.conn()?;
    #[cfg(not(feature = "pg"))]
    {
      if let Err(e) = diesel::sql_query("PRAGMA journal_mode = WAL;").execute(&mut conn) {
        warn!("could not enable WAL journal mode: {}", e);
      }
    }
    let applied = conn.run_pending_migrations(MIGRATIONS)
                      .map_err(|e| DomainError::ExternalError(format!("migraciones: {}", e)))?;
    if !applied.is_empty() {
      info!("applied {} migration(s) to the version store", applied.len());
    }
    Ok(())
  }
  fn conn_raw(&self) -> std::result::Result<PooledConnection<ConnectionManager<DbConn>>, r2d2::Error> {
    self.pool.get()
  }
  fn conn(&self) -> Result<PooledConnection<ConnectionManager<DbConn>>, DomainError> {
    self.conn_raw().map_err(|e| DomainError::ExternalError(format!("pool: {}", e)))
  }
  fn find_by_key(conn: &mut DbConn,
                 actor_definition_id: &Uuid,
                 docker_image_tag: &str)
                 -> Result<Option<ActorDefinitionVersion>, DomainError> {
    let row = map_db_err(adv_dsl::actor_definition_version.filter(adv_dsl::actor_definition_id.eq(actor_definition_id.to_string()))
                                                          .filter(adv_dsl::docker_image_tag.eq(docker_image_tag))
                                                          .first::<VersionRow>(conn)
                                                          .optional())?;
    row.map(VersionRow::into_version).transpose()
  }
}
// Fila de `actor_definition_version`; el orden de campos sigue al esquema.
#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = schema::actor_definition_version)]
struct VersionRow {
  pub version_id: String,
  pub actor_definition_id: String,
  pub docker_repository: String,
  pub docker_image_tag: String,
  pub spec: String,
  pub protocol_version: Option<String>,
  pub documentation_url: Option<String>,
  pub release_stage: Option<String>,
  pub release_date: Option<String>,
  pub suggested_streams: Option<String>,
  pub allowed_hosts: Option<String>,
  pub supports_dbt: bool,
  pub normalization_config: Option<String>,
  pub created_at_ts: i64,
  pub updated_at_ts: i64,
}
impl VersionRow {
  fn from_version(v: &ActorDefinitionVersion, version_id: Uuid, now: i64) -> Result<Self, DomainError> {
    Ok(VersionRow { version_id: version_id.to_string(),
                    actor_definition_id: v.actor_definition_id().to_string(),
                    docker_repository: v.docker_repository().to_string(),
                    docker_image_tag: v.docker_image_tag().to_string(),
                    spec: serde_json::to_string(v.spec())?,
                    protocol_version: v.protocol_version().map(str::to_string),
                    documentation_url: v.documentation_url().map(str::to_string),
                    release_stage: v.release_stage().map(|s| s.as_str().to_string()),
                    release_date: v.release_date().map(str::to_string),
                    suggested_streams: v.suggested_streams().map(serde_json::to_string).transpose()?,
                    allowed_hosts: v.allowed_hosts().map(serde_json::to_string).transpose()?,
                    supports_dbt: v.supports_dbt(),
                    normalization_config: v.normalization_config().map(serde_json::to_string).transpose()?,
                    created_at_ts: now,
                    updated_at_ts: now })
  }
  fn into_version(self) -> Result<ActorDefinitionVersion, DomainError> {
    let spec: ConnectorSpecification = serde_json::from_str(&self.spec)?;
    let mut v = ActorDefinitionVersion::new(parse_uuid(&self.actor_definition_id)?,
                                            &self.docker_repository,
                                            &self.docker_image_tag,
                                            spec)?
                .with_version_id(parse_uuid(&self.version_id)?)
                .with_supports_dbt(self.supports_dbt);
    if let Some(p) = self.protocol_version {
      v = v.with_protocol_version(p);
    }
    if let Some(url) = self.documentation_url {
      v = v.with_documentation_url(url);
    }
    if let Some(stage) = self.release_stage {
      v = v.with_release_stage(stage.parse::<ReleaseStage>()?);
    }
    if let Some(date) = self.release_date {
      v = v.with_release_date(date);
    }
    if let Some(raw) = self.suggested_streams {
      v = v.with_suggested_streams(serde_json::from_str(&raw)?);
    }
    if let Some(raw) = self.allowed_hosts {
      v = v.with_allowed_hosts(serde_json::from_str(&raw)?);
    }
    if let Some(raw) = self.normalization_config {
      v = v.with_normalization_config(serde_json::from_str(&raw)?);
    }
    Ok(v)
  }
}
fn map_db_err<T>(res: std::result::Result<T, DieselError>) -> Result<T, DomainError> {
  res.map_err(|e| DomainError::ExternalError(format!("db: {}", e)))
}
fn parse_uuid(raw: &str) -> Result<Uuid, DomainError> {
  Uuid::parse_str(raw).map_err(|e| DomainError::ExternalError(format!("invalid uuid: {}", e)))
}
impl VersionRepository for DieselVersionRepository {
  fn get_actor_definition_version(&self,
                                  actor_definition_id: &Uuid,
                                  docker_image_tag: &str)
                                  -> Result<Option<ActorDefinitionVersion>, DomainError> {
    let mut conn = self.conn()?;
    Self::find_by_key(&mut conn, actor_definition_id, docker_image_tag)
  }
  fn get_actor_definition_version_by_id(&self, version_id: &Uuid) -> Result<Option<ActorDefinitionVersion>, DomainError> {
    let mut conn = self.conn()?;
    let row = map_db_err(adv_dsl::actor_definition_version.filter(adv_dsl::version_id.eq(version_id.to_string()))
                                                          .first::<VersionRow>(&mut conn)
                                                          .optional())?;
    row.map(VersionRow::into_version).transpose()
  }
  fn write_actor_definition_version(&self, candidate: ActorDefinitionVersion) -> Result<ActorDefinitionVersion, DomainError> {
    let mut conn = self.conn()?;
    let id = candidate.version_id().unwrap_or_else(Uuid::new_v4);
    let row = VersionRow::from_version(&candidate, id, chrono::Utc::now().timestamp())?;
    // Si otra escritura ganó la carrera por la clave natural, la inserción no
    // hace nada y se devuelve la fila existente.
    let inserted = map_db_err(diesel::insert_into(adv_dsl::actor_definition_version).values(&row)
                                                                                    .on_conflict((adv_dsl::actor_definition_id,
                                                                                                  adv_dsl::docker_image_tag))
                                                                                    .do_nothing()
                                                                                    .execute(&mut conn))?;
    if inserted == 0 {
      debug!("version {}:{} already stored, keeping existing row",
             candidate.docker_repository(),
             candidate.docker_image_tag());
    }
    let (definition_id, tag) = candidate.natural_key();
    Self::find_by_key(&mut conn, &definition_id, tag)?.ok_or_else(|| {
                                                       DomainError::ExternalError(format!("version {}:{} missing after \
                                                                                           upsert",
                                                                                          definition_id, tag))
                                                     })
  }
  fn list_actor_definition_versions(&self, actor_definition_id: &Uuid) -> Result<Vec<ActorDefinitionVersion>, DomainError> {
    let mut conn = self.conn()?;
    let rows = map_db_err(adv_dsl::actor_definition_version.filter(adv_dsl::actor_definition_id.eq(actor_definition_id.to_string()))
                                                           .order(adv_dsl::docker_image_tag.asc())
                                                           .load::<VersionRow>(&mut conn))?;
    rows.into_iter().map(VersionRow::into_version).collect()
  }
}
/// Crea el repo a partir de `CONNECTOR_DB_URL` (o `DATABASE_URL`), cargando
/// `.env` si existe.
#[cfg(feature = "pg")]
pub fn new_from_env() -> Result<DieselVersionRepository, DomainError> {
  dotenvy::dotenv().ok();
  let url = database_url()?;
  let l = url.to_lowercase();
  if !(l.starts_with("postgres") || l.starts_with("postgresql://") || url.contains('@')) {
    return Err(DomainError::ExternalError("CONNECTOR_DB_URL / DATABASE_URL does not look like Postgres URL".into()));
  }
  DieselVersionRepository::new(&url)
}
#[cfg(not(feature = "pg"))]
pub fn new_from_env() -> Result<DieselVersionRepository, DomainError> {
  dotenvy::dotenv().ok();
  let url = database_url()?;
  let l = url.to_lowercase();
  if l.starts_with("postgres") {
    return Err(DomainError::ExternalError("version-persistence was compiled without 'pg' feature; enable the 'pg' \
                                           feature to use Postgres"
                                                                   .into()));
  }
  DieselVersionRepository::new(&url)
}
fn database_url() -> Result<String, DomainError> {
  std::env::var(DB_URL_VAR).or_else(|_| std::env::var("DATABASE_URL"))
                           .map_err(|_| DomainError::ExternalError("CONNECTOR_DB_URL / DATABASE_URL not set".into()))
}
// Helper de tests: repo SQLite explícito, sin pasar por el entorno.
#[cfg(not(feature = "pg"))]
pub fn new_sqlite_for_test(database_url: &str) -> Result<DieselVersionRepository, DomainError> {
  DieselVersionRepository::new(database_url)
}
