use log::{info, warn};
use serde_json::json;
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use uuid::Uuid;
use version_domain::{ActorDefinitionVersion, ActorType, ConnectorSpecification, VersionRepository};
use version_overrides::{InMemoryRemoteDefinitions, OverrideResolver, ResolverConfig, StaticFeatureFlagClient};

/// Menú interactivo para consultar overrides de versión de conectores usando
/// el almacén de `version-persistence`, el registro estático y las reglas de
/// flags configuradas en el entorno.
///
/// Opciones soportadas:
/// 1) Resolver la versión de un actor
/// 2) Listar versiones de una definición
/// 3) Ver una versión por id
/// 4) Salir
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ResolverConfig::from_env()?;
    // Inicializar repo (aplica migraciones embebidas si procede)
    let repo = Arc::new(version_persistence::new_from_env()?);
    let registry = match &config.registry_path {
        Some(path) => InMemoryRemoteDefinitions::from_json_file(path)?,
        None => {
            warn!("CONNECTOR_REGISTRY_PATH not set, remote registry is empty");
            InMemoryRemoteDefinitions::new()
        }
    };
    let flags = match &config.overrides_path {
        Some(path) => StaticFeatureFlagClient::from_json_file(path)?,
        None => StaticFeatureFlagClient::default(),
    };
    info!("registry entries: {}, override rules: {}, protocol range {}",
          registry.len()?,
          flags.rules().len(),
          config.protocol_version_range);
    let resolver = OverrideResolver::from_config(repo.clone(), Arc::new(registry), Arc::new(flags), &config);

    loop {
        println!("\n== Connector versions menu ==");
        println!("1) Resolver versión de un actor");
        println!("2) Listar versiones de una definición");
        println!("3) Ver versión por id");
        println!("4) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => {
                let actor_type: ActorType = match prompt("Tipo de actor (source/destination): ")?.trim().parse() {
                    Ok(t) => t,
                    Err(e) => { eprintln!("{}", e); continue; }
                };
                let Some(definition_id) = prompt_uuid("Definition id (UUID): ")? else { continue };
                let Some(workspace_id) = prompt_uuid("Workspace id (UUID): ")? else { continue };
                let actor_s = prompt("Actor id (UUID) opcional, enter para ninguno: ")?;
                let actor_id = if actor_s.trim().is_empty() {
                    None
                } else {
                    match Uuid::parse_str(actor_s.trim()) {
                        Ok(u) => Some(u),
                        Err(_) => { eprintln!("UUID inválido"); continue; }
                    }
                };
                let docker_repository = prompt("Repositorio docker por defecto (ej: airbyte/source-test): ")?;
                let docker_image_tag = prompt("Tag por defecto (ej: 0.1.0): ")?;
                let default_version = match default_version(repo.as_ref(),
                                                            definition_id,
                                                            docker_repository.trim(),
                                                            docker_image_tag.trim())
                {
                    Ok(v) => v,
                    Err(e) => { eprintln!("Versión por defecto inválida: {}", e); continue; }
                };
                match resolver.resolve_version(actor_type, definition_id, workspace_id, actor_id, &default_version) {
                    Ok(resolved) => {
                        let origin = if resolved.is_override { "override" } else { "default" };
                        println!("Versión ({}): {}", origin, resolved.version);
                        if let Some(id) = resolved.version.version_id() {
                            println!("version_id: {}", id);
                        }
                    }
                    Err(e) => eprintln!("Error resolviendo versión: {}", e),
                }
            }
            "2" => {
                let Some(definition_id) = prompt_uuid("Definition id (UUID): ")? else { continue };
                match repo.list_actor_definition_versions(&definition_id) {
                    Ok(versions) => {
                        println!("\nVERSION ID                           | TAG        | PROTOCOL | REPOSITORY");
                        println!("-----------------------------------------------------------------------------------");
                        for v in versions {
                            let vid = v.version_id().map(|u| u.to_string()).unwrap_or_else(|| "-".into());
                            println!("{} | {:<10} | {:<8} | {}",
                                     vid,
                                     v.docker_image_tag(),
                                     v.protocol_version().unwrap_or("-"),
                                     v.docker_repository());
                        }
                    }
                    Err(e) => eprintln!("Error listando versiones: {}", e),
                }
            }
            "3" => {
                let Some(version_id) = prompt_uuid("Version id (UUID): ")? else { continue };
                match repo.get_actor_definition_version_by_id(&version_id) {
                    Ok(Some(v)) => println!("{}", serde_json::to_string_pretty(&v)?),
                    Ok(None) => println!("No existe la versión {}", version_id),
                    Err(e) => eprintln!("Error leyendo versión: {}", e),
                }
            }
            "4" => {
                println!("Saliendo...");
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
            }
        }
    }

    Ok(())
}

/// Versión por defecto del actor: la almacenada si existe, si no una versión
/// mínima sin persistir (sólo se usa su repositorio docker).
fn default_version(repo: &dyn VersionRepository,
                   definition_id: Uuid,
                   docker_repository: &str,
                   docker_image_tag: &str)
                   -> Result<ActorDefinitionVersion, Box<dyn Error>> {
    if let Some(stored) = repo.get_actor_definition_version(&definition_id, docker_image_tag)? {
        return Ok(stored);
    }
    let spec = ConnectorSpecification::new(None, json!({}));
    Ok(ActorDefinitionVersion::new(definition_id, docker_repository, docker_image_tag, spec)?)
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}

fn prompt_uuid(msg: &str) -> io::Result<Option<Uuid>> {
    let raw = prompt(msg)?;
    match Uuid::parse_str(raw.trim()) {
        Ok(u) => Ok(Some(u)),
        Err(_) => {
            eprintln!("UUID inválido");
            Ok(None)
        }
    }
}
