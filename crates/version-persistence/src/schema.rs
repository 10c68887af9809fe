// Esquema Diesel de la tabla de versiones (válido para SQLite y Postgres).
// Los UUID y los documentos JSON se guardan como texto.
diesel::table! {
    actor_definition_version (version_id) {
        version_id -> Text,
        actor_definition_id -> Text,
        docker_repository -> Text,
        docker_image_tag -> Text,
        spec -> Text,
        protocol_version -> Nullable<Text>,
        documentation_url -> Nullable<Text>,
        release_stage -> Nullable<Text>,
        release_date -> Nullable<Text>,
        suggested_streams -> Nullable<Text>,
        allowed_hosts -> Nullable<Text>,
        supports_dbt -> Bool,
        normalization_config -> Nullable<Text>,
        created_at_ts -> BigInt,
        updated_at_ts -> BigInt,
    }
}
