use uuid::Uuid;
use version_domain::ActorType;
use version_overrides::{ContextScope, VersionContextBuilder};

#[test]
fn source_context_with_actor_has_three_scopes_in_order() {
  let (definition_id, workspace_id, actor_id) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
  let ctx = VersionContextBuilder::build_context(ActorType::Source, definition_id, workspace_id, Some(actor_id));

  assert_eq!(ctx.len(), 3);
  assert_eq!(ctx.scopes(),
             &[ContextScope::Workspace(workspace_id),
               ContextScope::Definition { actor_type: ActorType::Source, id: definition_id },
               ContextScope::Actor { actor_type: ActorType::Source, id: actor_id }]);
  let kinds: Vec<&str> = ctx.iter().map(|s| s.kind()).collect();
  assert_eq!(kinds, vec!["workspace", "source_definition", "source"]);
}

#[test]
fn destination_context_without_actor_stops_at_definition() {
  let (definition_id, workspace_id) = (Uuid::new_v4(), Uuid::new_v4());
  let ctx = VersionContextBuilder::build_context(ActorType::Destination, definition_id, workspace_id, None);

  assert_eq!(ctx.len(), 2);
  let kinds: Vec<&str> = ctx.iter().map(|s| s.kind()).collect();
  assert_eq!(kinds, vec!["workspace", "destination_definition"]);
  assert_eq!(ctx.scopes()[1].key(), definition_id);
}

#[test]
fn destination_actor_scope_uses_destination_kind() {
  let actor_id = Uuid::new_v4();
  let ctx = VersionContextBuilder::build_context(ActorType::Destination, Uuid::new_v4(), Uuid::new_v4(), Some(actor_id));

  let last = ctx.scopes().last().unwrap();
  assert_eq!(last.kind(), "destination");
  assert_eq!(last.key(), actor_id);
}

#[test]
fn building_twice_yields_equal_contexts() {
  let (definition_id, workspace_id) = (Uuid::new_v4(), Uuid::new_v4());
  let a = VersionContextBuilder::build_context(ActorType::Source, definition_id, workspace_id, None);
  let b = VersionContextBuilder::build_context(ActorType::Source, definition_id, workspace_id, None);
  assert_eq!(a, b);
}
