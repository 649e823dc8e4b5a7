//! # World — Entities, Components, Tags, Resources
//!
//! ```text
//! World
//!   allocator          entity handle lifecycle
//!   archetypes         component-set -> Archetype { columns, entities }
//!   entity_locations   entity index  -> (archetype key, row)
//!   tags               "area"        -> Entity (weak)
//!   resources          TypeId        -> singleton value
//! ```
//!
//! ## Tags
//!
//! A tag is a world-scoped alias such as `"area"` or `"tilePermissionsGrid"`
//! that resolves to the entity currently playing that role. Tags are weak:
//! [`resolve_tag`](World::resolve_tag) checks the handle's generation, and
//! [`despawn`](World::despawn) purges every tag pointing at the dead entity.
//! Callers never have to remember to clear a tag after destroying its target.
//!
//! ## Resources
//!
//! Singletons not tied to an entity: configuration, the asset server, the
//! pointer state, the event bus.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::archetype::{Archetype, ArchetypeKey, archetype_key};
use super::component::{Component, ComponentColumn, component_type_id};
use super::entity::{Entity, EntityAllocator};
use super::query::QueryParam;

#[derive(Clone)]
pub(crate) struct EntityLocation {
    archetype_key: ArchetypeKey,
    row: usize,
}

type BoxedComponent = Box<dyn Any + Send + Sync>;

pub struct World {
    allocator: EntityAllocator,
    archetypes: HashMap<ArchetypeKey, Archetype>,
    entity_locations: HashMap<u32, EntityLocation>,
    resources: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    tags: HashMap<String, Entity>,
    /// Reverse index so despawn can purge tags without scanning them all.
    entity_tags: HashMap<u32, Vec<String>>,
}

impl World {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            archetypes: HashMap::new(),
            entity_locations: HashMap::new(),
            resources: HashMap::new(),
            tags: HashMap::new(),
            entity_tags: HashMap::new(),
        }
    }

    // ── Resources ────────────────────────────────────────────────────

    /// Insert a singleton, replacing any previous value of the same type.
    pub fn insert_resource<T: Component>(&mut self, value: T) {
        self.resources.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// # Panics
    ///
    /// Panics if the resource hasn't been inserted.
    pub fn resource<T: Component>(&self) -> &T {
        self.get_resource::<T>().unwrap_or_else(|| {
            panic!(
                "resource `{}` not found. Did you forget to insert it?",
                std::any::type_name::<T>()
            )
        })
    }

    /// # Panics
    ///
    /// Panics if the resource hasn't been inserted.
    pub fn resource_mut<T: Component>(&mut self) -> &mut T {
        self.get_resource_mut::<T>().unwrap_or_else(|| {
            panic!(
                "resource `{}` not found. Did you forget to insert it?",
                std::any::type_name::<T>()
            )
        })
    }

    pub fn get_resource<T: Component>(&self) -> Option<&T> {
        self.resources
            .get(&TypeId::of::<T>())
            .and_then(|r| r.downcast_ref::<T>())
    }

    pub fn get_resource_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.resources
            .get_mut(&TypeId::of::<T>())
            .and_then(|r| r.downcast_mut::<T>())
    }

    pub fn has_resource<T: Component>(&self) -> bool {
        self.resources.contains_key(&TypeId::of::<T>())
    }

    /// Take a resource out of the world. Pair with
    /// [`insert_resource`](Self::insert_resource) when a resource and the
    /// world must be borrowed mutably at the same time.
    pub fn resource_remove<T: Component>(&mut self) -> Option<T> {
        self.resources
            .remove(&TypeId::of::<T>())
            .and_then(|r| r.downcast::<T>().ok())
            .map(|b| *b)
    }

    // ── Tags ─────────────────────────────────────────────────────────

    /// Point `name` at `entity`, replacing whatever it pointed at before.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is not alive.
    pub fn register_tag(&mut self, name: &str, entity: Entity) {
        assert!(
            self.allocator.is_alive(entity),
            "cannot tag dead entity {entity:?} as \"{name}\""
        );
        if let Some(previous) = self.tags.insert(name.to_string(), entity) {
            if previous != entity {
                log::debug!("tag \"{name}\" moved from {previous:?} to {entity:?}");
                self.forget_reverse_tag(previous, name);
            }
        }
        let names = self.entity_tags.entry(entity.index).or_default();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    /// The entity `name` points at, or `None` if the tag is unknown or its
    /// entity has been despawned.
    pub fn resolve_tag(&self, name: &str) -> Option<Entity> {
        self.tags
            .get(name)
            .copied()
            .filter(|&entity| self.allocator.is_alive(entity))
    }

    /// Remove a tag. Returns the entity it pointed at, if still alive.
    pub fn clear_tag(&mut self, name: &str) -> Option<Entity> {
        let entity = self.tags.remove(name)?;
        self.forget_reverse_tag(entity, name);
        Some(entity).filter(|&e| self.allocator.is_alive(e))
    }

    fn forget_reverse_tag(&mut self, entity: Entity, name: &str) {
        if let Some(names) = self.entity_tags.get_mut(&entity.index) {
            names.retain(|n| n != name);
            if names.is_empty() {
                self.entity_tags.remove(&entity.index);
            }
        }
    }

    // ── Entity Management ────────────────────────────────────────────

    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Every alive entity carrying all of `Q`'s component types.
    ///
    /// Lazy and restartable: call it again for a fresh pass. Order is
    /// unspecified but stable as long as the world is not mutated.
    pub fn entities_matching<Q: QueryParam>(&self) -> impl Iterator<Item = Entity> + '_ {
        let required = Q::type_ids();
        self.archetypes
            .values()
            .filter(move |arch| arch.matches(&required))
            .flat_map(|arch| arch.entities.iter().copied())
    }

    /// Every alive entity that has a `T`.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.entities_matching::<(&T,)>().collect()
    }

    pub fn spawn_empty(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        let key = archetype_key(Vec::new());
        let arch = self
            .archetypes
            .entry(key.clone())
            .or_insert_with(|| Archetype::with_key(&key));
        let row = arch.entities.len();
        arch.entities.push(entity);
        self.entity_locations.insert(
            entity.index,
            EntityLocation {
                archetype_key: key,
                row,
            },
        );
        entity
    }

    /// Despawn an entity, dropping all of its components and purging any tag
    /// that points at it.
    ///
    /// Returns `false` if the entity was already dead.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.allocator.is_alive(entity) {
            return false;
        }

        if let Some(names) = self.entity_tags.remove(&entity.index) {
            for name in names {
                if self.tags.get(&name) == Some(&entity) {
                    self.tags.remove(&name);
                }
            }
        }

        if let Some(loc) = self.entity_locations.remove(&entity.index) {
            if let Some(arch) = self.archetypes.get_mut(&loc.archetype_key) {
                if let Some(moved) = arch.swap_remove(loc.row) {
                    if let Some(moved_loc) = self.entity_locations.get_mut(&moved.index) {
                        moved_loc.row = loc.row;
                    }
                }
            }
        }

        self.allocator.deallocate(entity);
        true
    }

    pub fn despawn_all(&mut self) {
        let all: Vec<Entity> = self
            .archetypes
            .values()
            .flat_map(|arch| arch.entities.iter().copied())
            .collect();
        for entity in all {
            self.despawn(entity);
        }
        self.tags.clear();
        self.entity_tags.clear();
    }

    // ── Per-Entity Component Access ──────────────────────────────────

    /// `None` if the entity is dead or lacks the component.
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        let loc = self.entity_locations.get(&entity.index)?;
        let arch = self.archetypes.get(&loc.archetype_key)?;
        let col = arch.columns.get(&TypeId::of::<T>())?;
        Some(col.get::<T>(loc.row))
    }

    /// `None` if the entity is dead or lacks the component.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        let loc = self.entity_locations.get(&entity.index)?;
        let arch = self.archetypes.get_mut(&loc.archetype_key)?;
        let col = arch.columns.get_mut(&TypeId::of::<T>())?;
        Some(col.get_mut::<T>(loc.row))
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    /// Attach a component, replacing an existing one of the same type.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not alive.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) {
        assert!(
            self.allocator.is_alive(entity),
            "cannot insert `{}` on dead entity {entity:?}",
            std::any::type_name::<T>()
        );

        let tid = TypeId::of::<T>();
        if let Some(slot) = self.get_mut::<T>(entity) {
            *slot = component;
            return;
        }

        let mut type_ids = self.location(entity).archetype_key;
        type_ids.push(tid);
        self.migrate(entity, archetype_key(type_ids), Some((tid, Box::new(component))));
    }

    /// Detach a component. Returns `true` if it was present.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not alive.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> bool {
        assert!(
            self.allocator.is_alive(entity),
            "cannot remove `{}` from dead entity {entity:?}",
            std::any::type_name::<T>()
        );

        let tid = TypeId::of::<T>();
        let key = self.location(entity).archetype_key;
        if !key.contains(&tid) {
            return false;
        }
        let new_key = key.into_iter().filter(|&t| t != tid).collect();
        self.migrate(entity, new_key, None);
        true
    }

    fn location(&self, entity: Entity) -> EntityLocation {
        self.entity_locations
            .get(&entity.index)
            .cloned()
            .unwrap_or_else(|| panic!("alive entity {entity:?} has no archetype location"))
    }

    /// Move an entity's row into the archetype for `new_key`. Components whose
    /// type is not in `new_key` are dropped; `added` supplies the one new type
    /// when growing.
    fn migrate(&mut self, entity: Entity, new_key: ArchetypeKey, added: Option<(TypeId, BoxedComponent)>) {
        let loc = self.location(entity);

        let old_arch = self
            .archetypes
            .get_mut(&loc.archetype_key)
            .unwrap_or_else(|| panic!("archetype for {entity:?} vanished"));
        let mut taken: HashMap<TypeId, BoxedComponent> = old_arch
            .columns
            .iter_mut()
            .map(|(&tid, col)| (tid, col.take(loc.row)))
            .collect();
        old_arch.entities.swap_remove(loc.row);
        if let Some(&moved) = old_arch.entities.get(loc.row) {
            if let Some(moved_loc) = self.entity_locations.get_mut(&moved.index) {
                moved_loc.row = loc.row;
            }
        }

        if let Some((tid, boxed)) = added {
            taken.insert(tid, boxed);
        }

        let new_arch = self
            .archetypes
            .entry(new_key.clone())
            .or_insert_with(|| Archetype::with_key(&new_key));
        let row = new_arch.entities.len();
        new_arch.entities.push(entity);
        for (tid, col) in new_arch.columns.iter_mut() {
            let value = taken
                .remove(tid)
                .unwrap_or_else(|| panic!("component {tid:?} missing while moving {entity:?}"));
            col.push_any(value);
        }

        self.entity_locations.insert(
            entity.index,
            EntityLocation {
                archetype_key: new_key,
                row,
            },
        );
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Run `f` for every entity carrying all of `Q`'s component types.
    ///
    /// ```ignore
    /// world.query::<(&mut Displayable,)>(|entity, (display,)| {
    ///     while let Some(request) = display.poll_update_request() { ... }
    /// });
    /// ```
    pub fn query<Q: QueryParam>(&mut self, f: impl FnMut(Entity, Q::Item<'_>)) {
        let required = Q::type_ids();
        self.run_query::<Q>(&required, f);
    }

    /// Like [`query`](Self::query), restricted to entities that also carry
    /// the marker `F`. The marker itself is not fetched.
    pub fn query_filtered<Q: QueryParam, F: Component>(
        &mut self,
        f: impl FnMut(Entity, Q::Item<'_>),
    ) {
        let mut required = Q::type_ids();
        required.push(TypeId::of::<F>());
        self.run_query::<Q>(&required, f);
    }

    /// Run `f` on the one entity carrying `Q` plus the marker `F`. Returns
    /// `false` when no entity matches.
    ///
    /// # Panics
    ///
    /// Panics if more than one entity matches.
    pub fn query_single<Q: QueryParam, F: Component>(
        &mut self,
        f: impl FnOnce(Entity, Q::Item<'_>),
    ) -> bool {
        let mut required = Q::type_ids();
        required.push(TypeId::of::<F>());

        let mut found: Option<(Entity, ArchetypeKey, usize)> = None;
        for (key, arch) in self.archetypes.iter().filter(|(_, a)| a.matches(&required)) {
            for (row, &entity) in arch.entities.iter().enumerate() {
                if found.is_some() {
                    panic!(
                        "query_single: multiple entities match filter `{}`",
                        std::any::type_name::<F>()
                    );
                }
                found = Some((entity, key.clone(), row));
            }
        }

        let Some((entity, key, row)) = found else {
            return false;
        };
        let Some(arch) = self.archetypes.get_mut(&key) else {
            return false;
        };
        let mut cols = Q::extract(&mut arch.columns);
        f(entity, Q::fetch(&mut cols, row));
        Q::restore(cols, &mut arch.columns);
        true
    }

    fn run_query<Q: QueryParam>(&mut self, required: &[TypeId], mut f: impl FnMut(Entity, Q::Item<'_>)) {
        let matching: Vec<ArchetypeKey> = self
            .archetypes
            .iter()
            .filter(|(_, arch)| arch.matches(required))
            .map(|(key, _)| key.clone())
            .collect();

        for key in matching {
            let Some(arch) = self.archetypes.get_mut(&key) else {
                continue;
            };
            let mut cols = Q::extract(&mut arch.columns);
            for (row, &entity) in arch.entities.iter().enumerate() {
                f(entity, Q::fetch(&mut cols, row));
            }
            Q::restore(cols, &mut arch.columns);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

// ── Spawn Bundles ────────────────────────────────────────────────────────

/// A tuple of components spawned together into one archetype.
pub trait SpawnBundle {
    fn type_ids() -> Vec<TypeId>;
    fn push_into(self, columns: &mut HashMap<TypeId, ComponentColumn>);
}

macro_rules! impl_spawn_bundle {
    ($($T:ident),+) => {
        impl<$($T: Component),+> SpawnBundle for ($($T,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(component_type_id::<$T>()),+]
            }

            #[allow(non_snake_case)]
            fn push_into(self, columns: &mut HashMap<TypeId, ComponentColumn>) {
                let ($($T,)+) = self;
                $(
                    columns
                        .get_mut(&component_type_id::<$T>())
                        .unwrap_or_else(|| panic!(
                            "bundle column `{}` missing (duplicate type in bundle?)",
                            std::any::type_name::<$T>()
                        ))
                        .push::<$T>($T);
                )+
            }
        }
    };
}

impl_spawn_bundle!(A);
impl_spawn_bundle!(A, B);
impl_spawn_bundle!(A, B, C);
impl_spawn_bundle!(A, B, C, D);
impl_spawn_bundle!(A, B, C, D, E);
impl_spawn_bundle!(A, B, C, D, E, F);

impl World {
    /// Spawn an entity from a tuple of components.
    ///
    /// # Panics
    ///
    /// Panics if the bundle names the same component type twice.
    pub fn spawn<B: SpawnBundle>(&mut self, bundle: B) -> Entity {
        let type_ids = B::type_ids();
        let key = archetype_key(type_ids.clone());
        assert_eq!(
            key.len(),
            type_ids.len(),
            "spawn bundle contains a duplicate component type"
        );

        let entity = self.allocator.allocate();
        let arch = self
            .archetypes
            .entry(key.clone())
            .or_insert_with(|| Archetype::with_key(&key));
        let row = arch.entities.len();
        arch.entities.push(entity);
        bundle.push_into(&mut arch.columns);

        self.entity_locations.insert(
            entity.index,
            EntityLocation {
                archetype_key: key,
                row,
            },
        );
        entity
    }

    pub fn spawn_one<T: Component>(&mut self, component: T) -> Entity {
        self.spawn((component,))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Width(u32);
    #[derive(Debug, PartialEq)]
    struct Label(&'static str);
    struct Hidden;
    struct Overlay;

    #[test]
    fn spawn_and_get() {
        let mut world = World::new();
        let e = world.spawn((Width(4), Label("plains")));
        assert_eq!(world.get::<Width>(e), Some(&Width(4)));
        assert_eq!(world.get::<Label>(e), Some(&Label("plains")));
        assert!(world.get::<Hidden>(e).is_none());
        assert!(world.has::<Width>(e));
        assert!(!world.has::<Hidden>(e));
    }

    #[test]
    fn despawn_drops_components_and_invalidates_handle() {
        let mut world = World::new();
        let e = world.spawn((Width(1),));
        assert!(world.despawn(e));
        assert!(!world.is_alive(e));
        assert!(world.get::<Width>(e).is_none());
        assert!(!world.despawn(e));
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn stale_handle_does_not_reach_recycled_entity() {
        let mut world = World::new();
        let old = world.spawn((Width(1),));
        world.despawn(old);
        let new = world.spawn((Width(2),));
        assert_eq!(old.index(), new.index());
        assert!(world.get::<Width>(old).is_none());
        assert_eq!(world.get::<Width>(new), Some(&Width(2)));
    }

    #[test]
    fn swap_remove_keeps_remaining_rows_addressable() {
        let mut world = World::new();
        let a = world.spawn((Width(10),));
        let b = world.spawn((Width(20),));
        let c = world.spawn((Width(30),));
        world.despawn(a);
        assert_eq!(world.get::<Width>(b), Some(&Width(20)));
        assert_eq!(world.get::<Width>(c), Some(&Width(30)));
    }

    #[test]
    fn insert_moves_entity_to_new_archetype() {
        let mut world = World::new();
        let a = world.spawn((Width(1),));
        let b = world.spawn((Width(2),));
        world.insert(a, Label("a"));

        assert_eq!(world.get::<Width>(a), Some(&Width(1)));
        assert_eq!(world.get::<Label>(a), Some(&Label("a")));
        assert_eq!(world.get::<Width>(b), Some(&Width(2)));
        assert!(world.get::<Label>(b).is_none());
    }

    #[test]
    fn insert_replaces_existing_component() {
        let mut world = World::new();
        let e = world.spawn((Width(1),));
        world.insert(e, Width(9));
        assert_eq!(world.get::<Width>(e), Some(&Width(9)));
    }

    #[test]
    fn remove_component() {
        let mut world = World::new();
        let e = world.spawn((Width(3), Hidden));
        assert!(world.remove::<Hidden>(e));
        assert!(!world.has::<Hidden>(e));
        assert_eq!(world.get::<Width>(e), Some(&Width(3)));
        assert!(!world.remove::<Hidden>(e));
    }

    #[test]
    fn spawn_empty_then_insert() {
        let mut world = World::new();
        let e = world.spawn_empty();
        world.insert(e, Label("late"));
        assert_eq!(world.get::<Label>(e), Some(&Label("late")));
    }

    #[test]
    #[should_panic(expected = "duplicate component type")]
    fn duplicate_bundle_type_panics() {
        let mut world = World::new();
        world.spawn((Width(1), Width(2)));
    }

    #[test]
    fn query_visits_matching_entities_only() {
        let mut world = World::new();
        world.spawn((Width(1), Label("x")));
        world.spawn((Width(2),));
        world.spawn((Label("y"),));

        let mut seen = Vec::new();
        world.query::<(&Width, &Label)>(|_, (w, l)| seen.push((w.0, l.0)));
        assert_eq!(seen, vec![(1, "x")]);
    }

    #[test]
    fn query_mutates_in_place() {
        let mut world = World::new();
        let e = world.spawn((Width(1),));
        world.query::<(&mut Width,)>(|_, (w,)| w.0 += 10);
        assert_eq!(world.get::<Width>(e), Some(&Width(11)));
    }

    #[test]
    fn query_filtered_requires_marker() {
        let mut world = World::new();
        world.spawn((Width(1), Overlay));
        world.spawn((Width(2),));

        let mut seen = Vec::new();
        world.query_filtered::<(&Width,), Overlay>(|_, (w,)| seen.push(w.0));
        assert_eq!(seen, vec![1]);
    }

    #[test]
    fn query_single_finds_the_marked_entity() {
        let mut world = World::new();
        world.spawn((Width(1),));
        let marked = world.spawn((Width(2), Overlay));

        let mut hit = None;
        assert!(world.query_single::<(&mut Width,), Overlay>(|e, (w,)| {
            w.0 = 5;
            hit = Some(e);
        }));
        assert_eq!(hit, Some(marked));
        assert_eq!(world.get::<Width>(marked), Some(&Width(5)));
    }

    #[test]
    fn query_single_without_match_returns_false() {
        let mut world = World::new();
        world.spawn((Width(1),));
        assert!(!world.query_single::<(&Width,), Overlay>(|_, _| {}));
    }

    #[test]
    #[should_panic(expected = "multiple entities match")]
    fn query_single_panics_on_ambiguity() {
        let mut world = World::new();
        world.spawn((Width(1), Overlay));
        world.spawn((Width(2), Overlay));
        world.query_single::<(&Width,), Overlay>(|_, _| {});
    }

    #[test]
    fn entities_matching_is_lazy_and_restartable() {
        let mut world = World::new();
        let a = world.spawn((Width(1), Label("a")));
        let b = world.spawn((Width(2), Label("b"), Hidden));
        let _c = world.spawn((Width(3),));

        let first: Vec<Entity> = world.entities_matching::<(&Width, &Label)>().collect();
        let second: Vec<Entity> = world.entities_matching::<(&Width, &Label)>().collect();
        assert_eq!(first.len(), 2);
        assert!(first.contains(&a));
        assert!(first.contains(&b));
        assert_eq!(first, second);

        assert_eq!(world.entities_with::<Hidden>(), vec![b]);
    }

    #[test]
    fn tag_resolves_to_registered_entity() {
        let mut world = World::new();
        let area = world.spawn((Label("area"),));
        world.register_tag("area", area);
        assert_eq!(world.resolve_tag("area"), Some(area));
        assert_eq!(world.resolve_tag("missing"), None);
    }

    #[test]
    fn tag_is_weak_after_despawn() {
        let mut world = World::new();
        let area = world.spawn((Label("area"),));
        world.register_tag("area", area);
        world.despawn(area);
        assert_eq!(world.resolve_tag("area"), None);

        // The recycled slot must not inherit the tag.
        let other = world.spawn((Label("other"),));
        assert_eq!(other.index(), area.index());
        assert_eq!(world.resolve_tag("area"), None);
    }

    #[test]
    fn retagging_moves_alias_and_old_target_keeps_nothing() {
        let mut world = World::new();
        let first = world.spawn((Width(1),));
        let second = world.spawn((Width(2),));
        world.register_tag("area", first);
        world.register_tag("area", second);
        assert_eq!(world.resolve_tag("area"), Some(second));

        // Despawning the old target must not clear the moved tag.
        world.despawn(first);
        assert_eq!(world.resolve_tag("area"), Some(second));
    }

    #[test]
    fn clear_tag_returns_target() {
        let mut world = World::new();
        let e = world.spawn((Width(1),));
        world.register_tag("grid", e);
        assert_eq!(world.clear_tag("grid"), Some(e));
        assert_eq!(world.resolve_tag("grid"), None);
        assert_eq!(world.clear_tag("grid"), None);
        assert!(world.is_alive(e));
    }

    #[test]
    #[should_panic(expected = "cannot tag dead entity")]
    fn tagging_dead_entity_panics() {
        let mut world = World::new();
        let e = world.spawn((Width(1),));
        world.despawn(e);
        world.register_tag("area", e);
    }

    #[test]
    fn despawn_all_clears_entities_and_tags() {
        let mut world = World::new();
        let a = world.spawn((Width(1),));
        world.spawn((Width(2),));
        world.register_tag("area", a);
        world.despawn_all();
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.resolve_tag("area"), None);
    }

    #[test]
    fn resources_insert_get_remove() {
        let mut world = World::new();
        world.insert_resource(42u32);
        assert_eq!(*world.resource::<u32>(), 42);
        *world.resource_mut::<u32>() = 7;
        assert_eq!(world.get_resource::<u32>(), Some(&7));
        assert_eq!(world.resource_remove::<u32>(), Some(7));
        assert!(!world.has_resource::<u32>());
        assert_eq!(world.resource_remove::<u64>(), None);
    }

    #[test]
    #[should_panic(expected = "not found")]
    fn missing_resource_panics() {
        let world = World::new();
        world.resource::<String>();
    }
}
