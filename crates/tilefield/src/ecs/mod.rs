//! # Archetype-Based ECS
//!
//! Entities are generational handles; components are plain data grouped by
//! component set into archetypes; tags are weak name-to-entity aliases;
//! resources are world-scoped singletons.
//!
//! ## Module Overview
//!
//! - [`entity`] — Generational entity handles
//! - [`component`] — Type-erased columnar storage (`Box<dyn Any>`)
//! - [`archetype`] — Groups entities by component signature
//! - [`world`] — Central container (entities, components, tags, resources)
//! - [`query`] — Aspect matching and closure-based iteration
//! - [`system`] — System trait and schedule runner

pub(crate) mod archetype;
pub(crate) mod component;
pub mod entity;
pub mod query;
pub mod system;
pub mod world;

pub use component::Component;
pub use entity::Entity;
pub use query::QueryParam;
pub use system::{Schedule, System};
pub use world::World;
