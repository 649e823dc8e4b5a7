//! # System — Per-Tick Logic Over the World
//!
//! A system takes `&mut World` once per tick. Closures and plain functions
//! qualify through the blanket impl; stateful systems such as the
//! [`PermissionsEditor`](crate::editor::PermissionsEditor) implement
//! [`System`] directly.
//!
//! A [`Schedule`] runs its systems in insertion order, on the caller's
//! thread. Nothing runs concurrently with a system, so a system may freely
//! mutate whatever it finds.

use super::world::World;

pub trait System {
    fn run(&mut self, world: &mut World);
}

impl<F: FnMut(&mut World)> System for F {
    fn run(&mut self, world: &mut World) {
        (self)(world);
    }
}

struct NamedSystem {
    name: String,
    system: Box<dyn System>,
}

/// An ordered list of systems.
pub struct Schedule {
    systems: Vec<NamedSystem>,
}

impl Schedule {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        let name = short_system_name(std::any::type_name::<S>());
        log::debug!("schedule: added system `{name}`");
        self.systems.push(NamedSystem {
            name,
            system: Box::new(system),
        });
    }

    /// Run every system once, in order.
    pub fn run(&mut self, world: &mut World) {
        for ns in &mut self.systems {
            log::trace!("schedule: running `{}`", ns.name);
            ns.system.run(world);
        }
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Short names of the scheduled systems, in run order.
    pub fn system_names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|ns| ns.name.as_str())
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

/// `tilefield::editor::permissions::PermissionsEditor` -> `PermissionsEditor`,
/// any closure -> `<closure>`.
fn short_system_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    let name = base.rsplit("::").next().unwrap_or(base);
    if full.contains("{{closure}}") {
        "<closure>".to_string()
    } else {
        name.to_string()
    }
}
