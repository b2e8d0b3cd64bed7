use super::context::TickContext;
use crate::persist::{PersistError, SaveStore};

/// How often a simulation system should tick.
///
/// Ordered coarsest-to-finest so `systems.iter().map(|s| s.frequency()).max()`
/// yields the finest granularity needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TickFrequency {
    Daily,  // 1 tick/day
    Hourly, // 24 ticks/day
}

/// A pluggable simulation system that runs each tick.
///
/// Object-safe so systems can be stored as `Box<dyn SimSystem>`.
pub trait SimSystem {
    fn name(&self) -> &str;
    fn frequency(&self) -> TickFrequency;
    fn tick(&mut self, ctx: &mut TickContext);

    /// React to signals delivered in `ctx.inbox`.
    ///
    /// Signals pushed to `ctx.signals` here are reported to the host but
    /// **not** re-delivered (single-pass). Default: no-op.
    fn handle_signals(&mut self, ctx: &mut TickContext) {
        let _ = ctx;
    }

    /// Write durable state into a save store. Default: stateless.
    fn save(&self, store: &mut SaveStore) -> Result<(), PersistError> {
        let _ = store;
        Ok(())
    }
}

/// Ordered set of installed systems, dispatched in registration order.
///
/// Lets a host swap out a built-in behaviour by name before a campaign starts.
#[derive(Default)]
pub struct SystemRegistry {
    systems: Vec<Box<dyn SimSystem>>,
}

impl SystemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, system: Box<dyn SimSystem>) {
        self.systems.push(system);
    }

    /// Remove every system called `name`, returning the first one removed.
    pub fn remove_by_name(&mut self, name: &str) -> Option<Box<dyn SimSystem>> {
        let mut removed = None;
        let mut i = 0;
        while i < self.systems.len() {
            if self.systems[i].name() == name {
                let system = self.systems.remove(i);
                if removed.is_none() {
                    removed = Some(system);
                }
            } else {
                i += 1;
            }
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.systems.iter().any(|s| s.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn systems_mut(&mut self) -> &mut [Box<dyn SimSystem>] {
        &mut self.systems
    }

    pub fn systems(&self) -> &[Box<dyn SimSystem>] {
        &self.systems
    }
}
