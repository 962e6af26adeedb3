use glam::{Vec2, Vec3};
use gridstream_common::GridCell;
use gridstream_registry::{CellRegistry, SpawnDescriptor};
use gridstream_window::{WindowConfig, WindowError, WindowStats, WindowTracker};
use std::collections::BTreeMap;

/// Creates and destroys concrete objects for streamed cells.
///
/// `instantiate` returns ownership of the handle; `destroy` consumes it
/// again. The streamer holds handles only between those two calls, so an
/// object can neither leak nor be released twice.
pub trait ObjectFactory {
    type Handle;

    /// Build an object from a descriptor at a world position, already active.
    fn instantiate(&mut self, descriptor: &SpawnDescriptor, position: Vec3) -> Self::Handle;

    /// Tear an object down, consuming its handle.
    fn destroy(&mut self, handle: Self::Handle);
}

/// A streamed-cell lifecycle event.
///
/// One event is logged per cell entering or leaving the window, whether or
/// not anything spawned there. Test harnesses drain these instead of
/// wiring up a real object system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEvent {
    Added(GridCell),
    Removed(GridCell),
}

/// The object-streaming controller.
///
/// Owns the registry, the window tracker, the factory, and the live-object
/// index; the embedding application constructs and drops it explicitly.
/// Single-threaded and tick-driven: `on_tick` runs to completion, so the
/// window and index are never observable mid-transition.
pub struct Streamer<F: ObjectFactory> {
    registry: CellRegistry,
    tracker: WindowTracker,
    factory: F,
    live: BTreeMap<GridCell, F::Handle>,
    event_log: Vec<CellEvent>,
}

impl<F: ObjectFactory> Streamer<F> {
    /// Build a streamer. Fails on degenerate configuration (non-positive
    /// cell size, negative radius); never fails after startup.
    pub fn new(
        config: WindowConfig,
        registry: CellRegistry,
        factory: F,
    ) -> Result<Self, WindowError> {
        Ok(Self {
            tracker: WindowTracker::new(config)?,
            registry,
            factory,
            live: BTreeMap::new(),
            event_log: Vec::new(),
        })
    }

    /// Process one observer position sample.
    ///
    /// O(1) while the observer stays inside its cell. On a cell crossing,
    /// runs the add handler for every cell entering the window (row-major
    /// order), then the remove handler for every cell leaving it.
    pub fn on_tick(&mut self, observer: Vec2) {
        let Some(delta) = self.tracker.update(observer) else {
            return;
        };
        for cell in delta.added {
            self.cell_added(cell);
        }
        for cell in delta.removed {
            self.cell_removed(cell);
        }
    }

    fn cell_added(&mut self, cell: GridCell) {
        self.event_log.push(CellEvent::Added(cell));
        if self.live.contains_key(&cell) {
            return;
        }
        // Most window cells have no descriptor; a miss is the normal case.
        let Some(descriptor) = self.registry.get(cell) else {
            return;
        };
        let position = cell.world_origin(self.tracker.config().cell_size);
        let handle = self.factory.instantiate(descriptor, position);
        tracing::debug!(x = cell.x, y = cell.y, template = %descriptor.template, "object spawned");
        self.live.insert(cell, handle);
    }

    fn cell_removed(&mut self, cell: GridCell) {
        self.event_log.push(CellEvent::Removed(cell));
        if let Some(handle) = self.live.remove(&cell) {
            tracing::debug!(x = cell.x, y = cell.y, "object despawned");
            self.factory.destroy(handle);
        }
    }

    /// Read-only registry access (safe to share; never mutated post-build).
    pub fn registry(&self) -> &CellRegistry {
        &self.registry
    }

    /// Read-only window state, for inspection and debug rendering.
    pub fn tracker(&self) -> &WindowTracker {
        &self.tracker
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Cells with a live object, in sorted order.
    pub fn live_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.live.keys().copied()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, cell: GridCell) -> bool {
        self.live.contains_key(&cell)
    }

    /// Handle for the object at a cell, if one is live there.
    pub fn live_handle(&self, cell: GridCell) -> Option<&F::Handle> {
        self.live.get(&cell)
    }

    /// Counters from the last window transition.
    pub fn stats(&self) -> &WindowStats {
        self.tracker.stats()
    }

    /// Lifecycle events logged since the last drain.
    pub fn events(&self) -> &[CellEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<CellEvent> {
        std::mem::take(&mut self.event_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ObjectWorld;
    use gridstream_registry::RegistryConfig;

    fn streamer_with(
        radius: i32,
        cell_size: f32,
        entries: &[(i32, i32, &str)],
    ) -> Streamer<ObjectWorld> {
        let mut registry = CellRegistry::new();
        for (x, y, template) in entries {
            registry.insert(GridCell::new(*x, *y), SpawnDescriptor::new(*template));
        }
        Streamer::new(
            WindowConfig { radius, cell_size },
            registry,
            ObjectWorld::new(),
        )
        .unwrap()
    }

    /// The live index must hold exactly the window cells that have a
    /// registry descriptor.
    fn assert_index_consistent(s: &Streamer<ObjectWorld>) {
        for cell in s.tracker().active_cells() {
            assert_eq!(s.is_live(*cell), s.registry().contains(*cell));
        }
        for cell in s.live_cells() {
            assert!(s.tracker().contains(cell));
            assert!(s.registry().contains(cell));
        }
    }

    #[test]
    fn spawn_despawn_scenario() {
        // Registry has a single entry at the origin cell.
        let mut s = streamer_with(1, 4.0, &[(0, 0, "descA")]);

        // Observer far away: window excludes (0,0), nothing spawns.
        s.on_tick(Vec2::new(100.0, 100.0));
        assert_eq!(s.live_count(), 0);
        assert_eq!(s.factory().spawned_total(), 0);

        // Observer at the origin: the 3x3 window covers (0,0) and the
        // object appears at world (0, 0, 0).
        s.on_tick(Vec2::new(0.0, 0.0));
        assert_eq!(s.live_count(), 1);
        assert!(s.is_live(GridCell::new(0, 0)));
        let id = *s.live_handle(GridCell::new(0, 0)).unwrap();
        let data = s.factory().get(id).unwrap();
        assert_eq!(data.template, "descA");
        assert_eq!(data.position, Vec3::ZERO);
        assert!(data.active);

        // Observer jumps to grid (10,0): the old window is fully replaced,
        // the object is destroyed, and nothing new spawns.
        s.on_tick(Vec2::new(40.0, 0.0));
        assert_eq!(s.live_count(), 0);
        assert!(s.factory().get(id).is_none());
        assert_eq!(s.factory().spawned_total(), 1);
        assert_eq!(s.factory().destroyed_total(), 1);
        assert_index_consistent(&s);
    }

    #[test]
    fn no_op_tick_emits_no_events() {
        let mut s = streamer_with(1, 4.0, &[(0, 0, "descA")]);
        s.on_tick(Vec2::ZERO);
        let first = s.drain_events();
        assert!(!first.is_empty());

        // Same cell again: nothing happens.
        s.on_tick(Vec2::new(0.5, -0.5));
        assert!(s.events().is_empty());
        assert_eq!(s.factory().spawned_total(), 1);
    }

    #[test]
    fn spawns_at_cell_world_origin() {
        let mut s = streamer_with(2, 4.0, &[(3, -1, "rock")]);
        s.on_tick(Vec2::new(12.0, -4.0));
        let id = *s.live_handle(GridCell::new(3, -1)).unwrap();
        assert_eq!(
            s.factory().get(id).unwrap().position,
            Vec3::new(12.0, 0.0, -4.0)
        );
    }

    #[test]
    fn empty_cells_are_silent_no_ops() {
        let mut s = streamer_with(2, 4.0, &[]);
        s.on_tick(Vec2::ZERO);
        s.on_tick(Vec2::new(8.0, 8.0));
        assert_eq!(s.live_count(), 0);
        assert_eq!(s.factory().spawned_total(), 0);
        // Events still fire for every window change.
        assert_eq!(s.events().len(), 25 + s.stats().cells_added + s.stats().cells_removed);
    }

    #[test]
    fn object_respawns_on_window_reentry() {
        let mut s = streamer_with(1, 4.0, &[(0, 0, "descA")]);
        s.on_tick(Vec2::ZERO);
        let first = *s.live_handle(GridCell::new(0, 0)).unwrap();
        s.on_tick(Vec2::new(40.0, 0.0));
        s.on_tick(Vec2::ZERO);
        let second = *s.live_handle(GridCell::new(0, 0)).unwrap();
        assert_ne!(first, second);
        assert_eq!(s.factory().spawned_total(), 2);
        assert_eq!(s.factory().destroyed_total(), 1);
    }

    #[test]
    fn index_stays_consistent_along_a_walk() {
        let mut s = streamer_with(2, 2.0, &[(0, 0, "a"), (1, 0, "b"), (4, 2, "c"), (-3, -3, "d")]);
        let path = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(4.0, 2.0),
            Vec2::new(8.0, 4.0),
            Vec2::new(-6.0, -6.0),
            Vec2::new(-6.0, -6.0),
            Vec2::new(30.0, 30.0),
        ];
        for pos in path {
            s.on_tick(pos);
            assert_index_consistent(&s);
        }
        // Every spawn has been matched by a destroy or is still live.
        assert_eq!(
            s.factory().spawned_total(),
            s.factory().destroyed_total() + s.live_count() as u64
        );
    }

    #[test]
    fn events_record_adds_then_removes_per_tick() {
        let mut s = streamer_with(0, 4.0, &[]);
        s.on_tick(Vec2::ZERO);
        s.drain_events();

        s.on_tick(Vec2::new(4.0, 0.0));
        assert_eq!(
            s.events(),
            &[
                CellEvent::Added(GridCell::new(1, 0)),
                CellEvent::Removed(GridCell::new(0, 0)),
            ]
        );
    }

    #[test]
    fn randomly_built_registry_streams_consistently() {
        let registry = CellRegistry::build_random(
            &RegistryConfig {
                object_count: 30,
                object_range: 6,
                seed: 11,
            },
            &[SpawnDescriptor::new("tree"), SpawnDescriptor::new("rock")],
        )
        .unwrap();
        let mut s = Streamer::new(
            WindowConfig {
                radius: 3,
                cell_size: 4.0,
            },
            registry,
            ObjectWorld::new(),
        )
        .unwrap();

        for i in 0..40 {
            s.on_tick(Vec2::new(i as f32 * 2.0 - 30.0, 0.0));
            assert_index_consistent(&s);
        }
    }

    #[test]
    fn bad_config_fails_construction() {
        let result = Streamer::new(
            WindowConfig {
                radius: 1,
                cell_size: 0.0,
            },
            CellRegistry::new(),
            ObjectWorld::new(),
        );
        assert!(matches!(result, Err(WindowError::NonPositiveCellSize(_))));
    }
}
