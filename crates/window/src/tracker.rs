use glam::Vec2;
use gridstream_common::GridCell;
use std::collections::BTreeSet;

/// Window configuration: neighborhood radius (in cells) and cell size.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Chebyshev radius of the materialized neighborhood; the window is a
    /// square of side `2 * radius + 1`.
    pub radius: i32,
    /// Edge length of one grid cell in world units.
    pub cell_size: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            radius: 2,
            cell_size: 4.0,
        }
    }
}

impl WindowConfig {
    /// Validate at startup; degenerate values must not reach the tick path.
    pub fn validate(&self) -> Result<(), WindowError> {
        if !(self.cell_size > 0.0) {
            return Err(WindowError::NonPositiveCellSize(self.cell_size));
        }
        if self.radius < 0 {
            return Err(WindowError::NegativeRadius(self.radius));
        }
        Ok(())
    }
}

/// Errors from window configuration.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("cell size must be positive, got {0}")]
    NonPositiveCellSize(f32),
    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(i32),
}

/// Cells entering and leaving the window on one transition, in the order
/// the lifecycle handlers should run.
///
/// `added` is in row-major scan order of the new neighborhood; `removed` is
/// in cell (sorted) order. Both are deterministic within a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowDelta {
    pub added: Vec<GridCell>,
    pub removed: Vec<GridCell>,
}

impl WindowDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Counters from the last window transition, for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct WindowStats {
    pub cells_added: usize,
    pub cells_removed: usize,
    pub window_size: usize,
}

/// Tracks the set of materialized cells around a moving observer.
///
/// The tracker is a single persistent state {active window, last observer
/// cell}, updated transactionally: each transition recomputes the desired
/// neighborhood from scratch and diffs it against the active set. This is
/// the intended baseline strategy, not an incremental delta walk.
pub struct WindowTracker {
    config: WindowConfig,
    active: BTreeSet<GridCell>,
    /// None until the first update, so the first tick always transitions.
    last_cell: Option<GridCell>,
    stats: WindowStats,
}

impl WindowTracker {
    pub fn new(config: WindowConfig) -> Result<Self, WindowError> {
        config.validate()?;
        Ok(Self {
            config,
            active: BTreeSet::new(),
            last_cell: None,
            stats: WindowStats::default(),
        })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Process one observer position sample.
    ///
    /// Returns `None` when the observer stayed inside its last cell (the
    /// dominant case). Otherwise transitions the window and returns the
    /// cells that entered and left it.
    pub fn update(&mut self, observer: Vec2) -> Option<WindowDelta> {
        let current = GridCell::from_world(observer, self.config.cell_size);
        if self.last_cell == Some(current) {
            return None;
        }
        Some(self.transition(current))
    }

    fn transition(&mut self, current: GridCell) -> WindowDelta {
        let _span = tracing::debug_span!("window_transition", x = current.x, y = current.y)
            .entered();

        let scan = neighborhood(current, self.config.radius);
        let desired: BTreeSet<GridCell> = scan.iter().copied().collect();

        let added: Vec<GridCell> = scan
            .iter()
            .filter(|c| !self.active.contains(c))
            .copied()
            .collect();
        let removed: Vec<GridCell> = self
            .active
            .iter()
            .filter(|c| !desired.contains(c))
            .copied()
            .collect();

        // Commit state before handing the delta out, so the tracker already
        // satisfies its invariant when handlers run.
        self.active = desired;
        self.last_cell = Some(current);
        self.stats = WindowStats {
            cells_added: added.len(),
            cells_removed: removed.len(),
            window_size: self.active.len(),
        };

        tracing::debug!(
            added = added.len(),
            removed = removed.len(),
            window = self.active.len(),
            "window transitioned"
        );

        WindowDelta { added, removed }
    }

    /// The currently materialized cells, in sorted order.
    pub fn active_cells(&self) -> &BTreeSet<GridCell> {
        &self.active
    }

    /// The most recently processed observer cell, if any tick has run.
    pub fn last_cell(&self) -> Option<GridCell> {
        self.last_cell
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        self.active.contains(&cell)
    }

    /// Counters from the last transition.
    pub fn stats(&self) -> &WindowStats {
        &self.stats
    }
}

/// All cells within Chebyshev distance `radius` of `center`, row-major.
fn neighborhood(center: GridCell, radius: i32) -> Vec<GridCell> {
    let side = (2 * radius + 1) as usize;
    let mut cells = Vec::with_capacity(side * side);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            cells.push(GridCell::new(center.x + dx, center.y + dy));
        }
    }
    cells
}
