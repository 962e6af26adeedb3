use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a live streamed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// A discrete cell on the streaming grid.
///
/// Cells partition the ground plane into fixed-size squares: `x` follows
/// world X, `y` follows world Z. The `Ord` impl gives registries and window
/// sets a deterministic iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a ground-plane world position to its grid cell.
    ///
    /// Each axis rounds to the nearest cell index. Ties round half away from
    /// zero (`f32::round`): a position exactly halfway between two cell
    /// centers lands in the cell farther from the origin.
    pub fn from_world(pos: Vec2, cell_size: f32) -> Self {
        Self {
            x: (pos.x / cell_size).round() as i32,
            y: (pos.y / cell_size).round() as i32,
        }
    }

    /// World-space origin of this cell on the ground plane (y up, zero height).
    pub fn world_origin(&self, cell_size: f32) -> Vec3 {
        Vec3::new(
            self.x as f32 * cell_size,
            0.0,
            self.y as f32 * cell_size,
        )
    }

    /// Chebyshev distance to another cell: max of the per-axis deltas.
    pub fn chebyshev(&self, other: GridCell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_uniqueness() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn from_world_basic() {
        let cell = GridCell::from_world(Vec2::new(0.0, 0.0), 4.0);
        assert_eq!(cell, GridCell::new(0, 0));

        let cell = GridCell::from_world(Vec2::new(40.0, 0.0), 4.0);
        assert_eq!(cell, GridCell::new(10, 0));

        let cell = GridCell::from_world(Vec2::new(-7.9, 5.9), 4.0);
        assert_eq!(cell, GridCell::new(-2, 1));
    }

    #[test]
    fn from_world_rounds_ties_away_from_zero() {
        // Exactly halfway between cell 0 and cell 1.
        let cell = GridCell::from_world(Vec2::new(2.0, -2.0), 4.0);
        assert_eq!(cell, GridCell::new(1, -1));

        // Just inside the boundary stays in cell 0.
        let cell = GridCell::from_world(Vec2::new(1.99, -1.99), 4.0);
        assert_eq!(cell, GridCell::new(0, 0));
    }

    #[test]
    fn world_origin_is_cell_times_size() {
        let origin = GridCell::new(3, -2).world_origin(4.0);
        assert_eq!(origin, Vec3::new(12.0, 0.0, -8.0));
    }

    #[test]
    fn chebyshev_is_max_axis_delta() {
        let a = GridCell::new(0, 0);
        assert_eq!(a.chebyshev(GridCell::new(3, 1)), 3);
        assert_eq!(a.chebyshev(GridCell::new(-2, -5)), 5);
        assert_eq!(a.chebyshev(a), 0);
    }
}
