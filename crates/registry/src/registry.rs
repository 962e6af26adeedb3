use gridstream_common::GridCell;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Static data describing what to instantiate for a cell.
///
/// The template name is opaque to the streaming core; the object factory
/// decides what it means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnDescriptor {
    pub template: String,
}

impl SpawnDescriptor {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

/// Errors from registry construction.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("descriptor list is empty")]
    NoDescriptors,
    #[error("sampling range must be positive, got {0}")]
    InvalidRange(i32),
}

/// Configuration for random registry population.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// How many random cells to attempt; duplicates are skipped, so the
    /// final registry may hold fewer entries.
    pub object_count: usize,
    /// Both cell axes are drawn uniformly from `[-object_range, object_range)`.
    pub object_range: i32,
    /// RNG seed; the same seed and descriptor list reproduce the same world.
    pub seed: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            object_count: 16,
            object_range: 4,
            seed: 0,
        }
    }
}

/// Read-only mapping from grid cell to spawn descriptor.
///
/// Built once at startup, never mutated during streaming. Uses BTreeMap for
/// deterministic iteration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellRegistry {
    cells: BTreeMap<GridCell, SpawnDescriptor>,
}

impl CellRegistry {
    /// Create an empty registry (populate via `insert` or `build_random`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate a registry with up to `object_count` random cells.
    ///
    /// Duplicate cells are silently skipped; each accepted cell gets one
    /// descriptor drawn uniformly from `descriptors`. An empty descriptor
    /// list or non-positive range is a configuration error.
    pub fn build_random(
        config: &RegistryConfig,
        descriptors: &[SpawnDescriptor],
    ) -> Result<Self, RegistryError> {
        if descriptors.is_empty() {
            return Err(RegistryError::NoDescriptors);
        }
        if config.object_range <= 0 {
            return Err(RegistryError::InvalidRange(config.object_range));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut registry = Self::new();
        for _ in 0..config.object_count {
            let cell = GridCell::new(
                rng.gen_range(-config.object_range..config.object_range),
                rng.gen_range(-config.object_range..config.object_range),
            );
            if registry.contains(cell) {
                continue;
            }
            let descriptor = descriptors[rng.gen_range(0..descriptors.len())].clone();
            tracing::trace!(?cell, template = %descriptor.template, "registry cell assigned");
            registry.insert(cell, descriptor);
        }
        tracing::debug!(
            entries = registry.len(),
            attempted = config.object_count,
            "registry built"
        );
        Ok(registry)
    }

    /// Insert a descriptor for a cell. Returns false (keeping the existing
    /// entry) if the cell is already occupied.
    pub fn insert(&mut self, cell: GridCell, descriptor: SpawnDescriptor) -> bool {
        match self.cells.entry(cell) {
            Entry::Vacant(e) => {
                e.insert(descriptor);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Descriptor for a cell, if any. Most cells are empty: a miss is the
    /// expected case, not an error.
    pub fn get(&self, cell: GridCell) -> Option<&SpawnDescriptor> {
        self.cells.get(&cell)
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate entries in cell order.
    pub fn iter(&self) -> impl Iterator<Item = (&GridCell, &SpawnDescriptor)> {
        self.cells.iter()
    }
}
