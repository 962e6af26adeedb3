use crate::streamer::ObjectFactory;
use glam::Vec3;
use gridstream_common::ObjectId;
use gridstream_registry::SpawnDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-object data stored in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectData {
    pub template: String,
    pub position: Vec3,
    pub active: bool,
}

/// A minimal concrete object store implementing `ObjectFactory`.
///
/// Stands in for a real scene graph: objects are rows keyed by `ObjectId`.
/// Uses BTreeMap for deterministic iteration order. The CLI and tests use
/// it directly; an embedding engine supplies its own factory instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectWorld {
    objects: BTreeMap<ObjectId, ObjectData>,
    spawned_total: u64,
    destroyed_total: u64,
}

impl ObjectWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently alive.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectData> {
        self.objects.get(&id)
    }

    /// Read-only access to all live objects, in id order.
    pub fn objects(&self) -> &BTreeMap<ObjectId, ObjectData> {
        &self.objects
    }

    /// Objects ever spawned, including since-destroyed ones.
    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    /// Objects destroyed so far.
    pub fn destroyed_total(&self) -> u64 {
        self.destroyed_total
    }
}

impl ObjectFactory for ObjectWorld {
    type Handle = ObjectId;

    fn instantiate(&mut self, descriptor: &SpawnDescriptor, position: Vec3) -> ObjectId {
        let id = ObjectId::new();
        self.objects.insert(
            id,
            ObjectData {
                template: descriptor.template.clone(),
                position,
                active: true,
            },
        );
        self.spawned_total += 1;
        id
    }

    fn destroy(&mut self, handle: ObjectId) {
        if self.objects.remove(&handle).is_some() {
            self.destroyed_total += 1;
        }
    }
}
