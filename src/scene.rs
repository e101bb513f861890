//! Visual representation boundary
//!
//! The simulation never draws. It asks a [`Scene`] for mesh handles, moves
//! them, and releases them. [`HeadlessScene`] is an in-memory arena used by the
//! native runner and by tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a mesh owned by a scene.
///
/// Slots are reused, so the generation tells a live handle from a stale one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle {
    index: u32,
    generation: u32,
}

impl MeshHandle {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// What to draw for a handle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MeshKind {
    Ball { radius: f32 },
    Pocket { radius: f32 },
}

/// Position and heading of a placed mesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub pos: Vec2,
    pub angle: f32,
}

/// External visual representation and progress display
pub trait Scene {
    /// Size the table background
    fn setup_background(&mut self, width: f32, height: f32);

    fn create_mesh(&mut self, kind: MeshKind) -> MeshHandle;

    /// Remove and free a mesh; the handle is dead afterwards
    fn destroy_mesh(&mut self, handle: MeshHandle);

    fn place_mesh(&mut self, handle: MeshHandle, x: f32, y: f32, angle: f32);

    /// Shot charge bar, `progress` in [0, 1]
    fn update_progress_bar(&mut self, progress: f32);
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    mesh: Option<(MeshKind, Placement)>,
}

/// Arena-backed scene that keeps everything in memory
#[derive(Debug, Clone, Default)]
pub struct HeadlessScene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    background: Option<Vec2>,
    progress: f32,
    stale_ops: usize,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn live_slot(&self, handle: MeshHandle) -> Option<&(MeshKind, Placement)> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.mesh.as_ref())
    }

    fn live_slot_mut(&mut self, handle: MeshHandle) -> Option<&mut (MeshKind, Placement)> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.mesh.as_mut())
    }

    pub fn is_live(&self, handle: MeshHandle) -> bool {
        self.live_slot(handle).is_some()
    }

    #[cfg(test)]
    fn kind(&self, handle: MeshHandle) -> Option<MeshKind> {
        self.live_slot(handle).map(|(kind, _)| *kind)
    }

    pub fn placement(&self, handle: MeshHandle) -> Option<Placement> {
        self.live_slot(handle).map(|(_, placement)| *placement)
    }

    /// Number of meshes currently alive
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.mesh.is_some()).count()
    }

    /// Live meshes of one shape
    pub fn live_count_of(&self, pred: impl Fn(&MeshKind) -> bool) -> usize {
        self.slots
            .iter()
            .filter_map(|slot| slot.mesh.as_ref())
            .filter(|(kind, _)| pred(kind))
            .count()
    }

    pub fn background(&self) -> Option<Vec2> {
        self.background
    }

    /// Last value shown on the charge bar
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Operations that arrived with a dead handle
    pub fn stale_ops(&self) -> usize {
        self.stale_ops
    }
}

impl Scene for HeadlessScene {
    fn setup_background(&mut self, width: f32, height: f32) {
        self.background = Some(Vec2::new(width, height));
    }

    fn create_mesh(&mut self, kind: MeshKind) -> MeshHandle {
        let mesh = Some((kind, Placement::default()));
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generation = slot.generation.wrapping_add(1);
                slot.mesh = mesh;
                MeshHandle::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, mesh });
                MeshHandle::new(index, 0)
            }
        }
    }

    fn destroy_mesh(&mut self, handle: MeshHandle) {
        let live = self
            .slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.mesh.take());
        if live.is_some() {
            self.free.push(handle.index);
        } else {
            log::warn!("destroy_mesh on dead handle {:?}", handle);
            self.stale_ops += 1;
        }
    }

    fn place_mesh(&mut self, handle: MeshHandle, x: f32, y: f32, angle: f32) {
        match self.live_slot_mut(handle) {
            Some((_, placement)) => {
                *placement = Placement {
                    pos: Vec2::new(x, y),
                    angle,
                }
            }
            None => {
                log::warn!("place_mesh on dead handle {:?}", handle);
                self.stale_ops += 1;
            }
        }
    }

    fn update_progress_bar(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }
}
