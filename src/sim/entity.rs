//! Falling entities and the pool that owns them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// What happens when the player touches an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Adds a point (cake)
    Collectible,
    /// Costs a life (comet)
    Hazard,
}

/// A falling object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, x: f32, size: Vec2) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(x, 0.0),
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// All live entities (sorted by id for deterministic iteration)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityPool {
    entities: Vec<Entity>,
}

impl EntityPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity. Returns false and drops it if the id is already present.
    pub fn insert(&mut self, entity: Entity) -> bool {
        match self.entities.binary_search_by_key(&entity.id, |e| e.id) {
            Ok(_) => {
                log::warn!("Duplicate entity id {} ignored", entity.id);
                false
            }
            Err(idx) => {
                self.entities.insert(idx, entity);
                true
            }
        }
    }

    /// Remove every entity whose id is in `ids` (sorted or not)
    pub fn remove_ids(&mut self, ids: &[u32]) {
        if ids.is_empty() {
            return;
        }
        self.entities.retain(|e| !ids.contains(&e.id));
    }

    /// Keep only entities matching the predicate, returning how many were dropped
    pub fn retain(&mut self, keep: impl FnMut(&Entity) -> bool) -> usize {
        let before = self.entities.len();
        self.entities.retain(keep);
        before - self.entities.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|idx| &self.entities[idx])
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
