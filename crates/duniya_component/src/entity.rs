//! Entity identifiers and the entity table.
//!
//! An [`EntityId`] is a dense, zero-based index into an [`EntityTable`]: the
//! id *is* the slot. Ids are assigned by [`EntityTable::push_default`] and
//! never reused.
//!
//! ## Deletion
//!
//! [`EntityTable::despawn`] tombstones: the entity's components are destroyed
//! and its slot is left holding an empty array. No other id moves, so ids
//! handed to the renderer or stored in components (e.g.
//! [`Material::texture`](crate::Material::texture)) stay valid.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::array::ComponentArray;
use crate::error::{EcsError, Limit};
use crate::registry::TypeRegistry;
use crate::wire::{self, DecodeLimits};

/// A dense entity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Returns the raw `u32` identifier.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Every entity in a scene and the components attached to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityTable {
    /// `entities[i]` belongs to `EntityId(i)`.
    entities: Vec<ComponentArray>,
}

impl EntityTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Append an entity with no components and return its id.
    pub fn push_default(&mut self) -> EntityId {
        // Ids are u32 on the wire.
        let id = EntityId(self.entities.len() as u32);
        self.entities.push(ComponentArray::new());
        id
    }

    /// The components of entity `id`.
    pub fn get(&self, id: EntityId) -> Result<&ComponentArray, EcsError> {
        let len = self.entities.len();
        self.entities
            .get(id.index())
            .ok_or(EcsError::OutOfRange { id, len })
    }

    /// The components of entity `id`, mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut ComponentArray, EcsError> {
        let len = self.entities.len();
        self.entities
            .get_mut(id.index())
            .ok_or(EcsError::OutOfRange { id, len })
    }

    /// Destroy every component of `id`, leaving an empty slot behind.
    ///
    /// Returns the number of components destroyed.
    pub fn despawn(&mut self, id: EntityId) -> Result<usize, EcsError> {
        let destroyed = self.get_mut(id)?.clear();
        debug!(%id, destroyed, "despawned entity");
        Ok(destroyed)
    }

    /// Number of slots, including despawned ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total components across all entities.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.entities.iter().map(ComponentArray::len).sum()
    }

    /// Entities in id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &ComponentArray)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, array)| (EntityId(i as u32), array))
    }

    /// Write the entity count, then each id followed by its component array.
    pub fn encode_all(&self, sink: &mut dyn Write, registry: &TypeRegistry) -> Result<(), EcsError> {
        let count = u32::try_from(self.entities.len()).map_err(|_| EcsError::LimitExceeded {
            limit: Limit::Entities,
            found: self.entities.len() as u64,
            max: u64::from(u32::MAX),
        })?;
        wire::write_u32(sink, count)?;
        for (id, array) in self.iter() {
            wire::write_u32(sink, id.0)?;
            array.encode_all(sink, registry)?;
        }
        debug!(entities = count, components = self.component_count(), "encoded entity table");
        Ok(())
    }

    /// Read a table written by [`EntityTable::encode_all`].
    ///
    /// The table is sized to the declared count up front and each record is
    /// decoded into the slot its id names. An id at or past the count, or one
    /// that was already filled, is [`EcsError::DuplicateOrOutOfRangeId`].
    /// Failures are wrapped with the index of the entity record they
    /// occurred in.
    pub fn decode_all(
        source: &mut dyn Read,
        registry: &TypeRegistry,
        limits: &DecodeLimits,
    ) -> Result<Self, EcsError> {
        let count = wire::read_u32(source)?;
        limits.check(Limit::Entities, count)?;

        let mut table = Self::new();
        table.entities.resize_with(count as usize, ComponentArray::new);
        let mut filled = vec![false; count as usize];

        for index in 0..count {
            let id = wire::read_u32(source).map_err(|e| EcsError::from(e).in_entity(index))?;
            let slot = filled
                .get_mut(id as usize)
                .filter(|seen| !**seen)
                .ok_or_else(|| EcsError::DuplicateOrOutOfRangeId { id, count }.in_entity(index))?;
            *slot = true;
            table.entities[id as usize] = ComponentArray::decode_all(source, registry, limits)
                .map_err(|e| e.in_entity(index))?;
        }
        debug!(entities = count, components = table.component_count(), "decoded entity table");
        Ok(table)
    }
}
