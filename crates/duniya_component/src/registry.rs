//! Kind ↔ name ↔ tag registry.
//!
//! One table serves both directions of the scene codec. The encoder asks it
//! for the tag to write in front of each component; the decoder rebuilds a
//! registry from the stream's registry section and resolves every component
//! tag against that.
//!
//! Registration is first-wins: registering a kind that already has an entry,
//! or a tag that another kind already owns, is a no-op.

use std::io::{Read, Write};

use tracing::debug;

use crate::error::{EcsError, Limit};
use crate::kind::{ComponentKind, WireTag};
use crate::wire::{self, DecodeLimits};

/// One registered kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// The in-memory kind.
    pub kind: ComponentKind,
    /// The name persisted for the kind.
    pub name: String,
    /// The integer components of this kind are tagged with on the wire.
    pub tag: WireTag,
}

/// Registry of component kinds known to a process or carried by a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    /// Entries in registration order.
    entries: Vec<RegistryEntry>,
}

impl TypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A registry holding every [`ComponentKind`] under its canonical name
    /// and tag. This is what a process installs at startup.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in ComponentKind::ALL {
            registry.register(kind, kind.name());
        }
        registry
    }

    /// Register `kind` under `name` with its canonical tag.
    ///
    /// Returns `true` if an entry was added.
    pub fn register(&mut self, kind: ComponentKind, name: impl Into<String>) -> bool {
        self.register_with_tag(kind, name, kind.wire_tag())
    }

    /// Register `kind` under `name` and an explicit `tag`.
    ///
    /// Returns `true` if an entry was added; `false` if `kind` or `tag` was
    /// already taken.
    pub fn register_with_tag(
        &mut self,
        kind: ComponentKind,
        name: impl Into<String>,
        tag: WireTag,
    ) -> bool {
        if self.entry(kind).is_some() || self.entries.iter().any(|e| e.tag == tag) {
            return false;
        }
        self.entries.push(RegistryEntry {
            kind,
            name: name.into(),
            tag,
        });
        true
    }

    fn entry(&self, kind: ComponentKind) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// The name `kind` is registered under.
    pub fn name_of(&self, kind: ComponentKind) -> Result<&str, EcsError> {
        self.entry(kind)
            .map(|e| e.name.as_str())
            .ok_or(EcsError::UnknownKind(kind))
    }

    /// The kind registered under `name`.
    pub fn kind_of(&self, name: &str) -> Result<ComponentKind, EcsError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.kind)
            .ok_or_else(|| EcsError::UnknownName(name.to_string()))
    }

    /// The tag `kind` is written with.
    pub fn tag_of(&self, kind: ComponentKind) -> Result<WireTag, EcsError> {
        self.entry(kind)
            .map(|e| e.tag)
            .ok_or(EcsError::UnknownKind(kind))
    }

    /// The kind a component tagged `tag` belongs to.
    pub fn kind_of_tag(&self, tag: WireTag) -> Result<ComponentKind, EcsError> {
        self.entries
            .iter()
            .find(|e| e.tag == tag)
            .map(|e| e.kind)
            .ok_or(EcsError::UnknownWireTag(tag))
    }

    /// Copy every entry of `other` whose kind is not yet registered here.
    ///
    /// Returns the number of entries added.
    pub fn merge(&mut self, other: &TypeRegistry) -> usize {
        other
            .entries
            .iter()
            .filter(|e| self.register_with_tag(e.kind, e.name.clone(), e.tag))
            .count()
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// Write the registry section: entry count, then name and tag per entry.
    pub fn encode<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), EcsError> {
        let count = u32::try_from(self.entries.len()).map_err(|_| EcsError::LimitExceeded {
            limit: Limit::RegistryEntries,
            found: self.entries.len() as u64,
            max: u64::from(u32::MAX),
        })?;
        wire::write_u32(sink, count)?;
        for entry in &self.entries {
            wire::write_name(sink, &entry.name)?;
            wire::write_u32(sink, entry.tag)?;
        }
        Ok(())
    }

    /// Read a registry section into a fresh registry.
    ///
    /// The name identifies which kind an entry describes; the tag that
    /// follows it is what that kind's components carry in this stream.
    /// A name this build does not know is [`EcsError::UnknownName`].
    pub fn decode<R: Read + ?Sized>(
        source: &mut R,
        limits: &DecodeLimits,
    ) -> Result<Self, EcsError> {
        let count = wire::read_u32(source)?;
        limits.check(Limit::RegistryEntries, count)?;

        let mut registry = Self::new();
        for _ in 0..count {
            let name = wire::read_name(source, limits)?;
            let tag = wire::read_u32(source)?;
            let kind = ComponentKind::from_name(&name).ok_or(EcsError::UnknownName(name))?;
            if !registry.register_with_tag(kind, kind.name(), tag) {
                debug!(%kind, tag, "ignoring repeated registry entry");
            }
        }
        Ok(registry)
    }
}
