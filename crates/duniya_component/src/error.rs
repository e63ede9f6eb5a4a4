//! Component-store error types.

use crate::entity::EntityId;
use crate::kind::{ComponentKind, WireTag};

/// Which decode bound was exceeded. See [`EcsError::LimitExceeded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Number of entities in one scene.
    Entities,
    /// Number of components attached to one entity.
    ComponentsPerEntity,
    /// Number of entries in a registry section.
    RegistryEntries,
    /// Byte length of a registry name.
    NameLength,
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Limit::Entities => "entity count",
            Limit::ComponentsPerEntity => "components per entity",
            Limit::RegistryEntries => "registry entries",
            Limit::NameLength => "name length",
        };
        f.write_str(name)
    }
}

/// Errors raised by the registry, component lifecycle, and table codecs.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// The kind has no registry entry.
    #[error("component kind {0} is not registered")]
    UnknownKind(ComponentKind),

    /// No kind is known under this name.
    #[error("no component kind named {0:?}")]
    UnknownName(String),

    /// The component was accessed before `create()`.
    #[error("{0} component accessed before create()")]
    NotCreated(ComponentKind),

    /// `create()` was called on a component that already holds a value.
    #[error("{0} component created twice")]
    AlreadyCreated(ComponentKind),

    /// `destroy()` was called on a component that holds no value.
    #[error("{0} component destroyed twice")]
    AlreadyDestroyed(ComponentKind),

    /// A component was filed under a kind other than its own.
    #[error("component of kind {actual} inserted under {expected}")]
    KindMismatch {
        /// The key the caller supplied.
        expected: ComponentKind,
        /// The kind the component actually holds.
        actual: ComponentKind,
    },

    /// A component entry carried a tag absent from the registry.
    #[error("unknown wire tag {0}")]
    UnknownWireTag(WireTag),

    /// An entity id past the end of the table.
    #[error("{id} out of range for table of {len} entities")]
    OutOfRange {
        /// The requested id.
        id: EntityId,
        /// Number of slots in the table.
        len: usize,
    },

    /// A decoded entity id was past the declared count or seen twice.
    #[error("entity id {id} is duplicated or outside declared count {count}")]
    DuplicateOrOutOfRangeId {
        /// The id read from the stream.
        id: u32,
        /// The entity count declared by the stream.
        count: u32,
    },

    /// An enumerated field held a value with no meaning.
    #[error("invalid {kind}.{field} value {value}")]
    InvalidField {
        /// Kind of the component being decoded.
        kind: ComponentKind,
        /// Field name.
        field: &'static str,
        /// The raw value read.
        value: u32,
    },

    /// A decoded count exceeded the configured bound.
    #[error("{limit} {found} exceeds limit {max}")]
    LimitExceeded {
        /// Which bound.
        limit: Limit,
        /// The value read from the stream.
        found: u64,
        /// The configured maximum.
        max: u64,
    },

    /// Failure reading or writing the underlying stream, including truncation.
    #[error("stream error: {0}")]
    Io(#[from] std::io::Error),

    /// Decode failure inside entity `index`.
    #[error("entity {index}: {cause}")]
    InEntity {
        /// Position of the entity record in the stream.
        index: u32,
        /// The underlying failure.
        cause: Box<EcsError>,
    },

    /// Decode failure inside component `index` of the enclosing entity.
    #[error("component {index}: {cause}")]
    InComponent {
        /// Position of the component record within its entity.
        index: u32,
        /// The underlying failure.
        cause: Box<EcsError>,
    },
}

impl EcsError {
    /// Wrap `self` with the entity record it occurred in.
    #[must_use]
    pub fn in_entity(self, index: u32) -> Self {
        EcsError::InEntity {
            index,
            cause: Box::new(self),
        }
    }

    /// Wrap `self` with the component record it occurred in.
    #[must_use]
    pub fn in_component(self, index: u32) -> Self {
        EcsError::InComponent {
            index,
            cause: Box::new(self),
        }
    }

    /// The innermost error, with all location wrappers removed.
    #[must_use]
    pub fn root_cause(&self) -> &EcsError {
        match self {
            EcsError::InEntity { cause, .. } | EcsError::InComponent { cause, .. } => {
                cause.root_cause()
            }
            other => other,
        }
    }

    /// Returns `true` if the stream ended before a complete value was read.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(
            self.root_cause(),
            EcsError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_wrappers_render_path() {
        let err = EcsError::UnknownWireTag(99).in_component(1).in_entity(3);
        assert_eq!(err.to_string(), "entity 3: component 1: unknown wire tag 99");
        assert!(matches!(err.root_cause(), EcsError::UnknownWireTag(99)));
    }

    #[test]
    fn test_location_path_is_not_repeated_in_source_chain() {
        let err = EcsError::UnknownWireTag(99).in_component(1).in_entity(3);
        assert!(std::error::Error::source(&err).is_none());
        assert_eq!(err.to_string().matches("unknown wire tag 99").count(), 1);
    }

    #[test]
    fn test_truncation_detected_through_wrappers() {
        let eof = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        let err = EcsError::from(eof).in_entity(0);
        assert!(err.is_truncation());
        assert!(!EcsError::UnknownWireTag(1).is_truncation());
    }
}
