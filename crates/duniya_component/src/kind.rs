//! The closed set of component kinds and their persisted identity.
//!
//! A [`ComponentKind`] says what a component *is*. On disk it is never stored
//! as the enum discriminant: each kind has a fixed [`WireTag`] and a short
//! canonical name. Reordering the enum is harmless; changing a tag or name
//! breaks every saved scene. New kinds are appended with a fresh tag.

use serde::{Deserialize, Serialize};

/// The 32-bit integer a [`ComponentKind`] is written as.
pub type WireTag = u32;

/// What a component is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Position, rotation, scale.
    Transform,
    /// Vertex/index buffer handles.
    Mesh,
    /// Pixel data handle and dimensions.
    Texture,
    /// Surface colours and an optional texture reference.
    Material,
    /// Perspective projection parameters.
    Camera,
}

impl ComponentKind {
    /// Every kind, in tag order.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Transform,
        ComponentKind::Mesh,
        ComponentKind::Texture,
        ComponentKind::Material,
        ComponentKind::Camera,
    ];

    /// The canonical tag for this kind.
    #[must_use]
    pub const fn wire_tag(self) -> WireTag {
        match self {
            ComponentKind::Transform => 0x01,
            ComponentKind::Mesh => 0x02,
            ComponentKind::Texture => 0x03,
            ComponentKind::Material => 0x04,
            ComponentKind::Camera => 0x05,
        }
    }

    /// The canonical name persisted in a scene's registry section.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ComponentKind::Transform => "Transform",
            ComponentKind::Mesh => "Mesh",
            ComponentKind::Texture => "Texture",
            ComponentKind::Material => "Material",
            ComponentKind::Camera => "Camera",
        }
    }

    /// Look a kind up by its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Look a kind up by its canonical tag.
    #[must_use]
    pub fn from_wire_tag(tag: WireTag) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.wire_tag() == tag)
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_tags_and_names_are_unique() {
        let tags: HashSet<_> = ComponentKind::ALL.iter().map(|k| k.wire_tag()).collect();
        let names: HashSet<_> = ComponentKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(tags.len(), ComponentKind::ALL.len());
        assert_eq!(names.len(), ComponentKind::ALL.len());
    }

    #[test]
    fn test_lookup_round_trips() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_name(kind.name()), Some(kind));
            assert_eq!(ComponentKind::from_wire_tag(kind.wire_tag()), Some(kind));
        }
        assert_eq!(ComponentKind::from_name("transform"), None);
        assert_eq!(ComponentKind::from_wire_tag(0), None);
    }

    #[test]
    fn test_tags_are_frozen() {
        // Saved scenes depend on these exact values.
        assert_eq!(ComponentKind::Transform.wire_tag(), 1);
        assert_eq!(ComponentKind::Mesh.wire_tag(), 2);
        assert_eq!(ComponentKind::Texture.wire_tag(), 3);
        assert_eq!(ComponentKind::Material.wire_tag(), 4);
        assert_eq!(ComponentKind::Camera.wire_tag(), 5);
    }
}
