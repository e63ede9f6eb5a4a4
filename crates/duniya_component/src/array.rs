//! Per-entity component storage.
//!
//! A [`ComponentArray`] holds every component attached to one entity, at most
//! one per [`ComponentKind`]. Entries keep insertion order, so encoding the
//! same array always produces the same bytes.

use std::io::{Read, Write};

use tracing::warn;

use crate::component::Component;
use crate::erased::ErasedComponent;
use crate::error::{EcsError, Limit};
use crate::kind::ComponentKind;
use crate::registry::TypeRegistry;
use crate::wire::{self, DecodeLimits};

/// All the components attached to one entity.
#[derive(Debug, Clone, Default)]
pub struct ComponentArray {
    /// Live components in insertion order; kinds are unique.
    entries: Vec<ErasedComponent>,
}

impl ComponentArray {
    /// Create an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, kind: ComponentKind) -> Option<usize> {
        self.entries.iter().position(|c| c.kind() == kind)
    }

    /// Store `component` under `kind`.
    ///
    /// An existing component of the same kind is destroyed and replaced in
    /// place, keeping its position in iteration order. The component must be
    /// live and must actually be of `kind`.
    pub fn insert(
        &mut self,
        kind: ComponentKind,
        component: ErasedComponent,
    ) -> Result<&mut ErasedComponent, EcsError> {
        if component.kind() != kind {
            return Err(EcsError::KindMismatch {
                expected: kind,
                actual: component.kind(),
            });
        }
        if !component.is_live() {
            return Err(EcsError::NotCreated(kind));
        }

        let index = match self.position(kind) {
            Some(index) => {
                let previous = &mut self.entries[index];
                previous.release();
                *previous = component;
                index
            }
            None => {
                self.entries.push(component);
                self.entries.len() - 1
            }
        };
        Ok(&mut self.entries[index])
    }

    /// Store a concrete value, replacing any component of the same kind.
    pub fn insert_value<T: Component>(&mut self, value: T) -> Result<&mut T, EcsError> {
        self.insert(T::KIND, ErasedComponent::from_value(value))?
            .downcast_mut::<T>()
    }

    /// The component of `kind`, if attached.
    #[must_use]
    pub fn get(&self, kind: ComponentKind) -> Option<&ErasedComponent> {
        self.entries.iter().find(|c| c.kind() == kind)
    }

    /// The component of `kind`, mutably.
    #[must_use]
    pub fn get_mut(&mut self, kind: ComponentKind) -> Option<&mut ErasedComponent> {
        self.entries.iter_mut().find(|c| c.kind() == kind)
    }

    /// The attached value of type `T`, if any.
    #[must_use]
    pub fn get_value<T: Component>(&self) -> Option<&T> {
        self.get(T::KIND)?.downcast_ref::<T>().ok()
    }

    /// The attached value of type `T`, mutably.
    #[must_use]
    pub fn get_value_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.get_mut(T::KIND)?.downcast_mut::<T>().ok()
    }

    /// Returns `true` if a component of `kind` is attached.
    #[must_use]
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.position(kind).is_some()
    }

    /// Destroy and detach the component of `kind`.
    ///
    /// Returns `true` if one was attached.
    pub fn remove(&mut self, kind: ComponentKind) -> bool {
        let Some(index) = self.position(kind) else {
            return false;
        };
        self.entries.remove(index).release();
        true
    }

    /// Destroy and detach every component. Returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        for mut component in self.entries.drain(..) {
            component.release();
        }
        count
    }

    /// Number of attached components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attached kinds in insertion order.
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.entries.iter().map(ErasedComponent::kind)
    }

    /// Attached components in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ErasedComponent> {
        self.entries.iter()
    }

    /// Write the component count, then a tag and payload per component.
    ///
    /// Tags come from `registry`; a kind it does not know is
    /// [`EcsError::UnknownKind`].
    pub fn encode_all(&self, sink: &mut dyn Write, registry: &TypeRegistry) -> Result<(), EcsError> {
        // At most one entry per kind, so the count always fits.
        wire::write_u32(sink, self.entries.len() as u32)?;
        for component in &self.entries {
            wire::write_u32(sink, registry.tag_of(component.kind())?)?;
            component.encode(sink)?;
        }
        Ok(())
    }

    /// Read an array written by [`ComponentArray::encode_all`].
    ///
    /// Each tag is resolved against `registry`, the registry the stream was
    /// written with. Failures are wrapped with the index of the component
    /// record they occurred in.
    pub fn decode_all(
        source: &mut dyn Read,
        registry: &TypeRegistry,
        limits: &DecodeLimits,
    ) -> Result<Self, EcsError> {
        let count = wire::read_u32(source)?;
        limits.check(Limit::ComponentsPerEntity, count)?;

        let mut array = Self::new();
        for index in 0..count {
            let component =
                decode_component(source, registry).map_err(|e| e.in_component(index))?;
            let kind = component.kind();
            if array.contains(kind) {
                warn!(%kind, index, "repeated component kind in stream, keeping the last");
            }
            array.insert(kind, component)?;
        }
        Ok(array)
    }
}

fn decode_component(
    source: &mut dyn Read,
    registry: &TypeRegistry,
) -> Result<ErasedComponent, EcsError> {
    let tag = wire::read_u32(source)?;
    let kind = registry.kind_of_tag(tag)?;
    let mut component = ErasedComponent::new(kind);
    component.create()?;
    component.decode(source)?;
    Ok(component)
}

impl PartialEq for ComponentArray {
    /// Two arrays are equal when they hold equal components of the same
    /// kinds, regardless of insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|c| other.get(c.kind()) == Some(c))
    }
}

impl Drop for ComponentArray {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use duniya_math::{Transform, Vec3};

    use super::*;
    use crate::components::{Camera, Mesh, Texture};

    #[test]
    fn test_insert_and_get() {
        let mut array = ComponentArray::new();
        array.insert_value(Mesh::default()).unwrap();
        array.insert_value(Texture::default()).unwrap();
        assert_eq!(array.len(), 2);
        assert!(array.contains(ComponentKind::Mesh));
        assert!(array.get(ComponentKind::Camera).is_none());
        assert_eq!(array.get_value::<Texture>(), Some(&Texture::default()));
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut array = ComponentArray::new();
        array.insert_value(Transform::default()).unwrap();
        array.insert_value(Mesh::default()).unwrap();
        array
            .insert_value(Transform::from_position(Vec3::Y))
            .unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(
            array.kinds().collect::<Vec<_>>(),
            [ComponentKind::Transform, ComponentKind::Mesh]
        );
        assert_eq!(array.get_value::<Transform>().unwrap().position, Vec3::Y);
    }

    #[test]
    fn test_insert_returns_stored_component() {
        let mut array = ComponentArray::new();
        let stored = array
            .insert(ComponentKind::Camera, ErasedComponent::from_value(Camera::default()))
            .unwrap();
        stored.downcast_mut::<Camera>().unwrap().far = 50.0;
        assert_eq!(array.get_value::<Camera>().unwrap().far, 50.0);
    }

    #[test]
    fn test_insert_rejects_wrong_kind() {
        let mut array = ComponentArray::new();
        let err = array
            .insert(ComponentKind::Mesh, ErasedComponent::from_value(Texture::default()))
            .unwrap_err();
        assert!(matches!(
            err,
            EcsError::KindMismatch {
                expected: ComponentKind::Mesh,
                actual: ComponentKind::Texture
            }
        ));
        assert!(array.is_empty());
    }

    #[test]
    fn test_insert_rejects_uncreated() {
        let mut array = ComponentArray::new();
        let err = array
            .insert(ComponentKind::Mesh, ErasedComponent::new(ComponentKind::Mesh))
            .unwrap_err();
        assert!(matches!(err, EcsError::NotCreated(ComponentKind::Mesh)));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut array = ComponentArray::new();
        array.insert_value(Mesh::default()).unwrap();
        array.insert_value(Camera::default()).unwrap();
        assert!(array.remove(ComponentKind::Mesh));
        assert!(!array.remove(ComponentKind::Mesh));
        assert_eq!(array.clear(), 1);
        assert!(array.is_empty());
    }

    #[test]
    fn test_remove_and_clear_after_external_destroy() {
        let mut array = ComponentArray::new();
        array.insert_value(Mesh::default()).unwrap();
        array.insert_value(Camera::default()).unwrap();
        array.get_mut(ComponentKind::Mesh).unwrap().destroy().unwrap();
        array.get_mut(ComponentKind::Camera).unwrap().destroy().unwrap();

        assert!(array.remove(ComponentKind::Mesh));
        array.insert_value(Mesh::default()).unwrap();
        assert_eq!(array.clear(), 2);
        assert!(array.is_empty());
    }

    #[test]
    fn test_equality_ignores_order() {
        let mut a = ComponentArray::new();
        a.insert_value(Mesh::default()).unwrap();
        a.insert_value(Camera::default()).unwrap();
        let mut b = ComponentArray::new();
        b.insert_value(Camera::default()).unwrap();
        b.insert_value(Mesh::default()).unwrap();
        assert_eq!(a, b);

        b.get_value_mut::<Camera>().unwrap().near = 1.0;
        assert_ne!(a, b);
    }

    #[test]
    fn test_encode_layout() {
        let mut array = ComponentArray::new();
        array.insert_value(Texture::default()).unwrap();
        let mut buf = Vec::new();
        array.encode_all(&mut buf, &TypeRegistry::builtin()).unwrap();
        assert_eq!(buf.len(), 4 + 4 + Texture::PAYLOAD_SIZE);
        assert_eq!(&buf[0..4], &1u32.to_le_bytes());
        assert_eq!(&buf[4..8], &ComponentKind::Texture.wire_tag().to_le_bytes());
    }

    #[test]
    fn test_encode_requires_registered_kind() {
        let mut array = ComponentArray::new();
        array.insert_value(Camera::default()).unwrap();
        let mut buf = Vec::new();
        let err = array.encode_all(&mut buf, &TypeRegistry::new()).unwrap_err();
        assert!(matches!(err, EcsError::UnknownKind(ComponentKind::Camera)));
    }

    #[test]
    fn test_decode_round_trip() {
        let registry = TypeRegistry::builtin();
        let mut array = ComponentArray::new();
        array
            .insert_value(Transform::from_position(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();
        array.insert_value(Mesh {
            vertex_count: 24,
            index_count: 36,
            ..Mesh::default()
        }).unwrap();

        let mut buf = Vec::new();
        array.encode_all(&mut buf, &registry).unwrap();
        let decoded =
            ComponentArray::decode_all(&mut buf.as_slice(), &registry, &DecodeLimits::default())
                .unwrap();
        assert_eq!(decoded, array);
        assert_eq!(decoded.kinds().collect::<Vec<_>>(), array.kinds().collect::<Vec<_>>());
    }

    #[test]
    fn test_decode_unknown_tag_reports_index() {
        let mut buf = Vec::new();
        wire::write_u32(&mut buf, 1).unwrap();
        wire::write_u32(&mut buf, 0xdead).unwrap();
        let err = ComponentArray::decode_all(
            &mut buf.as_slice(),
            &TypeRegistry::builtin(),
            &DecodeLimits::default(),
        )
        .unwrap_err();
        assert!(matches!(
            &err,
            EcsError::InComponent { index: 0, cause } if matches!(**cause, EcsError::UnknownWireTag(0xdead))
        ));
    }

    #[test]
    fn test_decode_respects_component_limit() {
        let mut buf = Vec::new();
        wire::write_u32(&mut buf, 1000).unwrap();
        let limits = DecodeLimits {
            max_components_per_entity: 8,
            ..DecodeLimits::default()
        };
        let err = ComponentArray::decode_all(&mut buf.as_slice(), &TypeRegistry::builtin(), &limits)
            .unwrap_err();
        assert!(matches!(
            err,
            EcsError::LimitExceeded {
                limit: Limit::ComponentsPerEntity,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_repeated_kind_keeps_last() {
        let registry = TypeRegistry::builtin();
        let mut buf = Vec::new();
        wire::write_u32(&mut buf, 2).unwrap();
        for far in [10.0, 20.0] {
            wire::write_u32(&mut buf, ComponentKind::Camera.wire_tag()).unwrap();
            ErasedComponent::from_value(Camera {
                far,
                ..Camera::default()
            })
            .encode(&mut buf)
            .unwrap();
        }

        let decoded =
            ComponentArray::decode_all(&mut buf.as_slice(), &registry, &DecodeLimits::default())
                .unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.get_value::<Camera>().unwrap().far, 20.0);

        // The earlier record is gone, so re-encoding is shorter.
        let mut reencoded = Vec::new();
        decoded.encode_all(&mut reencoded, &registry).unwrap();
        assert_eq!(reencoded.len(), 4 + 4 + Camera::PAYLOAD_SIZE);
        assert_ne!(reencoded, buf);
    }
}
