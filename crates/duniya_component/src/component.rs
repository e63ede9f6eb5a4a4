//! Core [`Component`] trait and the per-kind vtable.
//!
//! Every concrete component type implements [`Component`]: a fixed kind, a
//! default value, and a fixed-size field layout on the wire. The blanket
//! [`ComponentValue`] impl turns any `Component` into the object-safe
//! interface [`ErasedComponent`](crate::ErasedComponent) stores, and
//! [`ComponentMeta`] carries what the store needs to build one from a kind
//! alone.
//!
//! The set of component types is closed: [`ComponentKind::meta`] is the one
//! dispatch table from kind to implementation, used when decoding.

use std::any::Any;
use std::fmt;
use std::io::{Read, Write};

use crate::components::{Camera, Material, Mesh, Texture};
use crate::error::EcsError;
use crate::kind::ComponentKind;
use duniya_math::Transform;

/// The core component trait.
///
/// # Examples
///
/// ```rust
/// use std::io::{Read, Write};
/// use duniya_component::{wire, Component, ComponentKind, EcsError};
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct Exposure(f32);
///
/// impl Component for Exposure {
///     const KIND: ComponentKind = ComponentKind::Camera;
///     const PAYLOAD_SIZE: usize = 4;
///
///     fn encode_fields(&self, sink: &mut dyn Write) -> Result<(), EcsError> {
///         Ok(wire::write_f32(sink, self.0)?)
///     }
///
///     fn decode_fields(&mut self, source: &mut dyn Read) -> Result<(), EcsError> {
///         self.0 = wire::read_f32(source)?;
///         Ok(())
///     }
/// }
/// ```
pub trait Component: Default + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The kind this type is filed under.
    const KIND: ComponentKind;

    /// Exact number of bytes [`Component::encode_fields`] writes.
    const PAYLOAD_SIZE: usize;

    /// Write every field in declaration order.
    fn encode_fields(&self, sink: &mut dyn Write) -> Result<(), EcsError>;

    /// Overwrite every field from the stream.
    fn decode_fields(&mut self, source: &mut dyn Read) -> Result<(), EcsError>;

    /// Returns the [`ComponentMeta`] descriptor for this component type.
    fn meta() -> ComponentMeta {
        ComponentMeta {
            kind: Self::KIND,
            payload_size: Self::PAYLOAD_SIZE,
            create_fn: || -> Box<dyn ComponentValue> { Box::new(Self::default()) },
        }
    }
}

/// Object-safe view of a live component value.
///
/// Implemented for every [`Component`]; never implemented by hand.
pub trait ComponentValue: Any + fmt::Debug + Send + Sync {
    /// Kind of the concrete value.
    fn kind(&self) -> ComponentKind;
    /// Write the fixed-layout payload.
    fn encode(&self, sink: &mut dyn Write) -> Result<(), EcsError>;
    /// Read the fixed-layout payload over the current value.
    fn decode(&mut self, source: &mut dyn Read) -> Result<(), EcsError>;
    /// Field-wise equality with another erased value of any kind.
    fn eq_value(&self, other: &dyn ComponentValue) -> bool;
    /// Deep copy.
    fn clone_value(&self) -> Box<dyn ComponentValue>;
    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;
    /// Mutable upcast for downcasting to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentValue for T {
    fn kind(&self) -> ComponentKind {
        T::KIND
    }

    fn encode(&self, sink: &mut dyn Write) -> Result<(), EcsError> {
        self.encode_fields(sink)
    }

    fn decode(&mut self, source: &mut dyn Read) -> Result<(), EcsError> {
        self.decode_fields(source)
    }

    fn eq_value(&self, other: &dyn ComponentValue) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }

    fn clone_value(&self) -> Box<dyn ComponentValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Metadata about a component type, used for type-erased construction.
#[derive(Debug, Clone, Copy)]
pub struct ComponentMeta {
    /// The kind described.
    pub kind: ComponentKind,
    /// Bytes one encoded payload occupies.
    pub payload_size: usize,
    /// Allocate a default-initialised value.
    pub create_fn: fn() -> Box<dyn ComponentValue>,
}

impl ComponentKind {
    /// The vtable of the concrete type implementing this kind.
    #[must_use]
    pub fn meta(self) -> ComponentMeta {
        match self {
            ComponentKind::Transform => Transform::meta(),
            ComponentKind::Mesh => Mesh::meta(),
            ComponentKind::Texture => Texture::meta(),
            ComponentKind::Material => Material::meta(),
            ComponentKind::Camera => Camera::meta(),
        }
    }
}
