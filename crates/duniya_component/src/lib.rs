//! # duniya_component
//!
//! The "C" in ECS: what a component is, how an entity owns its components
//! behind a uniform erased interface, and how both are written to bytes.
//!
//! This crate provides:
//!
//! - [`ComponentKind`] and [`WireTag`]: the closed set of component kinds and
//!   the integer each one is persisted as.
//! - [`TypeRegistry`]: kind ↔ name ↔ tag table shared by encode and decode.
//! - [`Component`] trait and [`ComponentMeta`]: per-kind vtable.
//! - [`ErasedComponent`]: one owned component value with lifecycle checks.
//! - [`ComponentArray`]: every component attached to one entity.
//! - [`EntityTable`]: dense, id-indexed store of all component arrays.
//! - [`wire`]: little-endian primitive readers and writers.

pub mod array;
pub mod component;
pub mod components;
pub mod entity;
pub mod erased;
pub mod error;
pub mod kind;
pub mod registry;
pub mod wire;

pub use array::ComponentArray;
pub use component::{Component, ComponentMeta, ComponentValue};
pub use components::{Camera, Material, Mesh, Primitive, Texture, TextureFormat};
pub use duniya_math::Transform;
pub use entity::{EntityId, EntityTable};
pub use erased::ErasedComponent;
pub use error::{EcsError, Limit};
pub use kind::{ComponentKind, WireTag};
pub use registry::{RegistryEntry, TypeRegistry};
