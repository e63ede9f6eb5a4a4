//! # duniya_scene
//!
//! Binary scene files for the Duniya engine.
//!
//! ```text
//! Scene          := Header Registry Entities
//! Header         := byte[4]:"DNYS" u32:version
//! Registry       := u32:entryCount (u32:nameLen byte[nameLen]:name u32:wireTag)*
//! Entities       := u32:entityCount (u32:id ComponentArray)*
//! ComponentArray := u32:componentCount (u32:wireTag ComponentPayload)*
//! ```
//!
//! All integers and floats are little-endian. Component payloads are the
//! fixed field layouts defined in `duniya_component`.
//!
//! This crate provides:
//!
//! - [`codec`]: [`SceneCodec`] encode/decode entry points.
//! - [`config`]: [`CodecConfig`] decode bounds.
//! - [`file`]: [`save_scene`] / [`load_scene`] helpers over paths.
//! - [`error`]: [`SceneError`].

pub mod codec;
pub mod config;
pub mod error;
pub mod file;

pub use codec::{SCENE_MAGIC, SCENE_VERSION, SceneCodec};
pub use config::CodecConfig;
pub use error::{SceneError, SceneSection};
pub use file::{load_scene, save_scene};
