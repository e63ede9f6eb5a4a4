//! Concrete component types.
//!
//! Each type has a fixed, pointer-free field layout. Buffers and pixel data
//! are not owned here: meshes and textures hold `u32` handles into the
//! renderer's resource bank, which the importer fills and the renderer
//! uploads.

use std::io::{Read, Write};

use duniya_math::{Mat4, Transform, Vec4};
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::error::EcsError;
use crate::kind::ComponentKind;
use crate::wire;

impl Component for Transform {
    const KIND: ComponentKind = ComponentKind::Transform;
    const PAYLOAD_SIZE: usize = 40;

    fn encode_fields(&self, sink: &mut dyn Write) -> Result<(), EcsError> {
        wire::write_vec3(sink, self.position)?;
        wire::write_quat(sink, self.rotation)?;
        wire::write_vec3(sink, self.scale)?;
        Ok(())
    }

    fn decode_fields(&mut self, source: &mut dyn Read) -> Result<(), EcsError> {
        self.position = wire::read_vec3(source)?;
        self.rotation = wire::read_quat(source)?;
        self.scale = wire::read_vec3(source)?;
        Ok(())
    }
}

/// How a mesh's index buffer is assembled into primitives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    /// Three indices per triangle.
    #[default]
    Triangles,
    /// Two indices per line segment.
    Lines,
    /// One index per point.
    Points,
}

impl Primitive {
    fn to_raw(self) -> u32 {
        match self {
            Primitive::Triangles => 0,
            Primitive::Lines => 1,
            Primitive::Points => 2,
        }
    }

    fn from_raw(value: u32) -> Result<Self, EcsError> {
        match value {
            0 => Ok(Primitive::Triangles),
            1 => Ok(Primitive::Lines),
            2 => Ok(Primitive::Points),
            _ => Err(EcsError::InvalidField {
                kind: ComponentKind::Mesh,
                field: "primitive",
                value,
            }),
        }
    }
}

/// Geometry reference: vertex and index buffers in the resource bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mesh {
    /// Resource handle of the interleaved vertex data.
    pub vertex_buffer: u32,
    /// Resource handle of the index data.
    pub index_buffer: u32,
    pub vertex_count: u32,
    pub index_count: u32,
    pub primitive: Primitive,
}

impl Mesh {
    /// Number of whole primitives the index buffer describes.
    #[must_use]
    pub fn primitive_count(&self) -> u32 {
        match self.primitive {
            Primitive::Triangles => self.index_count / 3,
            Primitive::Lines => self.index_count / 2,
            Primitive::Points => self.index_count,
        }
    }
}

impl Component for Mesh {
    const KIND: ComponentKind = ComponentKind::Mesh;
    const PAYLOAD_SIZE: usize = 20;

    fn encode_fields(&self, sink: &mut dyn Write) -> Result<(), EcsError> {
        wire::write_u32(sink, self.vertex_buffer)?;
        wire::write_u32(sink, self.index_buffer)?;
        wire::write_u32(sink, self.vertex_count)?;
        wire::write_u32(sink, self.index_count)?;
        wire::write_u32(sink, self.primitive.to_raw())?;
        Ok(())
    }

    fn decode_fields(&mut self, source: &mut dyn Read) -> Result<(), EcsError> {
        self.vertex_buffer = wire::read_u32(source)?;
        self.index_buffer = wire::read_u32(source)?;
        self.vertex_count = wire::read_u32(source)?;
        self.index_count = wire::read_u32(source)?;
        self.primitive = Primitive::from_raw(wire::read_u32(source)?)?;
        Ok(())
    }
}

/// Channel layout of a texture's pixel data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureFormat {
    /// Single red channel.
    R,
    Rgb,
    #[default]
    Rgba,
}

impl TextureFormat {
    /// Bytes per pixel.
    #[must_use]
    pub fn channels(self) -> u32 {
        match self {
            TextureFormat::R => 1,
            TextureFormat::Rgb => 3,
            TextureFormat::Rgba => 4,
        }
    }

    fn to_raw(self) -> u32 {
        match self {
            TextureFormat::R => 0,
            TextureFormat::Rgb => 1,
            TextureFormat::Rgba => 2,
        }
    }

    fn from_raw(value: u32) -> Result<Self, EcsError> {
        match value {
            0 => Ok(TextureFormat::R),
            1 => Ok(TextureFormat::Rgb),
            2 => Ok(TextureFormat::Rgba),
            _ => Err(EcsError::InvalidField {
                kind: ComponentKind::Texture,
                field: "format",
                value,
            }),
        }
    }
}

/// A 2D texture: dimensions, channel layout and the pixel data's handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    /// Resource handle of the pixel data.
    pub data: u32,
}

impl Texture {
    /// Size in bytes of the tightly packed pixel data.
    #[must_use]
    pub fn byte_len(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height) * u64::from(self.format.channels())
    }
}

impl Default for Texture {
    /// A single RGBA texel, the renderer's fallback texture.
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            format: TextureFormat::Rgba,
            data: 0,
        }
    }
}

impl Component for Texture {
    const KIND: ComponentKind = ComponentKind::Texture;
    const PAYLOAD_SIZE: usize = 16;

    fn encode_fields(&self, sink: &mut dyn Write) -> Result<(), EcsError> {
        wire::write_u32(sink, self.width)?;
        wire::write_u32(sink, self.height)?;
        wire::write_u32(sink, self.format.to_raw())?;
        wire::write_u32(sink, self.data)?;
        Ok(())
    }

    fn decode_fields(&mut self, source: &mut dyn Read) -> Result<(), EcsError> {
        self.width = wire::read_u32(source)?;
        self.height = wire::read_u32(source)?;
        self.format = TextureFormat::from_raw(wire::read_u32(source)?)?;
        self.data = wire::read_u32(source)?;
        Ok(())
    }
}

/// Phong surface parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
    /// Entity holding the [`Texture`] to sample, or [`Material::NO_TEXTURE`].
    pub texture: u32,
}

impl Material {
    /// Sentinel for an untextured material.
    pub const NO_TEXTURE: u32 = u32::MAX;

    /// The entity id of the texture this material samples, if any.
    #[must_use]
    pub fn texture_entity(&self) -> Option<u32> {
        (self.texture != Self::NO_TEXTURE).then_some(self.texture)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.1, 0.1, 0.1, 1.0),
            diffuse: Vec4::ONE,
            specular: Vec4::new(0.5, 0.5, 0.5, 1.0),
            shininess: 32.0,
            texture: Self::NO_TEXTURE,
        }
    }
}

impl Component for Material {
    const KIND: ComponentKind = ComponentKind::Material;
    const PAYLOAD_SIZE: usize = 56;

    fn encode_fields(&self, sink: &mut dyn Write) -> Result<(), EcsError> {
        wire::write_vec4(sink, self.ambient)?;
        wire::write_vec4(sink, self.diffuse)?;
        wire::write_vec4(sink, self.specular)?;
        wire::write_f32(sink, self.shininess)?;
        wire::write_u32(sink, self.texture)?;
        Ok(())
    }

    fn decode_fields(&mut self, source: &mut dyn Read) -> Result<(), EcsError> {
        self.ambient = wire::read_vec4(source)?;
        self.diffuse = wire::read_vec4(source)?;
        self.specular = wire::read_vec4(source)?;
        self.shininess = wire::read_f32(source)?;
        self.texture = wire::read_u32(source)?;
        Ok(())
    }
}

/// Perspective camera. Its view comes from the entity's [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// OpenGL-convention perspective projection.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Component for Camera {
    const KIND: ComponentKind = ComponentKind::Camera;
    const PAYLOAD_SIZE: usize = 16;

    fn encode_fields(&self, sink: &mut dyn Write) -> Result<(), EcsError> {
        wire::write_f32(sink, self.fov_y)?;
        wire::write_f32(sink, self.aspect)?;
        wire::write_f32(sink, self.near)?;
        wire::write_f32(sink, self.far)?;
        Ok(())
    }

    fn decode_fields(&mut self, source: &mut dyn Read) -> Result<(), EcsError> {
        self.fov_y = wire::read_f32(source)?;
        self.aspect = wire::read_f32(source)?;
        self.near = wire::read_f32(source)?;
        self.far = wire::read_f32(source)?;
        Ok(())
    }
}
