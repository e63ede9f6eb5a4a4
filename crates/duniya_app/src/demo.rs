//! Sample scene used by `scene_tool demo`.
//!
//! Stands in for what the asset importer produces from a small model file: a
//! camera looking at a textured cube.

use duniya_component::{
    Camera, EcsError, EntityTable, Material, Mesh, Primitive, Texture, TextureFormat, Transform,
};
use duniya_math::{Quat, Vec3, Vec4};

/// Resource handles the renderer's bank would hand out for the cube.
const CUBE_VERTICES: u32 = 1;
const CUBE_INDICES: u32 = 2;
const CRATE_PIXELS: u32 = 3;

/// Entity 0: camera. Entity 1: crate texture. Entity 2: textured cube.
pub fn build_scene() -> Result<EntityTable, EcsError> {
    let mut table = EntityTable::new();

    let camera = table.push_default();
    let components = table.get_mut(camera)?;
    components.insert_value(Transform::from_position(Vec3::new(0.0, 1.5, 5.0)))?;
    components.insert_value(Camera::default())?;

    let texture = table.push_default();
    table.get_mut(texture)?.insert_value(Texture {
        width: 64,
        height: 64,
        format: TextureFormat::Rgba,
        data: CRATE_PIXELS,
    })?;

    let cube = table.push_default();
    let components = table.get_mut(cube)?;
    components.insert_value(Transform {
        position: Vec3::ZERO,
        rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
        scale: Vec3::ONE,
    })?;
    components.insert_value(Mesh {
        vertex_buffer: CUBE_VERTICES,
        index_buffer: CUBE_INDICES,
        vertex_count: 24,
        index_count: 36,
        primitive: Primitive::Triangles,
    })?;
    components.insert_value(Material {
        diffuse: Vec4::new(0.8, 0.6, 0.4, 1.0),
        texture: texture.id(),
        ..Material::default()
    })?;

    Ok(table)
}
