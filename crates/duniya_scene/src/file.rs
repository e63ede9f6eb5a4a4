//! Scene files on disk.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use duniya_component::{EntityTable, TypeRegistry};
use tracing::info;

use crate::codec::SceneCodec;
use crate::error::SceneError;

/// Encode `table` with `registry` into a new file at `path`, replacing any
/// existing file.
///
/// # Errors
///
/// Returns [`SceneError::Io`] if the file cannot be created and
/// [`SceneError::Encode`] if writing fails.
pub fn save_scene(
    codec: &SceneCodec,
    path: &Path,
    table: &EntityTable,
    registry: &TypeRegistry,
) -> Result<(), SceneError> {
    let mut writer = BufWriter::new(File::create(path)?);
    codec.encode_scene(table, registry, &mut writer)?;
    writer
        .flush()
        .map_err(|e| SceneError::Encode(e.into()))?;
    info!(
        path = %path.display(),
        entities = table.len(),
        components = table.component_count(),
        "saved scene"
    );
    Ok(())
}

/// Decode the scene file at `path`, merging its registry into `registry`.
///
/// The whole file must be consumed; trailing bytes are handled according to
/// the codec's configuration.
///
/// # Errors
///
/// Returns [`SceneError::Io`] if the file cannot be opened, otherwise see
/// [`SceneCodec::decode_from_slice`].
pub fn load_scene(
    codec: &SceneCodec,
    path: &Path,
    registry: &mut TypeRegistry,
) -> Result<EntityTable, SceneError> {
    let table = if codec.config().reject_trailing_bytes {
        let bytes = std::fs::read(path)?;
        codec.decode_from_slice(&bytes, registry)?
    } else {
        let mut reader = BufReader::new(File::open(path)?);
        codec.decode_scene(&mut reader, registry)?
    };
    info!(
        path = %path.display(),
        entities = table.len(),
        components = table.component_count(),
        "loaded scene"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use duniya_component::{Camera, ComponentKind, EntityId, Mesh};

    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.scene");

        let mut table = EntityTable::new();
        let e = table.push_default();
        let array = table.get_mut(e).unwrap();
        array.insert_value(Mesh::default()).unwrap();
        array.insert_value(Camera::default()).unwrap();

        let codec = SceneCodec::new();
        save_scene(&codec, &path, &table, &TypeRegistry::builtin()).unwrap();

        let mut registry = TypeRegistry::new();
        let loaded = load_scene(&codec, &path, &mut registry).unwrap();
        assert_eq!(loaded, table);
        assert_eq!(
            loaded.get(EntityId(0)).unwrap().kinds().collect::<Vec<_>>(),
            [ComponentKind::Mesh, ComponentKind::Camera]
        );
        assert_eq!(registry.len(), ComponentKind::ALL.len());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scene(
            &SceneCodec::new(),
            &dir.path().join("missing.scene"),
            &mut TypeRegistry::new(),
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }

    #[test]
    fn test_load_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.scene");
        std::fs::write(&path, b"DNYS").unwrap();
        let err = load_scene(&SceneCodec::new(), &path, &mut TypeRegistry::new()).unwrap_err();
        assert!(matches!(err, SceneError::CorruptScene { .. }));
    }
}
