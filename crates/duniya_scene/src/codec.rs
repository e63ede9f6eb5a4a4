//! Scene encode/decode entry points.
//!
//! Encoding writes the header, the *whole* registry (not only the kinds the
//! table uses), then the entity table. Decoding reads the stream's own
//! registry first and resolves every component tag against it, so a file
//! written with different tag assignments still loads. The stream's registry
//! is merged into the caller's only after the entire scene decoded.

use std::io::{self, Read, Write};

use duniya_component::{EcsError, EntityTable, TypeRegistry, wire};
use tracing::{debug, warn};

use crate::config::CodecConfig;
use crate::error::{SceneError, SceneSection};

/// First four bytes of every scene stream.
pub const SCENE_MAGIC: [u8; 4] = *b"DNYS";

/// The format version this build reads and writes.
pub const SCENE_VERSION: u32 = 1;

/// Converts an [`EntityTable`] to and from the binary scene format.
///
/// The codec is stateless apart from its configuration. Callers must hold
/// exclusive access to the table for the duration of a call.
#[derive(Debug, Clone, Default)]
pub struct SceneCodec {
    config: CodecConfig,
}

impl SceneCodec {
    /// A codec with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Write `table` and all of `registry` to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Encode`] if the sink fails or the table holds a
    /// kind missing from `registry`.
    pub fn encode_scene(
        &self,
        table: &EntityTable,
        registry: &TypeRegistry,
        sink: &mut dyn Write,
    ) -> Result<(), SceneError> {
        encode_header(sink).map_err(|e| SceneError::Encode(e.into()))?;
        registry.encode(sink).map_err(SceneError::Encode)?;
        table.encode_all(sink, registry).map_err(SceneError::Encode)?;
        debug!(
            entities = table.len(),
            registry = registry.len(),
            "encoded scene"
        );
        Ok(())
    }

    /// Encode into a fresh buffer.
    ///
    /// # Errors
    ///
    /// See [`SceneCodec::encode_scene`].
    pub fn encode_to_vec(
        &self,
        table: &EntityTable,
        registry: &TypeRegistry,
    ) -> Result<Vec<u8>, SceneError> {
        let mut buf = Vec::new();
        self.encode_scene(table, registry, &mut buf)?;
        Ok(buf)
    }

    /// Read a scene from `source`.
    ///
    /// On success the stream's registry entries are merged into `registry`
    /// (first registration wins). On failure nothing is returned and
    /// `registry` is unchanged; the source is left at an unspecified
    /// position and must not be read again.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnsupportedVersion`] when the header's magic is
    /// not [`SCENE_MAGIC`] or its version is not [`SCENE_VERSION`], and
    /// [`SceneError::CorruptScene`] for anything else wrong with the stream.
    pub fn decode_scene(
        &self,
        source: &mut dyn Read,
        registry: &mut TypeRegistry,
    ) -> Result<EntityTable, SceneError> {
        let result = self.decode_parts(source);
        match result {
            Ok((stream_registry, table)) => {
                let added = registry.merge(&stream_registry);
                debug!(
                    entities = table.len(),
                    components = table.component_count(),
                    registry_added = added,
                    "decoded scene"
                );
                Ok(table)
            }
            Err(e) => {
                warn!(error = %e, "rejected scene stream");
                Err(e)
            }
        }
    }

    /// Decode from a complete in-memory scene.
    ///
    /// # Errors
    ///
    /// See [`SceneCodec::decode_scene`]. Additionally, when
    /// [`CodecConfig::reject_trailing_bytes`] is set, bytes after the entity
    /// section are [`SceneError::CorruptScene`].
    pub fn decode_from_slice(
        &self,
        bytes: &[u8],
        registry: &mut TypeRegistry,
    ) -> Result<EntityTable, SceneError> {
        let mut cursor = bytes;
        let mut staged = registry.clone();
        let table = self.decode_scene(&mut cursor, &mut staged)?;
        if self.config.reject_trailing_bytes && !cursor.is_empty() {
            let err = SceneError::CorruptScene {
                section: SceneSection::Trailer,
                cause: EcsError::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{} unexpected bytes after scene", cursor.len()),
                )),
            };
            warn!(error = %err, "rejected scene stream");
            return Err(err);
        }
        *registry = staged;
        Ok(table)
    }

    fn decode_parts(
        &self,
        source: &mut dyn Read,
    ) -> Result<(TypeRegistry, EntityTable), SceneError> {
        let limits = &self.config.limits;
        decode_header(source)?;
        let stream_registry = TypeRegistry::decode(source, limits)
            .map_err(SceneError::corrupt(SceneSection::Registry))?;
        let table = EntityTable::decode_all(source, &stream_registry, limits)
            .map_err(SceneError::corrupt(SceneSection::Entities))?;
        Ok((stream_registry, table))
    }
}

fn encode_header(sink: &mut dyn Write) -> io::Result<()> {
    sink.write_all(&SCENE_MAGIC)?;
    wire::write_u32(sink, SCENE_VERSION)
}

fn decode_header(source: &mut dyn Read) -> Result<(), SceneError> {
    let mut header = [0u8; 8];
    source
        .read_exact(&mut header)
        .map_err(|e| SceneError::CorruptScene {
            section: SceneSection::Header,
            cause: e.into(),
        })?;
    let [m0, m1, m2, m3, v0, v1, v2, v3] = header;
    let magic = [m0, m1, m2, m3];
    let version = u32::from_le_bytes([v0, v1, v2, v3]);
    if magic != SCENE_MAGIC || version != SCENE_VERSION {
        return Err(SceneError::UnsupportedVersion {
            magic,
            found: version,
            supported: SCENE_VERSION,
        });
    }
    Ok(())
}
