//! Scene-level error types.

use duniya_component::EcsError;

/// The part of a scene stream being read when decoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSection {
    /// Magic and version.
    Header,
    /// Type registry.
    Registry,
    /// Entity table.
    Entities,
    /// Bytes after the entity table.
    Trailer,
}

impl std::fmt::Display for SceneSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SceneSection::Header => "header",
            SceneSection::Registry => "registry",
            SceneSection::Entities => "entities",
            SceneSection::Trailer => "trailer",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while saving or loading a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The stream is truncated or malformed. No table was produced and the
    /// caller's registry is untouched.
    #[error("corrupt scene ({section}): {cause}")]
    CorruptScene {
        /// Section being read.
        section: SceneSection,
        /// The underlying failure, wrapped with entity/component positions.
        cause: EcsError,
    },

    /// The header carries a magic or format version this build cannot read.
    #[error(
        "unsupported scene format \"{}\" version {found} (supported: \"{}\" version {supported})",
        .magic.escape_ascii(),
        crate::codec::SCENE_MAGIC.escape_ascii()
    )]
    UnsupportedVersion {
        /// Magic read from the header.
        magic: [u8; 4],
        /// Version read from the header.
        found: u32,
        /// Version this build reads and writes.
        supported: u32,
    },

    /// The table or registry could not be written.
    #[error("failed to encode scene: {0}")]
    Encode(EcsError),

    /// The scene file could not be opened or created.
    #[error("scene file error: {0}")]
    Io(#[from] std::io::Error),
}

impl SceneError {
    pub(crate) fn corrupt(section: SceneSection) -> impl FnOnce(EcsError) -> Self {
        move |cause| SceneError::CorruptScene { section, cause }
    }

    /// The innermost component-store error, if this error carries one.
    #[must_use]
    pub fn root_cause(&self) -> Option<&EcsError> {
        match self {
            SceneError::CorruptScene { cause, .. } | SceneError::Encode(cause) => {
                Some(cause.root_cause())
            }
            _ => None,
        }
    }
}
