//! Codec configuration.

use duniya_component::wire::DecodeLimits;

/// Configuration for a [`SceneCodec`](crate::SceneCodec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Bounds on counts and lengths read from the stream.
    pub limits: DecodeLimits,
    /// Whether [`SceneCodec::decode_from_slice`](crate::SceneCodec::decode_from_slice)
    /// rejects bytes left over after the entity section.
    pub reject_trailing_bytes: bool,
}

impl CodecConfig {
    /// Override the decode bounds.
    #[must_use]
    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Accept slices that carry data after the scene.
    #[must_use]
    pub fn allow_trailing_bytes(mut self) -> Self {
        self.reject_trailing_bytes = false;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            limits: DecodeLimits::default(),
            reject_trailing_bytes: true,
        }
    }
}
