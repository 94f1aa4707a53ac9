/// What the encoder writes for `Padding` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingPolicy {
    /// Always emit zero bytes; the value is ignored.
    #[default]
    ZeroFill,
    /// Emit the value's bytes when present (length must match); zeros otherwise.
    Preserve,
}

/// Default cap on the bytes a single encode may produce (64 MiB).
pub const DEFAULT_MAX_ENCODE_SIZE: usize = 64 * 1024 * 1024;

/// Controls codec behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Padding encode policy. Default: [`PaddingPolicy::ZeroFill`].
    pub padding: PaddingPolicy,
    /// When false, [`crate::Layout::decode`] rejects input longer than the
    /// layout. Default: true.
    pub allow_trailing: bool,
    /// Largest layout [`crate::encode_with`] will allocate for.
    pub max_encode_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            padding: PaddingPolicy::ZeroFill,
            allow_trailing: true,
            max_encode_size: DEFAULT_MAX_ENCODE_SIZE,
        }
    }
}
