//! Parser-wide configuration.

/// Options that affect how tolerant parsing is of input the format's
/// documented history doesn't fully account for.
#[derive(Debug, Clone, Copy)]
pub struct ParserConfig {
    /// When `true` (the default), an `imap` version code absent from the
    /// known [`DIRECTOR_VERSIONS`](crate::resources::imap::DIRECTOR_VERSIONS)
    /// table is a hard error. When `false`, it is accepted as
    /// `DirectorVersion::Unknown` so that files produced by a future,
    /// undocumented Director release can still be walked.
    pub strict_director_version: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strict_director_version: true,
        }
    }
}
