/// Controls schema loading limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum number of schemas loaded from a directory.
    pub max_schemas_from_directory: usize,
    /// Maximum bytes allowed per schema file.
    pub max_schema_file_size: usize,
    /// Maximum composite nesting depth accepted at registration.
    pub max_depth: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_schemas_from_directory: 256,
            max_schema_file_size: 256 * 1024,
            max_depth: 32,
        }
    }
}
