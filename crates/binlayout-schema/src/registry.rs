use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::builtin;
use crate::config::RegistryConfig;
use crate::descriptor::Descriptor;
use crate::error::{Result, SchemaError};
use crate::notation::Notation;

/// Suffix of schema files picked up by [`SchemaRegistry::from_directory`].
pub const SCHEMA_FILE_SUFFIX: &str = ".layout.json";

/// Name-keyed registry of schema descriptors.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Descriptor>>,
    config: RegistryConfig,
}

impl SchemaRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            schemas: HashMap::new(),
            config,
        }
    }

    /// Create a registry holding the built-in schemas (see [`builtin`]).
    pub fn with_builtins() -> Result<Self> {
        Self::from_embedded(builtin::ALL)
    }

    /// Register a schema from JSON notation.
    pub fn register(&mut self, name: &str, notation: &str) -> Result<()> {
        let descriptor = Descriptor::from_notation(notation)?;
        self.register_descriptor(name, descriptor)
    }

    /// Register an already built descriptor. Replaces any previous schema
    /// with the same name.
    pub fn register_descriptor(&mut self, name: &str, descriptor: Descriptor) -> Result<()> {
        let depth = descriptor.depth();
        if depth > self.config.max_depth {
            return Err(SchemaError::TooDeep {
                depth,
                max: self.config.max_depth,
            });
        }

        tracing::debug!(name, size = descriptor.size(), depth, "registered schema");
        if self
            .schemas
            .insert(name.to_string(), Arc::new(descriptor))
            .is_some()
        {
            tracing::debug!(name, "replaced existing schema");
        }
        Ok(())
    }

    /// Load from embedded `(name, notation)` pairs.
    pub fn from_embedded(schemas: &[(&str, &str)]) -> Result<Self> {
        let mut registry = Self::new();
        for (name, notation) in schemas {
            registry.register(name, notation)?;
        }
        Ok(registry)
    }

    /// Load a single file holding a JSON object of `name: notation` entries.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_file_with_config(path, RegistryConfig::default())
    }

    /// Load a single schema file with explicit config.
    pub fn from_file_with_config(path: &Path, config: RegistryConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        let content = read_limited(path, config.max_schema_file_size)?;

        let Notation::Fields(entries) = serde_json::from_str::<Notation>(&content)? else {
            return Err(SchemaError::InvalidNotation(format!(
                "{}: expected an object mapping schema names to layouts",
                path.display()
            )));
        };

        for (name, notation) in entries {
            if registry.contains(&name) {
                return Err(SchemaError::DuplicateSchema(name));
            }
            registry.register_descriptor(&name, notation.into_descriptor()?)?;
        }

        tracing::debug!(path = %path.display(), count = registry.len(), "loaded schema file");
        Ok(registry)
    }

    /// Load every `<name>.layout.json` file of a directory.
    pub fn from_directory(path: &Path) -> Result<Self> {
        Self::from_directory_with_config(path, RegistryConfig::default())
    }

    /// Load a schema directory with explicit config.
    pub fn from_directory_with_config(path: &Path, config: RegistryConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        let mut loaded_schema_count = 0usize;

        let entries = std::fs::read_dir(path)
            .map_err(|err| SchemaError::LoadFailed(format!("{}: {err}", path.display())))?;

        for entry in entries {
            let entry = entry.map_err(|err| SchemaError::LoadFailed(err.to_string()))?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            let Some(name) = schema_name_from_file_name(&file_name) else {
                continue;
            };

            let entry_path = entry.path();
            let file_type = std::fs::symlink_metadata(&entry_path)
                .map_err(|err| SchemaError::LoadFailed(err.to_string()))?
                .file_type();
            if file_type.is_symlink() {
                return Err(SchemaError::LoadFailed(format!(
                    "refusing to load schema symlink: {file_name}"
                )));
            }
            if !file_type.is_file() {
                continue;
            }

            loaded_schema_count = loaded_schema_count.saturating_add(1);
            if loaded_schema_count > registry.config.max_schemas_from_directory {
                return Err(SchemaError::LoadFailed(format!(
                    "schema count exceeds configured max ({}): {}",
                    registry.config.max_schemas_from_directory, loaded_schema_count
                )));
            }

            let content = read_limited(&entry_path, registry.config.max_schema_file_size)?;
            registry.register(name, &content)?;
        }

        tracing::debug!(path = %path.display(), count = registry.len(), "loaded schema directory");
        Ok(registry)
    }

    /// Look up a schema by name.
    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.schemas.get(name).map(Arc::as_ref)
    }

    /// Look up a schema by name, failing with [`SchemaError::NoSchema`].
    pub fn require(&self, name: &str) -> Result<&Descriptor> {
        self.get(name)
            .ok_or_else(|| SchemaError::NoSchema(name.to_string()))
    }

    /// Shared handle to a schema, for codecs that outlive the registry borrow.
    pub fn shared(&self, name: &str) -> Result<Arc<Descriptor>> {
        self.schemas
            .get(name)
            .cloned()
            .ok_or_else(|| SchemaError::NoSchema(name.to_string()))
    }

    /// Check if a schema is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered schema names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn schema_name_from_file_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(SCHEMA_FILE_SUFFIX)
        .filter(|name| !name.is_empty())
}

fn read_limited(path: &Path, max_bytes: usize) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|err| {
        SchemaError::LoadFailed(format!("failed opening schema {}: {err}", path.display()))
    })?;
    let len = file
        .metadata()
        .map_err(|err| SchemaError::LoadFailed(err.to_string()))?
        .len();
    if len > max_bytes as u64 {
        return Err(SchemaError::LoadFailed(format!(
            "schema file too large ({len} bytes): {}",
            path.display()
        )));
    }

    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| {
            SchemaError::LoadFailed(format!("failed reading schema {}: {err}", path.display()))
        })?;
    if content.len() > max_bytes {
        return Err(SchemaError::LoadFailed(format!(
            "schema file too large while reading: {}",
            path.display()
        )));
    }
    Ok(content)
}
