use clap::{Args, Subcommand};
use std::path::PathBuf;

use binlayout::SchemaRegistry;

use crate::exit::{schema_error, CliResult};
use crate::output::OutputFormat;

pub mod decode;
pub mod describe;
pub mod encode;
pub mod pattern;
pub mod schemas;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode bytes from a file (or stdin) against a named schema.
    Decode(DecodeArgs),
    /// Encode a JSON value against a named schema.
    Encode(EncodeArgs),
    /// Print the flattened layout of a schema.
    Describe(DescribeArgs),
    /// List available schemas.
    Schemas(SchemaSource),
    /// Create or search cyclic offset-finding patterns.
    #[command(subcommand)]
    Pattern(PatternCommand),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Describe(args) => describe::run(args, format),
        Command::Schemas(args) => schemas::run(args, format),
        Command::Pattern(command) => pattern::run(command, format),
        Command::Version(args) => version::run(args),
    }
}

/// Where named schemas come from. `--schema` wins over `--schema-dir`;
/// built-ins are used when neither is given.
#[derive(Args, Debug, Default)]
pub struct SchemaSource {
    /// JSON file mapping schema names to layout notation.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,
    /// Directory of `<name>.layout.json` files.
    #[arg(long, value_name = "DIR", env = "BINLAYOUT_SCHEMA_DIR")]
    pub schema_dir: Option<PathBuf>,
}

impl SchemaSource {
    pub fn load(&self) -> CliResult<SchemaRegistry> {
        let registry = match (&self.schema, &self.schema_dir) {
            (Some(file), _) => SchemaRegistry::from_file(file),
            (None, Some(dir)) => SchemaRegistry::from_directory(dir),
            (None, None) => SchemaRegistry::with_builtins(),
        };
        let registry = registry.map_err(|err| schema_error("load schemas", err))?;
        tracing::debug!(count = registry.len(), "schemas loaded");
        Ok(registry)
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file, or `-` for stdin.
    pub input: PathBuf,
    /// Schema name to decode with.
    #[arg(long, short = 'n')]
    pub name: String,
    #[command(flatten)]
    pub source: SchemaSource,
    /// Byte offset into the input where the layout starts.
    #[arg(long, default_value = "0", value_parser = parse_offset)]
    pub offset: usize,
    /// Fail when input remains after the layout.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Schema name to encode with.
    #[arg(long, short = 'n')]
    pub name: String,
    #[command(flatten)]
    pub source: SchemaSource,
    /// JSON value.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,
    /// Read the JSON value from a file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
    /// Write raw bytes here instead of printing them.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Emit padding bytes supplied in the value instead of zeros.
    #[arg(long)]
    pub preserve_padding: bool,
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Schema name to describe.
    #[arg(long, short = 'n')]
    pub name: String,
    #[command(flatten)]
    pub source: SchemaSource,
    /// Print the schema notation instead of the flattened layout.
    #[arg(long)]
    pub notation: bool,
}

#[derive(Subcommand, Debug)]
pub enum PatternCommand {
    /// Print a cyclic pattern of LEN bytes.
    Create {
        /// Pattern length in bytes.
        len: usize,
    },
    /// Find the offset of NEEDLE in the cyclic pattern.
    Find {
        /// Literal text, or a `0x` integer read back as little-endian bytes.
        needle: String,
    },
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Accept decimal or `0x`-prefixed hex offsets.
fn parse_offset(text: &str) -> Result<usize, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|err| format!("invalid offset {text:?}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_accept_hex_and_decimal() {
        assert_eq!(parse_offset("64"), Ok(64));
        assert_eq!(parse_offset("0x40"), Ok(64));
        assert!(parse_offset("0xzz").is_err());
    }

    #[test]
    fn default_source_is_builtin() {
        let registry = SchemaSource::default().load().unwrap();
        assert!(registry.contains("ELF64"));
    }
}
