use binlayout::bytes::{cyclic_find, cyclic_pattern};

use crate::cmd::PatternCommand;
use crate::exit::{bytes_error, CliError, CliResult, FAILURE, SUCCESS};
use crate::output::{print_offset, print_pattern, OutputFormat};

pub fn run(command: PatternCommand, format: OutputFormat) -> CliResult<i32> {
    match command {
        PatternCommand::Create { len } => {
            let pattern = cyclic_pattern(len).map_err(|err| bytes_error("pattern create", err))?;
            print_pattern(&pattern, format);
            Ok(SUCCESS)
        }
        PatternCommand::Find { needle } => {
            let bytes = needle_bytes(&needle)?;
            let offset = cyclic_find(&bytes).ok_or_else(|| {
                CliError::new(FAILURE, format!("{needle:?} does not occur in the pattern"))
            })?;
            print_offset(&needle, offset, format);
            Ok(SUCCESS)
        }
    }
}

/// A `0x` needle is an integer as read out of a register: its bytes are
/// searched in little-endian order, trimmed to its significant bytes.
fn needle_bytes(needle: &str) -> CliResult<Vec<u8>> {
    let Some(hex) = needle
        .strip_prefix("0x")
        .or_else(|| needle.strip_prefix("0X"))
    else {
        return Ok(needle.as_bytes().to_vec());
    };

    let value = u64::from_str_radix(hex, 16)
        .map_err(|err| CliError::usage(format!("invalid needle {needle:?}: {err}")))?;
    let width = hex.trim_start_matches('0').len().div_ceil(2).max(1);
    Ok(value.to_le_bytes()[..width].to_vec())
}
