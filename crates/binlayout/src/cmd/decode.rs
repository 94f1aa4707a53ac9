use std::io::Read;
use std::path::Path;

use binlayout::{CodecConfig, Layout};

use crate::cmd::DecodeArgs;
use crate::exit::{codec_error, io_error, schema_error, CliResult, SUCCESS};
use crate::output::{print_decoded, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = args.source.load()?;
    let descriptor = registry
        .shared(&args.name)
        .map_err(|err| schema_error("decode", err))?;
    let config = CodecConfig {
        allow_trailing: !args.strict,
        ..CodecConfig::default()
    };
    let layout = Layout::with_config(descriptor, config);

    let data = read_input(&args.input)?;
    let window = binlayout::bytes::slice(&data, args.offset, None);
    tracing::debug!(
        input = %args.input.display(),
        len = data.len(),
        offset = args.offset,
        "decoding"
    );

    let (value, consumed) = layout
        .decode_with_size(&window)
        .map_err(|err| codec_error(&format!("decode {}", args.name), err))?;

    print_decoded(
        &args.name,
        layout.descriptor(),
        &value,
        args.offset,
        consumed,
        format,
    );
    Ok(SUCCESS)
}

pub(crate) fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut data = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut data)
            .map_err(|err| io_error("read stdin", err))?;
        return Ok(data);
    }
    std::fs::read(path).map_err(|err| io_error(&format!("read {}", path.display()), err))
}
