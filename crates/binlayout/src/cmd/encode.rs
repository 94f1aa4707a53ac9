use binlayout::codec::from_json;
use binlayout::{CodecConfig, Layout, PaddingPolicy};

use crate::cmd::EncodeArgs;
use crate::exit::{codec_error, io_error, json_error, schema_error, CliError, CliResult, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = args.source.load()?;
    let descriptor = registry
        .shared(&args.name)
        .map_err(|err| schema_error("encode", err))?;
    let config = CodecConfig {
        padding: if args.preserve_padding {
            PaddingPolicy::Preserve
        } else {
            PaddingPolicy::ZeroFill
        },
        ..CodecConfig::default()
    };
    let layout = Layout::with_config(descriptor, config);

    let text = match (&args.json, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|err| io_error(&format!("read {}", path.display()), err))?,
        (None, None) => return Err(CliError::usage("one of --json or --file is required")),
    };
    let json: serde_json::Value =
        serde_json::from_str(&text).map_err(|err| json_error("parse value", err))?;

    let context = format!("encode {}", args.name);
    let value = from_json(layout.descriptor(), &json).map_err(|err| codec_error(&context, err))?;
    let bytes = layout
        .encode(&value)
        .map_err(|err| codec_error(&context, err))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .map_err(|err| io_error(&format!("write {}", path.display()), err))?;
            tracing::info!(path = %path.display(), len = bytes.len(), "wrote encoded layout");
        }
        None => print_encoded(&args.name, &bytes, format),
    }
    Ok(SUCCESS)
}
