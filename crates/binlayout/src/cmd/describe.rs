use crate::cmd::DescribeArgs;
use crate::exit::{schema_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_entries, OutputFormat};

pub fn run(args: DescribeArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = args.source.load()?;
    let descriptor = registry
        .require(&args.name)
        .map_err(|err| schema_error("describe", err))?;

    if args.notation {
        let text = descriptor
            .to_notation()
            .map_err(|err| CliError::new(INTERNAL, format!("render notation: {err}")))?;
        println!("{text}");
        return Ok(SUCCESS);
    }

    print_entries(
        &args.name,
        &descriptor.layout_entries(),
        descriptor.size(),
        format,
    );
    Ok(SUCCESS)
}
