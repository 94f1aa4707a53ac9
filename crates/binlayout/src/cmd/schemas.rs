use binlayout::Descriptor;

use crate::cmd::SchemaSource;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_schemas, OutputFormat, SchemaSummary};

pub fn run(source: SchemaSource, format: OutputFormat) -> CliResult<i32> {
    let registry = source.load()?;
    let summaries: Vec<SchemaSummary> = registry
        .names()
        .into_iter()
        .filter_map(|name| {
            registry.get(name).map(|descriptor| SchemaSummary {
                name: name.to_string(),
                size: descriptor.size(),
                fields: field_count(descriptor),
            })
        })
        .collect();

    print_schemas(&summaries, format);
    Ok(SUCCESS)
}

fn field_count(descriptor: &Descriptor) -> usize {
    match descriptor {
        Descriptor::Composite(fields) => fields.len(),
        _ => 1,
    }
}
