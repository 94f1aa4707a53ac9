use std::io::{IsTerminal, Write};

use binlayout::schema::LayoutEntry;
use binlayout::{Descriptor, Value};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct DecodeOutput<'a> {
    schema: &'a str,
    offset: usize,
    consumed: usize,
    value: &'a Value,
}

#[derive(Serialize)]
struct EncodeOutput<'a> {
    schema: &'a str,
    size: usize,
    hex: String,
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    path: &'a str,
    offset: usize,
    size: usize,
    kind: &'a str,
}

#[derive(Serialize)]
struct PatternOutput {
    length: usize,
    pattern: String,
}

#[derive(Serialize)]
struct OffsetOutput<'a> {
    needle: &'a str,
    offset: usize,
}

#[derive(Serialize)]
pub struct SchemaSummary {
    pub name: String,
    pub size: usize,
    pub fields: usize,
}

/// One flattened row of a decoded value.
struct ValueRow {
    path: String,
    offset: usize,
    kind: String,
    value: String,
}

pub fn print_decoded(
    schema: &str,
    descriptor: &Descriptor,
    value: &Value,
    offset: usize,
    consumed: usize,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = DecodeOutput {
                schema,
                offset,
                consumed,
                value,
            };
            println!("{}", to_json(&out));
        }
        OutputFormat::Raw => println!("{}", to_json(value)),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "OFFSET", "TYPE", "VALUE"]);
            for row in value_rows(descriptor, value, offset) {
                table.add_row(vec![
                    row.path,
                    format!("0x{:x}", row.offset),
                    row.kind,
                    row.value,
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{schema} @ 0x{offset:x} ({consumed} bytes)");
            for row in value_rows(descriptor, value, offset) {
                println!("  {:<24} {:<10} {}", row.path, row.kind, row.value);
            }
        }
    }
}

pub fn print_encoded(schema: &str, bytes: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = EncodeOutput {
                schema,
                size: bytes.len(),
                hex: binlayout::bytes::to_hex(bytes),
            };
            println!("{}", to_json(&out));
        }
        OutputFormat::Raw => print_raw(bytes),
        OutputFormat::Table | OutputFormat::Pretty => println!("{}", hex_dump(bytes)),
    }
}

pub fn print_entries(schema: &str, entries: &[LayoutEntry], size: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json | OutputFormat::Raw => {
            let out: Vec<EntryOutput<'_>> = entries
                .iter()
                .map(|entry| EntryOutput {
                    path: &entry.path,
                    offset: entry.offset,
                    size: entry.size,
                    kind: &entry.kind,
                })
                .collect();
            println!("{}", to_json(&out));
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "OFFSET", "SIZE", "TYPE"]);
            for entry in entries {
                table.add_row(vec![
                    display_path(&entry.path).to_string(),
                    format!("0x{:x}", entry.offset),
                    entry.size.to_string(),
                    entry.kind.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{schema}: {size} bytes");
            for entry in entries {
                println!(
                    "  +0x{:04x} {:<24} {}",
                    entry.offset,
                    display_path(&entry.path),
                    entry.kind
                );
            }
        }
    }
}

pub fn print_schemas(schemas: &[SchemaSummary], format: OutputFormat) {
    match format {
        OutputFormat::Json | OutputFormat::Raw => println!("{}", to_json(schemas)),
        OutputFormat::Table => {
            let mut table = new_table(vec!["NAME", "SIZE", "FIELDS"]);
            for schema in schemas {
                table.add_row(vec![
                    schema.name.clone(),
                    schema.size.to_string(),
                    schema.fields.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for schema in schemas {
                println!("{} ({} bytes, {} fields)", schema.name, schema.size, schema.fields);
            }
        }
    }
}

pub fn print_pattern(pattern: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = PatternOutput {
                length: pattern.len(),
                pattern: binlayout::bytes::to_text(pattern),
            };
            println!("{}", to_json(&out));
        }
        OutputFormat::Raw => print_raw(pattern),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("{}", binlayout::bytes::to_text(pattern));
        }
    }
}

pub fn print_offset(needle: &str, offset: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", to_json(&OffsetOutput { needle, offset })),
        OutputFormat::Table => {
            let mut table = new_table(vec!["NEEDLE", "OFFSET"]);
            table.add_row(vec![
                needle.to_string(),
                format!("{offset} (0x{offset:x})"),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => println!("{offset}"),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

fn value_rows(descriptor: &Descriptor, value: &Value, offset: usize) -> Vec<ValueRow> {
    let mut rows = Vec::new();
    collect_rows(descriptor, Some(value), "", offset, &mut rows);
    rows
}

fn collect_rows(
    descriptor: &Descriptor,
    value: Option<&Value>,
    path: &str,
    offset: usize,
    rows: &mut Vec<ValueRow>,
) {
    match descriptor {
        Descriptor::Composite(fields) => {
            let mut cursor = offset;
            for field in fields {
                let child = if path.is_empty() {
                    field.name.clone()
                } else {
                    format!("{path}.{}", field.name)
                };
                let child_value = value.and_then(|v| v.get(&field.name));
                collect_rows(&field.descriptor, child_value, &child, cursor, rows);
                cursor = cursor.saturating_add(field.descriptor.size());
            }
        }
        leaf => rows.push(ValueRow {
            path: display_path(path).to_string(),
            offset,
            kind: leaf.kind_label(),
            value: value.map(render_value).unwrap_or_default(),
        }),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Unit => "ok".to_string(),
        Value::Bytes(bytes) => binlayout::bytes::to_hex(bytes),
        Value::Record(record) => format!("{{{} fields}}", record.len()),
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
            value.as_i128().map(|n| n.to_string()).unwrap_or_default()
        }
        unsigned => unsigned
            .as_u64()
            .map(|n| format!("{n} (0x{n:x})"))
            .unwrap_or_default(),
    }
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(row, chunk)| {
            let cells: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
            format!("{:08x}  {}", row * 16, cells.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
