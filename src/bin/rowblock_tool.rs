use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value as JsonValue};
use tracing::info;

use rowwire::engine::errors::RowBlockError;
use rowwire::engine::rowblock::{ProjectionMapping, RowBlockBuilder, SelectionVector};
use rowwire::engine::schema::{RowLayout, Schema};
use rowwire::engine::wire::{
    ColumnSchemaRecord, RowBlockMessage, RowBlockWriter, WireStatus, records_to_schema,
};
use rowwire::logging;

#[derive(Parser)]
#[command(name = "rowblock-tool")]
#[command(about = "Encode, decode and inspect row block messages", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode JSON rows into a framed row block message
    Encode {
        /// Source schema: JSON array of column records
        #[arg(long)]
        schema: PathBuf,

        /// Rows: JSON array of arrays, `null` for null cells
        #[arg(long)]
        rows: PathBuf,

        /// Destination schema; defaults to the source schema
        #[arg(long)]
        project: Option<PathBuf>,

        /// Comma-separated row indices to send; defaults to all rows
        #[arg(long, value_delimiter = ',')]
        select: Option<Vec<usize>>,

        #[arg(long)]
        out: PathBuf,
    },

    /// Resolve a message and print one JSON object per row
    Decode {
        /// Schema the message was encoded with (the destination schema)
        #[arg(long)]
        schema: PathBuf,

        #[arg(long)]
        input: PathBuf,
    },

    /// Print message header facts without resolving rows
    Inspect {
        #[arg(long)]
        schema: PathBuf,

        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let result = match args.command {
        Command::Encode {
            schema,
            rows,
            project,
            select,
            out,
        } => encode(&schema, &rows, project.as_deref(), select.as_deref(), &out),
        Command::Decode { schema, input } => decode(&schema, &input),
        Command::Inspect { schema, input } => inspect(&schema, &input),
    };

    if let Err(err) = &result {
        if let Some(codec_err) = err.downcast_ref::<RowBlockError>() {
            codec_err.log_error();
            let status = WireStatus::from_error(codec_err);
            eprintln!("{}", serde_json::to_string(&status)?);
        }
    }
    result
}

fn load_schema(path: &Path) -> anyhow::Result<Arc<Schema>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading schema {}", path.display()))?;
    let records: Vec<ColumnSchemaRecord> =
        serde_json::from_str(&text).map_err(RowBlockError::from)?;
    Ok(records_to_schema(&records)?)
}

fn read_message(path: &Path) -> anyhow::Result<RowBlockMessage> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(RowBlockMessage::read_from_default(BufReader::new(file))?)
}

fn encode(
    schema_path: &Path,
    rows_path: &Path,
    project: Option<&Path>,
    select: Option<&[usize]>,
    out: &Path,
) -> anyhow::Result<()> {
    let schema = load_schema(schema_path)?;
    let projection = project.map(load_schema).transpose()?;

    let text = fs::read_to_string(rows_path)
        .with_context(|| format!("reading rows {}", rows_path.display()))?;
    let rows: Vec<Vec<JsonValue>> = serde_json::from_str(&text).map_err(RowBlockError::from)?;

    let mut builder = RowBlockBuilder::with_capacity(Arc::clone(&schema), rows.len());
    for (idx, row) in rows.iter().enumerate() {
        builder
            .push_json_row(row)
            .with_context(|| format!("row {}", idx))?;
    }
    let mut block = builder.finish()?;
    if let Some(indices) = select {
        block.set_selection(SelectionVector::from_indices(rows.len(), indices)?)?;
    }

    let mapping = ProjectionMapping::new(schema, projection)?;
    let mut writer = RowBlockWriter::new(mapping);
    writer.append(&block)?;
    let message = writer.finish();

    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    message.write_to(BufWriter::new(file))?;

    info!(
        rows = message.row_count,
        row_bytes = message.row_bytes.len(),
        indirect_bytes = message.indirect_bytes.len(),
        out = %out.display(),
        "Wrote row block message"
    );
    Ok(())
}

fn decode(schema_path: &Path, input: &Path) -> anyhow::Result<()> {
    let schema = load_schema(schema_path)?;
    let message = read_message(input)?;

    let (unresolved, indirect) = message.decode(RowLayout::new(Arc::clone(&schema)));
    let resolved = unresolved.resolve(&indirect)?;

    let mut views = Vec::new();
    resolved.extract_row_views(&mut views);
    for view in &views {
        let mut object = Map::new();
        for (col, column) in schema.columns().iter().enumerate() {
            object.insert(column.name().to_string(), view.value(col)?.to_json());
        }
        println!("{}", JsonValue::Object(object));
    }
    Ok(())
}

fn inspect(schema_path: &Path, input: &Path) -> anyhow::Result<()> {
    let schema = load_schema(schema_path)?;
    let layout = RowLayout::new(schema);
    let message = read_message(input)?;
    let header = message.header();

    println!("rows:           {}", message.row_count);
    println!("stride:         {}", layout.stride());
    println!("row bytes:      {}", message.row_bytes.len());
    println!("indirect bytes: {}", message.indirect_bytes.len());
    println!("null bitmap:    {} bytes", layout.null_bitmap_len());
    println!("checksum:       {:#010x}", header.checksum);
    match layout.row_bytes_for(message.row_count as usize) {
        Some(expected) if expected == message.row_bytes.len() => {}
        _ => println!("warning: row bytes do not match stride x rows"),
    }
    Ok(())
}
