use std::fs;
use std::path::{Path, PathBuf};

use apidoc_codegen::{BUILTIN_TYPES, generate_schema, generate_typescript};
use apidoc_core::{
    ModelSnapshot, ValidationError, diff_models, find_unresolved_references, validate_snapshot,
};
use apidoc_normalize::output::{OutputFormat, format_diff, format_report, format_snapshot};
use apidoc_normalize::normalize_rows;
use apidoc_store::{GenConfig, load_raw_rows, load_snapshot, save_snapshot, seal_snapshot};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "apidoc-gen")]
#[command(about = "Normalize scraped API documentation and generate TypeScript and JSON Schema")]
struct Cli {
    /// Generator configuration YAML (override tables, schema roots, emitter switches).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize raw scraped rows into a model snapshot.
    Normalize(NormalizeArgs),
    /// Validate one or more model snapshots.
    Validate(ValidateArgs),
    /// Generate TypeScript declarations from a snapshot.
    GenTs(GenTsArgs),
    /// Generate a JSON Schema (draft-04) document from a snapshot.
    GenSchema(GenSchemaArgs),
    /// Generate TypeScript and JSON Schema together.
    Generate(GenerateArgs),
    /// Compare two snapshots and report added, changed and deleted paths.
    Diff(DiffArgs),
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    /// Raw rows JSON produced by the documentation scraper.
    #[arg(long)]
    input: PathBuf,
    /// Output snapshot path (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    output: PathBuf,
    /// Optional path for the normalization report.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Report format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Snapshot files to validate.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct GenTsArgs {
    /// Snapshot to generate from.
    #[arg(long)]
    input: PathBuf,
    /// Output `.ts` path (default: stdout).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Prefix declarations with `export` regardless of the config file.
    #[arg(long)]
    export: bool,
}

#[derive(Debug, Args)]
struct GenSchemaArgs {
    /// Snapshot to generate from.
    #[arg(long)]
    input: PathBuf,
    /// Output `.json` path (default: stdout).
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Snapshot to generate from.
    #[arg(long)]
    input: PathBuf,
    /// Output `.ts` path.
    #[arg(long)]
    ts_output: PathBuf,
    /// Output schema `.json` path.
    #[arg(long)]
    schema_output: PathBuf,
}

#[derive(Debug, Args)]
struct DiffArgs {
    /// Previous snapshot.
    #[arg(long)]
    old: PathBuf,
    /// Current snapshot.
    #[arg(long)]
    new: PathBuf,
    /// Output format.
    #[arg(long, default_value = "markdown")]
    format: OutputFormat,
    /// Output path (default: stdout).
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = GenConfig::load_or_default(cli.config.as_deref())
        .map_err(|err| format!("Failed to load config: {err}"))
        .and_then(|config| match cli.command {
            Command::Normalize(args) => run_normalize(args, &config),
            Command::Validate(args) => run_validate(args),
            Command::GenTs(args) => run_gen_ts(args, &config),
            Command::GenSchema(args) => run_gen_schema(args, &config),
            Command::Generate(args) => run_generate(args, &config),
            Command::Diff(args) => run_diff(args),
        });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Logs to stderr; `RUST_LOG` takes a level or a full filter directive.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn run_normalize(args: NormalizeArgs, config: &GenConfig) -> Result<(), String> {
    let rows = load_raw_rows(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;

    let run = normalize_rows(&rows, &config.overrides).map_err(|err| err.to_string())?;
    let report = run.report.clone();

    let mut snapshot = run.into_snapshot(&config.snapshot.version);
    snapshot.name = config.snapshot.name.clone();
    seal_snapshot(&mut snapshot).map_err(|err| err.to_string())?;

    ensure_parent_dir(&args.output)?;
    save_snapshot(&snapshot, &args.output)
        .map_err(|err| format!("Failed to write '{}': {err}", args.output.display()))?;

    if let Some(path) = &args.report {
        let raw = format_report(&report, args.format)?;
        write_output(path, &raw)?;
    }

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    println!(
        "Normalized {} row(s) into {} type(s) at '{}'.",
        report.rows,
        snapshot.type_count(),
        args.output.display()
    );
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut type_count = 0usize;
    for path in &args.inputs {
        let snapshot = load_checked(path)?;
        type_count += snapshot.type_count();
    }
    println!(
        "Validated {} snapshot(s) with {} type(s).",
        args.inputs.len(),
        type_count
    );
    Ok(())
}

fn run_gen_ts(args: GenTsArgs, config: &GenConfig) -> Result<(), String> {
    let snapshot = load_checked(&args.input)?;
    let mut options = config.typescript;
    options.export |= args.export;

    let ts = generate_typescript(&snapshot.types, &options);
    emit(args.output.as_deref(), &ts)
}

fn run_gen_schema(args: GenSchemaArgs, config: &GenConfig) -> Result<(), String> {
    let snapshot = load_checked(&args.input)?;
    let raw = schema_text(&snapshot, config)?;
    emit(args.output.as_deref(), &raw)
}

fn run_generate(args: GenerateArgs, config: &GenConfig) -> Result<(), String> {
    let snapshot = load_checked(&args.input)?;

    let (ts, schema) = rayon::join(
        || generate_typescript(&snapshot.types, &config.typescript),
        || schema_text(&snapshot, config),
    );
    let schema = schema?;

    write_output(&args.ts_output, &ts)?;
    write_output(&args.schema_output, &schema)?;

    println!(
        "Generated '{}' and '{}' from {} type(s).",
        args.ts_output.display(),
        args.schema_output.display(),
        snapshot.type_count()
    );
    Ok(())
}

fn run_diff(args: DiffArgs) -> Result<(), String> {
    let old = load_checked(&args.old)?;
    let new = load_checked(&args.new)?;

    let diff = diff_models(&old.types, &new.types);
    info!(
        added = diff.added.len(),
        deleted = diff.deleted.len(),
        changed = diff.changed.len(),
        "Computed model diff"
    );

    let raw = format_diff(&diff, args.format)?;
    emit(args.output.as_deref(), &raw)
}

fn schema_text(snapshot: &ModelSnapshot, config: &GenConfig) -> Result<String, String> {
    generate_schema(&snapshot.types, &config.schema.root_properties)
        .to_json_pretty()
        .map_err(|err| format!("Failed to serialize schema: {err}"))
}

/// Loads a snapshot, rejects structural violations and logs dangling
/// references.
fn load_checked(path: &Path) -> Result<ModelSnapshot, String> {
    let snapshot =
        load_snapshot(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;

    let errors = validate_snapshot(&snapshot);
    if !errors.is_empty() {
        return Err(format!(
            "'{}' failed validation: {}",
            path.display(),
            join_errors(&errors)
        ));
    }

    for reference in find_unresolved_references(&snapshot.types, &BUILTIN_TYPES) {
        warn!(
            type_name = %reference.type_name,
            field = reference.field.as_deref().unwrap_or("extends"),
            target = %reference.target,
            "Unresolved type reference"
        );
    }
    Ok(snapshot)
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn emit(output: Option<&Path>, raw: &str) -> Result<(), String> {
    match output {
        Some(path) => write_output(path, raw),
        None => {
            println!("{raw}");
            Ok(())
        }
    }
}

fn write_output(path: &Path, raw: &str) -> Result<(), String> {
    ensure_parent_dir(path)?;
    fs::write(path, raw).map_err(|err| format!("Failed to write '{}': {err}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create output directory '{}': {err}",
                parent.display()
            )
        })?;
    }
    Ok(())
}
