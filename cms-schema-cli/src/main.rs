use clap::{Parser, Subcommand, ValueEnum};
use cms_schema::catalog::BLOCK_NAMES;
use cms_schema::{describe, slugify, Catalog, EntityKind};
use serde_json::Value;
use std::io::Read;
use std::process;

/// cms-schema CLI - inspect content schemas and validate documents against them
#[derive(Parser)]
#[command(name = "cms-schema", version, about)]
struct Cli {
    /// Output format
    #[arg(long, default_value = "yaml")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List entity kinds (and optionally the shared blocks)
    List {
        /// Include the shared block names
        #[arg(long)]
        blocks: bool,
    },

    /// Print the structural description of an entity or block schema
    Describe {
        /// Entity kind (e.g. blog-post) or block name (e.g. button)
        name: String,
    },

    /// Validate a document against an entity schema
    Validate {
        /// Entity kind (e.g. blog-post)
        entity: String,
        /// Document file (reads stdin when omitted)
        file: Option<String>,
        /// Input document format (defaults to the file extension, then JSON)
        #[arg(long)]
        input: Option<OutputFormat>,
    },

    /// Generate Rust types for every entity
    Codegen {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },

    /// Derive a URL slug from free text
    Slugify {
        /// Text to slugify
        text: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("ERROR:{e}");
            process::exit(2);
        }
    }
}

/// Returns `Ok(false)` when a document failed validation.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let catalog = Catalog::new()?;

    match cli.command {
        Command::List { blocks } => {
            let entities: Vec<&str> = EntityKind::ALL.iter().map(EntityKind::as_str).collect();
            let mut listing = serde_json::json!({ "entities": entities });
            if blocks {
                listing["blocks"] = serde_json::json!(BLOCK_NAMES);
            }
            print_output(&listing, &cli.format)?;
        }

        Command::Describe { name } => {
            let schema = match catalog.block(&name) {
                Some(block) => block,
                None => catalog.lookup(&name)?,
            };
            print_output(&describe(schema), &cli.format)?;
        }

        Command::Validate {
            entity,
            file,
            input,
        } => {
            let kind: EntityKind = entity.parse()?;
            let input = input.unwrap_or_else(|| input_format_for(file.as_deref()));
            let document = read_document(file.as_deref(), &input)?;
            let result = catalog.safe_validate(kind, &document);
            log::debug!("Validated {kind}: {} issue(s)", result.issues().len());
            print_output(&serde_json::to_value(&result)?, &cli.format)?;
            return Ok(result.is_success());
        }

        Command::Codegen { output } => match output {
            Some(path) => {
                cms_schema_codegen::write_catalog_types(&catalog, &path)?;
                print_output(&serde_json::json!({ "ok": true, "written": path }), &cli.format)?;
            }
            None => print!("{}", cms_schema_codegen::generate_for_catalog(&catalog)?),
        },

        Command::Slugify { text } => {
            print_output(&serde_json::json!({ "slug": slugify(&text) }), &cli.format)?;
        }
    }

    Ok(true)
}

fn print_output(value: &Value, format: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}

fn input_format_for(file: Option<&str>) -> OutputFormat {
    match file {
        Some(path) if path.ends_with(".yaml") || path.ends_with(".yml") => OutputFormat::Yaml,
        _ => OutputFormat::Json,
    }
}

fn read_document(
    file: Option<&str>,
    format: &OutputFormat,
) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read document '{path}': {e}"))?,
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            raw
        }
    };
    let document = match format {
        OutputFormat::Json => serde_json::from_str(&raw)?,
        OutputFormat::Yaml => serde_yaml::from_str(&raw)?,
    };
    Ok(document)
}
