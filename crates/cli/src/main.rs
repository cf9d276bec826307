//! Terraform OpenAPI generator CLI
//!
//! Wires the mapping and synthesis engines together: loads the OpenAPI
//! document and generator config, produces the provider specification IR,
//! and optionally the client SDK source files. All filesystem writes live
//! here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

use tf_openapi_generator_common::config::Config;
use tf_openapi_generator_common::spec::{self, provider, Specification};
use tf_openapi_generator_mapper::openapi::Document;
use tf_openapi_generator_mapper::{explorer, DataSourceMapper, RequestMapper, ResourceMapper};
use tf_openapi_generator_sdk::{generate_sdk, UnsupportedShapePolicy};

#[derive(Parser)]
#[command(name = "tf-openapi-generator")]
#[command(version, about = "Generate Terraform provider specifications and client SDK code from OpenAPI documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Map an OpenAPI document to the provider specification IR
    #[command(after_help = "EXAMPLES:\n  \
        # Generate the provider spec\n  \
        tf-openapi-generator generate --spec apigw_v1.json --config generator.yml --output ./out\n\n  \
        # Also generate client SDK source files\n  \
        tf-openapi-generator generate --spec apigw_v1.json --config generator.yml --output ./out --sdk")]
    Generate {
        /// Path to the OpenAPI JSON document
        #[arg(short, long)]
        spec: PathBuf,

        /// Path to the generator config YAML
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Also generate client SDK source files under <output>/sdk
        #[arg(long)]
        sdk: bool,

        /// Fail on schema shapes the SDK synthesis cannot express
        /// (default: record warnings and continue)
        #[arg(long)]
        strict_sdk: bool,
    },

    /// Parse the document and config and report what would be generated
    Validate {
        /// Path to the OpenAPI JSON document
        #[arg(short, long)]
        spec: PathBuf,

        /// Path to the generator config YAML
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            spec,
            config,
            output,
            sdk,
            strict_sdk,
        } => generate_command(&spec, &config, &output, sdk, strict_sdk, cli.verbose),
        Commands::Validate { spec, config } => validate_command(&spec, &config, cli.verbose),
    }
}

fn load_inputs(spec_path: &Path, config_path: &Path) -> Result<(Document, Config)> {
    let spec_data = fs::read_to_string(spec_path)
        .with_context(|| format!("Failed to read OpenAPI document {}", spec_path.display()))?;
    let doc: Document = serde_json::from_str(&spec_data)
        .with_context(|| format!("Failed to parse OpenAPI document {}", spec_path.display()))?;

    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load generator config {}", config_path.display()))?;

    Ok((doc, config))
}

fn map_specification(doc: &Document, config: &Config) -> Specification {
    let (resources, data_sources) = explorer::explore(doc, config);

    let resource_irs = ResourceMapper::new(doc, &resources, config).map_to_ir();
    let data_source_irs = DataSourceMapper::new(doc, &data_sources, config).map_to_ir();
    let requests = RequestMapper::new(doc, &resources, &data_sources, config).map_to_ir();

    let provider = (!config.provider.name.is_empty()).then(|| provider::Provider {
        name: config.provider.name.clone(),
        schema: None,
    });

    Specification {
        datasources: data_source_irs,
        provider,
        resources: resource_irs,
        requests,
        version: spec::VERSION.to_string(),
    }
}

fn generate_command(
    spec_path: &Path,
    config_path: &Path,
    output: &Path,
    sdk: bool,
    strict_sdk: bool,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Mapping OpenAPI document: {}",
        "→".cyan(),
        spec_path.display()
    );

    let (doc, config) = load_inputs(spec_path, config_path)?;

    if verbose {
        println!("  Config: {}", config_path.display());
        println!("  Resources configured: {}", config.resources.len());
        println!("  Data sources configured: {}", config.data_sources.len());
    }

    let specification = map_specification(&doc, &config);

    println!(
        "{} Mapped {} resources, {} data sources, {} requests",
        "✓".green(),
        specification.resources.len(),
        specification.datasources.len(),
        specification.requests.len()
    );

    let skipped = config.resources.len() - specification.resources.len()
        + config.data_sources.len() - specification.datasources.len();
    if skipped > 0 {
        println!(
            "{} Skipped {} unit(s) due to mapping failures, see warnings above",
            "⚠".yellow(),
            skipped
        );
    }

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let spec_json = serde_json::to_string_pretty(&specification)
        .context("Failed to serialize provider specification")?;
    let spec_file = output.join("provider-spec.json");
    fs::write(&spec_file, spec_json + "\n")
        .with_context(|| format!("Failed to write {}", spec_file.display()))?;
    println!("{} Wrote {}", "✓".green(), spec_file.display());

    if sdk {
        println!("{} Generating client SDK files...", "→".cyan());

        let policy = if strict_sdk {
            UnsupportedShapePolicy::Fail
        } else {
            UnsupportedShapePolicy::Warn
        };

        let (files, warnings) =
            generate_sdk(&doc, &config, policy).context("Failed to generate client SDK")?;

        for warning in &warnings {
            println!("{} {}", "⚠".yellow(), warning);
        }

        let sdk_dir = output.join("sdk");
        fs::create_dir_all(&sdk_dir)
            .with_context(|| format!("Failed to create sdk directory {}", sdk_dir.display()))?;

        for file in &files {
            let path = sdk_dir.join(&file.file_name);
            fs::write(&path, &file.contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if verbose {
                println!("  📄 {}", path.display());
            }
        }

        println!(
            "{} Wrote {} SDK files to {}",
            "✓".green(),
            files.len(),
            sdk_dir.display()
        );
    }

    println!("\n{}", "✓ Generation complete!".green().bold());
    Ok(())
}

fn validate_command(spec_path: &Path, config_path: &Path, verbose: bool) -> Result<()> {
    println!(
        "{} Validating OpenAPI document: {}",
        "→".cyan(),
        spec_path.display()
    );

    let (doc, config) = load_inputs(spec_path, config_path)?;
    let specification = map_specification(&doc, &config);

    println!("\n{}", "✓ Validation successful!".green().bold());
    println!("  Document: {} ({} paths)", doc.info.title.yellow(), doc.paths.len());
    println!(
        "  Resources: {}/{} mappable",
        specification.resources.len(),
        config.resources.len()
    );
    println!(
        "  Data sources: {}/{} mappable",
        specification.datasources.len(),
        config.data_sources.len()
    );

    if verbose {
        for resource in &specification.resources {
            println!(
                "  • {} ({} attributes, refresh: {})",
                resource.resource.name.cyan(),
                resource.resource.schema.attributes.len(),
                if resource.refresh_object_name.is_empty() {
                    "-"
                } else {
                    resource.refresh_object_name.as_str()
                }
            );
        }
        for data_source in &specification.datasources {
            println!(
                "  • {} ({} attributes, refresh: {})",
                data_source.data_source.name.cyan(),
                data_source.data_source.schema.attributes.len(),
                if data_source.refresh_object_name.is_empty() {
                    "-"
                } else {
                    data_source.refresh_object_name.as_str()
                }
            );
        }
    }

    Ok(())
}
