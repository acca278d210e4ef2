mod loader;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;
use tempfile::NamedTempFile;

use toolgen_core::config::{self, CONFIG_FILE_NAME, ToolgenConfig};
use toolgen_core::ir::{Advisory, AuthEnv, ToolModel, select_auth};
use toolgen_core::transform::{self, ServerOverride, TransformOptions};
use toolgen_core::{CodeGenerator, GeneratedFile};
use toolgen_quarkus_mcp::{QuarkusConfig, QuarkusMcpGenerator};

#[derive(Parser)]
#[command(
    name = "toolgen",
    about = "Generate an MCP tool server from an OpenAPI 3.x document",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and report what would be generated
    Validate {
        /// Path or http(s) URL of the OpenAPI document
        spec: String,
    },

    /// Print the resolved servers and tools
    Inspect {
        /// Path or http(s) URL of the OpenAPI document
        spec: String,

        #[command(flatten)]
        servers: ServerArgs,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Write a default .toolgen.yaml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Path or http(s) URL of the OpenAPI document (YAML or JSON)
    spec: Option<String>,

    /// Java class name of the generated server, also its file name
    output_identifier: Option<String>,

    #[command(flatten)]
    servers: ServerArgs,

    /// Directory the generated file is written to
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Config file (defaults to ./.toolgen.yaml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct ServerArgs {
    /// 0-based index into the discovered server list
    #[arg(long, value_name = "N")]
    server_index: Option<usize>,

    /// Base URL to use regardless of the document's servers (wins over --server-index)
    #[arg(long, value_name = "URL")]
    server_url: Option<String>,
}

impl ServerArgs {
    /// Command-line server flags replace the config file's choice as a whole.
    fn apply(self, options: &mut TransformOptions) {
        if self.server_index.is_some() || self.server_url.is_some() {
            options.servers = ServerOverride {
                index: self.server_index,
                url: self.server_url,
            };
        }
    }
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_usage(err),
    };

    let failure_prefix = match cli.command {
        None => "Error generating MCP server",
        Some(_) => "error",
    };

    let result = match cli.command {
        None => match (
            cli.generate.spec.clone(),
            cli.generate.output_identifier.clone(),
        ) {
            (Some(spec), Some(identifier)) => cmd_generate(spec, identifier, cli.generate),
            _ => {
                return report_usage(Cli::command().error(
                    ErrorKind::MissingRequiredArgument,
                    "the following required arguments were not provided: <SPEC> <OUTPUT_IDENTIFIER>",
                ));
            }
        },
        Some(Commands::Validate { spec }) => cmd_validate(&spec),
        Some(Commands::Inspect {
            spec,
            servers,
            format,
        }) => cmd_inspect(&spec, servers, format),
        Some(Commands::Init { force }) => cmd_init(force),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "toolgen", &mut std::io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{failure_prefix}: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Print a clap error or help text. Usage errors exit with 1, help and
/// version with 0.
fn report_usage(err: clap::Error) -> ExitCode {
    let _ = err.print();
    if err.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load the config named on the command line (which must exist), or the
/// default file when present.
fn load_config(explicit: Option<&Path>) -> Result<ToolgenConfig> {
    match explicit {
        Some(path) => config::load_config(path)?
            .with_context(|| format!("config file {} not found", path.display())),
        None => Ok(config::load_config(Path::new(CONFIG_FILE_NAME))?.unwrap_or_default()),
    }
}

fn build_model(spec: &str, options: &TransformOptions) -> Result<ToolModel> {
    let parsed = loader::load_spec(spec)?;
    let model = transform::transform_with_options(&parsed, options)
        .with_context(|| format!("failed to process {spec}"))?;
    debug!(
        "{} tool(s), base url {}",
        model.tools.len(),
        model.servers.base_url
    );
    Ok(model)
}

fn report_advisories(advisories: &[Advisory]) {
    for advisory in advisories {
        eprintln!("warning: {advisory}");
    }
}

/// Write a file into `dir` through a temporary file in the same directory so
/// a failed run never leaves partial output behind.
fn write_atomic(dir: &Path, file: &GeneratedFile) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(&file.path);

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(file.content.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    tmp.persist(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn cmd_generate(spec: String, identifier: String, args: GenerateArgs) -> Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let mut options = TransformOptions::from_config(&cfg);
    args.servers.apply(&mut options);

    let model = build_model(&spec, &options)?;
    report_advisories(&model.advisories);

    let generator_config = QuarkusConfig {
        class_name: identifier,
        source_name: loader::source_name(&spec),
    };
    let files = QuarkusMcpGenerator.generate(&model, &generator_config)?;

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&cfg.output_dir));
    for file in &files {
        let path = write_atomic(&output_dir, file)?;
        println!("MCP server generated successfully: {}", path.display());
    }
    Ok(())
}

fn cmd_validate(spec: &str) -> Result<()> {
    let cfg = load_config(None)?;
    let parsed = loader::load_spec(spec)?;
    eprintln!(
        "Valid OpenAPI {} document: {}",
        parsed.openapi, parsed.info.title
    );
    eprintln!("  Version: {}", parsed.info.version);
    eprintln!("  Paths: {}", parsed.paths.len());

    let model = transform::transform_with_options(&parsed, &TransformOptions::from_config(&cfg))?;
    eprintln!("  Tools: {}", model.tools.len());
    eprintln!("  Servers: {}", model.servers.candidates.len());
    report_advisories(&model.advisories);

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(spec: &str, servers: ServerArgs, format: InspectFormat) -> Result<()> {
    let cfg = load_config(None)?;
    let mut options = TransformOptions::from_config(&cfg);
    servers.apply(&mut options);
    let model = build_model(spec, &options)?;

    let summary = build_inspect_summary(&model);
    match format {
        InspectFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&summary)?),
        InspectFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn build_inspect_summary(model: &ToolModel) -> serde_json::Value {
    let tools: Vec<serde_json::Value> = model
        .tools
        .iter()
        .map(|tool| {
            let parameters: Vec<serde_json::Value> = tool
                .parameters
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "name": p.name,
                        "type": p.param_type,
                        "location": p.location,
                        "required": p.required,
                    })
                })
                .collect();
            serde_json::json!({
                "name": tool.name,
                "method": tool.method.as_str(),
                "path": tool.path,
                "description": tool.description,
                "parameters": parameters,
                "content_type": tool.request_body.as_ref().map(|b| &b.content_type),
            })
        })
        .collect();

    let auth = select_auth(&AuthEnv::from_env());
    serde_json::json!({
        "info": {
            "title": model.info.title,
            "version": model.info.version,
        },
        "servers": {
            "candidates": model.servers.candidates,
            "base_url": model.servers.base_url,
        },
        "auth": auth.label(),
        "tools": tools,
        "advisories": model.advisories.iter().map(ToString::to_string).collect::<Vec<_>>(),
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
