use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use port_schema::{compile_json, extract_json, schema_to_json, CompileOptions};

#[derive(Parser)]
#[command(name = "port-schema")]
#[command(about = "Generate Elm port codecs and TypeScript declarations from an Elm type schema", long_about = None)]
struct Cli {
    /// Log every compilation stage to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a schema module (parsed Elm AST as JSON) into both outputs
    Compile {
        /// Input module AST `.json` file
        #[arg(short, long)]
        input: PathBuf,

        /// Output Elm module
        #[arg(long, default_value = "src/Port.elm")]
        elm_output: PathBuf,

        /// Output TypeScript declarations
        #[arg(long, default_value = "src/Main.d.ts")]
        ts_output: PathBuf,

        /// JSON file with compile options; flags below take precedence
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Name of the generated Elm module
        #[arg(long)]
        module_name: Option<String>,

        /// Elm module the TypeScript `init` typing describes
        #[arg(long)]
        main_module: Option<String>,

        /// Page width of the generated Elm code
        #[arg(long)]
        width: Option<usize>,
    },

    /// Validate a schema module and print the extracted schema as JSON
    Schema {
        /// Input module AST `.json` file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}")]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Compile(#[from] port_schema::Error),
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_owned(), source })
}

fn write(path: &Path, contents: &str) -> Result<(), CliError> {
    let io_error = |source| CliError::Io { path: path.to_owned(), source };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, contents).map_err(io_error)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Compile {
            input,
            elm_output,
            ts_output,
            config,
            module_name,
            main_module,
            width,
        } => {
            let mut options = match &config {
                Some(path) => serde_json::from_str(&read(path)?)?,
                None => CompileOptions::default(),
            };
            if let Some(module_name) = module_name {
                options.module_name = module_name;
            }
            if let Some(main_module) = main_module {
                options.main_module = main_module;
            }
            if let Some(width) = width {
                options.width = width;
            }
            debug!(?options, "compile options");

            let output = compile_json(&read(&input)?, &options)?;
            write(&elm_output, &output.elm)?;
            write(&ts_output, &output.typescript)?;
            info!(elm = %elm_output.display(), typescript = %ts_output.display(), "outputs written");
            println!(
                "Compiled {} → {}, {}",
                input.display(),
                elm_output.display(),
                ts_output.display()
            );
            Ok(())
        }

        Commands::Schema { input } => {
            let schema = extract_json(&read(&input)?)?;
            println!("{}", schema_to_json(&schema)?);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}
