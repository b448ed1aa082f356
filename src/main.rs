use anyhow::Context;
use clap::{Parser, Subcommand};
use polyedit::check::check_file;
use polyedit::{init_logging, EditorConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "polyedit", version, about = "Polygon and polyline shape tools")]
struct Cli {
    /// Config file (defaults to the platform config location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report the validity of every shape in a shape file
    Check { file: PathBuf },
    /// Show the effective configuration
    Config {
        /// Print it as TOML
        #[arg(long)]
        print: bool,
    },
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<EditorConfig> {
    let path = match path {
        Some(path) => path,
        None => EditorConfig::default_path()?,
    };
    EditorConfig::load_or_default(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

fn main() -> anyhow::Result<ExitCode> {
    init_logging()?;
    let cli = Cli::parse();
    let config = load_config(cli.config)?;

    match cli.command {
        Command::Check { file } => {
            let reports = check_file(&file, &config)?;
            let mut invalid = 0;
            for report in &reports {
                if report.validity.is_valid() {
                    tracing::info!(
                        "{} ({:?}, {} vertices): valid",
                        report.label,
                        report.kind,
                        report.vertices
                    );
                } else {
                    invalid += 1;
                    tracing::warn!(
                        "{} ({:?}, {} vertices): {}",
                        report.label,
                        report.kind,
                        report.vertices,
                        report.validity
                    );
                }
            }
            tracing::info!("{} shapes checked, {} invalid", reports.len(), invalid);
            Ok(if invalid == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Config { print } => {
            if print {
                println!("{}", toml::to_string_pretty(&config)?);
            } else {
                tracing::info!("polyedit {} (built {})", polyedit::VERSION, polyedit::BUILD_DATE);
                tracing::info!("Config is valid");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
