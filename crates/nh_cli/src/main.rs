use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nh_syntax::TransformOptions;
use nh_transform::transform;

use nh_cli::config::ProjectConfig;
use nh_cli::project;

#[derive(Parser)]
#[command(name = "neha", version, about = "neha: TSX with a Hindustani vocabulary")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform one .neha file to TSX.
    Transform {
        /// Input .neha file.
        input: PathBuf,
        /// Output file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write a source map next to the output.
        #[arg(long)]
        source_map: bool,
        /// Append the source map to the output as a data URL.
        #[arg(long)]
        inline_map: bool,
    },
    /// Transform every .neha file under root_dir into out_dir.
    Build {
        /// Project root holding neha.toml.
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Transform every .neha file and report output that fails to parse.
    Check {
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Transform {
            input,
            output,
            source_map,
            inline_map,
        } => {
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let filename = input.display().to_string();
            let options = TransformOptions {
                filename: Some(filename.clone()),
                inline_source_map: inline_map,
            };
            let out = transform(&source, &options)?;

            match &output {
                Some(path) => std::fs::write(path, &out.code)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", out.code),
            }

            if source_map {
                let map_path = match &output {
                    Some(path) => project::map_path(path),
                    None => PathBuf::from(format!("{filename}.map")),
                };
                let json = out.map.to_json().context("failed to serialize source map")?;
                std::fs::write(&map_path, json)
                    .with_context(|| format!("failed to write {}", map_path.display()))?;
                eprintln!("Source map written to {}", map_path.display());
            }
        }
        Commands::Build { root } => {
            let config = ProjectConfig::load(&root);
            let summary = project::build(&root, &config)?;
            eprintln!(
                "Built {} file(s), copied {} into {}",
                summary.transformed,
                summary.copied,
                root.join(&config.out_dir).display()
            );
        }
        Commands::Check { root } => {
            let config = ProjectConfig::load(&root);
            let failures = project::check(&root, &config)?;
            if failures > 0 {
                eprintln!("{failures} file(s) failed to parse");
                std::process::exit(1);
            }
            eprintln!("OK: {}", root.join(&config.root_dir).display());
        }
    }

    Ok(())
}
