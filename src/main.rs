mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use formation_core::{encode_pretty, ShapeType};
use tracing::info;

use crate::commands::{LayoutOverrides, PreviewOptions};
use crate::config::FormationSettings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Arrange scene children into formations", long_about = None)]
struct Cli {
    /// Settings file (defaults to config/formation.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out fresh children and print where each one lands
    Preview {
        #[command(flatten)]
        layout: LayoutArgs,
        /// Number of children to lay out
        #[arg(long)]
        children: Option<usize>,
        /// Host frames to run after the initial layout
        #[arg(long, default_value_t = 0)]
        frames: u32,
    },
    /// Save the layout as a new timestamped file
    Save {
        #[command(flatten)]
        layout: LayoutArgs,
        /// Destination directory (defaults to the settings' save_dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Decode a saved layout file and report problems
    Check {
        /// Layout file to check
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Saved layout file to start from
    #[arg(long)]
    config: Option<PathBuf>,
    /// Shape name: Line, Box, Circle, Cube, Dodecahedron or Pyramid
    #[arg(long)]
    shape: Option<ShapeType>,
    /// Radius for circle and polyhedral shapes
    #[arg(long)]
    radius: Option<f32>,
    /// Column count for box layouts
    #[arg(long)]
    columns: Option<u16>,
    /// Assign positions back to front
    #[arg(long)]
    reverse: bool,
}

impl LayoutArgs {
    fn overrides(&self) -> LayoutOverrides {
        LayoutOverrides {
            shape: self.shape,
            radius: self.radius,
            columns: self.columns,
            reverse: self.reverse,
        }
    }
}

fn main() -> Result<()> {
    // WARN by default; override with RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = match cli.settings.as_deref() {
        Some(path) => FormationSettings::load_from_path(path),
        None => FormationSettings::load(),
    };

    match cli.command {
        Command::Preview {
            layout,
            children,
            frames,
        } => {
            let config = commands::resolve_config(layout.config.as_deref(), &layout.overrides())?;
            let options = PreviewOptions {
                children: children.unwrap_or(settings.children),
                frames,
                cull_excess: settings.cull_excess,
                live_preview: settings.live_preview,
            };
            info!(shape = %config.shape(), ?options, "previewing layout");
            let report = commands::preview(&config, options)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Save { layout, dir } => {
            let config = commands::resolve_config(layout.config.as_deref(), &layout.overrides())?;
            let dir = dir.unwrap_or_else(|| settings.save_dir.clone());
            let path = commands::save(&config, &dir)?;
            println!("{}", path.display());
        }
        Command::Check { file } => {
            let config = commands::check(&file)?;
            info!(shape = %config.shape(), "layout file is valid");
            println!("{}", encode_pretty(&config)?);
        }
    }

    Ok(())
}
