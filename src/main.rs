use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use log::info;
use rfcanvas::{Color, Scene};

#[derive(Parser, Debug)]
#[command(
    name = "rfcanvas",
    version,
    about = "Crisp software 2D canvas renderer",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON scene and print the SHA-256 digest of the frame
    Render {
        #[arg(value_name = "SCENE")]
        scene: PathBuf,
        /// Also write the raw RGBA bytes (width × height × 4) to this file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Parse a CSS color and print its normalized form
    Color {
        #[arg(value_name = "CSS")]
        css: String,
    },
}

fn render(scene_path: &Path, out: Option<&Path>) -> Result<()> {
    let json = fs::read_to_string(scene_path)
        .with_context(|| format!("failed to read scene {}", scene_path.display()))?;
    let scene = Scene::from_json(&json)
        .with_context(|| format!("failed to parse scene {}", scene_path.display()))?;
    let ctx = scene.render().context("scene replay failed")?;
    info!(
        "rendered {} commands at {}x{}",
        scene.commands.len(),
        ctx.width(),
        ctx.height()
    );

    if let Some(path) = out {
        fs::write(path, ctx.image_data())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {} bytes to {}", ctx.image_data().len(), path.display());
    }
    println!("{}", ctx.digest());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render { scene, out } => render(&scene, out.as_deref()),
        Command::Color { css } => {
            let color = Color::parse(&css)?;
            println!("{color}");
            Ok(())
        }
    }
}
