//! spinframe CLI
//!
//! Headless front end for rotation keyframe projects:
//! - `init`: write a default `spinframe.toml`
//! - `add`: append a keypoint to a project file
//! - `sample`: print the rotation at a time
//! - `play`: step playback on synthetic frames
//! - `export`: write the standalone HTML page or the bare CSS

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{SpinframeConfig, CONFIG_FILE};
use spinframe_animation::KeypointStore;
use spinframe_app::{load_project, save_project, EditorState};
use spinframe_core::Axis;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Rotation keyframe editor, headless
#[derive(Parser, Debug)]
#[command(name = "spinframe")]
#[command(about = "Author and export three-axis rotation keyframe animations")]
#[command(version)]
struct Cli {
    /// Directory containing spinframe.toml (or the file itself)
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default spinframe.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Add a keypoint to a project (created if missing)
    Add {
        project: PathBuf,

        #[arg(value_parser = parse_axis)]
        axis: Axis,

        /// Time in seconds, snapped to the timeline grid
        time: f32,

        /// Rotation in degrees
        #[arg(allow_hyphen_values = true)]
        value: f32,

        /// Easing preset of the new keypoint
        #[arg(short, long)]
        easing: Option<String>,
    },

    /// Print the rotation at a time
    Sample { project: PathBuf, time: f32 },

    /// Play the animation on synthetic frames and log each one
    Play {
        project: PathBuf,

        /// Frame interval in milliseconds (overrides the config)
        #[arg(long)]
        interval_ms: Option<u32>,
    },

    /// Export the animation
    Export {
        project: PathBuf,

        /// Output file (defaults to the configured file name, or stdout with --css-only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit only the keyframes and animation rules
        #[arg(long)]
        css_only: bool,
    },
}

fn parse_axis(value: &str) -> Result<Axis, String> {
    Axis::from_name(value).ok_or_else(|| format!("unknown axis `{}` (expected x, y or z)", value))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init { path, force } => cmd_init(&path, force),
        Command::Add {
            project,
            axis,
            time,
            value,
            easing,
        } => cmd_add(&cli.config, &project, axis, time, value, easing.as_deref()),
        Command::Sample { project, time } => cmd_sample(&cli.config, &project, time),
        Command::Play {
            project,
            interval_ms,
        } => cmd_play(&cli.config, &project, interval_ms),
        Command::Export {
            project,
            output,
            css_only,
        } => cmd_export(&cli.config, &project, output, css_only),
    }
}

fn open_editor(config: &SpinframeConfig, project: &Path) -> Result<EditorState> {
    let store = load_project(project)?;
    Ok(EditorState::with_store(store, config.editor_settings()))
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        );
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    fs::write(&config_path, SpinframeConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    tracing::info!("Created {}", config_path.display());
    Ok(())
}

fn cmd_add(
    config_dir: &Path,
    project: &Path,
    axis: Axis,
    time: f32,
    value: f32,
    easing: Option<&str>,
) -> Result<()> {
    let config = SpinframeConfig::load_or_default(config_dir)?;
    let store = if project.exists() {
        load_project(project)?
    } else {
        tracing::info!("Creating project {}", project.display());
        KeypointStore::new()
    };

    let mut editor = EditorState::with_store(store, config.editor_settings());
    let id = editor.add_keypoint_at(axis, time, value);
    if let Some(name) = easing {
        editor.set_easing_preset(axis, id, name);
    }
    save_project(project, editor.store())?;

    if let Some(keypoint) = editor.store().get(axis, id) {
        tracing::info!(
            "Added {} on {} at {}s: {}deg ({})",
            id,
            axis,
            keypoint.time,
            keypoint.value,
            keypoint.easing.label()
        );
    }
    Ok(())
}

fn cmd_sample(config_dir: &Path, project: &Path, time: f32) -> Result<()> {
    let config = SpinframeConfig::load_or_default(config_dir)?;
    let editor = open_editor(&config, project)?;
    println!("{}", editor.sample(time).to_css_transform());
    Ok(())
}

fn cmd_play(config_dir: &Path, project: &Path, interval_ms: Option<u32>) -> Result<()> {
    let config = SpinframeConfig::load_or_default(config_dir)?;
    let mut editor = open_editor(&config, project)?;

    let interval = match interval_ms {
        Some(ms) => ms as f32 / 1000.0,
        None => config.playback.frame_interval(),
    };

    let frames = editor.run_playback(interval, |frame| {
        tracing::info!(
            time = frame.time(),
            "{}",
            frame.rotation().to_css_transform()
        );
    })?;

    println!(
        "{} frames, final {}",
        frames,
        editor.preview().to_css_transform()
    );
    Ok(())
}

fn cmd_export(
    config_dir: &Path,
    project: &Path,
    output: Option<PathBuf>,
    css_only: bool,
) -> Result<()> {
    let config = SpinframeConfig::load_or_default(config_dir)?;
    let editor = open_editor(&config, project)?;

    let (content, default_output) = if css_only {
        let css = editor
            .export()?
            .to_css_named(&config.export.animation_name);
        (css, None)
    } else {
        let html = editor.export_document(&config.export)?;
        (html, Some(PathBuf::from(&config.export.file_name)))
    };

    match output.or(default_output) {
        Some(path) => {
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Exported {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
