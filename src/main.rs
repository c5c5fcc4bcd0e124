use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use vista::export::{AxesRenderer, Exporter};
use vista::options::Options;
use vista::views::ViewList;

#[derive(Parser)]
#[command(
    name = "vista",
    about = "Export saved camera views as stills or an animated SVG"
)]
struct Cli {
    /// Options TOML file. Missing fields use defaults.
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one still per posed view.
    Batch {
        /// Views JSON file.
        #[arg(long)]
        views: PathBuf,
        /// Directory the stills are written into.
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Render every view into one animated SVG plus a JSON manifest.
    Animate {
        /// Views JSON file.
        #[arg(long)]
        views: PathBuf,
        /// Output SVG path. The manifest is written alongside as `.json`.
        #[arg(long)]
        out: PathBuf,
        /// Interpolated frames per transition.
        #[arg(long)]
        frames: Option<u32>,
    },
    /// Write the options JSON schema.
    Schema {
        /// Output path.
        #[arg(long)]
        out: PathBuf,
    },
}

fn load_options(path: Option<&Path>) -> anyhow::Result<Options> {
    match path {
        Some(path) => Options::load(path).with_context(|| {
            format!("loading options from {}", path.display())
        }),
        None => Ok(Options::default()),
    }
}

fn load_views(path: &Path) -> anyhow::Result<ViewList> {
    ViewList::load(path)
        .with_context(|| format!("loading views from {}", path.display()))
}

fn renderer_for(options: &Options) -> AxesRenderer {
    AxesRenderer::new(options.export.width, options.export.height)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut options = load_options(cli.options.as_deref())?;

    match cli.command {
        Command::Batch { views, out_dir } => {
            let views = load_views(&views)?;
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {}", out_dir.display()))?;
            let mut renderer = renderer_for(&options);
            let artifacts = Exporter::new(options)
                .batch(views.as_slice(), &mut renderer)?;
            for artifact in &artifacts {
                let path = artifact.save(&out_dir)?;
                log::info!("wrote {}", path.display());
            }
        }
        Command::Animate { views, out, frames } => {
            if let Some(frames) = frames {
                options.export.frames_per_transition = frames.max(1);
            }
            let views = load_views(&views)?;
            let mut renderer = renderer_for(&options);
            let export = Exporter::new(options)
                .animate(views.as_slice(), &mut renderer)?;
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(&out, &export.svg)
                .with_context(|| format!("writing {}", out.display()))?;
            let manifest_path = out.with_extension("json");
            export.manifest.save(&manifest_path)?;
            log::info!(
                "wrote {} ({} frames) and {}",
                out.display(),
                export.frames.len(),
                manifest_path.display()
            );
        }
        Command::Schema { out } => {
            let schema = serde_json::to_string_pretty(&Options::json_schema())?;
            std::fs::write(&out, schema)
                .with_context(|| format!("writing {}", out.display()))?;
            log::info!("wrote {}", out.display());
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();
    run(Cli::parse())
}
