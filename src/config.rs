use std::path::PathBuf;

use clap::Parser;

use crate::renderer::DEFAULT_MAX_DEPTH;

#[derive(Debug, Parser)]
#[command(name = "whitted")]
#[command(about = "Recursive ray tracer for scenes of spheres and point lights")]
pub struct Cli {
    /// Scene description file
    pub scene: PathBuf,

    /// Maximum number of reflective bounces per ray
    #[arg(default_value_t = DEFAULT_MAX_DEPTH)]
    pub depth: u32,

    /// Write the image here instead of the file named in the scene
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Trace pixels on all cores; the image is identical to a sequential render
    #[arg(long)]
    pub parallel: bool,

    /// More logging, repeat for trace output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub scene_path: PathBuf,
    pub max_depth: u32,
    pub output: Option<PathBuf>,
    pub parallel: bool,
    pub log_filter: log::LevelFilter,
}

impl From<Cli> for RenderConfig {
    fn from(cli: Cli) -> RenderConfig {
        let log_filter = match cli.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        RenderConfig {
            scene_path: cli.scene,
            max_depth: cli.depth,
            output: cli.output,
            parallel: cli.parallel,
            log_filter,
        }
    }
}

impl RenderConfig {
    pub fn from_args() -> RenderConfig {
        Cli::parse().into()
    }

    /// Output destination, preferring the command line over the scene file.
    pub fn output_path(&self, scene_output: &std::path::Path) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => scene_output.to_path_buf(),
        }
    }
}
