use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use motion_lab::anatomy::{biped, Anatomy};
use motion_lab::clip::{self, DEFAULT_FPS};
use motion_lab::skeleton::physics::Physics;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Behavior to generate ("idle" or "walk"); omit for the standard suite
    #[arg(long)]
    behavior: Option<String>,
    /// Behavioral context: healthy, impaired or trained
    #[arg(long, default_value = "healthy")]
    context: String,
    /// Clip duration in seconds
    #[arg(long, default_value_t = 3.0)]
    duration: f32,
    /// Sample rate in frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: f32,
    /// Anatomy table JSON; the built-in biped is used when omitted
    #[arg(long)]
    anatomy: Option<PathBuf>,
    /// Output directory for clip and report JSON
    #[arg(long, default_value = "output")]
    out: PathBuf,
}

/// The comparison suite generated when no behavior is requested.
const STANDARD_SUITE: [(&str, f32, &str); 4] = [
    ("idle", 3.0, "healthy"),
    ("walk", 2.0, "healthy"),
    ("idle", 3.0, "impaired"),
    ("walk", 2.0, "trained"),
];

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let anatomy = match &args.anatomy {
        Some(path) => Anatomy::from_json_file(path)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?,
        None => biped::sample_biped(),
    };
    info!(
        "anatomy: {} bones, {} muscles",
        anatomy.bones.len(),
        anatomy.muscles.len()
    );
    fs::create_dir_all(&args.out)?;

    let runs: Vec<(String, f32, String)> = match &args.behavior {
        Some(behavior) => vec![(behavior.clone(), args.duration, args.context.clone())],
        None => STANDARD_SUITE
            .iter()
            .map(|(behavior, duration, context)| {
                (behavior.to_string(), *duration, context.to_string())
            })
            .collect(),
    };

    for (behavior, duration, context) in runs {
        let (clip, report) = clip::simulate(
            &anatomy,
            Physics::default(),
            &behavior,
            duration,
            args.fps,
            &context,
        );
        info!(
            "generated {}: {} frames, total energy {:.3}",
            clip.name,
            report.patterns.len(),
            report.total_energy
        );
        let clip_path = clip.write_json(&args.out)?;
        let report_path = report.write_json(&args.out)?;
        info!("wrote {clip_path:?} and {report_path:?}");
    }

    Ok(())
}
