//! Clip assembly: drives the simulation loop and packages the results.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::anatomy::Anatomy;
use crate::pattern::{self, Behavior, FORWARD_DRIVE};
use crate::report::{MotionReport, PatternSample};
use crate::skeleton::physics::Physics;
use crate::skeleton::SkeletalGraph;
use crate::units::Seconds;

pub const DEFAULT_FPS: f32 = 30.0;

/// One bone's time series, uniformly sampled. `N` is 3 for translation and 4
/// for rotation (x, y, z, w).
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(bound(serialize = "[f32; N]: Serialize"))]
pub struct MotionCurve<const N: usize> {
    pub bone: String,
    pub times: Vec<f32>,
    pub values: Vec<[f32; N]>,
}

pub type TranslationCurve = MotionCurve<3>;
pub type RotationCurve = MotionCurve<4>;

/// The assembled output of one generation call, ready for a playback layer.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Clip {
    pub name: String,
    pub duration: f32,
    pub fps: f32,
    pub translations: Vec<TranslationCurve>,
    pub rotations: Vec<RotationCurve>,
}

impl Clip {
    /// Write the clip as pretty JSON into `output_dir` with a timestamped
    /// filename, returning the path written.
    pub fn write_json(&self, output_dir: &Path) -> io::Result<PathBuf> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = output_dir.join(format!("clip_{}_{timestamp}.json", self.name));
        let json = serde_json::to_string_pretty(self)
            .map_err(|error| io::Error::new(io::ErrorKind::Other, error))?;
        let mut file = File::create(&path)?;
        file.write_all(json.as_bytes())?;
        Ok(path)
    }
}

/// Run one full behavior simulation: build a fresh graph, generate the
/// activation frames, step through them, and assemble the curves and the
/// diagnostic report. Never fails; malformed anatomy degrades fidelity only.
pub fn simulate(
    anatomy: &Anatomy,
    physics: Physics,
    behavior: &str,
    duration: f32,
    fps: f32,
    context: &str,
) -> (Clip, MotionReport) {
    let mut graph = SkeletalGraph::new(anatomy, physics);
    let channels = anatomy.muscle_channels();
    let frames = pattern::generate(behavior, duration, fps, context, &channels);
    let frame_count = frames.len();
    let dt = *Seconds::per_frame(fps);
    let walking = matches!(Behavior::from_str(behavior), Ok(Behavior::Walk));

    let mut total_energy = 0.0;
    let mut positions: Vec<Vec<[f32; 3]>> = vec![Vec::with_capacity(frame_count); graph.bone_count()];
    let mut orientations: Vec<Vec<[f32; 4]>> =
        vec![Vec::with_capacity(frame_count); graph.bone_count()];
    let mut samples = Vec::with_capacity(frame_count);

    for (frame_index, frame) in frames.iter().enumerate() {
        graph.apply_activations(frame);
        if walking {
            if let Some(&drive) = frame.get(FORWARD_DRIVE) {
                if drive != 0.0 {
                    graph.apply_forward_drive(drive);
                }
            }
        }
        total_energy += graph.step(dt);
        for (bone_index, node) in graph.nodes().iter().enumerate() {
            positions[bone_index].push([node.position.x, node.position.y, node.position.z]);
            orientations[bone_index].push([
                node.rotation.v.x,
                node.rotation.v.y,
                node.rotation.v.z,
                node.rotation.s,
            ]);
        }
        samples.push(PatternSample::new(frame_index, frame_count, frame));
    }

    let times: Vec<f32> = (0..frame_count).map(|index| index as f32 * dt).collect();
    let translations = graph
        .bone_names()
        .iter()
        .zip(positions)
        .map(|(bone, values)| TranslationCurve {
            bone: bone.clone(),
            times: times.clone(),
            values,
        })
        .collect();
    let rotations = graph
        .bone_names()
        .iter()
        .zip(orientations)
        .map(|(bone, values)| RotationCurve {
            bone: bone.clone(),
            times: times.clone(),
            values,
        })
        .collect();

    let clip = Clip {
        name: format!("{behavior}_{context}"),
        duration,
        fps,
        translations,
        rotations,
    };
    let report = MotionReport::new(behavior, context, samples, total_energy);
    (clip, report)
}
