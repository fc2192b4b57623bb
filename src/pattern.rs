//! Activation pattern synthesis
//!
//! Produces the full frame sequence for a behavior up front, as a vector of
//! channel maps. Base channels carry actuator amplitudes; each base channel
//! also gets three backward-difference derivative channels, and walking frames
//! carry the reserved forward-drive channel.

use std::collections::HashMap;
use std::f32::consts::TAU;
use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

/// One tick's worth of channel values, keyed by channel name.
pub type ActivationFrame = HashMap<String, f32>;

/// Reserved channel carrying the walking impulse, not an actuator name.
pub const FORWARD_DRIVE: &str = "forwardDrive";

pub const VELOCITY_SUFFIX: &str = "_velocity";
pub const ACCELERATION_SUFFIX: &str = "_acceleration";
pub const JERK_SUFFIX: &str = "_jerk";

/// Advertised oscillator frequency range in Hz. Carried for interface
/// compatibility; the generator always runs at [`OSCILLATOR_FREQUENCY`].
pub const OSCILLATOR_RANGE: [f32; 2] = [2.0, 7.0];
pub const OSCILLATOR_FREQUENCY: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Behavior {
    Idle,
    Walk,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Context {
    #[default]
    Healthy,
    Impaired,
    Trained,
}

/// Left and right leg actuator sets, one group per side.
pub const WALK_GROUPS: [&[&str]; 2] = [
    &[
        "left_quad_upper",
        "left_quad_lower",
        "left_hamstring",
        "left_calf",
        "left_hip_adductor_1",
    ],
    &[
        "right_quad_upper",
        "right_quad_lower",
        "right_hamstring",
        "right_calf",
        "right_hip_adductor_1",
    ],
];

/// Trunk and hip actuator sets.
pub const IDLE_GROUPS: [&[&str]; 2] = [
    &[
        "left_rectus_abdominis_upper",
        "right_rectus_abdominis_upper",
        "left_erector_spinae_1",
        "right_erector_spinae_1",
    ],
    &[
        "left_gluteus_maximus",
        "right_gluteus_maximus",
        "left_hip_adductor_1",
        "right_hip_adductor_1",
    ],
];

/// Baseline oscillator. The range parameter is part of the signature but the
/// frequency never sweeps.
pub fn fap(t: f32, _frequency_range: [f32; 2], frequency: f32) -> f32 {
    (TAU * frequency * t).sin()
}

/// Generate the ordered frame sequence for one behavior run.
///
/// Exactly `floor(duration * fps)` frames come back regardless of input
/// quality. Unknown behavior names degrade to a generic two-group split of
/// the available channels; unknown context names count as healthy.
pub fn generate(
    behavior: &str,
    duration: f32,
    fps: f32,
    context: &str,
    available_channels: &[String],
) -> Vec<ActivationFrame> {
    let frame_count = (duration * fps).floor() as usize;
    let dt = 1.0 / fps;
    let behavior_kind = Behavior::from_str(behavior).ok();
    let context_kind = Context::from_str(context).unwrap_or_default();
    let groups = channel_groups(behavior_kind, available_channels);

    let mut frames: Vec<ActivationFrame> = Vec::with_capacity(frame_count);
    for frame in 0..frame_count {
        let t = frame as f32 * dt;
        let mut pattern = ActivationFrame::new();
        for (group_index, group) in groups.iter().enumerate() {
            let offset = group_index as f32 * 0.5;
            let mut amplitude = fap(t, OSCILLATOR_RANGE, OSCILLATOR_FREQUENCY);

            // Context modulation precedes behavior shaping; walking shaping
            // then replaces the amplitude outright, so context only shows in
            // the idle and fallback paths.
            match context_kind {
                Context::Healthy => {}
                Context::Impaired => amplitude *= 0.5,
                Context::Trained => amplitude = (amplitude * 1.2).max(0.3),
            }
            match behavior_kind {
                Some(Behavior::Idle) => amplitude = amplitude.abs().max(0.3),
                Some(Behavior::Walk) => {
                    amplitude = 0.5 + 0.5 * (TAU * (t / duration + offset)).sin();
                    let sign = if group_index == 0 { 2.0 } else { -2.0 };
                    // Later groups overwrite; the map keeps the last side's
                    // drive value.
                    pattern.insert(FORWARD_DRIVE.to_string(), sign * amplitude);
                }
                None => {}
            }

            for name in group {
                pattern.insert(name.clone(), amplitude);
            }
        }
        differentiate(&mut pattern, &frames, frame, dt);
        frames.push(pattern);
    }
    frames
}

fn channel_groups(behavior: Option<Behavior>, available: &[String]) -> Vec<Vec<String>> {
    match behavior {
        Some(Behavior::Walk) => named_groups(&WALK_GROUPS, available),
        Some(Behavior::Idle) => named_groups(&IDLE_GROUPS, available),
        None => vec![
            available.iter().take(5).cloned().collect(),
            available.iter().skip(5).take(5).cloned().collect(),
        ],
    }
}

fn named_groups(groups: &[&[&str]], available: &[String]) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|group| {
            group
                .iter()
                .filter(|name| available.iter().any(|channel| channel == *name))
                .map(|name| name.to_string())
                .collect()
        })
        .collect()
}

/// Append velocity/acceleration/jerk channels for every base channel in the
/// frame. Backward differences against the already-generated history; each
/// order stays zero until enough frames exist to support it.
fn differentiate(pattern: &mut ActivationFrame, history: &[ActivationFrame], frame: usize, dt: f32) {
    let base: Vec<(String, f32)> = pattern
        .iter()
        .map(|(name, value)| (name.clone(), *value))
        .collect();
    let back = |n: usize, name: &str| -> f32 {
        frame
            .checked_sub(n)
            .and_then(|index| history.get(index))
            .and_then(|earlier| earlier.get(name))
            .copied()
            .unwrap_or(0.0)
    };
    for (name, current) in base {
        let mut velocity = 0.0;
        let mut acceleration = 0.0;
        let mut jerk = 0.0;
        if frame > 0 {
            let previous = back(1, &name);
            velocity = (current - previous) / dt;
            if frame > 1 {
                let previous_velocity = (previous - back(2, &name)) / dt;
                acceleration = (velocity - previous_velocity) / dt;
                if frame > 2 {
                    let previous_acceleration =
                        (previous_velocity - (back(2, &name) - back(3, &name)) / dt) / dt;
                    jerk = (acceleration - previous_acceleration) / dt;
                }
            }
        }
        pattern.insert(format!("{name}{VELOCITY_SUFFIX}"), velocity);
        pattern.insert(format!("{name}{ACCELERATION_SUFFIX}"), acceleration);
        pattern.insert(format!("{name}{JERK_SUFFIX}"), jerk);
    }
}
