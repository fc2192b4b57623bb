/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use strum::Display;

/// Which world axis points away from the ground plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum UpAxis {
    #[default]
    Y,
    Z,
}

impl UpAxis {
    pub fn index(&self) -> usize {
        match self {
            UpAxis::Y => 1,
            UpAxis::Z => 2,
        }
    }
}

/// Simulation configuration. Axis convention and unit scale are explicit here
/// rather than hardcoded; every other constant keeps its canonical value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub up_axis: UpAxis,
    /// Linear factor applied to every length from the anatomy tables.
    pub unit_scale: f32,
    /// Gravity magnitude before unit scaling.
    pub gravity: f32,
    /// Applied to the velocity increment each step, not to the velocity.
    pub velocity_damping: f32,
    /// Ground contact engages at or below this altitude, before unit scaling.
    pub contact_threshold: f32,
}

impl Physics {
    pub fn scaled_gravity(&self) -> f32 {
        self.gravity * self.unit_scale
    }

    pub fn scaled_contact_threshold(&self) -> f32 {
        self.contact_threshold * self.unit_scale
    }
}

impl Default for Physics {
    fn default() -> Self {
        presets::CENTIMETER_BIPED
    }
}

pub mod presets {
    use super::{Physics, UpAxis};
    use crate::units::{CENTIMETERS_TO_METERS, EARTH_GRAVITY};

    /// Anatomy tables in centimeters, simulated in meters, Y up.
    pub const CENTIMETER_BIPED: Physics = Physics {
        up_axis: UpAxis::Y,
        unit_scale: CENTIMETERS_TO_METERS,
        gravity: EARTH_GRAVITY.0,
        velocity_damping: 0.98,
        contact_threshold: 0.1,
    };

    /// Anatomy tables already in meters.
    pub const METER_SCALE: Physics = Physics {
        unit_scale: 1.0,
        ..CENTIMETER_BIPED
    };

    /// Z-up ground plane, meter units.
    pub const Z_UP_LEGACY: Physics = Physics {
        up_axis: UpAxis::Z,
        ..METER_SCALE
    };
}
