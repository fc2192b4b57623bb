/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Physical units for the motion simulation
//!
//! Anatomy tables are authored in centimeters; the simulation itself runs in
//! meters. The wrappers here keep the two from being mixed up silently.

use std::ops::Deref;

/// Length in centimeters (anatomy table units)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Centimeters(pub f32);

/// Length in meters (simulation units)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Meters(pub f32);

/// Time in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Seconds(pub f32);

/// Acceleration in meters per second squared
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MetersPerSecondSquared(pub f32);

/// Standard Earth gravity: 9.81 m/s²
pub const EARTH_GRAVITY: MetersPerSecondSquared = MetersPerSecondSquared(9.81);

/// Linear factor converting centimeter anatomy tables to meters
pub const CENTIMETERS_TO_METERS: f32 = 0.01;

impl Deref for Centimeters {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Meters {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Seconds {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for MetersPerSecondSquared {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Centimeters {
    /// Convert centimeters to meters
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * CENTIMETERS_TO_METERS)
    }
}

impl Meters {
    /// Convert meters to centimeters
    pub fn to_centimeters(self) -> Centimeters {
        Centimeters(self.0 / CENTIMETERS_TO_METERS)
    }
}

impl Seconds {
    /// Duration of one frame at the given sample rate
    pub fn per_frame(fps: f32) -> Self {
        Self(1.0 / fps)
    }
}

impl std::fmt::Display for Centimeters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}cm", self.0)
    }
}

impl std::fmt::Display for Meters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}m", self.0)
    }
}

impl std::fmt::Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}s", self.0)
    }
}
