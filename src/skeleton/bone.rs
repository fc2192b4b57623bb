/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use cgmath::num_traits::zero;
use cgmath::{Point3, Quaternion, Vector3};

/// Every bone carries the same unit mass.
pub const BONE_MASS: f32 = 1.0;

/// Mass node for a single bone. Positions are in simulation units (already
/// rescaled from the anatomy table). The rotation is initialized to identity
/// and never touched by the integrator.
#[derive(Clone, Copy, Debug)]
pub struct BoneNode {
    pub rest_position: Point3<f32>,
    pub position: Point3<f32>,
    pub rotation: Quaternion<f32>,
    pub velocity: Vector3<f32>,
    pub force: Vector3<f32>,
    pub mass: f32,
}

impl BoneNode {
    pub fn new(rest_position: Point3<f32>) -> BoneNode {
        BoneNode {
            rest_position,
            position: rest_position,
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            velocity: zero(),
            force: zero(),
            mass: BONE_MASS,
        }
    }

    /// Reset the accumulator to gravity alone, pointing down the up axis.
    pub fn reset(&mut self, gravity: f32, up_axis: usize) {
        self.force = zero();
        self.force[up_axis] = -gravity * self.mass;
    }
}
