use cgmath::{InnerSpace, Point3, Vector3};

/// Contractile edge between two bone nodes.
///
/// The endpoint indices are resolved once at build time; an actuator whose
/// origin or insertion is missing from the skeleton keeps `endpoints = None`
/// and contributes nothing for the whole run. The attachment pair is static:
/// the pulling direction comes from the rest-pose attachment points, not from
/// the moving nodes.
#[derive(Clone, Debug)]
pub struct ActuatorEdge {
    pub name: String,
    pub endpoints: Option<(usize, usize)>,
    pub attach_points: [Point3<f32>; 2],
    /// Activation level, externally set every frame, typically in [0, ~1.2].
    pub force_amplitude: f32,
    /// Precomputed once: relaxed length minus contracted length, unit-scaled.
    pub max_force: f32,
    pub energy_per_contraction: f32,
}

impl ActuatorEdge {
    /// Force along the attachment span at the current activation, or `None`
    /// when the span is degenerate (guards the divide by zero).
    pub fn force_vector(&self) -> Option<Vector3<f32>> {
        let span = self.attach_points[1] - self.attach_points[0];
        let length = span.magnitude();
        if length == 0.0 {
            return None;
        }
        let force = self.force_amplitude * self.max_force;
        Some(span * force / length)
    }
}
