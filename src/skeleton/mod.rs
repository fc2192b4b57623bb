/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use std::collections::HashMap;

use cgmath::Point3;
use log::warn;

use crate::anatomy::Anatomy;
use crate::pattern::ActivationFrame;
use crate::skeleton::actuator::ActuatorEdge;
use crate::skeleton::bone::BoneNode;
use crate::skeleton::physics::Physics;

pub mod actuator;
pub mod bone;
pub mod physics;

/// Bones designated to receive ground compensation, left and right.
pub const GROUND_CONTACT_BONES: [&str; 2] = ["left_ankle", "right_ankle"];

/// Physics graph built once per generation call: nodes are bones, edges are
/// actuators. Topology is fixed after construction; per frame only the edge
/// amplitudes and the node state mutate.
pub struct SkeletalGraph {
    pub physics: Physics,
    bone_names: Vec<String>,
    nodes: Vec<BoneNode>,
    index: HashMap<String, usize>,
    edges: Vec<ActuatorEdge>,
    ground_contacts: Vec<usize>,
}

impl SkeletalGraph {
    /// Purely structural O(V+E) build. An actuator naming an unknown bone is
    /// kept but never contributes force; construction itself cannot fail.
    pub fn new(anatomy: &Anatomy, physics: Physics) -> Self {
        let scale = physics.unit_scale;
        let mut bone_names = Vec::with_capacity(anatomy.bones.len());
        let mut nodes = Vec::with_capacity(anatomy.bones.len());
        let mut index = HashMap::with_capacity(anatomy.bones.len());
        for (name, spec) in &anatomy.bones {
            index.insert(name.clone(), nodes.len());
            nodes.push(BoneNode::new(Point3::from(spec.rest_position) * scale));
            bone_names.push(name.clone());
        }
        let edges = anatomy
            .muscles
            .iter()
            .map(|muscle| {
                let endpoints = match (index.get(&muscle.origin), index.get(&muscle.insertion)) {
                    (Some(&source), Some(&target)) => Some((source, target)),
                    _ => {
                        warn!(
                            "actuator {} connects {} to {} but at least one is missing; \
                             it will contribute no force",
                            muscle.name, muscle.origin, muscle.insertion
                        );
                        None
                    }
                };
                ActuatorEdge {
                    name: muscle.name.clone(),
                    endpoints,
                    attach_points: [
                        Point3::from(muscle.attach_points[0]) * scale,
                        Point3::from(muscle.attach_points[1]) * scale,
                    ],
                    force_amplitude: 0.0,
                    max_force: (muscle.relaxed_length - muscle.contracted_length) * scale,
                    energy_per_contraction: muscle.energy_per_contraction,
                }
            })
            .collect();
        let ground_contacts = GROUND_CONTACT_BONES
            .iter()
            .filter_map(|name| index.get(*name).copied())
            .collect();
        Self {
            physics,
            bone_names,
            nodes,
            index,
            edges,
            ground_contacts,
        }
    }

    pub fn bone_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn actuator_count(&self) -> usize {
        self.edges.len()
    }

    pub fn bone_names(&self) -> &[String] {
        &self.bone_names
    }

    pub fn nodes(&self) -> &[BoneNode] {
        &self.nodes
    }

    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn node(&self, index: usize) -> &BoneNode {
        &self.nodes[index]
    }

    /// Set every edge's amplitude from the frame by channel name; a missing
    /// channel relaxes the actuator to zero.
    pub fn apply_activations(&mut self, frame: &ActivationFrame) {
        for edge in &mut self.edges {
            edge.force_amplitude = frame.get(&edge.name).copied().unwrap_or(0.0);
        }
    }

    /// Walking impulse: an additional x-axis force on both ground-contact
    /// nodes. Applied before `step`, whose gravity reset runs first, so the
    /// impulse shapes the activation record rather than the trajectory.
    pub fn apply_forward_drive(&mut self, drive: f32) {
        for &index in &self.ground_contacts {
            self.nodes[index].force.x += drive;
        }
    }

    /// One simulation step: gravity reset, actuator force pairs, ground
    /// compensation, then integration. Returns the frame's energy total.
    pub fn step(&mut self, dt: f32) -> f32 {
        let up = self.physics.up_axis.index();
        let gravity = self.physics.scaled_gravity();
        for node in &mut self.nodes {
            node.reset(gravity, up);
        }

        let mut total_energy = 0.0;
        for edge in &self.edges {
            let Some((source, target)) = edge.endpoints else {
                continue;
            };
            let Some(force_vector) = edge.force_vector() else {
                continue;
            };
            self.nodes[source].force -= force_vector;
            self.nodes[target].force += force_vector;
            total_energy += edge.force_amplitude * edge.energy_per_contraction;
        }

        let threshold = self.physics.scaled_contact_threshold();
        for &index in &self.ground_contacts {
            let node = &mut self.nodes[index];
            if node.position[up] <= threshold {
                let upward_force = gravity * node.mass;
                node.force[up] += upward_force;
                total_energy += upward_force * dt;
            }
        }

        for (index, node) in self.nodes.iter_mut().enumerate() {
            let acceleration = node.force / node.mass;
            // Position uses the pre-step velocity; damping applies to the
            // velocity increment only.
            let mut new_position =
                node.position + node.velocity * dt + acceleration * (0.5 * dt * dt);
            node.velocity += acceleration * dt * self.physics.velocity_damping;
            if self.ground_contacts.contains(&index) && new_position[up] < 0.0 {
                new_position[up] = 0.0;
                node.velocity[up] = 0.0;
            }
            node.position = new_position;
        }

        total_energy
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use cgmath::num_traits::zero;
    use cgmath::{InnerSpace, Vector3};

    use crate::anatomy::{Anatomy, BoneSpec, MuscleSpec};
    use crate::pattern::ActivationFrame;
    use crate::skeleton::physics::presets;
    use crate::skeleton::SkeletalGraph;

    const DT: f32 = 1.0 / 30.0;

    fn bone(bones: &mut BTreeMap<String, BoneSpec>, name: &str, rest_position: [f32; 3]) {
        bones.insert(
            name.to_string(),
            BoneSpec {
                rest_position,
                parent: None,
            },
        );
    }

    fn muscle(name: &str, origin: &str, insertion: &str) -> MuscleSpec {
        MuscleSpec {
            name: name.to_string(),
            origin: origin.to_string(),
            insertion: insertion.to_string(),
            relaxed_length: 10.0,
            contracted_length: 8.0,
            attach_points: [[0.0, 50.0, 0.0], [0.0, 60.0, 0.0]],
            energy_per_contraction: 4.0,
        }
    }

    fn test_anatomy() -> Anatomy {
        let mut bones = BTreeMap::new();
        bone(&mut bones, "pelvis", [0.0, 100.0, 0.0]);
        bone(&mut bones, "spine_base", [0.0, 110.0, 0.0]);
        bone(&mut bones, "left_ankle", [-10.0, 8.0, 0.0]);
        bone(&mut bones, "right_ankle", [10.0, 8.0, 0.0]);
        Anatomy {
            bones,
            muscles: vec![muscle("lifter", "pelvis", "spine_base")],
        }
    }

    fn activation(entries: &[(&str, f32)]) -> ActivationFrame {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn relaxed_actuators_leave_pure_free_fall() {
        let mut graph = SkeletalGraph::new(&test_anatomy(), presets::CENTIMETER_BIPED);
        graph.apply_activations(&ActivationFrame::new());
        graph.step(DT);

        let gravity = graph.physics.scaled_gravity();
        let pelvis = graph.node(graph.node_index("pelvis").unwrap());
        assert_eq!(pelvis.force, Vector3::new(0.0, -gravity * pelvis.mass, 0.0));
        let expected_drop = 0.5 * gravity * DT * DT;
        assert!((pelvis.rest_position.y - pelvis.position.y - expected_drop).abs() < 1e-6);
    }

    #[test]
    fn actuator_forces_form_a_reaction_pair() {
        let mut graph = SkeletalGraph::new(&test_anatomy(), presets::CENTIMETER_BIPED);
        graph.apply_activations(&activation(&[("lifter", 1.0)]));
        graph.step(DT);

        let gravity = graph.physics.scaled_gravity();
        let pelvis = graph.node(graph.node_index("pelvis").unwrap());
        let spine = graph.node(graph.node_index("spine_base").unwrap());
        let pelvis_muscle = pelvis.force + Vector3::new(0.0, gravity * pelvis.mass, 0.0);
        let spine_muscle = spine.force + Vector3::new(0.0, gravity * spine.mass, 0.0);
        assert!((pelvis_muscle + spine_muscle).magnitude() < 1e-6);
        assert!(pelvis_muscle.magnitude() > 0.0);
    }

    #[test]
    fn missing_endpoint_excludes_edge_and_its_energy() {
        let mut anatomy = test_anatomy();
        anatomy
            .muscles
            .push(muscle("phantom", "pelvis", "no_such_bone"));
        let mut graph = SkeletalGraph::new(&anatomy, presets::CENTIMETER_BIPED);
        graph.apply_activations(&activation(&[("lifter", 0.5), ("phantom", 1.0)]));
        let energy = graph.step(DT);

        let mut baseline = SkeletalGraph::new(&test_anatomy(), presets::CENTIMETER_BIPED);
        baseline.apply_activations(&activation(&[("lifter", 0.5)]));
        assert_eq!(energy, baseline.step(DT));
    }

    #[test]
    fn degenerate_attachment_span_contributes_nothing() {
        let mut anatomy = test_anatomy();
        let mut collapsed = muscle("collapsed", "pelvis", "spine_base");
        collapsed.attach_points = [[1.0, 2.0, 3.0], [1.0, 2.0, 3.0]];
        anatomy.muscles = vec![collapsed];
        let mut graph = SkeletalGraph::new(&anatomy, presets::CENTIMETER_BIPED);
        graph.apply_activations(&activation(&[("collapsed", 1.0)]));
        let energy = graph.step(DT);

        assert_eq!(energy, 0.0);
        let gravity = graph.physics.scaled_gravity();
        let pelvis = graph.node(graph.node_index("pelvis").unwrap());
        assert_eq!(pelvis.force, Vector3::new(0.0, -gravity * pelvis.mass, 0.0));
    }

    #[test]
    fn grounded_ankle_has_gravity_cancelled() {
        let mut anatomy = test_anatomy();
        anatomy.bones.get_mut("left_ankle").unwrap().rest_position = [-10.0, 0.0, 0.0];
        let mut graph = SkeletalGraph::new(&anatomy, presets::CENTIMETER_BIPED);
        graph.apply_activations(&ActivationFrame::new());
        graph.step(DT);

        let ankle = graph.node(graph.node_index("left_ankle").unwrap());
        assert_eq!(ankle.force, zero::<Vector3<f32>>());
        assert_eq!(ankle.position.y, 0.0);
        assert_eq!(ankle.velocity.y, 0.0);
    }

    #[test]
    fn ankle_altitude_is_clamped_at_the_ground() {
        let mut anatomy = test_anatomy();
        anatomy.bones.get_mut("right_ankle").unwrap().rest_position = [10.0, 0.5, 0.0];
        let mut graph = SkeletalGraph::new(&anatomy, presets::CENTIMETER_BIPED);
        graph.apply_activations(&ActivationFrame::new());
        // Above the scaled contact threshold: free fall until contact, then
        // the clamp holds the altitude at zero forever after.
        for _ in 0..300 {
            graph.step(DT);
            let ankle = graph.node(graph.node_index("right_ankle").unwrap());
            assert!(ankle.position.y >= 0.0);
        }
        let ankle = graph.node(graph.node_index("right_ankle").unwrap());
        assert_eq!(ankle.position.y, 0.0);
    }

    #[test]
    fn rotation_stays_identity() {
        let mut graph = SkeletalGraph::new(&test_anatomy(), presets::CENTIMETER_BIPED);
        graph.apply_activations(&activation(&[("lifter", 1.2)]));
        for _ in 0..10 {
            graph.step(DT);
        }
        for node in graph.nodes() {
            assert_eq!(node.rotation.s, 1.0);
            assert_eq!(node.rotation.v, zero::<Vector3<f32>>());
        }
    }

    #[test]
    fn z_up_configuration_moves_gravity_axis() {
        let mut graph = SkeletalGraph::new(&test_anatomy(), presets::Z_UP_LEGACY);
        graph.apply_activations(&ActivationFrame::new());
        graph.step(DT);

        let pelvis = graph.node(graph.node_index("pelvis").unwrap());
        assert_eq!(pelvis.force.y, 0.0);
        assert_eq!(pelvis.force.z, -graph.physics.scaled_gravity() * pelvis.mass);
    }
}
