/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Built-in sample biped, authored in centimeters with the Y axis up.
//!
//! A reduced lower-body-and-trunk skeleton: enough bones and muscles to cover
//! the walking and idle channel groups so the default clips animate without an
//! external anatomy file. Muscle properties derive from the rest pose: relaxed
//! length is the origin-insertion distance, contracted length is a fixed
//! fraction of it, and the contraction energy is the displacement squared.

use std::collections::BTreeMap;

use cgmath::{InnerSpace, Point3};

use super::{Anatomy, BoneSpec, MuscleSpec};

/// Contracted length as a fraction of relaxed length.
pub const CONTRACTION_RATIO: f32 = 0.8;

/// Attachment points sit slightly off the endpoint rest positions, in
/// centimeters on the x and y axes.
pub const ATTACH_OFFSET: f32 = 0.1;

pub fn sample_biped() -> Anatomy {
    let mut bones = BTreeMap::new();
    let mut bone = |name: &str, parent: Option<&str>, rest_position: [f32; 3]| {
        bones.insert(
            name.to_string(),
            BoneSpec {
                rest_position,
                parent: parent.map(|p| p.to_string()),
            },
        );
    };

    // Trunk
    bone("pelvis", None, [0.0, 98.0, 0.0]);
    bone("sacrum", Some("pelvis"), [0.0, 100.0, -3.0]);
    bone("pubic_symphysis", Some("pelvis"), [0.0, 94.0, 6.0]);
    bone("spine_base", Some("pelvis"), [0.0, 104.0, 0.0]);
    bone("spine_l3", Some("spine_base"), [0.0, 112.0, 0.0]);
    bone("spine_l1", Some("spine_l3"), [0.0, 120.0, 0.0]);
    bone("spine_t12", Some("spine_l1"), [0.0, 126.0, 0.0]);
    bone("spine_t8", Some("spine_t12"), [0.0, 138.0, 0.0]);
    bone("sternum_body", Some("spine_t8"), [0.0, 136.0, 10.0]);

    // Legs, mirrored across the x axis
    for (side, x) in [("left", -1.0f32), ("right", 1.0f32)] {
        let leg = |suffix: &str, y: f32, z: f32, x_offset: f32| {
            let name = format!("{side}_{suffix}");
            (name, [x * (10.0 + x_offset), y, z])
        };
        let specs = [
            leg("hip", 92.0, 0.0, 0.0),
            leg("femur_upper", 80.0, 0.0, 0.5),
            leg("femur_mid", 65.0, 0.0, 0.5),
            leg("patella", 50.0, 4.0, 0.0),
            leg("knee", 50.0, 0.0, 0.0),
            leg("tibia_upper", 42.0, 0.0, 0.0),
            leg("tibia_mid", 25.0, 0.0, 0.0),
            leg("ankle", 8.0, 0.0, 0.0),
            leg("foot", 4.0, 12.0, 0.0),
        ];
        let parents = [
            "pelvis",
            "hip",
            "femur_upper",
            "femur_mid",
            "femur_mid",
            "knee",
            "tibia_upper",
            "tibia_mid",
            "ankle",
        ];
        for ((name, rest_position), parent) in specs.into_iter().zip(parents) {
            let parent = if parent == "pelvis" {
                parent.to_string()
            } else {
                format!("{side}_{parent}")
            };
            bones.insert(
                name,
                BoneSpec {
                    rest_position,
                    parent: Some(parent),
                },
            );
        }
    }

    let mut muscles = Vec::new();
    for side in ["left", "right"] {
        let sided = |bone: &str| format!("{side}_{bone}");
        muscles.push(muscle(&bones, &sided("quad_upper"), &sided("hip"), &sided("femur_mid")));
        muscles.push(muscle(
            &bones,
            &sided("quad_lower"),
            &sided("femur_mid"),
            &sided("patella"),
        ));
        muscles.push(muscle(&bones, &sided("hamstring"), "sacrum", &sided("tibia_upper")));
        muscles.push(muscle(&bones, &sided("calf"), &sided("knee"), &sided("ankle")));
        muscles.push(muscle(
            &bones,
            &sided("hip_adductor_1"),
            "pubic_symphysis",
            &sided("femur_mid"),
        ));
        muscles.push(muscle(
            &bones,
            &sided("gluteus_maximus"),
            "sacrum",
            &sided("femur_upper"),
        ));
        muscles.push(muscle(
            &bones,
            &sided("rectus_abdominis_upper"),
            "spine_t12",
            "sternum_body",
        ));
        muscles.push(muscle(&bones, &sided("erector_spinae_1"), "spine_l1", "spine_t12"));
    }

    Anatomy { bones, muscles }
}

fn muscle(bones: &BTreeMap<String, BoneSpec>, name: &str, origin: &str, insertion: &str) -> MuscleSpec {
    let origin_position = rest_position(bones, origin);
    let insertion_position = rest_position(bones, insertion);
    let relaxed_length = (insertion_position - origin_position).magnitude();
    let contracted_length = relaxed_length * CONTRACTION_RATIO;
    let displacement = relaxed_length - contracted_length;
    MuscleSpec {
        name: name.to_string(),
        origin: origin.to_string(),
        insertion: insertion.to_string(),
        relaxed_length,
        contracted_length,
        attach_points: [
            [
                origin_position.x + ATTACH_OFFSET,
                origin_position.y + ATTACH_OFFSET,
                origin_position.z,
            ],
            [
                insertion_position.x - ATTACH_OFFSET,
                insertion_position.y - ATTACH_OFFSET,
                insertion_position.z,
            ],
        ],
        energy_per_contraction: displacement * displacement,
    }
}

fn rest_position(bones: &BTreeMap<String, BoneSpec>, name: &str) -> Point3<f32> {
    bones
        .get(name)
        .map(|spec| Point3::from(spec.rest_position))
        .unwrap_or_else(|| Point3::new(0.0, 0.0, 0.0))
}
