use motion_lab::anatomy::biped::sample_biped;
use motion_lab::anatomy::MuscleSpec;
use motion_lab::clip::simulate;
use motion_lab::skeleton::physics::Physics;

#[test]
fn curves_carry_one_sample_per_frame() {
    let anatomy = sample_biped();
    let (idle, _) = simulate(&anatomy, Physics::default(), "idle", 3.0, 30.0, "healthy");
    let (walk, _) = simulate(&anatomy, Physics::default(), "walk", 2.0, 30.0, "healthy");

    assert_eq!(idle.translations.len(), anatomy.bones.len());
    assert_eq!(idle.rotations.len(), anatomy.bones.len());
    for curve in &idle.translations {
        assert_eq!(curve.times.len(), 90);
        assert_eq!(curve.values.len(), 90);
    }
    for curve in &walk.translations {
        assert_eq!(curve.times.len(), 60);
    }
}

#[test]
fn timestamps_are_uniform_from_zero() {
    let anatomy = sample_biped();
    let (clip, _) = simulate(&anatomy, Physics::default(), "walk", 2.0, 30.0, "healthy");
    let times = &clip.translations[0].times;
    assert_eq!(times[0], 0.0);
    let dt = 1.0 / 30.0;
    for (index, time) in times.iter().enumerate() {
        assert!((time - index as f32 * dt).abs() < 1e-5);
    }
}

#[test]
fn simulation_is_deterministic() {
    let anatomy = sample_biped();
    let first = simulate(&anatomy, Physics::default(), "walk", 2.0, 30.0, "trained");
    let second = simulate(&anatomy, Physics::default(), "walk", 2.0, 30.0, "trained");
    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
}

#[test]
fn rotations_stay_identity_throughout() {
    let anatomy = sample_biped();
    let (clip, _) = simulate(&anatomy, Physics::default(), "walk", 2.0, 30.0, "healthy");
    for curve in &clip.rotations {
        for value in &curve.values {
            assert_eq!(*value, [0.0, 0.0, 0.0, 1.0]);
        }
    }
}

#[test]
fn report_names_and_phases_cover_the_clip() {
    let anatomy = sample_biped();
    let (clip, report) = simulate(&anatomy, Physics::default(), "walk", 2.0, 30.0, "trained");
    assert_eq!(clip.name, "walk_trained");
    assert_eq!(report.name, "walk_trained");
    assert_eq!(report.patterns.len(), 60);
    assert_eq!(report.patterns[0].phase, 0.0);
    for window in report.patterns.windows(2) {
        assert!(window[0].phase < window[1].phase);
    }
    assert!(report.patterns.last().unwrap().phase < 1.0);
    assert!(report.total_energy > 0.0);
    assert_eq!(report.grammar.syntax, "Bipedal locomotion pattern");
}

#[test]
fn muscle_with_missing_bone_changes_nothing() {
    let baseline = sample_biped();
    let mut broken = baseline.clone();
    broken.muscles.push(MuscleSpec {
        name: "phantom_link".to_string(),
        origin: "pelvis".to_string(),
        insertion: "no_such_bone".to_string(),
        relaxed_length: 10.0,
        contracted_length: 8.0,
        attach_points: [[0.0, 0.0, 0.0], [0.0, 10.0, 0.0]],
        energy_per_contraction: 4.0,
    });

    let (expected_clip, expected_report) =
        simulate(&baseline, Physics::default(), "idle", 1.0, 30.0, "healthy");
    let (clip, report) = simulate(&broken, Physics::default(), "idle", 1.0, 30.0, "healthy");

    assert_eq!(clip.translations, expected_clip.translations);
    assert_eq!(report.total_energy, expected_report.total_energy);
}
