//! End-to-end scenarios over generation, progress and the animators.
//!
//! Everything here runs headless: the scene is stepped by hand with fixed
//! frame times and inspected through its public accessors.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tinsel::field::generate;
use tinsel::prelude::*;
use tinsel::{Arrival, OrnamentAnimator};

const TOLERANCE: f32 = 1e-4;

fn seeded(class: ParticleClass, count: usize, seed: u64) -> Vec<ParticleRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(count, class, &FieldLayout::for_class(class), &mut rng)
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_every_class_stays_inside_its_bounds() {
    let config = SceneConfig::default();
    for class in ParticleClass::ALL {
        let layout = config.layout(class);
        let center = layout.chaos.center();
        for record in seeded(class, 2_000, 3) {
            let r = (record.chaos_position - center).length();
            assert!(
                r >= layout.chaos.inner_radius - TOLERANCE && r <= layout.chaos.outer_radius + TOLERANCE,
                "{} chaos radius {} outside band",
                class.name(),
                r
            );

            let target = record.target_position;
            assert!(target.y >= 0.0 && target.y <= layout.tree.height + TOLERANCE);
            let lateral = (target.x * target.x + target.z * target.z).sqrt();
            let limit = (1.0 - target.y / layout.tree.height) * layout.tree.radius;
            assert!(
                lateral <= limit + 1e-3,
                "{} target {:?} outside cone",
                class.name(),
                target
            );
        }
    }
}

#[test]
fn test_generation_count_is_exact() {
    for class in ParticleClass::ALL {
        for count in [0usize, 1, 7, 500] {
            assert_eq!(seeded(class, count, 11).len(), count);
        }
    }
}

#[test]
fn test_zero_count_scene_steps_cleanly() {
    let config = SceneConfig::default();
    let mut scene = Scene::from_records(&config, Vec::new(), Vec::new(), Vec::new(), Vec::new());
    scene.set_mode(Mode::Formed);
    for f in 0..10 {
        scene.frame(f as f32 * 0.016, 0.016);
    }
    assert!(scene.foliage().is_empty());
    assert!(scene.ornaments().populations().iter().all(|p| p.is_empty()));
}

// ============================================================================
// Progress
// ============================================================================

#[test]
fn test_advance_converges_monotonically_both_ways() {
    for (start, mode) in [(0.0, Mode::Formed), (1.0, Mode::Chaos)] {
        let mut controller = ProgressController::starting_at(start, 1.5);
        let target = mode.target();
        let mut gap = (controller.progress() - target).abs();

        while gap > TOLERANCE {
            let p = controller.advance(0.05, mode);
            assert!((0.0..=1.0).contains(&p));
            let next = (p - target).abs();
            assert!(next < gap, "gap did not shrink: {} -> {}", gap, next);
            gap = next;
        }
    }
}

#[test]
fn test_formed_within_ten_one_second_steps() {
    let mut controller = ProgressController::new(1.5);
    let mut reached_at = None;
    for call in 1..=10 {
        if controller.advance(1.0, Mode::Formed) > 0.99 {
            reached_at = Some(call);
            break;
        }
    }
    let call = reached_at.expect("progress never exceeded 0.99");
    assert!(call < 10, "took {} calls", call);
}

#[test]
fn test_zero_step_after_flip_changes_nothing() {
    let mut controller = ProgressController::starting_at(1.0, 1.5);
    assert_eq!(controller.advance(0.0, Mode::Chaos), 1.0);
    assert_eq!(controller.progress(), 1.0);
}

#[test]
fn test_class_remaps() {
    let boxes = Arrival::for_class(ParticleClass::Box);
    let lights = Arrival::for_class(ParticleClass::Light);

    assert_eq!(boxes.apply(0.0), 0.0);
    assert!((boxes.apply(1.0) - 1.0).abs() < 1e-6);
    assert_eq!(lights.apply(1.0), 1.0);

    let mut last = 0.0;
    for i in 0..=100 {
        let p = i as f32 / 100.0;
        let b = boxes.apply(p);
        assert!(b >= last, "box remap decreased at {}", p);
        last = b;
        if p < 1.0 {
            assert!(lights.apply(p) >= p);
        }
    }
}

// ============================================================================
// Animators
// ============================================================================

#[test]
fn test_color_and_scale_stable_across_frames() {
    let balls = seeded(ParticleClass::Ball, 40, 5);
    let boxes = seeded(ParticleClass::Box, 20, 6);
    let lights = seeded(ParticleClass::Light, 60, 7);
    let mut animator = OrnamentAnimator::new(balls.clone(), boxes.clone(), lights.clone(), 2.0);

    let colors_before: Vec<Vec<[f32; 3]>> = animator
        .populations()
        .iter()
        .map(|p| p.instances().iter().map(|i| i.color).collect())
        .collect();

    for f in 0..300 {
        let mode = if f < 150 { Mode::Formed } else { Mode::Chaos };
        animator.frame(mode, f as f32 / 60.0, 1.0 / 60.0);
    }

    for (population, before) in animator.populations().iter().zip(&colors_before) {
        let after: Vec<[f32; 3]> = population.instances().iter().map(|i| i.color).collect();
        assert_eq!(&after, before);
    }

    let originals = [&balls, &boxes, &lights];
    for (population, original) in animator.populations().iter().zip(originals) {
        for (record, source) in population.records().iter().zip(original.iter()) {
            assert_eq!(record.color, source.color);
            assert_eq!(record.scale, source.scale);
        }
    }
}

#[test]
fn test_scene_forms_then_disperses() {
    let config = SceneConfig::default();
    let scene_records = |class: ParticleClass, n: usize| seeded(class, n, 21 + n as u64);
    let mut scene = Scene::from_records(
        &config,
        scene_records(ParticleClass::Foliage, 200),
        scene_records(ParticleClass::Ball, 12),
        scene_records(ParticleClass::Box, 8),
        scene_records(ParticleClass::Light, 16),
    );

    scene.set_mode(Mode::Formed);
    let mut t = 0.0;
    for _ in 0..600 {
        t += 1.0 / 60.0;
        scene.frame(t, 1.0 / 60.0);
    }
    assert!(scene.foliage().params().progress > 0.99);
    assert!(scene.ornaments().progress() > 0.99);

    // Formed ornaments sit on their targets.
    let boxes = scene.ornaments().population(ParticleClass::Box).expect("box population");
    for (record, instance) in boxes.records().iter().zip(boxes.instances()) {
        let position = instance.model_matrix().w_axis.truncate();
        assert!((position - record.target_position).length() < 0.05);
    }

    scene.toggle_mode();
    assert_eq!(scene.mode(), Mode::Chaos);
    for _ in 0..600 {
        t += 1.0 / 60.0;
        scene.frame(t, 1.0 / 60.0);
    }
    assert!(scene.foliage().params().progress < 0.01);
    assert!(scene.ornaments().progress() < 0.01);
}

#[test]
fn test_shared_policy_drives_one_progress() {
    let config = SceneConfig {
        sync: SyncPolicy::Shared,
        ..SceneConfig::default()
    };
    let mut scene = Scene::from_records(
        &config,
        seeded(ParticleClass::Foliage, 50, 1),
        seeded(ParticleClass::Ball, 5, 2),
        seeded(ParticleClass::Box, 5, 3),
        seeded(ParticleClass::Light, 5, 4),
    );
    scene.set_mode(Mode::Formed);

    let mut reference = ProgressController::new(config.rates.foliage);
    for f in 0..30 {
        scene.frame(f as f32 * 0.02, 0.02);
        reference.advance(0.02, Mode::Formed);
        assert!((scene.foliage().params().progress - reference.progress()).abs() < 1e-6);
        assert_eq!(scene.ornaments().progress(), scene.foliage().params().progress);
    }

    for f in 30..600 {
        scene.frame(f as f32 * 0.02, 0.02);
    }
    assert!(scene.ornaments().progress() > 0.99);
}
