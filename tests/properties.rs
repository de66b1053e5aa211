//! Property tests for the simulation invariants

use asteroid_smash::consts::*;
use asteroid_smash::sim::{GameState, NoiseField, RunPhase, Terrain, TickInput, tick};
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = (TickInput, f32)> {
    (any::<bool>(), any::<bool>(), any::<bool>(), 0.0f32..=MAX_DT).prop_map(
        |(move_left, move_right, shoot, dt)| {
            (
                TickInput {
                    move_left,
                    move_right,
                    shoot,
                },
                dt,
            )
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn run_invariants_hold(seed in any::<u64>(), steps in prop::collection::vec(input_strategy(), 1..400)) {
        let mut state = GameState::new(seed);
        prop_assert!(state.start_run());
        let mut last_score = state.score;

        for (input, dt) in &steps {
            tick(&mut state, input, *dt);

            prop_assert!(state.hearts <= MAX_HEARTS);
            prop_assert!(state.score >= last_score);
            prop_assert!(state.projectiles.len() <= MAX_PROJECTILES);
            prop_assert!(state.particles.len() <= state.max_particles);
            let half = state.player.w / 2.0;
            prop_assert!(state.player.pos.x >= half && state.player.pos.x <= LOGICAL_WIDTH - half);
            if state.hearts == 0 {
                prop_assert!(state.phase.is_game_over());
            }
            last_score = state.score;
        }
    }

    #[test]
    fn oversized_dt_is_clamped(seed in any::<u64>(), dt in 0.05f32..10.0) {
        let mut a = GameState::new(seed);
        let mut b = GameState::new(seed);
        a.start_run();
        b.start_run();
        let input = TickInput { move_left: true, ..TickInput::default() };
        tick(&mut a, &input, dt);
        tick(&mut b, &input, MAX_DT);
        prop_assert_eq!(a.player.pos, b.player.pos);
        prop_assert_eq!(a.hazards.len(), b.hazards.len());
    }

    #[test]
    fn noise_is_pure_and_bounded(seed in any::<u32>(), x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
        let field = NoiseField::new(seed);
        let v = field.terrain_value(x, y);
        prop_assert_eq!(v.to_bits(), NoiseField::new(seed).terrain_value(x, y).to_bits());
        prop_assert!((0.0..=1.0).contains(&v));
        let s = field.sample(x as i32, y as i32);
        prop_assert!((0.0..1.0).contains(&s));
    }

    #[test]
    fn calibration_is_deterministic(seed in 0u32..0x7fff_ffff) {
        let a = Terrain::calibrated(seed, TERRAIN_LAND_FRACTION);
        let b = Terrain::calibrated(seed, TERRAIN_LAND_FRACTION);
        prop_assert_eq!(a.threshold.to_bits(), b.threshold.to_bits());
        prop_assert!(a.land_fraction(2) <= TERRAIN_LAND_FRACTION + 0.05);
    }
}

#[test]
fn menu_ignores_ticks() {
    let mut state = GameState::new(11);
    let input = TickInput {
        move_left: true,
        move_right: false,
        shoot: true,
    };
    for _ in 0..50 {
        tick(&mut state, &input, MAX_DT);
    }
    assert_eq!(state.phase, RunPhase::Menu);
    assert!(state.hazards.is_empty());
    assert!(state.projectiles.is_empty());
}
