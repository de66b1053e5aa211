//! Variable timestep simulation tick
//!
//! Core game loop that advances the simulation by one frame. Within a step,
//! movement is integrated before collisions are tested, collisions before
//! particles age, and particles before timers update.

use glam::Vec2;

use super::collision::projectile_hits_hazard;
use super::lifecycle::RunPhase;
use super::state::{GameEvent, GameState, Projectile};
use crate::consts::*;
use crate::secs_to_ms;

/// Intents sampled once per step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub shoot: bool,
}

/// Advance the game state by `dt` seconds (clamped to [`MAX_DT`])
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };

    match state.phase {
        RunPhase::Playing => step(state, input, dt),
        RunPhase::GameOverPending { .. } => state.update_offer(secs_to_ms(dt)),
        RunPhase::Menu | RunPhase::QuizActive { .. } | RunPhase::GameOverFinal => {}
    }
}

/// Fire a projectile from the ship's nose unless the cap is reached
pub fn fire(state: &mut GameState) -> bool {
    if state.projectiles.len() >= MAX_PROJECTILES {
        return false;
    }
    state.projectiles.push(Projectile::new(state.player.nose()));
    state.events.push(GameEvent::Shot);
    true
}

/// One-off shot from a pointer click, honouring the cooldown
pub fn click_fire(state: &mut GameState) -> bool {
    if state.phase != RunPhase::Playing || state.player.shoot_cooldown > 0.0 {
        return false;
    }
    let fired = fire(state);
    state.player.shoot_cooldown = SHOOT_COOLDOWN_MS;
    fired
}

fn step(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt_ms = secs_to_ms(dt);

    // Player movement
    let player = &mut state.player;
    if input.move_left {
        player.pos.x -= player.speed * dt;
    }
    if input.move_right {
        player.pos.x += player.speed * dt;
    }
    player.pos.x = player
        .pos
        .x
        .clamp(player.w / 2.0, LOGICAL_WIDTH - player.w / 2.0);

    // Shooting
    state.player.shoot_cooldown -= dt_ms;
    if input.shoot && state.player.shoot_cooldown <= 0.0 {
        // A dropped shot (cap reached) still costs the cooldown
        fire(state);
        state.player.shoot_cooldown = SHOOT_COOLDOWN_MS;
    }

    // Projectiles
    for projectile in &mut state.projectiles {
        projectile.pos.y -= projectile.speed * dt;
    }
    state.projectiles.retain(|p| p.pos.y >= PROJECTILE_CULL_Y);

    update_hazards(state, dt);

    // Particles
    state.particles.retain_mut(|p| {
        p.life -= dt_ms;
        if p.life <= 0.0 {
            return false;
        }
        p.pos += p.vel * dt;
        p.vel.y += p.gravity * dt;
        true
    });

    // Timers
    if state.phase == RunPhase::Playing {
        state.update_spawner(dt_ms);
    }
    state.twinkle_stars(dt_ms);
    state.invincibility.update(dt_ms);
}

/// Move hazards and resolve terrain and projectile collisions
///
/// Iterates in reverse so removals don't disturb the unvisited hazards. The
/// terrain check runs first: a hazard that reaches the ground in the same
/// step a projectile touches it counts as a terrain impact, not a kill.
fn update_hazards(state: &mut GameState, dt: f32) {
    let mut i = state.hazards.len();
    while i > 0 {
        i -= 1;

        let hazard = &mut state.hazards[i];
        hazard.pos.y += hazard.speed * dt;
        hazard.angle += hazard.rot_speed * dt;

        if hazard.leading_edge() >= TERRAIN_LINE {
            let hazard = state.hazards.remove(i);
            let absorbed = state.invincibility.active;
            if !absorbed {
                state.hearts = state.hearts.saturating_sub(1);
            }
            let impact = Vec2::new(hazard.pos.x, TERRAIN_LINE);
            let count = ((hazard.radius * 4.0).floor() as usize).min(TERRAIN_BURST_MAX);
            state.spawn_burst(impact, count, TERRAIN_BURST_COLOR);
            state.events.push(GameEvent::TerrainImpact {
                pos: impact,
                absorbed,
            });
            if state.hearts == 0 {
                state.enter_game_over();
            }
            continue;
        }

        let hazard = &state.hazards[i];
        let Some(j) = state
            .projectiles
            .iter()
            .rposition(|p| projectile_hits_hazard(p, hazard))
        else {
            continue;
        };

        let hazard = state.hazards.remove(i);
        state.projectiles.remove(j);
        let points = hazard.points();
        state.add_score(points);
        let count = ((hazard.radius * 6.0).floor() as usize).min(HIT_BURST_MAX);
        state.spawn_burst(hazard.pos, count, HIT_BURST_COLOR);
        state.events.push(GameEvent::HazardDestroyed {
            pos: hazard.pos,
            points,
        });
    }
}
