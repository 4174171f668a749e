//! Per-tick update and the trigger operations
//!
//! Free functions over `&mut GameState`. The render loop calls [`tick`]
//! once per frame; the periodic triggers call [`fire`] and
//! [`relocate_adversary`]; the input path calls [`try_move`]. All of them
//! run under the session lock and gate on the Running phase, so once the
//! session ends nothing here mutates anything.

use glam::Vec2;

use super::entity::Direction;
use super::projectile::Projectile;
use super::state::{GameEvent, GameState, SessionPhase};

/// Advance one simulation tick: move every projectile, hit-test each
/// against the player, reap what left the board, end the session on a hit.
pub fn tick(state: &mut GameState) {
    if state.phase != SessionPhase::Running {
        return;
    }
    let Some(layout) = state.layout else { return };
    let Some(target) = state.player_center() else {
        return;
    };
    // Hit radius is one block, matching the sprites' visual size.
    let radius = layout.block_size as f32;

    for projectile in &mut state.projectiles {
        projectile.advance();
    }

    // Sweep first, compact afterward; nothing is removed mid-iteration.
    if state.projectiles.iter().any(|p| p.hits(target, radius)) {
        state.projectiles.clear();
        state.phase = SessionPhase::Ended;
        state.events.push(GameEvent::PlayerHit);
        return;
    }

    let margin = layout.block_size as f32;
    state
        .projectiles
        .retain(|p| layout.contains_with_margin(p.body.pos, margin));
}

/// Fire trigger: spawn a projectile at the adversary's center aimed at the
/// player's center. Coincident centers spawn nothing this period.
pub fn fire(state: &mut GameState) {
    if state.phase != SessionPhase::Running {
        return;
    }
    let (Some(source), Some(target)) = (state.adversary_center(), state.player_center()) else {
        return;
    };
    if let Some(projectile) = Projectile::spawn(source, target, state.config.projectile_speed) {
        state.projectiles.push(projectile);
        state.events.push(GameEvent::ProjectileFired);
    }
}

/// Respawn trigger: relocate the adversary to a random interior wall cell.
/// A maze without interior walls leaves it where it is.
pub fn relocate_adversary(state: &mut GameState) {
    if state.phase != SessionPhase::Running {
        return;
    }
    let Some(layout) = state.layout else { return };
    let Some(adversary) = state.adversary.as_mut() else {
        return;
    };
    if adversary.respawn(&state.maze, &layout, &mut state.rng) {
        state.events.push(GameEvent::AdversaryRelocated);
    }
}

/// Validated movement: commit the step only when the destination cell is
/// passable, then collect whatever sits there. Returns whether the move
/// was committed; a rejected move is not an error and changes nothing.
pub fn try_move(state: &mut GameState, dir: Direction) -> bool {
    if state.phase != SessionPhase::Running {
        return false;
    }
    let Some(layout) = state.layout else {
        return false;
    };
    let Some(player) = state.player.as_mut() else {
        return false;
    };

    // Legality is judged at the center of the would-be position.
    let half = layout.block_size as f32 / 2.0;
    let target = player.step_target(dir) + Vec2::splat(half);
    let Some((row, col)) = layout.point_to_cell(target) else {
        return false;
    };
    if !state.maze.is_passable(row, col) {
        return false;
    }

    player.step(dir);
    if state.maze.take_pickup(row, col) {
        state.score += state.config.pickup_score;
        state.events.push(GameEvent::PickupCollected { row, col });
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::layout::Layout;
    use crate::sim::maze::Cell;

    /// 950x950 viewport: block 50, no offsets, player at (450, 450).
    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(Config::default(), seed);
        state.apply_layout(Layout::from_viewport(950, 950).unwrap());
        state
    }

    #[test]
    fn test_tick_advances_every_projectile() {
        let mut state = running_state(1);
        state
            .projectiles
            .push(Projectile::with_velocity(Vec2::new(100.0, 100.0), Vec2::new(10.0, 5.0)));
        state
            .projectiles
            .push(Projectile::with_velocity(Vec2::new(700.0, 100.0), Vec2::new(-10.0, 0.0)));
        tick(&mut state);
        assert_eq!(state.projectiles[0].body.pos, Vec2::new(110.0, 105.0));
        assert_eq!(state.projectiles[1].body.pos, Vec2::new(690.0, 100.0));
        assert_eq!(state.phase, SessionPhase::Running);
    }

    #[test]
    fn test_hit_ends_the_session_and_clears_projectiles() {
        let mut state = running_state(1);
        let target = state.player_center().unwrap();
        // One shot about to land, one far away; both must go on the hit.
        state
            .projectiles
            .push(Projectile::with_velocity(target - Vec2::new(10.0, 0.0), Vec2::new(10.0, 0.0)));
        state
            .projectiles
            .push(Projectile::with_velocity(Vec2::new(60.0, 60.0), Vec2::ZERO));

        tick(&mut state);
        assert_eq!(state.phase, SessionPhase::Ended);
        assert!(state.projectiles.is_empty());
        assert_eq!(
            state.events.iter().filter(|&&e| e == GameEvent::PlayerHit).count(),
            1
        );
    }

    #[test]
    fn test_ended_session_freezes_projectiles_and_score() {
        let mut state = running_state(1);
        let target = state.player_center().unwrap();
        state
            .projectiles
            .push(Projectile::with_velocity(target, Vec2::ZERO));
        tick(&mut state);
        assert_eq!(state.phase, SessionPhase::Ended);

        let score = state.score;
        state
            .projectiles
            .push(Projectile::with_velocity(Vec2::new(100.0, 100.0), Vec2::new(10.0, 0.0)));
        tick(&mut state);
        assert_eq!(state.projectiles[0].body.pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.score, score);
        assert!(!try_move(&mut state, Direction::Down));
    }

    #[test]
    fn test_simultaneous_hits_end_the_session_once() {
        let mut state = running_state(1);
        let target = state.player_center().unwrap();
        for _ in 0..3 {
            state
                .projectiles
                .push(Projectile::with_velocity(target, Vec2::ZERO));
        }
        tick(&mut state);
        tick(&mut state);
        let hits = state
            .events
            .iter()
            .filter(|&&e| e == GameEvent::PlayerHit)
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_runaway_projectiles_are_reaped_at_the_margin() {
        let mut state = running_state(1);
        // Flying off past the right edge of the 950px board.
        state
            .projectiles
            .push(Projectile::with_velocity(Vec2::new(990.0, 400.0), Vec2::new(20.0, 0.0)));
        // Still inside: must survive the same pass.
        state
            .projectiles
            .push(Projectile::with_velocity(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0)));
        tick(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].body.pos, Vec2::new(101.0, 100.0));
    }

    #[test]
    fn test_fire_aims_at_the_player_center() {
        let mut state = running_state(7);
        fire(&mut state);
        assert_eq!(state.projectiles.len(), 1);

        let source = state.adversary_center().unwrap();
        let target = state.player_center().unwrap();
        let p = &state.projectiles[0];
        assert_eq!(p.body.pos, source);
        let expected = (target - source).normalize() * state.config.projectile_speed;
        assert!((p.body.vel - expected).length() < 1e-3);
        assert!(state.events.contains(&GameEvent::ProjectileFired));
    }

    #[test]
    fn test_fire_from_the_player_cell_spawns_nothing() {
        let mut state = running_state(7);
        let player_pos = state.player.as_ref().unwrap().body.pos;
        state.adversary.as_mut().unwrap().body.pos = player_pos;
        fire(&mut state);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_fire_before_layout_spawns_nothing() {
        let mut state = GameState::new(Config::default(), 7);
        fire(&mut state);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_relocation_lands_on_an_interior_wall() {
        let mut state = running_state(3);
        let before = state.adversary.as_ref().unwrap().body.pos;
        relocate_adversary(&mut state);
        let layout = state.layout.unwrap();
        let center = state.adversary_center().unwrap();
        let (row, col) = layout.point_to_cell(center).unwrap();
        assert!(!state.maze.is_passable(row, col));
        assert!(state.events.contains(&GameEvent::AdversaryRelocated));
        // Same seed, same sequence.
        let mut twin = running_state(3);
        assert_eq!(twin.adversary.as_ref().unwrap().body.pos, before);
        relocate_adversary(&mut twin);
        assert_eq!(
            twin.adversary.as_ref().unwrap().body.pos,
            state.adversary.as_ref().unwrap().body.pos
        );
    }

    #[test]
    fn test_moves_onto_open_cells_commit_exactly_one_step() {
        let mut state = running_state(1);
        let start = state.player.as_ref().unwrap().body.pos;
        let step = state.config.player_step;
        assert!(try_move(&mut state, Direction::Right));
        assert_eq!(
            state.player.as_ref().unwrap().body.pos,
            start + Vec2::new(step, 0.0)
        );
    }

    #[test]
    fn test_moves_into_walls_are_rejected_silently() {
        let mut state = running_state(1);
        // March right from (9,9); (9,13) is a wall, so the player stops at
        // the boundary of (9,12) and further requests change nothing.
        for _ in 0..200 {
            try_move(&mut state, Direction::Right);
        }
        let pos = state.player.as_ref().unwrap().body.pos;
        assert!(!try_move(&mut state, Direction::Right));
        assert_eq!(state.player.as_ref().unwrap().body.pos, pos);

        let layout = state.layout.unwrap();
        let (row, col) = layout
            .point_to_cell(state.player_center().unwrap())
            .unwrap();
        assert_eq!((row, col), (9, 12));
        assert!(state.maze.is_passable(row, col));
    }

    #[test]
    fn test_walking_over_a_pickup_collects_and_scores() {
        use rand::SeedableRng;

        let mut state = running_state(1);
        // Fill every open interior cell with a pickup, then clear the one
        // under the player so only the crossing into (9,10) can score.
        let mut maze = crate::sim::maze::Maze::new();
        maze.seed_pickups(1.0, &mut rand_pcg::Pcg32::seed_from_u64(0));
        maze.take_pickup(9, 9);
        state.maze = maze;
        assert_eq!(state.maze.cell_at(9, 10), Some(Cell::Pickup));

        // Ten 5px steps cross from cell (9,9) into (9,10).
        let mut collected = false;
        for _ in 0..10 {
            assert!(try_move(&mut state, Direction::Right));
            collected |= state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::PickupCollected { .. }));
        }
        assert!(collected);
        assert_eq!(state.score, state.config.pickup_score);
        assert_eq!(state.maze.cell_at(9, 10), Some(Cell::Open));

        // Walking back over the same cell scores nothing new.
        for _ in 0..10 {
            try_move(&mut state, Direction::Left);
        }
        assert_eq!(state.score, state.config.pickup_score);
    }

    #[test]
    fn test_moves_before_layout_are_rejected() {
        let mut state = GameState::new(Config::default(), 1);
        assert!(!try_move(&mut state, Direction::Up));
    }
}
