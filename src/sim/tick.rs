//! Per-frame simulation step
//!
//! Advances the session by one rendered frame. Movement is in pixels per
//! frame; `dt` only feeds the session clock that times power mode.

use rand::Rng;

use super::agent::Agent;
use super::collision::{agents_touch, pellet_reach_tiles};
use super::direction::{Direction, DirectionSet};
use super::ghost::TargetContext;
use super::maze::PelletKind;
use super::movement::{ActorRole, is_legal, legal_directions_from, wrap_tunnel};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single frame (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest direction key, if any was pressed since the last frame
    pub direction: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Start over; only honoured once the game is over
    pub restart: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) {
    state.events.clear();

    if input.restart && state.is_game_over() {
        state.restart();
    }

    if input.pause {
        state.toggle_pause();
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    if let Some(dir) = input.direction {
        state.player.request_direction(dir);
    }
    state.clock += dt;
    state.frame += 1;

    state.expire_power_mode();

    move_player(state);
    move_ghosts(state);

    if resolve_ghost_contacts(state) {
        return;
    }

    eat_pellets(state);

    if state.maze.remaining_pellets() == 0 {
        state.advance_level();
    }
}

fn move_player(state: &mut GameState) {
    let maze = &state.maze;
    let pos = state.player.body.pos;
    let step = state.player.body.speed;
    state
        .player
        .steer(|dir| is_legal(maze, pos, dir, ActorRole::Player, step));
    wrap_tunnel(&mut state.player.body.pos, &state.maze);
    state.player.animate();
}

fn move_ghosts(state: &mut GameState) {
    for i in 0..state.ghosts.len() {
        // Rebuilt per ghost so the flanker sees the pursuer's move this frame
        let ctx = TargetContext {
            player_pos: state.player.body.pos,
            player_dir: state.player.current_direction(),
            pursuer_pos: state.pursuer().map_or(PURSUER_START, |g| g.body.pos),
        };

        let ghost = &mut state.ghosts[i];
        let desired = ghost.desired_direction(&ctx, &state.tuning, &mut state.rng);
        let legal = legal_directions_from(
            &state.maze,
            ghost.body.pos,
            ActorRole::Ghost,
            state.tuning.direction_lookahead,
        );

        let Some(dir) = fallback_direction(desired, legal, state.tuning.keep_direction_chance, &mut state.rng)
        else {
            continue;
        };
        ghost.force_direction(dir);
        ghost.advance();
        wrap_tunnel(&mut ghost.body.pos, &state.maze);
    }
}

/// Settle a proposed ghost heading against what the maze allows.
///
/// A legal proposal is kept with probability `keep_chance`; otherwise any legal
/// direction is picked uniformly. `None` means the ghost is boxed in.
pub fn fallback_direction<R: Rng>(
    desired: Direction,
    legal: DirectionSet,
    keep_chance: f32,
    rng: &mut R,
) -> Option<Direction> {
    if legal.contains(desired) && rng.random::<f32>() < keep_chance {
        return Some(desired);
    }
    if legal.is_empty() {
        return None;
    }
    legal.nth(rng.random_range(0..legal.len()))
}

/// Returns true when the player lost a life, which ends the frame
fn resolve_ghost_contacts(state: &mut GameState) -> bool {
    let player_pos = state.player.body.pos;
    let radius = state.tuning.capture_radius;

    for i in 0..state.ghosts.len() {
        let ghost = &mut state.ghosts[i];
        if !agents_touch(player_pos, ghost.body.pos, radius) {
            continue;
        }

        let role = ghost.role;
        if ghost.vulnerable {
            ghost.reset_to_home();
            state.score += GHOST_POINTS;
            state.events.push(GameEvent::GhostEaten { role });
            log::debug!("Ate the {} ({} points)", role.name(), GHOST_POINTS);
            continue;
        }

        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::PlayerCaught { role });
        log::debug!("Caught by the {}, {} lives left", role.name(), state.lives);

        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver { score: state.score });
            log::info!("Game over: score {} on level {}", state.score, state.level);
        } else {
            state.reset_positions();
        }
        return true;
    }
    false
}

fn eat_pellets(state: &mut GameState) {
    let center = state.player.body.center();
    let eaten = pellet_reach_tiles(center)
        .into_iter()
        .find_map(|tile| state.maze.consume_pellet(tile.x, tile.y));

    let Some(kind) = eaten else {
        return;
    };
    state.score += kind.points();
    match kind {
        PelletKind::Normal => state.events.push(GameEvent::PelletEaten),
        PelletKind::Power => {
            state.events.push(GameEvent::PowerPelletEaten);
            state.activate_power_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile_origin;
    use glam::{IVec2, Vec2};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f64 = 1.0 / 60.0;

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::new(12345);
        tick(&mut state, &idle(), DT);
        let pos = state.player.body.pos;
        let clock = state.clock;

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, GamePhase::Paused);

        for _ in 0..10 {
            tick(&mut state, &idle(), DT);
        }
        assert_eq!(state.player.body.pos, pos);
        assert_eq!(state.clock, clock);

        // Unpause
        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_ne!(state.player.body.pos, pos);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let script = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];
        for frame in 0..900 {
            let input = TickInput {
                direction: (frame % 45 == 0).then(|| script[(frame / 45) % script.len()]),
                ..Default::default()
            };
            tick(&mut state1, &input, DT);
            tick(&mut state2, &input, DT);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
    }

    #[test]
    fn test_player_moves_and_eats_first_pellet() {
        let mut state = GameState::new(1);
        tick(&mut state, &idle(), DT);
        assert_eq!(state.player.body.pos, PLAYER_START + Vec2::new(4.0, 0.0));
        assert_eq!(state.score, PELLET_POINTS);
        assert_eq!(state.maze.remaining_pellets(), 118);
        assert_eq!(state.events, vec![GameEvent::PelletEaten]);
    }

    #[test]
    fn test_player_stalls_against_wall() {
        let mut state = GameState::new(1);
        // Row 1 lane; the row above is solid wall
        state.player.body.pos = tile_origin(IVec2::new(3, 1));
        state.player.force_direction(Direction::Up);
        tick(&mut state, &idle(), DT);
        assert_eq!(state.player.body.pos, tile_origin(IVec2::new(3, 1)));
    }

    #[test]
    fn test_blocked_request_applies_when_opening_arrives() {
        let mut state = GameState::new(1);
        // Row 3, heading right toward the column 4 junction
        state.player.body.pos = Vec2::new(96.0, 90.0);
        let down = TickInput {
            direction: Some(Direction::Down),
            ..Default::default()
        };
        tick(&mut state, &down, DT);
        assert_eq!(state.player.current_direction(), Direction::Right);
        assert_eq!(state.player.body.pos, Vec2::new(100.0, 90.0));

        // Column 4 opens up once the box has fully cleared column 3, at x = 120
        for _ in 0..6 {
            tick(&mut state, &idle(), DT);
        }
        assert_eq!(state.player.current_direction(), Direction::Down);
        assert_eq!(state.player.requested, None);
    }

    #[test]
    fn test_tunnel_wraps_player() {
        let mut state = GameState::new(1);
        state.player.body.pos = Vec2::new(-28.0, 9.0 * TILE_SIZE);
        state.player.force_direction(Direction::Left);
        tick(&mut state, &idle(), DT);
        assert_eq!(state.player.body.pos.x, state.maze.width_px());
    }

    #[test]
    fn test_eating_vulnerable_ghost() {
        let mut state = GameState::new(7);
        state.activate_power_mode();
        state.ghosts[1].in_house = false;
        state.ghosts[1].body.pos = PLAYER_START;

        tick(&mut state, &idle(), DT);

        let ghost = &state.ghosts[1];
        assert_eq!(ghost.position(), AMBUSHER_START);
        assert!(!ghost.vulnerable);
        assert!(ghost.in_house);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.score, GHOST_POINTS + PELLET_POINTS);
        assert!(state.events.contains(&GameEvent::GhostEaten {
            role: ghost.role
        }));
    }

    #[test]
    fn test_caught_loses_life_and_keeps_pellets() {
        let mut state = GameState::new(7);
        state.maze.consume_pellet(1, 1);
        state.ghosts[0].in_house = false;
        state.ghosts[0].body.pos = PLAYER_START;

        tick(&mut state, &idle(), DT);

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.position(), PLAYER_START);
        assert!(state.ghosts.iter().all(|g| g.position() == g.role.start()));
        // The frame ended before pellets were checked
        assert_eq!(state.maze.remaining_pellets(), 118);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_last_life_ends_game_and_restart() {
        let mut state = GameState::new(7);
        state.lives = 1;
        state.score = 1_230;
        state.ghosts[2].in_house = false;
        state.ghosts[2].body.pos = PLAYER_START;

        tick(&mut state, &idle(), DT);
        assert_eq!(state.lives, 0);
        assert!(state.is_game_over());
        assert!(state.events.contains(&GameEvent::GameOver { score: 1_230 }));

        // Frozen: neither input nor pause does anything
        let frame = state.frame;
        let pause = TickInput {
            pause: true,
            direction: Some(Direction::Left),
            ..Default::default()
        };
        tick(&mut state, &pause, DT);
        assert!(state.is_game_over());
        assert_eq!(state.frame, frame);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, PELLET_POINTS);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::new(3);
        tick(&mut state, &idle(), DT);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, DT);
        assert_eq!(state.frame, 2);
        assert!(state.score > 0);
    }

    #[test]
    fn test_clearing_board_advances_level() {
        let mut state = GameState::new(11);
        for ty in 0..MAZE_HEIGHT as i32 {
            for tx in 0..MAZE_WIDTH as i32 {
                if (tx, ty) != (7, 15) {
                    state.maze.consume_pellet(tx, ty);
                }
            }
        }
        assert_eq!(state.maze.remaining_pellets(), 1);

        tick(&mut state, &idle(), DT);

        assert_eq!(state.level, 2);
        assert_eq!(state.maze.remaining_pellets(), 119);
        assert_eq!(state.player.position(), PLAYER_START);
        assert!(state.events.contains(&GameEvent::LevelCleared { level: 1 }));
    }

    #[test]
    fn test_power_pellet_frightens_until_deadline() {
        let mut state = GameState::new(5);
        // Power pellet at column 1, row 15
        state.player.body.pos = tile_origin(IVec2::new(1, 15));
        tick(&mut state, &idle(), 1.0);

        assert!(state.events.contains(&GameEvent::PowerPelletEaten));
        assert_eq!(state.score, POWER_PELLET_POINTS);
        assert!(state.ghosts.iter().all(|g| g.vulnerable));
        assert_eq!(state.player.power_until, Some(11.0));

        tick(&mut state, &idle(), 8.5);
        assert!(state.ghosts.iter().all(|g| g.vulnerable));

        tick(&mut state, &idle(), 1.5);
        assert!(state.ghosts.iter().all(|g| !g.vulnerable));
        assert!(state.events.contains(&GameEvent::PowerModeEnded));
        assert!(!state.power_active());
    }

    #[test]
    fn test_boxed_in_ghost_stalls() {
        let mut state = GameState::new(5);
        let corner = Vec2::ZERO;
        state.ghosts[3].in_house = false;
        state.ghosts[3].body.pos = corner;
        assert!(legal_directions_from(&state.maze, corner, ActorRole::Ghost, 4.0).is_empty());

        tick(&mut state, &idle(), DT);
        assert_eq!(state.ghosts[3].position(), corner);
    }

    #[test]
    fn test_ghosts_leave_the_house() {
        let mut state = GameState::new(21);
        for _ in 0..240 {
            tick(&mut state, &idle(), DT);
            if state.lives < STARTING_LIVES {
                break;
            }
        }
        assert!(state.ghosts.iter().any(|g| !g.in_house));
    }

    #[test]
    fn test_fallback_keeps_legal_desire_on_low_roll() {
        let legal: DirectionSet = [Direction::Up, Direction::Left].into_iter().collect();
        let mut rng = Pcg32::seed_from_u64(0);
        let kept = (0..1_000)
            .filter(|_| fallback_direction(Direction::Up, legal, 1.0, &mut rng) == Some(Direction::Up))
            .count();
        assert_eq!(kept, 1_000);
    }

    #[test]
    fn test_fallback_keep_rate_at_default_chance() {
        let legal: DirectionSet = [Direction::Up, Direction::Left].into_iter().collect();
        let mut rng = Pcg32::seed_from_u64(17);
        // Kept three times in four, plus half of the re-rolls land on it again
        let kept = (0..10_000)
            .filter(|_| fallback_direction(Direction::Up, legal, 0.75, &mut rng) == Some(Direction::Up))
            .count();
        assert!((8_500..9_000).contains(&kept), "kept: {kept}");
    }

    #[test]
    fn test_fallback_reroll_is_uniform() {
        let legal: DirectionSet = [Direction::Right, Direction::Down, Direction::Left]
            .into_iter()
            .collect();
        let mut rng = Pcg32::seed_from_u64(23);
        let mut counts = [0usize; 4];
        for _ in 0..9_000 {
            let dir = fallback_direction(Direction::Up, legal, 0.75, &mut rng);
            let index = Direction::ALL.iter().position(|d| Some(*d) == dir).unwrap();
            counts[index] += 1;
        }
        assert_eq!(counts[0], 0);
        for count in &counts[1..] {
            assert!((2_800..3_200).contains(count), "counts: {counts:?}");
        }
    }

    #[test]
    fn test_fallback_replaces_illegal_desire() {
        let legal: DirectionSet = [Direction::Right, Direction::Down].into_iter().collect();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let dir = fallback_direction(Direction::Up, legal, 0.75, &mut rng);
            assert!(dir.is_some_and(|d| legal.contains(d)));
        }
        assert_eq!(
            fallback_direction(Direction::Up, DirectionSet::default(), 0.75, &mut rng),
            None
        );
    }
}
