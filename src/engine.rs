#![warn(clippy::all, clippy::pedantic)]

//! Board and piece operations. Every function here is total: an invalid
//! move leaves the world untouched, and game over is a state, not an error.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::{Board, MatchState, Piece, PieceGen};
use crate::config;
use crate::input::Command;
use crate::roster::Roster;

/// Dispatch a single engine command against the current world state.
pub fn apply(world: &mut World, command: Command) {
    match command {
        Command::MoveLeft => move_horizontal(world, -1),
        Command::MoveRight => move_horizontal(world, 1),
        Command::SoftDrop => {
            move_down(world);
        }
        Command::HardDrop => hard_drop(world),
        Command::Rotate => rotate(world),
        Command::TogglePause => toggle_pause(world),
        Command::Restart => restart(world),
    }
}

/// Translate the active piece one column left (`-1`) or right (`+1`).
pub fn move_horizontal(world: &mut World, dir: i32) {
    let state = world.resource::<MatchState>();
    if state.frozen() {
        return;
    }
    let moved = state.current.translated(dir, 0);
    if world.resource::<Board>().collides(&moved) {
        return;
    }
    world.resource_mut::<MatchState>().current = moved;
}

/// Rotate the active piece clockwise in place.
pub fn rotate(world: &mut World) {
    let state = world.resource::<MatchState>();
    if state.frozen() {
        return;
    }
    let rotated = state.current.rotated();
    if world.resource::<Board>().collides(&rotated) {
        return;
    }
    world.resource_mut::<MatchState>().current = rotated;
}

/// One-row descent, shared by the soft drop and the autonomous tick.
/// Returns `true` when the piece locked instead of moving.
pub fn move_down(world: &mut World) -> bool {
    let state = world.resource::<MatchState>();
    if state.frozen() {
        return false;
    }
    let stepped = state.current.translated(0, 1);
    if !world.resource::<Board>().collides(&stepped) {
        world.resource_mut::<MatchState>().current = stepped;
        return false;
    }
    let resting = world.resource::<MatchState>().current.clone();
    lock_at(world, &resting);
    true
}

/// Send the active piece straight to its ghost position and lock it there.
pub fn hard_drop(world: &mut World) {
    let state = world.resource::<MatchState>();
    if state.frozen() {
        return;
    }
    let target = ghost_position(world.resource::<Board>(), &state.current);
    lock_at(world, &target);
}

/// The furthest non-colliding downward translation of `piece`. Render hint
/// and hard-drop target; never stored as engine state.
#[must_use]
pub fn ghost_position(board: &Board, piece: &Piece) -> Piece {
    let mut ghost = piece.clone();
    while !board.collides(&ghost.translated(0, 1)) {
        ghost = ghost.translated(0, 1);
    }
    ghost
}

/// Autonomous drop tick. Independently of the lock-overflow check, a locked
/// cell already resting in the top row ends the match before anything moves.
pub fn drop_tick(world: &mut World) {
    if world.resource::<MatchState>().game_over {
        return;
    }
    if world.resource::<Board>().top_row_occupied() {
        info!("Top row occupied, game over");
        world.resource_mut::<MatchState>().game_over = true;
        return;
    }
    move_down(world);
}

pub fn toggle_pause(world: &mut World) {
    let mut state = world.resource_mut::<MatchState>();
    if state.game_over {
        return;
    }
    state.paused = !state.paused;
    debug!("Pause toggled: {}", state.paused);
}

/// Fresh match: empty board, two new pieces, counters and flags back to
/// their initial values, current roster player back to zero.
pub fn restart(world: &mut World) {
    info!("Restarting match");
    world.resource_mut::<Board>().clear();
    world.resource_scope(|world, mut source: Mut<PieceGen>| {
        world.insert_resource(MatchState::new(&mut source));
    });
    world.resource_mut::<Roster>().reset_current();
}

/// Lock `piece` where it stands, then run the clear/score/respawn sequence.
/// A lock reaching above the top row abandons the board write and ends the
/// match instead.
fn lock_at(world: &mut World, piece: &Piece) {
    if !world.resource_mut::<Board>().lock(piece) {
        info!("Lock overflowed the top of the board, game over");
        world.resource_mut::<MatchState>().game_over = true;
        return;
    }

    let cleared = world.resource_mut::<Board>().clear_rows();
    if cleared > 0 {
        debug!("Cleared {cleared} rows");
    }

    world.resource_scope(|world, mut state: Mut<MatchState>| {
        state.record_clear(cleared);
        let mut source = world.resource_mut::<PieceGen>();
        state.advance_piece(&mut source);
    });

    world
        .resource_mut::<Roster>()
        .award_current(config::lock_bonus());
}
