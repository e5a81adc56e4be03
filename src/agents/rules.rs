//! Priority-ordered decision rules.
//!
//! The dispatcher is an explicit table of (predicate, policy) pairs evaluated
//! first-match-wins. Order encodes danger: screen-edge and pit guards fire
//! before any hazard handling, hazards before plain terrain following. Every
//! probe goes through [`TileGrid::tile`], so lookahead windows that run past
//! the screen edge read as empty instead of faulting.

use crate::action::Action;
use crate::grid::{
    Position, TileGrid, GRID_COLS, GROUND_ROW, TILE_BUNBUN, TILE_CHIBIBO, TILE_COIN, TILE_EMPTY,
    TILE_GROUND, TILE_KUMO, TILE_NOKOBON,
};

pub type Predicate = fn(&TileGrid, Position) -> bool;
pub type Policy = fn(&TileGrid, Position) -> Action;

pub struct Rule {
    pub name: &'static str,
    pub applies: Predicate,
    pub policy: Policy,
}

/// Hold position: neither advance nor retreat. Used where a crawler sits
/// below Mario within closing range on either side; pressing Down keeps him
/// planted while it moves. Named so the choice is visible instead of an
/// accidental default.
pub const HOLD: Action = Action::Down;

/// Full rule set: both crawler kinds, the ceiling spider, the bee swarm.
pub const FULL_RULES: &[Rule] = &[
    Rule {
        name: "edge-guard",
        applies: at_right_edge,
        policy: force_right,
    },
    Rule {
        name: "pit-guard",
        applies: on_ground_row,
        policy: force_down,
    },
    Rule {
        name: "chibibo",
        applies: chibibo_present,
        policy: chibibo_policy,
    },
    Rule {
        name: "nokobon",
        applies: nokobon_present,
        policy: nokobon_policy,
    },
    Rule {
        name: "kumo",
        applies: kumo_present,
        policy: kumo_policy,
    },
    Rule {
        name: "bunbun",
        applies: bunbun_present,
        policy: bunbun_policy,
    },
    Rule {
        name: "terrain",
        applies: always,
        policy: terrain_policy,
    },
];

/// Narrow historical rule set: ground crawlers and terrain only. Kept as a
/// strict subset of [`FULL_RULES`] for regression comparison.
pub const CADET_RULES: &[Rule] = &[
    Rule {
        name: "edge-guard",
        applies: at_right_edge,
        policy: force_right,
    },
    Rule {
        name: "pit-guard",
        applies: on_ground_row,
        policy: force_down,
    },
    Rule {
        name: "chibibo",
        applies: chibibo_present,
        policy: chibibo_policy,
    },
    Rule {
        name: "terrain",
        applies: always,
        policy: terrain_policy,
    },
];

/// Evaluate a rule table for one frame. Total: the tables end with an
/// always-true terrain rule, and even a table without one falls back to the
/// terrain policy.
pub fn dispatch(rules: &[Rule], grid: &TileGrid) -> Action {
    let player = grid.locate_player();
    for rule in rules {
        if (rule.applies)(grid, player) {
            return (rule.policy)(grid, player);
        }
    }
    terrain_policy(grid, player)
}

/// Name of the rule that would handle this frame. Test/introspection helper.
pub fn selected_rule(rules: &[Rule], grid: &TileGrid) -> &'static str {
    let player = grid.locate_player();
    rules
        .iter()
        .find(|rule| (rule.applies)(grid, player))
        .map(|rule| rule.name)
        .unwrap_or("terrain")
}

// -- predicates --

fn at_right_edge(_grid: &TileGrid, player: Position) -> bool {
    player.col == GRID_COLS - 1
}

fn on_ground_row(_grid: &TileGrid, player: Position) -> bool {
    player.row == GROUND_ROW
}

fn chibibo_present(grid: &TileGrid, _player: Position) -> bool {
    grid.contains(TILE_CHIBIBO)
}

fn nokobon_present(grid: &TileGrid, _player: Position) -> bool {
    grid.contains(TILE_NOKOBON)
}

fn kumo_present(grid: &TileGrid, _player: Position) -> bool {
    grid.contains(TILE_KUMO)
}

fn bunbun_present(grid: &TileGrid, _player: Position) -> bool {
    grid.contains(TILE_BUNBUN)
}

fn always(_grid: &TileGrid, _player: Position) -> bool {
    true
}

// -- forced moves --

fn force_right(_grid: &TileGrid, _player: Position) -> Action {
    Action::Right
}

fn force_down(_grid: &TileGrid, _player: Position) -> Action {
    Action::Down
}

// -- hazard sub-policies --

/// Ground crawler. Jump whenever collision is imminent in either direction
/// or any solid tile blocks the immediate path; otherwise give it room to
/// approach, or pick a direction from its position relative to Mario.
fn chibibo_policy(grid: &TileGrid, player: Position) -> Action {
    let (row, col) = (player.row as i32, player.col as i32);
    let Some(hazard) = grid.locate_first(TILE_CHIBIBO) else {
        return terrain_policy(grid, player);
    };

    let imminent = grid.tile(row, col + 2) == TILE_CHIBIBO
        || grid.tile(row, col + 3) == TILE_CHIBIBO
        || grid.tile(row, col - 1) == TILE_CHIBIBO
        || grid.tile(row, col - 2) == TILE_CHIBIBO
        || grid.tile(row, col + 1) != TILE_EMPTY;
    if imminent {
        return Action::Jump;
    }

    // Back off while it approaches from behind, or when a ledge is coming up
    // four tiles ahead.
    if grid.column_contains(col - 1, TILE_CHIBIBO) || grid.tile(row, col + 4) == TILE_GROUND {
        return Action::Left;
    }

    if grid.row_contains(row, TILE_CHIBIBO) || hazard.row > player.row {
        if hazard.row > player.row {
            let delta = hazard.col as i32 - col;
            if delta > 3 {
                return Action::Right;
            }
            if delta < -3 {
                return Action::Left;
            }
            return HOLD;
        }
        if col > hazard.col as i32 {
            // Walked past it: go back for the stomp.
            return Action::Left;
        }
        return Action::Right;
    }

    HOLD
}

/// Shelled crawler. Same shape as the chibibo rules with a one-tile jump
/// window (smaller footprint) and a jump-through escape where the chibibo
/// rules walk right: the shell explodes, so passing it needs air time.
fn nokobon_policy(grid: &TileGrid, player: Position) -> Action {
    let (row, col) = (player.row as i32, player.col as i32);
    let Some(hazard) = grid.locate_first(TILE_NOKOBON) else {
        return terrain_policy(grid, player);
    };

    let imminent = grid.tile(row, col + 1) == TILE_NOKOBON
        || grid.tile(row, col - 1) == TILE_NOKOBON
        || grid.tile(row, col - 2) == TILE_NOKOBON
        || grid.tile(row, col + 1) != TILE_EMPTY;
    if imminent {
        return Action::Jump;
    }

    if grid.column_contains(col - 1, TILE_NOKOBON) || grid.tile(row, col + 4) == TILE_GROUND {
        return Action::Left;
    }

    if grid.row_contains(row, TILE_NOKOBON) || hazard.row > player.row {
        if hazard.row > player.row {
            let delta = hazard.col as i32 - col;
            if delta > 3 {
                return Action::Right;
            }
            if delta < -3 {
                return Action::Left;
            }
            return HOLD;
        }
        if col > hazard.col as i32 {
            return Action::Left;
        }
        return Action::JumpRight;
    }

    Action::JumpRight
}

/// Ceiling spider. Jump only when it is directly ahead; otherwise advance
/// when it is at or below Mario's level (retreating left when it sits well
/// behind and below), and retreat when it hangs above.
fn kumo_policy(grid: &TileGrid, player: Position) -> Action {
    let (row, col) = (player.row as i32, player.col as i32);
    let Some(hazard) = grid.locate_first(TILE_KUMO) else {
        return terrain_policy(grid, player);
    };

    if grid.tile(row, col + 1) == TILE_KUMO {
        return Action::Jump;
    }

    if grid.row_contains(row, TILE_KUMO) || hazard.row > player.row {
        if hazard.row > player.row && (hazard.col as i32 - col) < -3 {
            return Action::Left;
        }
        return Action::Right;
    }

    Action::Left
}

/// Bee swarm. Minimal avoidance: hop over it when it is two columns ahead,
/// otherwise hold and let it pass.
fn bunbun_policy(grid: &TileGrid, player: Position) -> Action {
    let (row, col) = (player.row as i32, player.col as i32);
    if grid.tile(row, col + 2) == TILE_BUNBUN {
        return Action::JumpRight;
    }
    HOLD
}

/// Default forward progress when nothing hostile is on screen.
fn terrain_policy(grid: &TileGrid, player: Position) -> Action {
    let (row, col) = (player.row as i32, player.col as i32);

    let ahead = grid.tile(row, col + 1);
    if ahead != TILE_EMPTY {
        // Walk into coins rather than hopping over them.
        if ahead == TILE_COIN {
            return Action::Right;
        }
        return Action::Jump;
    }

    if grid.tile(row + 1, col + 1) == TILE_GROUND {
        return Action::Right;
    }

    // Nothing at ground level one column ahead: a pit. Clear it in one hop.
    if grid.tile(GROUND_ROW as i32, col + 1) == TILE_EMPTY {
        return Action::JumpRight;
    }

    Action::Right
}
