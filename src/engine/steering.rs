use tracing::warn;

use crate::config::TunnelConfig;
use crate::constants::{NO_DOWN_EXIT, NO_UP_EXIT};
use crate::error::MazeResult;
use crate::maze::{Maze, Tile};
use crate::types::{Heading, Point};

use super::utils::adjacent;

/// Picks the exit of `current` whose neighbour lies closest to `target`.
///
/// Reversal is never offered, gate cells forbid their blocked exits, and ties go
/// to the first candidate in up, left, down, right order. With no open exit the
/// current heading is kept.
pub fn next_heading(
    maze: &Maze,
    tunnel: &TunnelConfig,
    current: &Tile,
    heading: Heading,
    target: Point,
) -> MazeResult<Heading> {
    let mut best: Option<(i64, Heading)> = None;
    for candidate in Heading::RESOLVE_ORDER {
        if candidate == heading.opposite() || exit_forbidden(current, candidate) {
            continue;
        }
        let next = adjacent(maze, tunnel, current, candidate)?;
        if next.kind.is_wall() {
            continue;
        }
        let distance = next.distance_sq_to(target);
        if best.is_none_or(|(closest, _)| distance < closest) {
            best = Some((distance, candidate));
        }
    }

    match best {
        Some((_, chosen)) => Ok(chosen),
        None => {
            warn!(
                row = current.row,
                col = current.col,
                heading = heading.as_str(),
                "no open exit from tile; keeping heading"
            );
            Ok(heading)
        }
    }
}

fn exit_forbidden(tile: &Tile, candidate: Heading) -> bool {
    match candidate {
        Heading::Up => NO_UP_EXIT.contains(&tile.address()),
        Heading::Down => NO_DOWN_EXIT.contains(&tile.address()),
        Heading::Left | Heading::Right => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(row: i32, col: i32, heading: Heading, target: (i32, i32)) -> Heading {
        let maze = Maze::reference();
        let tile = *maze.tile_at(row, col).expect("in bounds");
        next_heading(&maze, &TunnelConfig::default(), &tile, heading, target.into())
            .expect("resolvable")
    }

    #[test]
    fn picks_the_exit_nearest_the_target() {
        // (5, 8) is a four-way junction.
        assert_eq!(resolve(5, 8, Heading::Right, (64, 0)), Heading::Up);
        assert_eq!(resolve(5, 8, Heading::Right, (200, 44)), Heading::Right);
        assert_eq!(resolve(5, 8, Heading::Right, (68, 200)), Heading::Down);
        assert_eq!(resolve(5, 8, Heading::Left, (0, 44)), Heading::Left);
    }

    #[test]
    fn never_offers_a_reversal() {
        // Target is directly behind; the resolver must choose among the other exits.
        let chosen = resolve(5, 8, Heading::Right, (0, 44));
        assert_ne!(chosen, Heading::Left);
    }

    #[test]
    fn ties_break_up_left_down_right() {
        // Target sits on the diagonal between the up and left neighbours of (5, 8).
        assert_eq!(resolve(5, 8, Heading::Left, (60, 36)), Heading::Up);
        // Up is excluded by heading down, so left beats down and right on a tie.
        assert_eq!(resolve(5, 8, Heading::Down, (60, 52)), Heading::Left);
    }

    #[test]
    fn gate_cells_forbid_up_exits() {
        let target = (124, -200);
        // (11, 14) and (11, 17) have an open tile above but may not be left upwards.
        assert_ne!(resolve(11, 14, Heading::Right, target), Heading::Up);
        assert_ne!(resolve(11, 17, Heading::Left, target), Heading::Up);
        assert_ne!(resolve(23, 14, Heading::Right, target), Heading::Up);
        assert_ne!(resolve(23, 17, Heading::Left, target), Heading::Up);
        // A neighbouring cell without the restriction does go up.
        assert_eq!(resolve(5, 14, Heading::Right, (116, -200)), Heading::Up);
    }

    #[test]
    fn gate_cells_forbid_down_exits() {
        let target = (124, 120);
        assert_ne!(resolve(11, 15, Heading::Right, target), Heading::Down);
        assert_ne!(resolve(11, 16, Heading::Left, target), Heading::Down);
    }

    #[test]
    fn dead_end_keeps_current_heading() {
        let maze = Maze::from_codes(&[vec![3, 3, 3], vec![3, 44, 3], vec![3, 3, 3]])
            .expect("valid layout");
        let tile = *maze.tile_at(1, 1).expect("in bounds");
        let tunnel = TunnelConfig {
            row: -1,
            ..TunnelConfig::default()
        };
        let chosen = next_heading(&maze, &tunnel, &tile, Heading::Left, Point::new(0, 0))
            .expect("fallback is not an error");
        assert_eq!(chosen, Heading::Left);
    }
}
