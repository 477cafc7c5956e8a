use crate::config::TunnelConfig;
use crate::constants::MOTION_DECIMALS;
use crate::error::MazeResult;
use crate::maze::{Maze, Tile};
use crate::types::Heading;

/// Rounds a motion quantity to the fixed number of decimals used for every
/// comparison and accumulation, so agents land exactly on tile boundaries.
pub(super) fn round_motion(value: f64) -> f64 {
    let scale = 10f64.powi(MOTION_DECIMALS);
    (value * scale).round() / scale
}

/// Distance from a coordinate to the next tile boundary along `heading`.
pub(super) fn gap_to_boundary(cx: f64, cy: f64, heading: Heading) -> f64 {
    let tile = crate::constants::TILE_SIZE as f64;
    let gap = match heading {
        Heading::Up => cy.rem_euclid(tile),
        Heading::Down => (tile - cy.rem_euclid(tile)).rem_euclid(tile),
        Heading::Left => cx.rem_euclid(tile),
        Heading::Right => (tile - cx.rem_euclid(tile)).rem_euclid(tile),
    };
    round_motion(gap)
}

/// Neighbouring tile in `heading`, wrapping columns on the tunnel row.
pub(super) fn adjacent<'a>(
    maze: &'a Maze,
    tunnel: &TunnelConfig,
    tile: &Tile,
    heading: Heading,
) -> MazeResult<&'a Tile> {
    let (dc, dr) = heading.delta();
    let row = tile.row + dr;
    let mut col = tile.col + dc;
    if row == tunnel.row {
        col = col.rem_euclid(maze.cols());
    }
    maze.tile_at(row, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_removes_accumulated_drift() {
        let mut x = 0.0f64;
        for _ in 0..3 {
            x += 0.1;
        }
        assert_ne!(x, 0.3);
        assert_eq!(round_motion(x), 0.3);
        assert_eq!(round_motion(120.000_000_000_01), 120.0);
    }

    #[test]
    fn gap_is_zero_on_a_boundary_in_every_heading() {
        for heading in Heading::RESOLVE_ORDER {
            assert_eq!(gap_to_boundary(120.0, 88.0, heading), 0.0);
        }
        assert_eq!(gap_to_boundary(125.0, 88.0, Heading::Right), 3.0);
        assert_eq!(gap_to_boundary(125.0, 88.0, Heading::Left), 5.0);
        assert_eq!(gap_to_boundary(120.0, 89.5, Heading::Up), 1.5);
        assert_eq!(gap_to_boundary(120.0, 89.5, Heading::Down), 6.5);
    }

    #[test]
    fn adjacent_wraps_only_on_the_tunnel_row() {
        let maze = Maze::reference();
        let tunnel = TunnelConfig::default();
        let west_edge = *maze.tile_at(14, 0).expect("in bounds");
        let wrapped = adjacent(&maze, &tunnel, &west_edge, Heading::Left).expect("wraps");
        assert_eq!(wrapped.address(), (14, 31));

        let east_edge = *maze.tile_at(14, 31).expect("in bounds");
        let wrapped = adjacent(&maze, &tunnel, &east_edge, Heading::Right).expect("wraps");
        assert_eq!(wrapped.address(), (14, 0));

        let corner = *maze.tile_at(0, 0).expect("in bounds");
        assert!(adjacent(&maze, &tunnel, &corner, Heading::Left).is_err());
    }
}
