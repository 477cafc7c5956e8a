use crate::constants::{
    scatter_anchor, CLYDE_SHY_TILES, INKY_LOOKAHEAD_TILES, PINKY_LOOKAHEAD_TILES, TILE_SIZE,
};
use crate::error::{MazeError, MazeResult};
use crate::maze::Tile;
use crate::types::{GhostMode, GhostName, Heading, Point};

/// World state a pursuer reads to pick its target. Everything is copied in, so
/// evaluating a strategy can never touch an agent.
#[derive(Clone, Copy, Debug)]
pub struct TargetContext {
    pub own_tile: Tile,
    pub player_tile: Tile,
    pub player_heading: Heading,
    pub blinky_tile: Tile,
}

pub fn target_coordinate(
    ghost: GhostName,
    mode: GhostMode,
    ctx: &TargetContext,
) -> MazeResult<Point> {
    match mode {
        GhostMode::Scatter => Ok(scatter_anchor(ghost).into()),
        GhostMode::Chase => Ok(chase_target(ghost, ctx)),
        GhostMode::None | GhostMode::Frightened => {
            Err(MazeError::UnsupportedMode { ghost, mode })
        }
    }
}

fn chase_target(ghost: GhostName, ctx: &TargetContext) -> Point {
    match ghost {
        GhostName::Blinky => ctx.player_tile.center(),
        GhostName::Pinky => ahead_of_player(ctx, PINKY_LOOKAHEAD_TILES),
        GhostName::Inky => {
            let pivot = ahead_of_player(ctx, INKY_LOOKAHEAD_TILES);
            let blinky = ctx.blinky_tile.center();
            Point::new(2 * pivot.x - blinky.x, 2 * pivot.y - blinky.y)
        }
        GhostName::Clyde => {
            let shy_radius = (CLYDE_SHY_TILES * TILE_SIZE) as i64;
            if ctx.own_tile.distance_sq_to_tile(&ctx.player_tile) < shy_radius * shy_radius {
                scatter_anchor(GhostName::Clyde).into()
            } else {
                ctx.player_tile.center()
            }
        }
    }
}

/// Point `tiles` ahead of the player. Facing up it also shifts left by the same
/// distance, reproducing the arcade lookahead overflow.
fn ahead_of_player(ctx: &TargetContext, tiles: i32) -> Point {
    let mut point = ctx.player_tile.center_offset(ctx.player_heading, tiles);
    if ctx.player_heading == Heading::Up {
        point.x -= tiles * TILE_SIZE;
    }
    point
}

#[cfg(test)]
mod tests {
    use crate::maze::Maze;

    use super::*;

    fn context(own: (i32, i32), player: (i32, i32), heading: Heading, blinky: (i32, i32)) -> TargetContext {
        let maze = Maze::reference();
        let tile = |(row, col): (i32, i32)| *maze.tile_at(row, col).expect("in bounds");
        TargetContext {
            own_tile: tile(own),
            player_tile: tile(player),
            player_heading: heading,
            blinky_tile: tile(blinky),
        }
    }

    fn chase(ghost: GhostName, ctx: &TargetContext) -> Point {
        target_coordinate(ghost, GhostMode::Chase, ctx).expect("chase is supported")
    }

    #[test]
    fn blinky_chases_the_player_tile_center() {
        let ctx = context((1, 3), (10, 15), Heading::Left, (1, 3));
        assert_eq!(chase(GhostName::Blinky, &ctx), Point::new(124, 84));
    }

    #[test]
    fn pinky_looks_four_tiles_ahead() {
        let ctx = context((1, 3), (23, 15), Heading::Left, (1, 3));
        assert_eq!(chase(GhostName::Pinky, &ctx), Point::new(92, 188));
        let ctx = context((1, 3), (23, 15), Heading::Down, (1, 3));
        assert_eq!(chase(GhostName::Pinky, &ctx), Point::new(124, 220));
    }

    #[test]
    fn pinky_facing_up_is_biased_left() {
        let ctx = context((1, 3), (23, 15), Heading::Up, (1, 3));
        assert_eq!(chase(GhostName::Pinky, &ctx), Point::new(92, 156));
    }

    #[test]
    fn inky_reflects_blinky_through_the_lookahead_point() {
        // Player (23, 15) centre (124, 188); two tiles right is (140, 188).
        // Blinky (11, 15) centre (124, 92); reflection is (156, 284).
        let ctx = context((1, 3), (23, 15), Heading::Right, (11, 15));
        assert_eq!(chase(GhostName::Inky, &ctx), Point::new(156, 284));
    }

    #[test]
    fn inky_facing_up_uses_the_sixteen_pixel_bias() {
        // Lookahead (124, 172) shifted to (108, 172); Blinky centre (124, 92).
        let ctx = context((1, 3), (23, 15), Heading::Up, (11, 15));
        assert_eq!(chase(GhostName::Inky, &ctx), Point::new(92, 252));
    }

    #[test]
    fn clyde_retreats_when_close_and_chases_when_far() {
        let far = context((1, 3), (23, 15), Heading::Left, (1, 3));
        assert_eq!(chase(GhostName::Clyde, &far), Point::new(124, 188));

        let near = context((20, 12), (23, 15), Heading::Left, (1, 3));
        assert_eq!(chase(GhostName::Clyde, &near), Point::new(20, 260));

        // Exactly eight tiles away is not "within" eight tiles.
        let boundary = context((15, 15), (23, 15), Heading::Left, (1, 3));
        assert_eq!(chase(GhostName::Clyde, &boundary), Point::new(124, 188));
    }

    #[test]
    fn scatter_targets_fixed_anchors() {
        let ctx = context((1, 3), (23, 15), Heading::Left, (1, 3));
        let scatter = |ghost| target_coordinate(ghost, GhostMode::Scatter, &ctx).expect("supported");
        assert_eq!(scatter(GhostName::Blinky), Point::new(220, -12));
        assert_eq!(scatter(GhostName::Pinky), Point::new(36, -12));
        assert_eq!(scatter(GhostName::Inky), Point::new(236, 260));
        assert_eq!(scatter(GhostName::Clyde), Point::new(20, 260));
    }

    #[test]
    fn modes_outside_chase_and_scatter_are_rejected() {
        let ctx = context((1, 3), (23, 15), Heading::Left, (1, 3));
        assert_eq!(
            target_coordinate(GhostName::Inky, GhostMode::Frightened, &ctx),
            Err(MazeError::UnsupportedMode {
                ghost: GhostName::Inky,
                mode: GhostMode::Frightened,
            })
        );
        assert!(target_coordinate(GhostName::Blinky, GhostMode::None, &ctx).is_err());
    }
}
