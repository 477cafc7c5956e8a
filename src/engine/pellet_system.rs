use tracing::debug;

use crate::config::TunnelConfig;
use crate::maze::Tile;

use super::utils::adjacent;
use super::*;

impl GameEngine {
    pub(super) fn eat_pellets(&mut self) -> MazeResult<()> {
        let (rx, ry) = self.player.draw_position();
        let Some(tile) = pellet_reached(
            &self.maze,
            &self.config.tunnel,
            rx,
            ry,
            self.player.heading(),
        )?
        else {
            return Ok(());
        };
        if self.maze.consume(tile.row, tile.col)? {
            debug!(row = tile.row, col = tile.col, frame = self.frame, "pellet eaten");
            self.pellets_eaten = self.pellets_eaten.saturating_add(1);
            self.events.push(FrameEvent::PelletEaten {
                row: tile.row,
                col: tile.col,
                kind: tile.kind,
            });
        }
        Ok(())
    }
}

/// Pellet whose midpoint the leading edge of a sprite drawn at `(rx, ry)` has
/// crossed, if any. Facing left or up that is the tile under the motion corner;
/// facing right or down it is the neighbour ahead of it.
pub(super) fn pellet_reached(
    maze: &Maze,
    tunnel: &TunnelConfig,
    rx: i32,
    ry: i32,
    heading: Heading,
) -> MazeResult<Option<Tile>> {
    let origin = *maze.tile_from_point((rx + 4) as f64, (ry + 4) as f64)?;
    let (tile, reached) = match heading {
        Heading::Left => (origin, rx + 4 < origin.x() + 4),
        Heading::Up => (origin, ry + 4 < origin.y() + 4),
        Heading::Right => {
            let ahead = *adjacent(maze, tunnel, &origin, heading)?;
            (ahead, rx + 11 >= ahead.x() + 4)
        }
        Heading::Down => {
            let ahead = *adjacent(maze, tunnel, &origin, heading)?;
            (ahead, ry + 11 >= ahead.y() + 4)
        }
    };
    if reached && tile.kind.is_consumable() && !tile.consumed {
        Ok(Some(tile))
    } else {
        Ok(None)
    }
}
