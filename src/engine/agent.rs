use tracing::debug;

use crate::config::{EngineConfig, TunnelConfig};
use crate::error::MazeResult;
use crate::maze::{Maze, Tile};
use crate::types::{AgentView, GhostMode, Heading, Point, Pose};

use super::steering::next_heading;
use super::utils::{adjacent, gap_to_boundary, round_motion};

/// How an agent picks its heading when it reaches a tile boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Steering {
    /// Take the queued heading if there is one, otherwise keep going straight.
    Queued,
    /// Take the open exit nearest to this point.
    Target(Point),
}

/// Displacement applied by one call to [`Agent::advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub dx: f64,
    pub dy: f64,
    pub wrapped: bool,
}

impl Motion {
    pub fn is_still(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

#[derive(Clone, Copy, Debug)]
struct StartPose {
    x: f64,
    y: f64,
    heading: Heading,
    speed: f64,
    mode: GhostMode,
}

/// One creature in the maze. Position is the sprite's top-left corner, kept as a
/// real number; only [`Agent::draw_position`] truncates.
#[derive(Clone, Debug)]
pub struct Agent {
    name: &'static str,
    x: f64,
    y: f64,
    heading: Heading,
    queued: Option<Heading>,
    speed: f64,
    mode: GhostMode,
    frozen: bool,
    held: bool,
    start: StartPose,
}

impl Agent {
    pub fn new(
        name: &'static str,
        position: (f64, f64),
        heading: Heading,
        speed: f64,
        mode: GhostMode,
    ) -> Self {
        let start = StartPose {
            x: position.0,
            y: position.1,
            heading,
            speed,
            mode,
        };
        Self {
            name,
            x: start.x,
            y: start.y,
            heading,
            queued: None,
            speed,
            mode,
            frozen: false,
            held: false,
            start,
        }
    }

    /// Restores the starting pose. The hold flag is left to the caller.
    pub fn reset(&mut self) {
        self.x = self.start.x;
        self.y = self.start.y;
        self.heading = self.start.heading;
        self.speed = self.start.speed;
        self.mode = self.start.mode;
        self.queued = None;
        self.frozen = false;
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn place(&mut self, x: f64, y: f64, heading: Heading) {
        self.x = x;
        self.y = y;
        self.heading = heading;
    }

    pub fn draw_position(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn queued_heading(&self) -> Option<Heading> {
        self.queued
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn mode(&self) -> GhostMode {
        self.mode
    }

    pub fn pose(&self) -> Pose {
        Pose {
            mode: self.mode,
            heading: self.heading,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn tile_topleft<'a>(&self, maze: &'a Maze) -> MazeResult<&'a Tile> {
        maze.tile_from_point(self.x + 4.0, self.y + 4.0)
    }

    pub fn tile_center<'a>(&self, maze: &'a Maze) -> MazeResult<&'a Tile> {
        maze.tile_from_point(self.x + 7.0, self.y + 7.0)
    }

    pub fn set_desired_heading(&mut self, heading: Heading) {
        self.queued = Some(heading);
    }

    pub fn cancel_desired_heading(&mut self) {
        self.queued = None;
    }

    /// Switches mode and asks for an immediate about-turn.
    pub fn enter_mode(&mut self, mode: GhostMode) {
        self.mode = mode;
        self.queued = Some(self.heading.opposite());
    }

    pub fn hold(&mut self) {
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn view(&self) -> AgentView {
        let (x, y) = self.draw_position();
        AgentView {
            name: self.name,
            x,
            y,
            heading: self.heading,
            mode: self.mode.as_str(),
            pose: self.pose().table_index(),
            animating: !self.frozen && !self.held,
            frozen: self.frozen,
            held: self.held,
        }
    }

    /// Moves the agent by one frame's worth of `speed / frame_rate` pixels.
    ///
    /// The step is split at the next tile boundary along the approach heading.
    /// Whatever is left after reaching the boundary is carried into the next
    /// tile along the heading chosen by `steering`, provided that tile is open.
    pub fn advance(
        &mut self,
        maze: &Maze,
        config: &EngineConfig,
        steering: Steering,
    ) -> MazeResult<Motion> {
        if self.held || (self.frozen && self.queued.is_none() && steering == Steering::Queued) {
            return Ok(Motion::default());
        }

        let budget = round_motion(self.speed / config.frame_rate as f64);
        let cx = self.x + 4.0;
        let cy = self.y + 4.0;

        let reversing = self.queued == Some(self.heading.opposite());
        let approach = if reversing {
            self.heading.opposite()
        } else {
            self.heading
        };

        let step = round_motion(budget.min(gap_to_boundary(cx, cy, approach)));
        let (dc, dr) = approach.delta();
        let dx1 = round_motion(dc as f64 * step);
        let dy1 = round_motion(dr as f64 * step);
        let (mut dx2, mut dy2) = (0.0, 0.0);

        if step < budget {
            let mut desired = match (reversing, steering) {
                (true, _) => approach,
                (false, Steering::Queued) => self.queued.unwrap_or(self.heading),
                (false, Steering::Target(target)) => {
                    let current = *self.tile_center(maze)?;
                    next_heading(maze, &config.tunnel, &current, self.heading, target)?
                }
            };

            let here = *maze.tile_from_point(round_motion(cx + dx1), round_motion(cy + dy1))?;
            if desired.is_horizontal() != self.heading.is_horizontal()
                && adjacent(maze, &config.tunnel, &here, desired)?.kind.is_wall()
            {
                desired = self.heading;
            }

            if !adjacent(maze, &config.tunnel, &here, desired)?.kind.is_wall() {
                let carry = round_motion(budget - step);
                let (dc, dr) = desired.delta();
                dx2 = dc as f64 * carry;
                dy2 = dr as f64 * carry;
                if desired != self.heading {
                    self.turn(desired);
                }
            }
        }

        // An about-turn is honoured even when nothing could be carried past the boundary.
        if reversing && self.heading != approach {
            self.turn(approach);
        }

        self.x = round_motion(self.x + dx1 + dx2);
        self.y = round_motion(self.y + dy1 + dy2);
        let dx = round_motion(dx1 + dx2);
        let dy = round_motion(dy1 + dy2);
        self.frozen = dx == 0.0 && dy == 0.0;

        let wrapped = self.wrap_tunnel(&config.tunnel);
        Ok(Motion { dx, dy, wrapped })
    }

    fn turn(&mut self, heading: Heading) {
        self.heading = heading;
        self.queued = None;
    }

    fn wrap_tunnel(&mut self, tunnel: &TunnelConfig) -> bool {
        let tile = crate::constants::TILE_SIZE as f64;
        let row = ((self.y + 4.0) / tile).floor() as i32;
        let col = ((self.x + 4.0) / tile).floor() as i32;
        if row != tunnel.row {
            return false;
        }
        let shift = match self.heading {
            Heading::Left if col <= tunnel.left_col => tunnel.wrap_offset,
            Heading::Right if col >= tunnel.right_col => -tunnel.wrap_offset,
            _ => return false,
        };
        self.x += shift;
        debug!(agent = self.name, col, x = self.x, "tunnel wrap");
        true
    }
}
