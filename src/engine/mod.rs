use tracing::info;

use crate::config::EngineConfig;
use crate::constants::{GHOST_START, PLAYER_START};
use crate::error::MazeResult;
use crate::maze::Maze;
use crate::timer::TimerManager;
use crate::types::{FrameEvent, FrameReport, GhostMode, GhostName, Heading, Point, Snapshot};

mod agent;
mod mode_system;
mod pellet_system;
mod steering;
mod targeting;
mod utils;

pub use self::agent::{Agent, Motion, Steering};
pub use self::steering::next_heading;
pub use self::targeting::{target_coordinate, TargetContext};

#[derive(Clone, Debug)]
pub struct GameEngine {
    pub config: EngineConfig,

    maze: Maze,
    player: Agent,
    ghosts: [Agent; 4],
    timers: TimerManager,
    events: Vec<FrameEvent>,
    frame: u64,
    pellets_eaten: u64,
}

impl GameEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_maze(config, Maze::reference())
    }

    pub fn with_maze(config: EngineConfig, maze: Maze) -> Self {
        let player = Agent::new(
            "player",
            PLAYER_START,
            Heading::Left,
            config.player_speed,
            GhostMode::None,
        );
        let ghosts = GhostName::ALL.map(|name| {
            let heading = if name == GhostName::Blinky {
                Heading::Right
            } else {
                Heading::Left
            };
            Agent::new(
                name.as_str(),
                GHOST_START,
                heading,
                config.ghost_speed,
                GhostMode::Chase,
            )
        });
        Self {
            config,
            maze,
            player,
            ghosts,
            timers: TimerManager::new(),
            events: Vec::new(),
            frame: 0,
            pellets_eaten: 0,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Agent {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Agent {
        &mut self.player
    }

    pub fn ghost(&self, name: GhostName) -> &Agent {
        &self.ghosts[name.index()]
    }

    pub fn ghost_mut(&mut self, name: GhostName) -> &mut Agent {
        &mut self.ghosts[name.index()]
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn now_ms(&self) -> u64 {
        self.config.frame_ms(self.frame)
    }

    pub fn pellets_eaten(&self) -> u64 {
        self.pellets_eaten
    }

    /// Puts every agent back on its start pose and holds it there.
    pub fn reset_round(&mut self) {
        self.timers.clear();
        for agent in self.agents_mut() {
            agent.reset();
            agent.hold();
        }
        info!(frame = self.frame, "round reset");
    }

    /// Sends the ghosts into scatter, arms the mode schedule and releases everyone.
    pub fn start_round(&mut self) {
        let now_ms = self.now_ms();
        self.switch_ghost_mode(GhostMode::Scatter);
        self.arm_mode_schedule(now_ms);
        for agent in self.agents_mut() {
            agent.release();
        }
        info!(frame = self.frame, now_ms, timers = self.timers.len(), "round started");
    }

    /// Freezes the schedule with its remaining time intact and holds every agent.
    pub fn halt(&mut self) {
        let now_ms = self.now_ms();
        self.timers.stop_all(now_ms);
        for agent in self.agents_mut() {
            agent.hold();
        }
        info!(frame = self.frame, now_ms, "round halted");
    }

    pub fn resume(&mut self) {
        let now_ms = self.now_ms();
        self.timers.start_all(now_ms);
        for agent in self.agents_mut() {
            agent.release();
        }
        info!(frame = self.frame, now_ms, "round resumed");
    }

    pub fn restore_pellets(&mut self) {
        self.maze.restore_pellets();
    }

    /// Queues the player's next heading; `None` drops any pending request.
    pub fn set_player_heading(&mut self, heading: Option<Heading>) {
        match heading {
            Some(heading) => self.player.set_desired_heading(heading),
            None => self.player.cancel_desired_heading(),
        }
    }

    pub fn step(&mut self) -> MazeResult<FrameReport> {
        self.frame += 1;
        let now_ms = self.now_ms();

        self.apply_mode_transitions(now_ms)?;

        let motion = self
            .player
            .advance(&self.maze, &self.config, Steering::Queued)?;
        if motion.wrapped {
            self.events.push(FrameEvent::TunnelWrap { agent: "player" });
        }
        self.eat_pellets()?;

        for name in GhostName::ALL {
            if self.ghost(name).is_held() {
                continue;
            }
            // Targets are taken right before each ghost moves, so Inky sees Blinky's new tile.
            let target = self.ghost_target(name)?;
            let ghost = &mut self.ghosts[name.index()];
            let motion = ghost.advance(&self.maze, &self.config, Steering::Target(target))?;
            if motion.wrapped {
                self.events.push(FrameEvent::TunnelWrap {
                    agent: name.as_str(),
                });
            }
        }

        let caught_by = self.collision()?;
        if let Some(ghost) = caught_by {
            info!(frame = self.frame, ghost = ghost.as_str(), "player caught");
            self.events.push(FrameEvent::Collision { ghost });
        }

        Ok(FrameReport {
            frame: self.frame,
            now_ms,
            events: std::mem::take(&mut self.events),
            collision: caught_by.is_some(),
        })
    }

    /// First ghost, in Blinky to Clyde order, sharing the player's centre tile.
    pub fn collision(&self) -> MazeResult<Option<GhostName>> {
        if self.player.is_held() {
            return Ok(None);
        }
        let player_tile = self.player.tile_center(&self.maze)?;
        for name in GhostName::ALL {
            if self.ghost(name).tile_center(&self.maze)?.same_cell(player_tile) {
                return Ok(Some(name));
            }
        }
        Ok(None)
    }

    pub fn ghost_target(&self, name: GhostName) -> MazeResult<Point> {
        let ghost = self.ghost(name);
        let ctx = TargetContext {
            own_tile: *ghost.tile_center(&self.maze)?,
            player_tile: *self.player.tile_center(&self.maze)?,
            player_heading: self.player.heading(),
            blinky_tile: *self.ghost(GhostName::Blinky).tile_center(&self.maze)?,
        };
        target_coordinate(name, ghost.mode(), &ctx)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            now_ms: self.now_ms(),
            player: self.player.view(),
            ghosts: self.ghosts.iter().map(Agent::view).collect(),
            pellets_remaining: self.maze.pellets_remaining(),
        }
    }

    fn agents_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        std::iter::once(&mut self.player).chain(self.ghosts.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::engine::GameEngine;
    use crate::maze::TileKind;
    use crate::types::{FrameEvent, GhostMode, GhostName, Heading};

    fn started() -> GameEngine {
        let mut engine = GameEngine::new(EngineConfig::default());
        engine.reset_round();
        engine.start_round();
        engine
    }

    fn mode_changes(events: &[FrameEvent]) -> Vec<GhostMode> {
        events
            .iter()
            .filter_map(|event| match event {
                FrameEvent::ModeChanged { mode } => Some(*mode),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn new_engine_places_agents_on_start_poses() {
        let engine = GameEngine::new(EngineConfig::default());
        let snapshot = engine.snapshot();
        assert_eq!((snapshot.player.x, snapshot.player.y), (120, 180));
        assert_eq!(snapshot.player.heading, Heading::Left);
        assert_eq!(snapshot.player.mode, "none");
        assert_eq!(snapshot.ghosts.len(), 4);
        assert_eq!(snapshot.ghosts[0].name, "blinky");
        assert_eq!(snapshot.ghosts[0].heading, Heading::Right);
        for ghost in &snapshot.ghosts {
            assert_eq!((ghost.x, ghost.y), (120, 84));
            assert_eq!(ghost.mode, "chase");
        }
        for ghost in &snapshot.ghosts[1..] {
            assert_eq!(ghost.heading, Heading::Left);
        }
    }

    #[test]
    fn start_round_scatters_and_arms_the_schedule() {
        let engine = started();
        assert_eq!(engine.pending_mode_changes(), 7);
        for name in GhostName::ALL {
            let ghost = engine.ghost(name);
            assert_eq!(ghost.mode(), GhostMode::Scatter);
            assert_eq!(ghost.queued_heading(), Some(ghost.heading().opposite()));
            assert!(!ghost.is_held());
        }
    }

    #[test]
    fn schedule_fires_chase_then_scatter_exactly_once() {
        let mut engine = started();
        let mut chase_frames = Vec::new();
        for _ in 0..420 {
            let report = engine.step().expect("frame should advance");
            if mode_changes(&report.events).contains(&GhostMode::Chase) {
                chase_frames.push(report.frame);
            }
        }
        assert_eq!(chase_frames, vec![420]);
        assert_eq!(engine.now_ms(), 7_000);
        for name in GhostName::ALL {
            assert_eq!(engine.ghost(name).mode(), GhostMode::Chase);
        }

        let mut seen = Vec::new();
        for _ in 0..1_200 {
            let report = engine.step().expect("frame should advance");
            seen.extend(mode_changes(&report.events));
        }
        assert_eq!(seen, vec![GhostMode::Scatter]);
        assert_eq!(engine.now_ms(), 27_000);
        assert_eq!(engine.pending_mode_changes(), 5);
        for name in GhostName::ALL {
            assert_eq!(engine.ghost(name).mode(), GhostMode::Scatter);
        }
    }

    #[test]
    fn player_eats_the_pellet_left_of_the_start() {
        let mut engine = started();
        let before = engine.maze().pellets_remaining();
        let mut eaten_at = None;
        for _ in 0..12 {
            let report = engine.step().expect("frame should advance");
            for event in &report.events {
                if let FrameEvent::PelletEaten { row, col, .. } = event {
                    assert_eq!((*row, *col), (23, 14));
                    eaten_at = Some(report.frame);
                }
            }
        }
        assert_eq!(eaten_at, Some(10));
        assert_eq!(engine.maze().pellets_remaining(), before - 1);
        assert_eq!(engine.pellets_eaten(), 1);
    }

    #[test]
    fn power_pellets_are_left_on_the_board() {
        let mut engine = GameEngine::new(EngineConfig::default());
        engine.player_mut().place(36.0, 180.0, Heading::Left);
        let mut eaten = Vec::new();
        for _ in 0..40 {
            let report = engine.step().expect("frame should advance");
            for event in &report.events {
                if let FrameEvent::PelletEaten { row, col, kind } = event {
                    eaten.push((*row, *col, *kind));
                }
            }
        }
        assert_eq!(eaten, vec![(23, 4, TileKind::Pellet)]);
        let power = engine.maze().tile_at(23, 3).expect("in bounds");
        assert_eq!(power.kind, TileKind::PowerPellet);
        assert!(!power.consumed);
    }

    #[test]
    fn halt_holds_agents_and_freezes_the_schedule() {
        let mut engine = started();
        for _ in 0..100 {
            engine.step().expect("frame should advance");
        }
        engine.halt();
        let frozen = engine.snapshot();
        for _ in 0..600 {
            let report = engine.step().expect("frame should advance");
            assert!(mode_changes(&report.events).is_empty());
            assert!(!report.collision);
        }
        let later = engine.snapshot();
        assert_eq!(later.player.x, frozen.player.x);
        assert!(later.player.held);
        assert!(!later.player.animating);
        for (a, b) in frozen.ghosts.iter().zip(later.ghosts.iter()) {
            assert_eq!((a.x, a.y), (b.x, b.y));
        }
        assert_eq!(engine.pending_mode_changes(), 7);

        // 320 frames of the first countdown remained when the round was halted.
        engine.resume();
        let mut fired = Vec::new();
        for _ in 0..320 {
            let report = engine.step().expect("frame should advance");
            if !mode_changes(&report.events).is_empty() {
                fired.push(report.frame);
            }
        }
        assert_eq!(fired, vec![engine.frame()]);
    }

    #[test]
    fn shared_center_tile_is_a_collision() {
        let mut engine = GameEngine::new(EngineConfig::default());
        engine.player_mut().place(120.0, 84.0, Heading::Left);
        let report = engine.step().expect("frame should advance");
        assert!(report.collision);
        assert!(report
            .events
            .contains(&FrameEvent::Collision { ghost: GhostName::Blinky }));
        assert_eq!(engine.collision(), Ok(Some(GhostName::Blinky)));
    }

    #[test]
    fn reset_round_restores_start_and_clears_schedule() {
        let mut engine = started();
        engine.set_player_heading(Some(Heading::Right));
        for _ in 0..50 {
            engine.step().expect("frame should advance");
        }
        engine.reset_round();
        let snapshot = engine.snapshot();
        assert_eq!((snapshot.player.x, snapshot.player.y), (120, 180));
        assert!(snapshot.player.held);
        assert_eq!(engine.pending_mode_changes(), 0);
        assert_eq!(engine.ghost(GhostName::Pinky).mode(), GhostMode::Chase);
        assert_eq!(engine.player().queued_heading(), None);
    }

    #[test]
    fn same_inputs_produce_same_progression() {
        let mut a = started();
        let mut b = started();
        let script = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];
        for frame in 0..900 {
            if frame % 45 == 0 {
                let heading = script[(frame / 45) % script.len()];
                a.set_player_heading(Some(heading));
                b.set_player_heading(Some(heading));
            }
            let ra = a.step().expect("frame should advance");
            let rb = b.step().expect("frame should advance");
            assert_eq!(ra.events, rb.events);
            assert_eq!(a.player().position(), b.player().position());
            for name in GhostName::ALL {
                assert_eq!(a.ghost(name).position(), b.ghost(name).position());
            }
        }
    }

    #[test]
    fn snapshot_uses_camel_case_keys() {
        let engine = started();
        let value = serde_json::to_value(engine.snapshot()).expect("snapshot serializes");
        assert!(value.get("pelletsRemaining").is_some());
        assert!(value.get("nowMs").is_some());
        assert_eq!(value["ghosts"][2]["name"], "inky");
        assert_eq!(value["player"]["heading"], "left");
    }
}
