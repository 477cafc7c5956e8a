use tracing::{debug, warn};

use super::*;

impl GameEngine {
    /// Arms every schedule entry as a running one-shot timer measured from `now_ms`.
    pub(super) fn arm_mode_schedule(&mut self, now_ms: u64) {
        self.timers.clear();
        for entry in &self.config.schedule {
            self.timers
                .add_timer(entry.key, entry.at_ms, true, entry.tag.clone(), now_ms);
        }
    }

    pub(super) fn apply_mode_transitions(&mut self, now_ms: u64) -> MazeResult<()> {
        for (key, tag) in self.timers.elapsed_timers(now_ms) {
            self.timers.remove_timer(key)?;
            let Some(mode) = GhostMode::parse_tag(&tag) else {
                warn!(key, tag = tag.as_str(), "dropping timer with unknown tag");
                continue;
            };
            self.switch_ghost_mode(mode);
        }
        Ok(())
    }

    pub(super) fn switch_ghost_mode(&mut self, mode: GhostMode) {
        for ghost in &mut self.ghosts {
            ghost.enter_mode(mode);
        }
        debug!(mode = mode.as_str(), frame = self.frame, "ghost mode change");
        self.events.push(FrameEvent::ModeChanged { mode });
    }

    pub fn pending_mode_changes(&self) -> usize {
        self.timers.len()
    }
}
