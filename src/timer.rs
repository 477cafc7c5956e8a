use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{MazeError, MazeResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Stopped,
    Running,
    Elapsed,
}

/// One-shot countdown against an external millisecond clock. State is derived from
/// `now_ms` on every query; nothing advances on its own.
#[derive(Clone, Debug)]
pub struct Timer {
    countdown_ms: u64,
    remaining_ms: u64,
    start_ms: u64,
    end_ms: u64,
    running: bool,
    pub tag: String,
}

impl Timer {
    pub fn new(countdown_ms: u64, tag: impl Into<String>) -> Self {
        Self {
            countdown_ms,
            remaining_ms: countdown_ms,
            start_ms: 0,
            end_ms: 0,
            running: false,
            tag: tag.into(),
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        self.start_ms = now_ms;
        self.end_ms = now_ms.saturating_add(self.remaining_ms);
        self.running = true;
    }

    /// Freezes the remaining time; a later `start` resumes from it.
    pub fn stop(&mut self, now_ms: u64) {
        self.remaining_ms = self.time_remaining(now_ms);
        self.running = false;
    }

    /// Restores the full countdown. A running timer restarts from `now_ms`.
    pub fn reset(&mut self, now_ms: u64) {
        self.remaining_ms = self.countdown_ms;
        if self.running {
            self.start(now_ms);
        }
    }

    pub fn set_countdown(&mut self, countdown_ms: u64, now_ms: u64) {
        self.countdown_ms = countdown_ms;
        self.reset(now_ms);
    }

    pub fn time_remaining(&self, now_ms: u64) -> u64 {
        if self.running {
            self.end_ms.saturating_sub(now_ms)
        } else {
            self.remaining_ms
        }
    }

    pub fn elapsed_time(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms)
    }

    pub fn state(&self, now_ms: u64) -> TimerState {
        if !self.running {
            TimerState::Stopped
        } else if self.time_remaining(now_ms) > 0 {
            TimerState::Running
        } else {
            TimerState::Elapsed
        }
    }

    fn end_ms(&self) -> u64 {
        self.end_ms
    }
}

#[derive(Clone, Debug, Default)]
pub struct TimerManager {
    timers: BTreeMap<u32, Timer>,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a timer under `key`, replacing any timer already there.
    pub fn add_timer(
        &mut self,
        key: u32,
        countdown_ms: u64,
        start_immediately: bool,
        tag: impl Into<String>,
        now_ms: u64,
    ) {
        let mut timer = Timer::new(countdown_ms, tag);
        if start_immediately {
            timer.start(now_ms);
        }
        self.timers.insert(key, timer);
    }

    pub fn remove_timer(&mut self, key: u32) -> MazeResult<Timer> {
        self.timers.remove(&key).ok_or(MazeError::UnknownTimer(key))
    }

    pub fn get(&self, key: u32) -> Option<&Timer> {
        self.timers.get(&key)
    }

    /// Keys and tags of every elapsed timer, earliest deadline first.
    pub fn elapsed_timers(&self, now_ms: u64) -> Vec<(u32, String)> {
        let mut elapsed: Vec<(u64, u32, String)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.state(now_ms) == TimerState::Elapsed)
            .map(|(key, timer)| (timer.end_ms(), *key, timer.tag.clone()))
            .collect();
        elapsed.sort_by_key(|(end_ms, key, _)| (*end_ms, *key));
        elapsed
            .into_iter()
            .map(|(_, key, tag)| (key, tag))
            .collect()
    }

    pub fn remove_elapsed_timers(&mut self, now_ms: u64) -> usize {
        let before = self.timers.len();
        self.timers
            .retain(|_, timer| timer.state(now_ms) != TimerState::Elapsed);
        before - self.timers.len()
    }

    pub fn start_all(&mut self, now_ms: u64) {
        for timer in self.timers.values_mut() {
            timer.start(now_ms);
        }
    }

    pub fn stop_all(&mut self, now_ms: u64) {
        for timer in self.timers.values_mut() {
            timer.stop(now_ms);
        }
    }

    pub fn reset_all(&mut self, now_ms: u64) {
        for timer in self.timers.values_mut() {
            timer.reset(now_ms);
        }
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
