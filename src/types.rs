use serde::{Deserialize, Serialize};

use crate::maze::TileKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Evaluation order used by the heading resolver; the first minimum wins ties.
    pub const RESOLVE_ORDER: [Heading; 4] = [Self::Up, Self::Left, Self::Down, Self::Right];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Column and row step for one tile in this heading.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostMode {
    #[default]
    None,
    Chase,
    Scatter,
    Frightened,
}

impl GhostMode {
    /// Maps a scheduler tag to the mode it switches pursuers into.
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match tag {
            "chase" => Some(Self::Chase),
            "scatter" => Some(Self::Scatter),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Chase => "chase",
            Self::Scatter => "scatter",
            Self::Frightened => "frightened",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::None => 0,
            Self::Chase => 1,
            Self::Scatter => 2,
            Self::Frightened => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostName {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostName {
    pub const ALL: [GhostName; 4] = [Self::Blinky, Self::Pinky, Self::Inky, Self::Clyde];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blinky => "blinky",
            Self::Pinky => "pinky",
            Self::Inky => "inky",
            Self::Clyde => "clyde",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Blinky => 0,
            Self::Pinky => 1,
            Self::Inky => 2,
            Self::Clyde => 3,
        }
    }
}

/// Which animation strip the presentation layer should play, replacing
/// `"<mode>_<heading>"` string keys with a fixed table slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Pose {
    pub mode: GhostMode,
    pub heading: Heading,
}

impl Pose {
    pub const TABLE_LEN: usize = 16;

    pub fn table_index(self) -> usize {
        self.mode.index() * 4 + self.heading.index()
    }
}

/// Integer pixel coordinate. Targets may lie outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrameEvent {
    PelletEaten {
        row: i32,
        col: i32,
        kind: TileKind,
    },
    ModeChanged {
        mode: GhostMode,
    },
    TunnelWrap {
        agent: &'static str,
    },
    Collision {
        ghost: GhostName,
    },
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    #[serde(rename = "nowMs")]
    pub now_ms: u64,
    pub events: Vec<FrameEvent>,
    pub collision: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct AgentView {
    pub name: &'static str,
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
    pub mode: &'static str,
    pub pose: usize,
    pub animating: bool,
    pub frozen: bool,
    pub held: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    #[serde(rename = "nowMs")]
    pub now_ms: u64,
    pub player: AgentView,
    pub ghosts: Vec<AgentView>,
    #[serde(rename = "pelletsRemaining")]
    pub pellets_remaining: usize,
}
