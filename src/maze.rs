use serde::Serialize;

use crate::constants::{
    TILE_CODE_OPEN, TILE_CODE_PELLET, TILE_CODE_POWER_PELLET, TILE_SIZE,
};
use crate::error::{MazeError, MazeResult};
use crate::layout::REFERENCE_LAYOUT;
use crate::types::{Heading, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Wall,
    Open,
    Pellet,
    PowerPellet,
}

impl TileKind {
    pub fn from_code(code: u8) -> Self {
        match code {
            TILE_CODE_OPEN => Self::Open,
            TILE_CODE_PELLET => Self::Pellet,
            TILE_CODE_POWER_PELLET => Self::PowerPellet,
            _ => Self::Wall,
        }
    }

    pub fn is_wall(self) -> bool {
        self == Self::Wall
    }

    /// Only plain pellets are eaten; power pellets stay on the board.
    pub fn is_consumable(self) -> bool {
        self == Self::Pellet
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub row: i32,
    pub col: i32,
    pub code: u8,
    pub kind: TileKind,
    pub consumed: bool,
}

impl Tile {
    pub fn x(&self) -> i32 {
        self.col * TILE_SIZE
    }

    pub fn y(&self) -> i32 {
        self.row * TILE_SIZE
    }

    pub fn address(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    pub fn same_cell(&self, other: &Tile) -> bool {
        self.address() == other.address()
    }

    pub fn center(&self) -> Point {
        Point::new(self.x() + TILE_SIZE / 2, self.y() + TILE_SIZE / 2)
    }

    /// Centre of the tile `tiles` steps away along `heading`, which may lie off-grid.
    pub fn center_offset(&self, heading: Heading, tiles: i32) -> Point {
        let (dc, dr) = heading.delta();
        let center = self.center();
        Point::new(
            center.x + dc * tiles * TILE_SIZE,
            center.y + dr * tiles * TILE_SIZE,
        )
    }

    /// Squared distance from this tile's centre. Only ever used for ordering.
    pub fn distance_sq_to(&self, target: Point) -> i64 {
        let center = self.center();
        let dx = (target.x - center.x) as i64;
        let dy = (target.y - center.y) as i64;
        dx * dx + dy * dy
    }

    pub fn distance_to(&self, target: Point) -> f64 {
        (self.distance_sq_to(target) as f64).sqrt()
    }

    pub fn distance_sq_to_tile(&self, other: &Tile) -> i64 {
        self.distance_sq_to(other.center())
    }
}

#[derive(Clone, Debug)]
pub struct Maze {
    rows: i32,
    cols: i32,
    tiles: Vec<Tile>,
}

impl Maze {
    pub fn reference() -> Self {
        let mut tiles = Vec::with_capacity(REFERENCE_LAYOUT.len() * REFERENCE_LAYOUT[0].len());
        for (row, codes) in REFERENCE_LAYOUT.iter().enumerate() {
            for (col, code) in codes.iter().enumerate() {
                tiles.push(make_tile(row as i32, col as i32, *code));
            }
        }
        Self {
            rows: REFERENCE_LAYOUT.len() as i32,
            cols: REFERENCE_LAYOUT[0].len() as i32,
            tiles,
        }
    }

    pub fn from_codes(codes: &[Vec<u8>]) -> MazeResult<Self> {
        let Some(first) = codes.first() else {
            return Err(MazeError::InvalidLayout("layout has no rows".to_string()));
        };
        let cols = first.len();
        if cols == 0 {
            return Err(MazeError::InvalidLayout("layout has no columns".to_string()));
        }
        let mut tiles = Vec::with_capacity(codes.len() * cols);
        for (row, row_codes) in codes.iter().enumerate() {
            if row_codes.len() != cols {
                return Err(MazeError::InvalidLayout(format!(
                    "row {row} has {} columns, expected {cols}",
                    row_codes.len()
                )));
            }
            for (col, code) in row_codes.iter().enumerate() {
                tiles.push(make_tile(row as i32, col as i32, *code));
            }
        }
        Ok(Self {
            rows: codes.len() as i32,
            cols: cols as i32,
            tiles,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn tile_at(&self, row: i32, col: i32) -> MazeResult<&Tile> {
        if row < 0 || col < 0 || row >= self.rows || col >= self.cols {
            return Err(MazeError::OutOfBounds { row, col });
        }
        Ok(&self.tiles[(row * self.cols + col) as usize])
    }

    /// Containing tile of a pixel coordinate, flooring on both axes.
    pub fn tile_from_point(&self, x: f64, y: f64) -> MazeResult<&Tile> {
        let col = (x / TILE_SIZE as f64).floor() as i32;
        let row = (y / TILE_SIZE as f64).floor() as i32;
        self.tile_at(row, col)
    }

    /// Grid-index neighbour; never wraps.
    pub fn neighbor(&self, tile: &Tile, heading: Heading, distance: i32) -> MazeResult<&Tile> {
        let (dc, dr) = heading.delta();
        self.tile_at(tile.row + dr * distance, tile.col + dc * distance)
    }

    /// Marks a pellet tile consumed. Returns false when there was nothing to eat.
    pub fn consume(&mut self, row: i32, col: i32) -> MazeResult<bool> {
        self.tile_at(row, col)?;
        let tile = &mut self.tiles[(row * self.cols + col) as usize];
        if !tile.kind.is_consumable() || tile.consumed {
            return Ok(false);
        }
        tile.consumed = true;
        Ok(true)
    }

    pub fn pellets_remaining(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.kind.is_consumable() && !tile.consumed)
            .count()
    }

    pub fn restore_pellets(&mut self) {
        for tile in &mut self.tiles {
            tile.consumed = false;
        }
    }
}

fn make_tile(row: i32, col: i32, code: u8) -> Tile {
    Tile {
        row,
        col,
        code,
        kind: TileKind::from_code(code),
        consumed: false,
    }
}
