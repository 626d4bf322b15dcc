//! Tile grid: layout, generation and movement checks
//!
//! The grid only knows about static and destructible tiles. Bombs, flames and
//! actors are looked up by coordinate in the game state, never stored here.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cell_of;
use crate::consts::{ENEMY_SPAWNS, GRID_COLS, GRID_ROWS, PLAYER_SPAWN};

/// Tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    /// Walkable
    #[default]
    Empty,
    /// Permanent wall (border and interior lattice)
    Hard,
    /// Destructible brick
    Soft,
}

/// Fixed-size rectangular tile map, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    cols: i32,
    rows: i32,
    tiles: Vec<Tile>,
}

impl GridMap {
    /// Create a map with every tile set to `tile`
    pub fn filled(cols: i32, rows: i32, tile: Tile) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        Self {
            cols,
            rows,
            tiles: vec![tile; (cols * rows) as usize],
        }
    }

    /// Generate a level map from the RNG stream.
    ///
    /// Border and odd/odd lattice cells are Hard, everything else is Soft with
    /// probability `soft_fill`. The player spawn neighborhood and all enemy
    /// spawn cells are then forced Empty, even where that opens the border or
    /// the lattice.
    pub fn generate<R: Rng>(rng: &mut R, soft_fill: f64) -> Self {
        let mut map = Self::filled(GRID_COLS, GRID_ROWS, Tile::Empty);

        for row in 0..map.rows {
            for col in 0..map.cols {
                let border = row == 0 || row == map.rows - 1 || col == 0 || col == map.cols - 1;
                let lattice = row % 2 == 1 && col % 2 == 1;
                let tile = if border || lattice {
                    Tile::Hard
                } else if rng.random::<f64>() < soft_fill {
                    Tile::Soft
                } else {
                    Tile::Empty
                };
                map.set_tile(IVec2::new(col, row), tile);
            }
        }

        for dr in -1..=1 {
            for dc in -1..=1 {
                map.set_tile(PLAYER_SPAWN + IVec2::new(dc, dr), Tile::Empty);
            }
        }
        for spawn in ENEMY_SPAWNS {
            map.set_tile(spawn, Tile::Empty);
        }

        map
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Whether a cell lies inside the map
    #[inline]
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| (cell.y * self.cols + cell.x) as usize)
    }

    /// Tile at a cell, `None` outside the map
    pub fn get(&self, cell: IVec2) -> Option<Tile> {
        self.index(cell).map(|i| self.tiles[i])
    }

    /// Tile at a cell. Anything outside the map reads as Hard.
    pub fn tile_at(&self, cell: IVec2) -> Tile {
        self.get(cell).unwrap_or(Tile::Hard)
    }

    /// Overwrite a tile. Out-of-range cells are ignored.
    pub fn set_tile(&mut self, cell: IVec2, tile: Tile) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = tile;
        }
    }

    /// Clear a Soft tile. Returns false (and changes nothing) for any other tile.
    pub fn destroy_soft(&mut self, cell: IVec2) -> bool {
        match self.index(cell) {
            Some(i) if self.tiles[i] == Tile::Soft => {
                self.tiles[i] = Tile::Empty;
                true
            }
            _ => false,
        }
    }

    /// Movement check shared by the player and enemies.
    ///
    /// The target cell is the floor of `from + delta`; the move is allowed iff
    /// that cell is inside the map and Empty. Bombs do not block movement.
    pub fn can_move(&self, from: Vec2, delta: IVec2) -> bool {
        let target = cell_of(from + delta.as_vec2());
        self.get(target) == Some(Tile::Empty)
    }

    /// Iterate all cells with their tiles, row by row
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(i, &tile)| {
            let i = i as i32;
            (IVec2::new(i % self.cols, i / self.cols), tile)
        })
    }

    /// Number of Soft tiles left on the map
    pub fn soft_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Soft).count()
    }
}
