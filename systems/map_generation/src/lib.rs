#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded map provider that carves a winding path across a cliff-strewn field.
//!
//! Cliff blocks are scattered first, then a random walk starts on the left
//! edge and steps right, up or down (never onto a tile it already carved)
//! until it reaches the right edge. The walk overwrites any cliff it crosses.

use frontier_defence_core::{tile_center, MapConfig, MapLayout, MapProvider, TileKind, TileMap};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Tile dimensions of a map of the provided size class.
#[must_use]
pub const fn map_dimensions(scale: u32) -> (u32, u32) {
    let step = scale.saturating_sub(1);
    (15 + 8 * step, 12 + 7 * step)
}

/// Default [`MapProvider`] producing a fresh winding path on every request.
#[derive(Debug)]
pub struct WindingPathGenerator {
    rng: ChaCha8Rng,
}

impl WindingPathGenerator {
    /// Creates a generator whose layouts are fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn scatter_cliffs(&mut self, tiles: &mut TileMap, scale: u32) {
        let (columns, rows) = (tiles.columns(), tiles.rows());
        for _ in 0..5 + 3 * scale {
            let x = self.rng.gen_range(2..columns - 2);
            let y = self.rng.gen_range(2..rows - 2);
            let width = self.rng.gen_range(2..scale + 4);
            let height = self.rng.gen_range(2..scale + 4);
            for row in y..(y + height).min(rows) {
                for column in x..(x + width).min(columns) {
                    tiles.set(column, row, TileKind::Cliff);
                }
            }
        }
    }

    fn carve_path(&mut self, tiles: &mut TileMap) -> Vec<(u32, u32)> {
        let (columns, rows) = (tiles.columns(), tiles.rows());
        let mut current = (0, self.rng.gen_range(2..rows - 2));
        tiles.set(current.0, current.1, TileKind::Spawn);
        let mut cells = vec![current];

        let mut moves = Vec::with_capacity(3);
        while current.0 < columns - 1 {
            let (column, row) = current;
            moves.clear();
            moves.push((column + 1, row));
            if row > 1 {
                moves.push((column, row - 1));
            }
            if row < rows - 2 {
                moves.push((column, row + 1));
            }
            moves.retain(|&(x, y)| {
                !matches!(tiles.get(x, y), Some(TileKind::Path | TileKind::Spawn))
            });

            let next = if moves.is_empty() {
                (column + 1, row)
            } else {
                moves[self.rng.gen_range(0..moves.len())]
            };
            tiles.set(next.0, next.1, TileKind::Path);
            cells.push(next);
            current = next;
        }

        tiles.set(current.0, current.1, TileKind::Base);
        cells
    }
}

impl MapProvider for WindingPathGenerator {
    fn generate(&mut self, config: &MapConfig) -> MapLayout {
        let scale = config.scale.clamp(1, 5);
        let (columns, rows) = map_dimensions(scale);
        let mut tiles = TileMap::filled(columns, rows, TileKind::Grass);

        self.scatter_cliffs(&mut tiles, scale);
        let cells = self.carve_path(&mut tiles);
        debug!(
            "generated {columns}x{rows} {:?} map with {} path tiles",
            config.biome,
            cells.len()
        );

        MapLayout {
            tiles,
            path: cells
                .into_iter()
                .map(|(column, row)| tile_center(column, row))
                .collect(),
        }
    }
}
