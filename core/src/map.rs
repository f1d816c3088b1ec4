//! Map contracts shared by the world and map providers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Side length of a single map tile in world units.
pub const CELL_SIZE: f32 = 40.0;

/// Terrain classification of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Buildable ground for regular towers.
    Grass,
    /// Tile the enemy path runs through.
    Path,
    /// Elevated ground reserved for cliff towers.
    Cliff,
    /// First path tile where enemies enter.
    Spawn,
    /// Last path tile guarded by the player.
    Base,
}

/// Visual theme requested from the map provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    /// Temperate default.
    Grassland,
    /// Arid sand.
    Desert,
    /// Snowfield.
    Snow,
    /// Lava fields.
    Volcanic,
    /// Alien world.
    Alien,
}

/// Parameters handed to the map provider.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Size class from 1 (smallest) to 5.
    pub scale: u32,
    /// Requested biome.
    pub biome: Biome,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            scale: 3,
            biome: Biome::Grassland,
        }
    }
}

/// Dense row-major grid of tiles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    columns: u32,
    rows: u32,
    tiles: Vec<TileKind>,
}

impl TileMap {
    /// Creates a map filled with a single tile kind.
    #[must_use]
    pub fn filled(columns: u32, rows: u32, kind: TileKind) -> Self {
        let capacity = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        Self {
            columns,
            rows,
            tiles: vec![kind; capacity],
        }
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Tile at the provided column and row, if inside the map.
    #[must_use]
    pub fn get(&self, column: u32, row: u32) -> Option<TileKind> {
        self.index(column, row)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Overwrites a tile; out-of-bounds writes are ignored.
    pub fn set(&mut self, column: u32, row: u32, kind: TileKind) {
        if let Some(index) = self.index(column, row) {
            if let Some(slot) = self.tiles.get_mut(index) {
                *slot = kind;
            }
        }
    }

    /// Tile underneath a world-space position.
    #[must_use]
    pub fn tile_at(&self, position: Vec2) -> Option<TileKind> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let column = (position.x / CELL_SIZE).floor() as u32;
        let row = (position.y / CELL_SIZE).floor() as u32;
        self.get(column, row)
    }

    fn index(&self, column: u32, row: u32) -> Option<usize> {
        if column < self.columns && row < self.rows {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Output of a map provider: terrain plus the ordered enemy path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Terrain used for placement legality.
    pub tiles: TileMap,
    /// Waypoints in world units from spawn to base.
    pub path: Vec<Vec2>,
}

/// Source of maps consumed by the simulation.
pub trait MapProvider {
    /// Generates a layout for the provided configuration.
    ///
    /// An empty path is treated as a failed generation and requested again.
    fn generate(&mut self, config: &MapConfig) -> MapLayout;
}

/// Centre of the tile at the provided column and row in world units.
#[must_use]
pub fn tile_center(column: u32, row: u32) -> Vec2 {
    Vec2::new(
        column as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        row as f32 * CELL_SIZE + CELL_SIZE / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_lookup_uses_cell_size() {
        let mut tiles = TileMap::filled(3, 2, TileKind::Grass);
        tiles.set(2, 1, TileKind::Cliff);
        assert_eq!(tiles.tile_at(Vec2::new(95.0, 45.0)), Some(TileKind::Cliff));
        assert_eq!(tiles.tile_at(Vec2::new(10.0, 10.0)), Some(TileKind::Grass));
        assert_eq!(tiles.tile_at(Vec2::new(130.0, 10.0)), None);
        assert_eq!(tiles.tile_at(Vec2::new(-1.0, 10.0)), None);
    }

    #[test]
    fn tile_center_is_offset_by_half_a_cell() {
        assert_eq!(tile_center(0, 0), Vec2::new(20.0, 20.0));
        assert_eq!(tile_center(2, 1), Vec2::new(100.0, 60.0));
    }
}
