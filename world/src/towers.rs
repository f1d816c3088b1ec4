//! Authoritative tower state management utilities.

use std::collections::BTreeMap;

use frontier_defence_core::{
    PlacementError, TargetingMode, TileKind, TileMap, TowerBuffs, TowerCombatState, TowerId,
    TowerKind, TowerSnapshot, TowerStats, Vec2,
};

/// Tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    pub(crate) id: TowerId,
    pub(crate) kind: TowerKind,
    pub(crate) level: u8,
    pub(crate) position: Vec2,
    pub(crate) stats: TowerStats,
    pub(crate) buffs: TowerBuffs,
    pub(crate) targeting: TargetingMode,
    pub(crate) combat: TowerCombatState,
    pub(crate) ability_cooldown: u32,
    pub(crate) ability_active: u32,
    pub(crate) stunned_until: u64,
    pub(crate) damage_dealt: f32,
    pub(crate) cash_generated: u64,
    /// Purchase price plus every upgrade bought.
    pub(crate) invested: u64,
}

impl TowerState {
    fn new(id: TowerId, kind: TowerKind, position: Vec2) -> Self {
        let stats = kind.base_stats();
        Self {
            id,
            kind,
            level: 0,
            position,
            stats,
            buffs: TowerBuffs::NEUTRAL,
            targeting: TargetingMode::default(),
            combat: TowerCombatState::default(),
            ability_cooldown: 0,
            ability_active: 0,
            stunned_until: 0,
            damage_dealt: 0.0,
            cash_generated: 0,
            invested: stats.cost,
        }
    }

    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            level: self.level,
            position: self.position,
            stats: self.stats,
            buffs: self.buffs,
            targeting: self.targeting,
            combat: self.combat,
            ability_cooldown: self.ability_cooldown,
            ability_active: self.ability_active,
            stunned_until: self.stunned_until,
            damage_dealt: self.damage_dealt,
            cash_generated: self.cash_generated,
            invested: self.invested,
        }
    }

    /// Money returned when the tower is sold.
    pub(crate) fn refund(&self) -> u64 {
        self.invested * 7 / 10
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn insert(&mut self, kind: TowerKind, position: Vec2) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().wrapping_add(1));
        let _ = self
            .entries
            .insert(id, TowerState::new(id, kind, position));
        id
    }

    pub(crate) fn remove(&mut self, id: TowerId) -> Option<TowerState> {
        self.entries.remove(&id)
    }

    pub(crate) fn get(&self, id: TowerId) -> Option<&TowerState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TowerState> {
        self.entries.values_mut()
    }

    pub(crate) fn count_of(&self, kind: TowerKind) -> u32 {
        let count = self.iter().filter(|tower| tower.kind == kind).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Checks terrain, population cap and footprint overlap for a new tower.
    pub(crate) fn check_placement(
        &self,
        tiles: &TileMap,
        kind: TowerKind,
        position: Vec2,
    ) -> Result<(), PlacementError> {
        let stats = kind.base_stats();
        let tile = tiles
            .tile_at(position)
            .ok_or(PlacementError::OutOfBounds)?;
        let required = if stats.cliff_only {
            TileKind::Cliff
        } else {
            TileKind::Grass
        };
        if tile != required {
            return Err(PlacementError::InvalidTile);
        }

        if let Some(limit) = stats.placement_limit {
            if self.count_of(kind) >= limit {
                return Err(PlacementError::LimitReached);
            }
        }

        let overlaps = self.iter().any(|tower| {
            tower.position.distance(position)
                < stats.placement_radius + tower.stats.placement_radius
        });
        if overlaps {
            return Err(PlacementError::Overlap);
        }

        Ok(())
    }
}

/// Income a farm pays when a wave completes.
pub(crate) fn farm_income(level: u8) -> u64 {
    let level = u64::from(level);
    let mut income = 60 + level * 25;
    if level >= 3 {
        income += 75;
    }
    if level == 5 {
        income += 500;
    }
    income
}

/// Base health a medic restores when a wave completes.
pub(crate) fn medic_heal(level: u8) -> i32 {
    5 + i32::from(level) * 5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grass(columns: u32, rows: u32) -> TileMap {
        TileMap::filled(columns, rows, TileKind::Grass)
    }

    #[test]
    fn registry_allocates_sequential_identifiers() {
        let mut registry = TowerRegistry::new();
        let first = registry.insert(TowerKind::Scout, Vec2::new(20.0, 20.0));
        let second = registry.insert(TowerKind::Scout, Vec2::new(100.0, 20.0));
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        assert_eq!(registry.count_of(TowerKind::Scout), 2);
    }

    #[test]
    fn placement_rejects_cliff_towers_on_grass() {
        let registry = TowerRegistry::new();
        let result = registry.check_placement(&grass(4, 4), TowerKind::Sniper, Vec2::splat(20.0));
        assert_eq!(result, Err(PlacementError::InvalidTile));
    }

    #[test]
    fn placement_rejects_overlapping_footprints() {
        let mut registry = TowerRegistry::new();
        let _ = registry.insert(TowerKind::Scout, Vec2::new(20.0, 20.0));
        let tiles = grass(6, 6);
        assert_eq!(
            registry.check_placement(&tiles, TowerKind::Scout, Vec2::new(59.0, 20.0)),
            Err(PlacementError::Overlap)
        );
        assert_eq!(
            registry.check_placement(&tiles, TowerKind::Scout, Vec2::new(60.0, 20.0)),
            Ok(())
        );
    }

    #[test]
    fn placement_respects_population_cap() {
        let mut registry = TowerRegistry::new();
        let tiles = grass(40, 2);
        for index in 0..3 {
            let _ = registry.insert(
                TowerKind::Commander,
                Vec2::new(20.0 + 80.0 * index as f32, 20.0),
            );
        }
        assert_eq!(
            registry.check_placement(&tiles, TowerKind::Commander, Vec2::new(1_000.0, 20.0)),
            Err(PlacementError::LimitReached)
        );
    }

    #[test]
    fn refund_is_seventy_percent_of_investment_rounded_down() {
        let mut registry = TowerRegistry::new();
        let id = registry.insert(TowerKind::Scout, Vec2::ZERO);
        let tower = registry.get_mut(id).expect("tower");
        tower.invested = 555;
        assert_eq!(tower.refund(), 388);
    }

    #[test]
    fn farm_income_has_threshold_bonuses() {
        assert_eq!(farm_income(0), 60);
        assert_eq!(farm_income(2), 110);
        assert_eq!(farm_income(3), 210);
        assert_eq!(farm_income(5), 760);
        assert_eq!(medic_heal(3), 20);
    }
}
