#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Frontier Defence.

mod combat;
mod enemies;
mod entities;
mod path;
mod towers;

use std::collections::BTreeSet;

use frontier_defence_core::{
    AbilityError, Command, EnemyId, EnemyKind, Event, LoadoutError, MapConfig, MapLayout,
    PlacementError, StartError, TileMap, TowerBuffs, TowerId, TowerKind, TowerLookupError,
    UpgradeError, Vec2, FRAMES_PER_SECOND, LOADOUT_SIZE, MAX_TOWER_LEVEL,
};
use log::{debug, info, warn};

use crate::{
    enemies::EnemyState,
    entities::{EffectState, ProjectileState, UnitState},
    path::PathGeometry,
    towers::{farm_income, medic_heal, TowerRegistry},
};

/// Money available at the start of every match unless configured otherwise.
pub const DEFAULT_STARTING_MONEY: u64 = 800;

/// Base health at the start of every match unless configured otherwise.
pub const DEFAULT_BASE_HEALTH: i32 = 150;

const PERFECT_WAVE_BONUS: u64 = 50;

/// Scheduler progress mirrored into the world for publishing.
#[derive(Clone, Copy, Debug, Default)]
struct WaveStatus {
    queued: u32,
    in_progress: bool,
    countdown: u32,
}

/// Represents the authoritative Frontier Defence world state.
#[derive(Debug)]
pub struct World {
    starting_money: u64,
    max_base_health: i32,
    money: u64,
    base_health: i32,
    wave: u32,
    frame: u64,
    game_seconds: u64,
    started: bool,
    god_mode: bool,
    perfect_wave: bool,
    loadout: Vec<TowerKind>,
    map_config: MapConfig,
    tiles: TileMap,
    path: PathGeometry,
    towers: TowerRegistry,
    enemies: Vec<EnemyState>,
    projectiles: Vec<ProjectileState>,
    units: Vec<UnitState>,
    effects: Vec<EffectState>,
    wave_status: WaveStatus,
    next_enemy_id: u32,
    next_projectile_id: u32,
    next_unit_id: u32,
}

impl World {
    /// Creates a new world with the default starting economy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_economy(DEFAULT_STARTING_MONEY, DEFAULT_BASE_HEALTH)
    }

    /// Creates a new world whose resets restore the provided money and base health.
    #[must_use]
    pub fn with_economy(starting_money: u64, base_health: i32) -> Self {
        Self {
            starting_money,
            max_base_health: base_health,
            money: starting_money,
            base_health,
            wave: 1,
            frame: 0,
            game_seconds: 0,
            started: false,
            god_mode: false,
            perfect_wave: true,
            loadout: Vec::new(),
            map_config: MapConfig::default(),
            tiles: TileMap::default(),
            path: PathGeometry::default(),
            towers: TowerRegistry::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            units: Vec::new(),
            effects: Vec::new(),
            wave_status: WaveStatus::default(),
            next_enemy_id: 0,
            next_projectile_id: 0,
            next_unit_id: 0,
        }
    }

    /// Clears every entity and the map, and restores the starting economy.
    ///
    /// The loadout, map parameters, god mode and tick counter survive.
    fn reset(&mut self) {
        self.money = self.starting_money;
        self.base_health = self.max_base_health;
        self.wave = 1;
        self.game_seconds = 0;
        self.started = false;
        self.perfect_wave = true;
        self.tiles = TileMap::default();
        self.path = PathGeometry::default();
        self.towers.clear();
        self.enemies.clear();
        self.projectiles.clear();
        self.units.clear();
        self.effects.clear();
        self.wave_status = WaveStatus::default();
    }

    fn configure_loadout(
        &mut self,
        towers: Vec<TowerKind>,
        map: MapConfig,
    ) -> Result<(), LoadoutError> {
        if towers.len() != LOADOUT_SIZE {
            return Err(LoadoutError::WrongSize {
                expected: LOADOUT_SIZE,
                actual: towers.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for kind in &towers {
            if !seen.insert(*kind) {
                return Err(LoadoutError::Duplicate(*kind));
            }
        }
        if !(1..=5).contains(&map.scale) {
            return Err(LoadoutError::InvalidScale(map.scale));
        }

        self.reset();
        self.loadout = towers;
        self.map_config = map;
        Ok(())
    }

    fn install_map(&mut self, layout: MapLayout, out_events: &mut Vec<Event>) {
        let Some(path) = PathGeometry::measure(layout.path) else {
            warn!("map provider returned an unusable path");
            out_events.push(Event::MapRejected);
            return;
        };

        info!(
            "installed {}x{} map with path length {:.0}",
            layout.tiles.columns(),
            layout.tiles.rows(),
            path.length()
        );
        out_events.push(Event::MapInstalled {
            columns: layout.tiles.columns(),
            rows: layout.tiles.rows(),
            path_length: path.length(),
        });
        self.tiles = layout.tiles;
        self.path = path;
    }

    fn place_tower(&mut self, kind: TowerKind, position: Vec2) -> Result<TowerId, PlacementError> {
        if self.path.is_empty() {
            return Err(PlacementError::NoMap);
        }
        if !self.loadout.is_empty() && !self.loadout.contains(&kind) {
            return Err(PlacementError::NotInLoadout);
        }
        self.towers.check_placement(&self.tiles, kind, position)?;

        let cost = kind.base_stats().cost;
        if self.money < cost {
            return Err(PlacementError::InsufficientFunds);
        }

        self.money -= cost;
        Ok(self.towers.insert(kind, position))
    }

    fn upgrade_tower(&mut self, id: TowerId) -> Result<u8, UpgradeError> {
        let tower = self.towers.get_mut(id).ok_or(UpgradeError::MissingTower)?;
        if tower.level >= MAX_TOWER_LEVEL {
            return Err(UpgradeError::MaxLevel);
        }
        let tier = tower
            .kind
            .upgrade(tower.level)
            .ok_or(UpgradeError::MaxLevel)?;
        if self.money < tier.cost {
            return Err(UpgradeError::InsufficientFunds);
        }

        self.money -= tier.cost;
        for change in tier.changes {
            tower.stats.apply(*change);
        }
        tower.invested += tier.cost;
        tower.level += 1;
        Ok(tower.level)
    }

    fn sell_tower(&mut self, id: TowerId) -> Result<u64, TowerLookupError> {
        let tower = self
            .towers
            .remove(id)
            .ok_or(TowerLookupError::MissingTower)?;
        let refund = tower.refund();
        self.money += refund;
        Ok(refund)
    }

    fn activate_ability(&mut self, id: TowerId) -> Result<(), AbilityError> {
        let tower = self.towers.get_mut(id).ok_or(AbilityError::MissingTower)?;
        let ability = tower.stats.ability.ok_or(AbilityError::NoAbility)?;
        if tower.ability_cooldown > 0 {
            return Err(AbilityError::OnCooldown {
                remaining: tower.ability_cooldown,
            });
        }

        tower.ability_cooldown = ability.cooldown;
        tower.ability_active = ability.duration.max(1);

        if tower.kind == TowerKind::Medic {
            let (centre, range) = (tower.position, tower.stats.range);
            for ally in self.towers.iter_mut() {
                if ally.position.distance(centre) <= range {
                    ally.stunned_until = 0;
                }
            }
        }
        Ok(())
    }

    fn spawn_enemy(&mut self, kind: EnemyKind, health: f32, out_events: &mut Vec<Event>) {
        if self.path.is_empty() {
            warn!("cannot spawn {kind:?} without a path");
            return;
        }
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        self.enemies
            .push(EnemyState::spawn(id, kind, health, self.path.point_at(0.0)));
        out_events.push(Event::EnemySpawned {
            enemy: id,
            kind,
            health,
        });
    }

    /// Pays the completion bonus plus farm income and medic healing.
    fn complete_wave(&mut self, wave: u32, out_events: &mut Vec<Event>) {
        let perfect = self.perfect_wave;
        let mut bonus = 0;
        if wave > 1 {
            bonus = 100 + 15 * u64::from(wave);
            if perfect {
                bonus += PERFECT_WAVE_BONUS;
            }
        }
        self.money += bonus;

        let mut heal = 0;
        for tower in self.towers.iter_mut() {
            match tower.kind {
                TowerKind::Farm => {
                    let income = farm_income(tower.level);
                    tower.cash_generated += income;
                    self.money += income;
                }
                TowerKind::Medic => heal += medic_heal(tower.level),
                _ => {}
            }
        }
        self.base_health = (self.base_health + heal).min(self.max_base_health);
        self.wave = wave.saturating_add(1);

        info!("wave {wave} complete, bonus {bonus}, perfect {perfect}");
        out_events.push(Event::WaveCompleted {
            wave,
            bonus,
            perfect,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureLoadout { towers, map } => {
            match world.configure_loadout(towers.clone(), map) {
                Ok(()) => out_events.push(Event::LoadoutConfigured { towers, map }),
                Err(reason) => out_events.push(Event::LoadoutRejected { reason }),
            }
        }
        Command::InstallMap { layout } => world.install_map(layout, out_events),
        Command::StartGame => {
            if world.loadout.is_empty() {
                out_events.push(Event::GameStartRejected {
                    reason: StartError::NoLoadout,
                });
            } else if !world.started {
                world.started = true;
                out_events.push(Event::GameStarted);
            }
        }
        Command::Tick => {
            world.frame = world.frame.saturating_add(1);
            if world.started && world.frame % FRAMES_PER_SECOND == 0 {
                world.game_seconds += 1;
            }
            out_events.push(Event::TimeAdvanced { frame: world.frame });
        }
        Command::TickAbilities => {
            for tower in world.towers.iter_mut() {
                tower.ability_cooldown = tower.ability_cooldown.saturating_sub(1);
                tower.ability_active = tower.ability_active.saturating_sub(1);
            }
        }
        Command::ApplyBuffs { buffs } => {
            for tower in world.towers.iter_mut() {
                tower.buffs = TowerBuffs::NEUTRAL;
            }
            for (id, granted) in buffs {
                match world.towers.get_mut(id) {
                    Some(tower) => tower.buffs = granted,
                    None => debug!("buffs addressed to missing tower {}", id.get()),
                }
            }
        }
        Command::PlaceTower { kind, position } => match world.place_tower(kind, position) {
            Ok(tower) => out_events.push(Event::TowerPlaced {
                tower,
                kind,
                position,
            }),
            Err(reason) => out_events.push(Event::TowerPlacementRejected {
                kind,
                position,
                reason,
            }),
        },
        Command::UpgradeTower { tower } => match world.upgrade_tower(tower) {
            Ok(level) => out_events.push(Event::TowerUpgraded { tower, level }),
            Err(reason) => out_events.push(Event::TowerUpgradeRejected { tower, reason }),
        },
        Command::SellTower { tower } => match world.sell_tower(tower) {
            Ok(refund) => out_events.push(Event::TowerSold { tower, refund }),
            Err(reason) => out_events.push(Event::TowerMissing { tower, reason }),
        },
        Command::SetTargetingMode { tower, mode } => match world.towers.get_mut(tower) {
            Some(state) => {
                state.targeting = mode;
                out_events.push(Event::TargetingModeChanged { tower, mode });
            }
            None => out_events.push(Event::TowerMissing {
                tower,
                reason: TowerLookupError::MissingTower,
            }),
        },
        Command::ActivateAbility { tower } => match world.activate_ability(tower) {
            Ok(()) => out_events.push(Event::AbilityActivated { tower }),
            Err(reason) => out_events.push(Event::AbilityRejected { tower, reason }),
        },
        Command::UpdateTowerCombat { tower, state } => match world.towers.get_mut(tower) {
            Some(entry) => entry.combat = state,
            None => debug!("combat state for missing tower {}", tower.get()),
        },
        Command::FireProjectile {
            tower,
            target,
            damage,
            kind,
            splash,
        } => world.fire_projectile(tower, target, damage, kind, splash, out_events),
        Command::FireBeam {
            tower,
            target,
            damage,
        } => world.fire_beam(tower, target, damage),
        Command::StrikeEnemy {
            tower,
            target,
            damage,
        } => world.strike_enemy(tower, target, damage),
        Command::StrikeChain {
            tower,
            chain,
            damage,
            stun_frames,
        } => world.strike_chain(tower, &chain, damage, stun_frames),
        Command::DeployUnit { tower, kind, level } => {
            world.deploy_unit(tower, kind, level, out_events);
        }
        Command::BeginWave { wave } => {
            world.wave = wave;
            world.perfect_wave = true;
            info!("wave {wave} started");
            out_events.push(Event::WaveStarted { wave });
        }
        Command::SpawnEnemy { kind, health } => world.spawn_enemy(kind, health, out_events),
        Command::CompleteWave { wave } => world.complete_wave(wave, out_events),
        Command::SyncWaveStatus {
            queued,
            in_progress,
            countdown,
        } => {
            world.wave_status = WaveStatus {
                queued,
                in_progress,
                countdown,
            };
        }
        Command::AdvanceEntities => world.advance_entities(out_events),
        Command::GrantMoney { amount } => {
            world.money = world.money.saturating_add(amount);
            out_events.push(Event::MoneyGranted { amount });
        }
        Command::ClearEnemies => {
            let count = world.enemies.len();
            world.enemies.clear();
            out_events.push(Event::EnemiesCleared { count });
        }
        Command::ToggleGodMode => {
            world.god_mode = !world.god_mode;
            out_events.push(Event::GodModeToggled {
                enabled: world.god_mode,
            });
        }
        Command::StunTower { tower, frames } => {
            let until = world.frame.saturating_add(u64::from(frames));
            match world.towers.get_mut(tower) {
                Some(state) => {
                    state.stunned_until = until;
                    out_events.push(Event::TowerStunned { tower, until });
                }
                None => out_events.push(Event::TowerMissing {
                    tower,
                    reason: TowerLookupError::MissingTower,
                }),
            }
        }
        Command::ResetWorld => {
            world.reset();
            info!("world reset");
            out_events.push(Event::WorldReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::collections::BTreeMap;

    use frontier_defence_core::{
        EffectSnapshot, EnemyView, GameSnapshot, MapConfig, ProjectileSnapshot, TileMap,
        TowerId, TowerKind, TowerSnapshot, TowerView, UnitSnapshot, Vec2, FRAMES_PER_SECOND,
    };

    use super::World;

    /// Money currently in the treasury.
    #[must_use]
    pub fn money(world: &World) -> u64 {
        world.money
    }

    /// Current base health.
    #[must_use]
    pub fn base_health(world: &World) -> i32 {
        world.base_health
    }

    /// Maximum base health.
    #[must_use]
    pub fn max_base_health(world: &World) -> i32 {
        world.max_base_health
    }

    /// Current wave number.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.wave
    }

    /// Number of ticks simulated since the world was created.
    #[must_use]
    pub fn frame(world: &World) -> u64 {
        world.frame
    }

    /// Whether the match has been started.
    #[must_use]
    pub fn is_started(world: &World) -> bool {
        world.started
    }

    /// Whether base damage is suppressed.
    #[must_use]
    pub fn god_mode(world: &World) -> bool {
        world.god_mode
    }

    /// Whether the base has taken no damage during the current wave.
    #[must_use]
    pub fn is_perfect_wave(world: &World) -> bool {
        world.perfect_wave
    }

    /// Tower kinds the player may construct.
    #[must_use]
    pub fn loadout(world: &World) -> &[TowerKind] {
        &world.loadout
    }

    /// Map parameters for the current match.
    #[must_use]
    pub fn map_config(world: &World) -> MapConfig {
        world.map_config
    }

    /// Whether a usable path has been installed.
    #[must_use]
    pub fn has_map(world: &World) -> bool {
        !world.path.is_empty()
    }

    /// Terrain of the installed map.
    #[must_use]
    pub fn tiles(world: &World) -> &TileMap {
        &world.tiles
    }

    /// Waypoints of the installed path, from spawn to base.
    #[must_use]
    pub fn path_waypoints(world: &World) -> &[Vec2] {
        world.path.waypoints()
    }

    /// Total arc length of the installed path.
    #[must_use]
    pub fn path_length(world: &World) -> f32 {
        world.path.length()
    }

    /// Number of live enemies.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Number of placed towers.
    #[must_use]
    pub fn tower_count(world: &World) -> usize {
        world.towers.len()
    }

    /// Captures a single tower.
    #[must_use]
    pub fn tower(world: &World, id: TowerId) -> Option<TowerSnapshot> {
        world.towers.get(id).map(|tower| tower.snapshot())
    }

    /// Captures a read-only view of every placed tower.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Captures a read-only view of every live enemy.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures every in-flight projectile.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Captures every deployed unit.
    #[must_use]
    pub fn units(world: &World) -> Vec<UnitSnapshot> {
        world.units.iter().map(|unit| unit.snapshot()).collect()
    }

    /// Captures every live cosmetic effect.
    #[must_use]
    pub fn effects(world: &World) -> Vec<EffectSnapshot> {
        world.effects.iter().map(|effect| effect.snapshot()).collect()
    }

    /// Number of placed towers per kind.
    #[must_use]
    pub fn tower_counts(world: &World) -> BTreeMap<TowerKind, u32> {
        let mut counts = BTreeMap::new();
        for tower in world.towers.iter() {
            *counts.entry(tower.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Copies the state published to the presentation layer.
    #[must_use]
    pub fn game_snapshot(world: &World) -> GameSnapshot {
        let status = world.wave_status;
        let per_second = u32::try_from(FRAMES_PER_SECOND).unwrap_or(60);
        GameSnapshot {
            frame: world.frame,
            game_seconds: world.game_seconds,
            started: world.started,
            money: world.money,
            wave: world.wave,
            base_health: world.base_health,
            max_base_health: world.max_base_health,
            enemies_remaining: world.enemies.len() + status.queued as usize,
            wave_in_progress: status.in_progress,
            wave_countdown_seconds: status.countdown.div_ceil(per_second),
            god_mode: world.god_mode,
            loadout: world.loadout.clone(),
            map: world.map_config,
            tower_counts: tower_counts(world),
            towers: tower_view(world).into_vec(),
            enemies: enemy_view(world).into_vec(),
            projectiles: projectiles(world),
            units: units(world),
            effects: effects(world),
        }
    }
}
