#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep scheduler and caller-facing API for Frontier Defence.
//!
//! A [`Simulation`] owns the world, the pure systems and a [`MapProvider`].
//! Every call to [`Simulation::tick`] runs one frame in a fixed phase order:
//! map provisioning, the base-destroyed transition, the clock, the wave
//! scheduler, the aura pass, tower behaviour, entity resolution and finally
//! snapshot publishing. Callers never touch the world mutably; they use the
//! methods on [`Simulation`] and read [`GameSnapshot`] copies.

mod config;

pub use config::{BaseDestroyedPolicy, ConfigError, EngineConfig, DEFAULT_SEED};

use frontier_defence_core::{
    AbilityError, Command, Event, GameSnapshot, LoadoutError, MapConfig, MapProvider,
    PlacementError, StartError, TargetingMode, TowerId, TowerKind, TowerLookupError,
    UpgradeError, Vec2,
};
use frontier_defence_system_map_generation::WindingPathGenerator;
use frontier_defence_system_spawning::{Config as SpawningConfig, Spawning};
use frontier_defence_system_tower_auras::TowerAuras;
use frontier_defence_system_tower_combat::TowerCombat;
use frontier_defence_world::{self as world, query, World};
use log::{debug, info, warn};
use sha2::{Digest, Sha256};

/// Whether the scheduler is advancing frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Frames advance normally.
    Running,
    /// The base fell under [`BaseDestroyedPolicy::Halt`]; waiting for a restart.
    Halted,
}

/// Authoritative simulation driven one frame at a time.
#[derive(Debug)]
pub struct Simulation<M> {
    config: EngineConfig,
    world: World,
    maps: M,
    spawning: Spawning,
    auras: TowerAuras,
    combat: TowerCombat,
    state: RunState,
    snapshot: GameSnapshot,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Simulation<WindingPathGenerator> {
    /// Creates a simulation that generates its own winding-path maps.
    pub fn with_default_maps(config: EngineConfig) -> Result<Self, ConfigError> {
        let maps = WindingPathGenerator::new(derive_stream_seed(config.seed, b"map"));
        Self::new(config, maps)
    }
}

impl<M: MapProvider> Simulation<M> {
    /// Creates a simulation that requests maps from the provided source.
    ///
    /// Fails when `config` holds values the scheduler cannot run with.
    pub fn new(config: EngineConfig, maps: M) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = World::with_economy(config.starting_money, config.base_health);
        let snapshot = query::game_snapshot(&world);
        Ok(Self {
            spawning: Spawning::new(SpawningConfig::new(
                derive_stream_seed(config.seed, b"waves"),
                config.inter_wave_grace_frames,
            )),
            auras: TowerAuras::new(),
            combat: TowerCombat::new(derive_stream_seed(config.seed, b"targeting")),
            config,
            world,
            maps,
            state: RunState::Running,
            snapshot,
            events: Vec::new(),
            commands: Vec::new(),
        })
    }

    /// Configuration the simulation was built with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only access for [`query`] functions.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Current run state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.state
    }

    /// Events produced by the most recent [`Simulation::tick`].
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Snapshot captured on the most recent publishing frame.
    #[must_use]
    pub const fn latest_snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Captures a snapshot of the current state outside the publishing cadence.
    #[must_use]
    pub fn snapshot_now(&self) -> GameSnapshot {
        query::game_snapshot(&self.world)
    }

    /// Stores the tower roster and map parameters, resets the match and
    /// requests a map for it.
    pub fn configure_loadout(
        &mut self,
        towers: &[TowerKind],
        map: MapConfig,
    ) -> Result<(), LoadoutError> {
        let events = self.submit(Command::ConfigureLoadout {
            towers: towers.to_vec(),
            map,
        });
        let outcome = events.into_iter().find_map(|event| match event {
            Event::LoadoutConfigured { .. } => Some(Ok(())),
            Event::LoadoutRejected { reason } => Some(Err(reason)),
            _ => None,
        });
        outcome.unwrap_or(Ok(()))?;

        self.spawning.reset();
        self.state = RunState::Running;
        let _ = self.ensure_map();
        Ok(())
    }

    /// Starts the match and seeds the opening wave countdown.
    ///
    /// Calling this on a running match is a no-op.
    pub fn start_game(&mut self) -> Result<(), StartError> {
        for event in self.submit(Command::StartGame) {
            match event {
                Event::GameStarted => {
                    info!("match started");
                    self.spawning.start(self.config.opening_grace_frames);
                }
                Event::GameStartRejected { reason } => return Err(reason),
                _ => {}
            }
        }
        Ok(())
    }

    /// Builds a tower centred at `position`, deducting its cost.
    pub fn place_tower(
        &mut self,
        kind: TowerKind,
        position: Vec2,
    ) -> Result<TowerId, PlacementError> {
        let events = self.submit(Command::PlaceTower { kind, position });
        events
            .into_iter()
            .find_map(|event| match event {
                Event::TowerPlaced { tower, .. } => Some(Ok(tower)),
                Event::TowerPlacementRejected { reason, .. } => Some(Err(reason)),
                _ => None,
            })
            .unwrap_or(Err(PlacementError::NoMap))
    }

    /// Buys the tower's next upgrade tier and returns the level reached.
    pub fn upgrade_tower(&mut self, tower: TowerId) -> Result<u8, UpgradeError> {
        let events = self.submit(Command::UpgradeTower { tower });
        events
            .into_iter()
            .find_map(|event| match event {
                Event::TowerUpgraded { level, .. } => Some(Ok(level)),
                Event::TowerUpgradeRejected { reason, .. } => Some(Err(reason)),
                _ => None,
            })
            .unwrap_or(Err(UpgradeError::MissingTower))
    }

    /// Removes a tower and returns the refund credited.
    pub fn sell_tower(&mut self, tower: TowerId) -> Result<u64, TowerLookupError> {
        let events = self.submit(Command::SellTower { tower });
        events
            .into_iter()
            .find_map(|event| match event {
                Event::TowerSold { refund, .. } => Some(Ok(refund)),
                Event::TowerMissing { reason, .. } => Some(Err(reason)),
                _ => None,
            })
            .unwrap_or(Err(TowerLookupError::MissingTower))
    }

    /// Changes how a tower picks between candidate enemies.
    pub fn set_targeting_mode(
        &mut self,
        tower: TowerId,
        mode: TargetingMode,
    ) -> Result<(), TowerLookupError> {
        let events = self.submit(Command::SetTargetingMode { tower, mode });
        events
            .into_iter()
            .find_map(|event| match event {
                Event::TargetingModeChanged { .. } => Some(Ok(())),
                Event::TowerMissing { reason, .. } => Some(Err(reason)),
                _ => None,
            })
            .unwrap_or(Err(TowerLookupError::MissingTower))
    }

    /// Triggers a tower's active ability.
    pub fn activate_ability(&mut self, tower: TowerId) -> Result<(), AbilityError> {
        let events = self.submit(Command::ActivateAbility { tower });
        events
            .into_iter()
            .find_map(|event| match event {
                Event::AbilityActivated { .. } => Some(Ok(())),
                Event::AbilityRejected { reason, .. } => Some(Err(reason)),
                _ => None,
            })
            .unwrap_or(Err(AbilityError::MissingTower))
    }

    /// Credits money to the treasury.
    pub fn grant_money(&mut self, amount: u64) {
        let _ = self.submit(Command::GrantMoney { amount });
    }

    /// Removes every live enemy without paying bounties and returns how many
    /// were removed.
    pub fn clear_enemies(&mut self) -> usize {
        self.submit(Command::ClearEnemies)
            .into_iter()
            .find_map(|event| match event {
                Event::EnemiesCleared { count } => Some(count),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Ends the current wave: clears enemies, discards the spawn queue and
    /// restarts the countdown.
    pub fn skip_wave(&mut self) {
        let cleared = self.clear_enemies();
        let mut commands = Vec::new();
        self.spawning.skip(self.config.skip_grace_frames, &mut commands);
        commands.push(self.spawning.status());
        for command in commands {
            let _ = self.submit(command);
        }
        info!("wave skipped, {cleared} enemies cleared");
    }

    /// Toggles base-damage suppression and returns the new setting.
    pub fn toggle_god_mode(&mut self) -> bool {
        let _ = self.submit(Command::ToggleGodMode);
        query::god_mode(&self.world)
    }

    /// Disables a tower for `frames` ticks and returns the frame it recovers on.
    pub fn stun_tower(&mut self, tower: TowerId, frames: u32) -> Result<u64, TowerLookupError> {
        let events = self.submit(Command::StunTower { tower, frames });
        events
            .into_iter()
            .find_map(|event| match event {
                Event::TowerStunned { until, .. } => Some(Ok(until)),
                Event::TowerMissing { reason, .. } => Some(Err(reason)),
                _ => None,
            })
            .unwrap_or(Err(TowerLookupError::MissingTower))
    }

    /// Resets the match, keeping the loadout, and resumes a halted scheduler.
    pub fn restart(&mut self) {
        self.events.clear();
        self.reset_match();
        self.state = RunState::Running;
    }

    /// Runs one frame.
    pub fn tick(&mut self) {
        self.events.clear();
        if self.state == RunState::Halted {
            return;
        }

        if !query::has_map(&self.world) && !query::loadout(&self.world).is_empty() {
            let _ = self.ensure_map();
        }

        if query::base_health(&self.world) <= 0 {
            match self.config.on_base_destroyed {
                BaseDestroyedPolicy::Restart => self.reset_match(),
                BaseDestroyedPolicy::Halt => {
                    info!("base destroyed, halting until restart");
                    self.state = RunState::Halted;
                    return;
                }
            }
        }

        self.apply(Command::Tick);
        self.apply(Command::TickAbilities);

        if query::is_started(&self.world) {
            self.spawning.handle(
                query::wave(&self.world),
                query::enemy_count(&self.world),
                &mut self.commands,
            );
            self.flush();
        }

        self.auras
            .handle(&query::tower_view(&self.world), &mut self.commands);
        self.flush();

        self.run_towers();

        self.apply(Command::AdvanceEntities);
        let status = self.spawning.status();
        self.apply(status);

        let frame = query::frame(&self.world);
        if frame % self.config.snapshot_interval == 0 {
            self.snapshot = query::game_snapshot(&self.world);
        }
    }

    /// Runs every tower in placement order against the enemies as they stand
    /// after the towers before it acted.
    fn run_towers(&mut self) {
        let frame = query::frame(&self.world);
        let towers = query::tower_view(&self.world);
        for id in towers.iter().map(|tower| tower.id) {
            let Some(tower) = query::tower(&self.world, id) else {
                continue;
            };
            let enemies = query::enemy_view(&self.world);
            self.combat
                .handle(frame, &tower, &enemies, &mut self.commands);
            self.flush();
        }
    }

    /// Requests maps until one installs or the attempt budget is spent.
    fn ensure_map(&mut self) -> bool {
        let map = query::map_config(&self.world);
        for attempt in 1..=self.config.max_map_attempts {
            let layout = self.maps.generate(&map);
            let installed = self
                .submit(Command::InstallMap { layout })
                .iter()
                .any(|event| matches!(event, Event::MapInstalled { .. }));
            if installed {
                debug!("map installed after {attempt} attempt(s)");
                return true;
            }
            warn!("map attempt {attempt} produced no usable path");
        }
        warn!(
            "no usable map after {} attempts, retrying next frame",
            self.config.max_map_attempts
        );
        false
    }

    fn reset_match(&mut self) {
        info!("resetting match");
        self.apply(Command::ResetWorld);
        self.spawning.reset();
        if !query::loadout(&self.world).is_empty() {
            let _ = self.ensure_map();
        }
    }

    /// Applies a caller command outside the frame and returns its events.
    fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        events
    }

    fn apply(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}

fn derive_stream_seed(seed: u64, stream: &[u8]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(stream);
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_seeds_differ_per_stream() {
        let map = derive_stream_seed(1, b"map");
        let waves = derive_stream_seed(1, b"waves");
        assert_ne!(map, waves);
        assert_eq!(map, derive_stream_seed(1, b"map"));
        assert_ne!(map, derive_stream_seed(2, b"map"));
    }

    #[test]
    fn fresh_simulation_publishes_starting_state() {
        let simulation = Simulation::with_default_maps(EngineConfig::default()).expect("valid config");
        let snapshot = simulation.latest_snapshot();
        assert_eq!(snapshot.money, 800);
        assert_eq!(snapshot.base_health, 150);
        assert_eq!(snapshot.max_base_health, 150);
        assert_eq!(snapshot.wave, 1);
        assert!(snapshot.towers.is_empty());
        assert!(snapshot.enemies.is_empty());
        assert_eq!(simulation.run_state(), RunState::Running);
    }

    #[test]
    fn ticks_without_loadout_only_advance_the_clock() {
        let mut simulation = Simulation::with_default_maps(EngineConfig::default()).expect("valid config");
        for _ in 0..10 {
            simulation.tick();
        }
        assert_eq!(query::frame(simulation.world()), 10);
        assert!(!query::has_map(simulation.world()));
        assert_eq!(simulation.latest_snapshot().frame, 10);
    }

    #[test]
    fn hand_built_configs_are_validated() {
        let config = EngineConfig {
            snapshot_interval: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            Simulation::with_default_maps(config),
            Err(ConfigError::Invalid(_))
        ));
    }
}
