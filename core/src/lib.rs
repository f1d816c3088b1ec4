#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Frontier Defence engine.
//!
//! This crate defines the message surface that connects the engine, the
//! authoritative world, and pure systems. The engine submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values describing
//! what actually happened. Systems read immutable snapshots such as
//! [`TowerView`] and [`EnemyView`] and respond exclusively with new command
//! batches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod enemies;
mod map;
mod towers;
mod units;

pub use enemies::{EnemyKind, EnemyProfile};
pub use glam::Vec2;
pub use map::{
    tile_center, Biome, MapConfig, MapLayout, MapProvider, TileKind, TileMap, CELL_SIZE,
};
pub use towers::{
    AbilityProfile, AuraKind, BurstProfile, ChainProfile, ChargeProfile, FireMode, StatChange,
    TowerKind, TowerStats, UpgradeTier, MAX_TOWER_LEVEL,
};
pub use units::{UnitKind, UnitProfile};

/// Number of tower kinds a player brings into a match.
pub const LOADOUT_SIZE: usize = 5;

/// Number of ticks that make up one second of game time.
pub const FRAMES_PER_SECOND: u64 = 60;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Stores the tower roster and map parameters for the next match.
    ConfigureLoadout {
        /// Tower kinds the player may construct.
        towers: Vec<TowerKind>,
        /// Parameters forwarded to the map provider.
        map: MapConfig,
    },
    /// Installs a generated map; layouts with fewer than two waypoints are rejected.
    InstallMap {
        /// Terrain and path produced by the map provider.
        layout: MapLayout,
    },
    /// Flips the match into the started state.
    StartGame,
    /// Advances the simulation clock by one tick.
    Tick,
    /// Counts every tower's ability cooldown and active timers down by one tick.
    TickAbilities,
    /// Resets every tower's buffs to neutral and installs the provided multipliers.
    ApplyBuffs {
        /// Accumulated multipliers keyed by the receiving tower.
        buffs: Vec<(TowerId, TowerBuffs)>,
    },
    /// Requests construction of a tower centred at the provided position.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Centre of the tower in world units.
        position: Vec2,
    },
    /// Purchases the next upgrade tier for a tower.
    UpgradeTower {
        /// Identifier of the tower to upgrade.
        tower: TowerId,
    },
    /// Removes a tower and refunds part of its cumulative cost.
    SellTower {
        /// Identifier of the tower to sell.
        tower: TowerId,
    },
    /// Changes how a tower chooses between candidate enemies.
    SetTargetingMode {
        /// Identifier of the tower to reconfigure.
        tower: TowerId,
        /// Selection rule to install.
        mode: TargetingMode,
    },
    /// Triggers a tower's active ability.
    ActivateAbility {
        /// Identifier of the tower whose ability is triggered.
        tower: TowerId,
    },
    /// Stores the combat state computed for a tower this tick.
    UpdateTowerCombat {
        /// Identifier of the tower being updated.
        tower: TowerId,
        /// Replacement combat state.
        state: TowerCombatState,
    },
    /// Launches a homing projectile from a tower at an enemy.
    FireProjectile {
        /// Tower that fired the projectile.
        tower: TowerId,
        /// Enemy the projectile homes on.
        target: EnemyId,
        /// Damage carried by the projectile.
        damage: f32,
        /// Category used by the armour rule.
        kind: DamageKind,
        /// Impact radius; zero for single-target hits.
        splash: f32,
    },
    /// Fires an instant beam that damages its target in the same tick.
    FireBeam {
        /// Tower that fired the beam.
        tower: TowerId,
        /// Enemy struck by the beam.
        target: EnemyId,
        /// Damage applied to the target.
        damage: f32,
    },
    /// Applies a single pulse of continuous beam damage.
    StrikeEnemy {
        /// Tower that produced the pulse.
        tower: TowerId,
        /// Enemy struck by the pulse.
        target: EnemyId,
        /// Damage applied to the target.
        damage: f32,
    },
    /// Damages and freezes every enemy in a lightning chain.
    StrikeChain {
        /// Tower that discharged the chain.
        tower: TowerId,
        /// Enemies in strike order, the first being the tower's target.
        chain: Vec<EnemyId>,
        /// Damage applied to each link.
        damage: f32,
        /// Freeze applied to each link, in ticks.
        stun_frames: u32,
    },
    /// Deploys a unit at the base end of the path.
    DeployUnit {
        /// Production tower responsible for the unit.
        tower: TowerId,
        /// Kind of unit to deploy.
        kind: UnitKind,
        /// Level of the producing tower used for stat scaling.
        level: u8,
    },
    /// Marks the start of a wave.
    BeginWave {
        /// Wave number being started.
        wave: u32,
    },
    /// Places a new enemy at the start of the path.
    SpawnEnemy {
        /// Kind of enemy to spawn.
        kind: EnemyKind,
        /// Health after wave scaling.
        health: f32,
    },
    /// Settles the economy for a finished wave and advances the wave counter.
    CompleteWave {
        /// Wave number being completed.
        wave: u32,
    },
    /// Mirrors the wave scheduler's progress into the world for publishing.
    SyncWaveStatus {
        /// Tokens still waiting in the spawn queue.
        queued: u32,
        /// Whether a wave is currently spawning or being fought.
        in_progress: bool,
        /// Ticks until the next wave starts on its own.
        countdown: u32,
    },
    /// Runs unit, projectile, enemy and effect resolution for the current tick.
    AdvanceEntities,
    /// Adds money to the treasury.
    GrantMoney {
        /// Amount credited.
        amount: u64,
    },
    /// Removes every live enemy without paying bounties.
    ClearEnemies,
    /// Toggles suppression of base damage.
    ToggleGodMode,
    /// Disables a tower for the provided number of ticks.
    StunTower {
        /// Identifier of the tower to stun.
        tower: TowerId,
        /// Number of ticks the tower stays disabled.
        frames: u32,
    },
    /// Clears every entity and restores the starting economy.
    ResetWorld,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a loadout was stored.
    LoadoutConfigured {
        /// Tower kinds the player may construct.
        towers: Vec<TowerKind>,
        /// Map parameters that will be requested from the provider.
        map: MapConfig,
    },
    /// Reports that a loadout was rejected.
    LoadoutRejected {
        /// Reason the loadout was refused.
        reason: LoadoutError,
    },
    /// Confirms that a generated map was installed.
    MapInstalled {
        /// Number of tile columns.
        columns: u32,
        /// Number of tile rows.
        rows: u32,
        /// Total arc length of the enemy path.
        path_length: f32,
    },
    /// Reports that a generated map had no usable path.
    MapRejected,
    /// Confirms that the match started.
    GameStarted,
    /// Reports that a start request was refused.
    GameStartRejected {
        /// Reason the match could not start.
        reason: StartError,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Tick counter after advancing.
        frame: u64,
    },
    /// Confirms that a tower was placed.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Centre of the tower in world units.
        position: Vec2,
    },
    /// Reports that a placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower that was requested.
        kind: TowerKind,
        /// Requested centre in world units.
        position: Vec2,
        /// Reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower was upgraded.
    TowerUpgraded {
        /// Identifier of the upgraded tower.
        tower: TowerId,
        /// Level reached after the upgrade.
        level: u8,
    },
    /// Reports that an upgrade request was rejected.
    TowerUpgradeRejected {
        /// Identifier of the tower that was targeted.
        tower: TowerId,
        /// Reason the upgrade failed.
        reason: UpgradeError,
    },
    /// Confirms that a tower was sold.
    TowerSold {
        /// Identifier of the removed tower.
        tower: TowerId,
        /// Money returned to the player.
        refund: u64,
    },
    /// Reports that a request named a tower that does not exist.
    TowerMissing {
        /// Identifier that failed to resolve.
        tower: TowerId,
        /// Reason the lookup failed.
        reason: TowerLookupError,
    },
    /// Confirms that a tower's targeting mode changed.
    TargetingModeChanged {
        /// Identifier of the reconfigured tower.
        tower: TowerId,
        /// Newly installed selection rule.
        mode: TargetingMode,
    },
    /// Confirms that a tower's ability was activated.
    AbilityActivated {
        /// Identifier of the tower.
        tower: TowerId,
    },
    /// Reports that an ability activation was rejected.
    AbilityRejected {
        /// Identifier of the tower.
        tower: TowerId,
        /// Reason the activation failed.
        reason: AbilityError,
    },
    /// Confirms that a tower was stunned.
    TowerStunned {
        /// Identifier of the stunned tower.
        tower: TowerId,
        /// First tick on which the tower acts again.
        until: u64,
    },
    /// Confirms that a projectile was launched.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower that fired it.
        tower: TowerId,
        /// Enemy it homes on.
        target: EnemyId,
    },
    /// Confirms that a unit was deployed.
    UnitDeployed {
        /// Identifier assigned to the unit.
        unit: UnitId,
        /// Production tower that deployed it.
        tower: TowerId,
        /// Kind of unit deployed.
        kind: UnitKind,
    },
    /// Announces that a wave began.
    WaveStarted {
        /// Wave number.
        wave: u32,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of enemy spawned.
        kind: EnemyKind,
        /// Health after wave scaling.
        health: f32,
    },
    /// Reports that an enemy died and paid its bounty.
    EnemyKilled {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Kind of enemy killed.
        kind: EnemyKind,
        /// Bounty credited to the treasury.
        reward: u64,
    },
    /// Reports that an enemy reached the end of the path.
    BaseBreached {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Health removed from the base; zero while god mode is active.
        damage: i32,
    },
    /// Announces that a wave was settled.
    WaveCompleted {
        /// Wave number that finished.
        wave: u32,
        /// Completion bonus credited, including the perfect-wave bonus.
        bonus: u64,
        /// Whether the base took no damage during the wave.
        perfect: bool,
    },
    /// Announces that base health was exhausted.
    BaseDestroyed {
        /// Wave during which the base fell.
        wave: u32,
    },
    /// Confirms that money was granted.
    MoneyGranted {
        /// Amount credited.
        amount: u64,
    },
    /// Confirms that live enemies were removed.
    EnemiesCleared {
        /// Number of enemies removed.
        count: usize,
    },
    /// Announces the new god-mode setting.
    GodModeToggled {
        /// Whether base damage is now suppressed.
        enabled: bool,
    },
    /// Confirms that the world returned to its starting state.
    WorldReset,
}

/// Rule that picks one enemy out of a tower's candidate set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetingMode {
    /// Furthest along the path.
    #[default]
    First,
    /// Least far along the path.
    Last,
    /// Highest current health.
    Strongest,
    /// Lowest current health.
    Weakest,
    /// Nearest to the tower.
    Closest,
    /// Uniformly random.
    Random,
}

impl TargetingMode {
    /// Every targeting mode in presentation order.
    pub const ALL: [TargetingMode; 6] = [
        Self::First,
        Self::Last,
        Self::Strongest,
        Self::Weakest,
        Self::Closest,
        Self::Random,
    ];
}

/// Category of a hit, consulted by the armour rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    /// Ordinary kinetic damage.
    Physical,
    /// Energy weapons, which ignore lead armour.
    Energy,
    /// Blast damage, which ignores lead armour.
    Explosive,
    /// Chilling snowballs that stack slows into a freeze.
    Frost,
}

impl DamageKind {
    /// Whether hits of this category ignore lead armour.
    #[must_use]
    pub const fn pierces_armor(self) -> bool {
        matches!(self, Self::Energy | Self::Explosive)
    }

    /// Whether hits of this category add chill stacks.
    #[must_use]
    pub const fn chills(self) -> bool {
        matches!(self, Self::Frost)
    }
}

/// Multipliers granted to a tower by nearby auras.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerBuffs {
    /// Multiplier applied to the base range.
    pub range: f32,
    /// Multiplier dividing the base cooldown.
    pub fire_rate: f32,
    /// Multiplier applied to damage per hit.
    pub damage: f32,
}

impl TowerBuffs {
    /// Multipliers that leave every stat unchanged.
    pub const NEUTRAL: Self = Self {
        range: 1.0,
        fire_rate: 1.0,
        damage: 1.0,
    };
}

impl Default for TowerBuffs {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Phase of the charge-beam cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaserState {
    /// Waiting for a target.
    #[default]
    Idle,
    /// Building up charge while tracking a target.
    Charging {
        /// Ticks left before the beam fires.
        remaining: u32,
        /// Enemy being tracked.
        target: EnemyId,
    },
    /// Beam is live and pulsing damage.
    Firing {
        /// Ticks left before the beam shuts off.
        remaining: u32,
        /// Enemy currently under the beam.
        target: EnemyId,
    },
    /// Venting heat; no targeting.
    Cooldown {
        /// Ticks left before the tower returns to idle.
        remaining: u32,
    },
}

/// Per-tower combat bookkeeping carried between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TowerCombatState {
    /// Current turret heading in radians.
    pub rotation: f32,
    /// Heading the turret is rotating toward.
    pub desired_rotation: f32,
    /// Tick on which the cooldown was last reset by firing.
    pub last_shot_frame: u64,
    /// Burst shots still pending.
    pub burst_remaining: u32,
    /// Ticks until the next pending burst shot.
    pub burst_timer: u32,
    /// Charge-beam cycle.
    pub phaser: PhaserState,
    /// Ticks accumulated toward the next unit deployment.
    pub production_timer: u32,
}

/// Kind of cosmetic effect record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Instant-beam trace.
    Beam,
    /// Single lightning arc.
    Chain,
    /// Splash impact.
    Explosion,
}

/// Reasons a loadout configuration may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum LoadoutError {
    /// The roster does not contain exactly [`LOADOUT_SIZE`] towers.
    #[error("a loadout holds exactly {expected} towers, got {actual}")]
    WrongSize {
        /// Required roster size.
        expected: usize,
        /// Provided roster size.
        actual: usize,
    },
    /// A tower kind appears more than once.
    #[error("{0:?} appears in the loadout more than once")]
    Duplicate(TowerKind),
    /// The map scale lies outside 1 through 5.
    #[error("map scale {0} is outside 1..=5")]
    InvalidScale(u32),
}

/// Reasons a start request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum StartError {
    /// No loadout has been configured yet.
    #[error("configure a loadout before starting the game")]
    NoLoadout,
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// No map has been installed yet.
    #[error("no map is installed")]
    NoMap,
    /// The tower kind is not part of the configured loadout.
    #[error("tower is not part of the loadout")]
    NotInLoadout,
    /// The position lies outside the tile map.
    #[error("position is outside the map")]
    OutOfBounds,
    /// The tile underneath is not buildable for this tower kind.
    #[error("tile is not buildable for this tower")]
    InvalidTile,
    /// The per-kind population cap has been reached.
    #[error("placement limit reached")]
    LimitReached,
    /// The footprint overlaps another tower.
    #[error("too close to another tower")]
    Overlap,
    /// The treasury cannot cover the tower cost.
    #[error("insufficient funds")]
    InsufficientFunds,
}

/// Reasons a tower upgrade request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum UpgradeError {
    /// No tower with the provided identifier exists.
    #[error("tower does not exist")]
    MissingTower,
    /// The tower already reached [`MAX_TOWER_LEVEL`].
    #[error("tower is already at max level")]
    MaxLevel,
    /// The treasury cannot cover the upgrade cost.
    #[error("insufficient funds")]
    InsufficientFunds,
}

/// Reasons an ability activation may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum AbilityError {
    /// No tower with the provided identifier exists.
    #[error("tower does not exist")]
    MissingTower,
    /// The tower kind has no active ability.
    #[error("tower has no active ability")]
    NoAbility,
    /// The ability is still recharging.
    #[error("ability is on cooldown for {remaining} more ticks")]
    OnCooldown {
        /// Ticks until the ability can be used again.
        remaining: u32,
    },
}

/// Reasons a request naming a tower may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum TowerLookupError {
    /// No tower with the provided identifier exists.
    #[error("tower does not exist")]
    MissingTower,
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the enemy identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the projectile identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the unit identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Number of upgrade tiers purchased.
    pub level: u8,
    /// Centre of the tower in world units.
    pub position: Vec2,
    /// Stat block after upgrades.
    pub stats: TowerStats,
    /// Multipliers installed by this tick's aura pass.
    pub buffs: TowerBuffs,
    /// Selection rule used when picking targets.
    pub targeting: TargetingMode,
    /// Combat bookkeeping carried between ticks.
    pub combat: TowerCombatState,
    /// Ticks until the ability may be used again.
    pub ability_cooldown: u32,
    /// Ticks the ability effect stays live.
    pub ability_active: u32,
    /// First tick on which a stunned tower acts again.
    pub stunned_until: u64,
    /// Lifetime damage credited to the tower.
    pub damage_dealt: f32,
    /// Lifetime income credited to the tower.
    pub cash_generated: u64,
    /// Purchase price plus every upgrade bought.
    pub invested: u64,
}

impl TowerSnapshot {
    /// Targeting radius after the range buff.
    #[must_use]
    pub fn effective_range(&self) -> f32 {
        self.stats.range * self.buffs.range
    }

    /// Damage per hit after the damage buff.
    #[must_use]
    pub fn effective_damage(&self) -> f32 {
        self.stats.damage * self.buffs.damage
    }

    /// Whether the tower is disabled on the provided tick.
    #[must_use]
    pub const fn is_stunned(&self, frame: u64) -> bool {
        self.stunned_until > frame
    }
}

/// Read-only snapshot describing all placed towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Identifier allocated to the enemy by the world.
    pub id: EnemyId,
    /// Kind of enemy.
    pub kind: EnemyKind,
    /// Position in world units.
    pub position: Vec2,
    /// Arc length travelled along the path.
    pub progress: f32,
    /// Current health.
    pub health: f32,
    /// Health at spawn.
    pub max_health: f32,
    /// Current speed after chill.
    pub speed: f32,
    /// Remaining hard-freeze ticks.
    pub frozen: u32,
    /// Accumulated chill stacks.
    pub chill_stacks: u32,
    /// Whether the enemy carries lead armour.
    pub armored: bool,
    /// Whether the enemy is hidden from towers without detection.
    pub hidden: bool,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a single enemy.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .and_then(|index| self.snapshots.get(index))
    }

    /// Number of enemies captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no enemies were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of an in-flight projectile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Current position in world units.
    pub position: Vec2,
    /// Enemy the projectile homes on.
    pub target: EnemyId,
    /// Tower that fired it.
    pub source: TowerId,
    /// Damage carried.
    pub damage: f32,
    /// Damage category.
    pub kind: DamageKind,
    /// Impact radius; zero for single-target hits.
    pub splash: f32,
}

/// Immutable representation of a deployed unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// Identifier allocated to the unit.
    pub id: UnitId,
    /// Kind of unit.
    pub kind: UnitKind,
    /// Current position in world units.
    pub position: Vec2,
    /// Arc length from the path start.
    pub progress: f32,
    /// Current health.
    pub health: f32,
    /// Damage per detonation or shot.
    pub damage: f32,
    /// Whether the unit is walking rather than holding to shoot.
    pub advancing: bool,
}

/// Immutable representation of a cosmetic effect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectSnapshot {
    /// Kind of effect.
    pub kind: EffectKind,
    /// Start point; the centre for explosions.
    pub from: Vec2,
    /// End point; equal to `from` for explosions.
    pub to: Vec2,
    /// Ticks left before the record disappears.
    pub remaining: u32,
    /// Lifetime the record started with.
    pub lifetime: u32,
}

/// State published to the presentation layer every few ticks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Tick on which the snapshot was captured.
    pub frame: u64,
    /// Whole seconds of game time elapsed since the match started.
    pub game_seconds: u64,
    /// Whether the match is running.
    pub started: bool,
    /// Money in the treasury.
    pub money: u64,
    /// Current wave number.
    pub wave: u32,
    /// Current base health.
    pub base_health: i32,
    /// Maximum base health.
    pub max_base_health: i32,
    /// Live enemies plus enemies still queued to spawn.
    pub enemies_remaining: usize,
    /// Whether a wave is spawning or being fought.
    pub wave_in_progress: bool,
    /// Whole seconds until the next wave starts on its own.
    pub wave_countdown_seconds: u32,
    /// Whether base damage is suppressed.
    pub god_mode: bool,
    /// Tower kinds the player may construct.
    pub loadout: Vec<TowerKind>,
    /// Map parameters of the current match.
    pub map: MapConfig,
    /// Number of placed towers per kind.
    pub tower_counts: BTreeMap<TowerKind, u32>,
    /// Every placed tower.
    pub towers: Vec<TowerSnapshot>,
    /// Every live enemy.
    pub enemies: Vec<EnemySnapshot>,
    /// Every in-flight projectile.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Every deployed unit.
    pub units: Vec<UnitSnapshot>,
    /// Every live cosmetic effect.
    pub effects: Vec<EffectSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::{
        DamageKind, EnemyId, EnemyKind, EnemySnapshot, EnemyView, GameSnapshot, PlacementError,
        TowerBuffs, TowerId, TowerKind, Vec2,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    fn enemy(id: u32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Basic,
            position: Vec2::new(id as f32, 0.0),
            progress: id as f32,
            health: 5.0,
            max_health: 5.0,
            speed: 1.2,
            frozen: 0,
            chill_stacks: 0,
            armored: false,
            hidden: false,
        }
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::Overlap);
    }

    #[test]
    fn game_snapshot_round_trips_through_bincode() {
        let mut snapshot = GameSnapshot {
            money: 800,
            wave: 3,
            base_health: 140,
            max_base_health: 150,
            enemies: vec![enemy(4)],
            ..GameSnapshot::default()
        };
        let _ = snapshot.tower_counts.insert(TowerKind::Scout, 2);
        assert_round_trip(&snapshot);
        assert_round_trip(&TowerId::new(9));
    }

    #[test]
    fn only_energy_and_explosive_pierce_armor() {
        assert!(DamageKind::Energy.pierces_armor());
        assert!(DamageKind::Explosive.pierces_armor());
        assert!(!DamageKind::Physical.pierces_armor());
        assert!(!DamageKind::Frost.pierces_armor());
        assert!(DamageKind::Frost.chills());
    }

    #[test]
    fn neutral_buffs_are_identity() {
        assert_eq!(
            TowerBuffs::default(),
            TowerBuffs {
                range: 1.0,
                fire_rate: 1.0,
                damage: 1.0
            }
        );
    }

    #[test]
    fn enemy_view_is_ordered_and_searchable() {
        let view = EnemyView::from_snapshots(vec![enemy(7), enemy(2), enemy(5)]);
        let ids: Vec<u32> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(ids, vec![2, 5, 7]);
        assert_eq!(view.get(EnemyId::new(5)).map(|e| e.progress), Some(5.0));
        assert!(view.get(EnemyId::new(6)).is_none());
    }
}
