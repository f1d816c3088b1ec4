//! Closed tower catalogue: kinds, stat blocks, and upgrade tiers.

use serde::{Deserialize, Serialize};

use crate::UnitKind;

/// Highest level a tower can reach through upgrades.
pub const MAX_TOWER_LEVEL: u8 = 5;

const DEFAULT_RADIUS: f32 = 20.0;
const LARGE_RADIUS: f32 = 35.0;

/// Types of towers that can be constructed on the battlefield.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TowerKind {
    /// Fast-firing light tower that reveals hidden enemies.
    Scout,
    /// Burst-firing rifle tower.
    Soldier,
    /// Very high fire rate, low damage per shot.
    Minigunner,
    /// Long-range piercing tower restricted to cliffs.
    Sniper,
    /// Splash-damage rocket launcher.
    Rocketeer,
    /// Heals the base between waves; ability cleanses stuns.
    Medic,
    /// Fire-rate aura with an overdrive ability.
    Commander,
    /// Range aura with a precision-scan ability.
    RadarCamp,
    /// Production building that deploys collision transports.
    MilitaryBase,
    /// Production building that deploys ranged squads.
    Barracks,
    /// Instant-beam tower restricted to cliffs.
    Railgunner,
    /// Heavy splash artillery restricted to cliffs.
    Mortar,
    /// Income building paid out when a wave completes.
    Farm,
    /// Bounty hunter that earns extra cash per hit.
    Cowboy,
    /// Charge-beam tower with a four-state firing cycle.
    Phaser,
    /// Chain-lightning coil that briefly freezes every enemy it hits.
    Shocker,
    /// Chilling tower whose hits stack into a hard freeze.
    Snowballer,
}

/// How a tower spends its turn once buffs are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FireMode {
    /// Rotates toward a target and launches homing projectiles.
    Projectile,
    /// Applies damage in the firing tick and leaves a cosmetic beam.
    InstantBeam,
    /// Runs the idle / charging / firing / cooldown beam cycle.
    ChargeBeam,
    /// Strikes a target and arcs to nearby enemies.
    ChainLightning,
    /// Deploys a mobile unit of the given kind on its cooldown.
    Production(UnitKind),
    /// Never targets nor fires.
    Passive,
}

/// Multiplier an aura tower contributes to allies in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuraKind {
    /// Boosts ally fire rate; the active ability adds overdrive on top.
    FireRate,
    /// Boosts ally range; the active ability adds range and damage on top.
    RangeAndDamage,
}

impl TowerKind {
    /// Every constructible tower kind in catalogue order.
    pub const ALL: [TowerKind; 17] = [
        Self::Scout,
        Self::Soldier,
        Self::Minigunner,
        Self::Sniper,
        Self::Rocketeer,
        Self::Medic,
        Self::Commander,
        Self::RadarCamp,
        Self::MilitaryBase,
        Self::Barracks,
        Self::Railgunner,
        Self::Mortar,
        Self::Farm,
        Self::Cowboy,
        Self::Phaser,
        Self::Shocker,
        Self::Snowballer,
    ];

    /// Player-facing name of the tower.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scout => "Scout",
            Self::Soldier => "Soldier",
            Self::Minigunner => "Minigunner",
            Self::Sniper => "Sniper",
            Self::Rocketeer => "Rocketeer",
            Self::Medic => "Medic",
            Self::Commander => "Commander",
            Self::RadarCamp => "Radar Camp",
            Self::MilitaryBase => "Military Base",
            Self::Barracks => "Barracks",
            Self::Railgunner => "Railgunner",
            Self::Mortar => "Mortar",
            Self::Farm => "Crypto Farm",
            Self::Cowboy => "Bounty Hunter",
            Self::Phaser => "Phaser Array",
            Self::Shocker => "Tesla Coil",
            Self::Snowballer => "Snowballer",
        }
    }

    /// Behaviour family dispatched by the combat system.
    #[must_use]
    pub const fn fire_mode(self) -> FireMode {
        match self {
            Self::Railgunner => FireMode::InstantBeam,
            Self::Phaser => FireMode::ChargeBeam,
            Self::Shocker => FireMode::ChainLightning,
            Self::MilitaryBase => FireMode::Production(UnitKind::Transport),
            Self::Barracks => FireMode::Production(UnitKind::Squad),
            Self::RadarCamp | Self::Farm => FireMode::Passive,
            Self::Scout
            | Self::Soldier
            | Self::Minigunner
            | Self::Sniper
            | Self::Rocketeer
            | Self::Medic
            | Self::Commander
            | Self::Mortar
            | Self::Cowboy
            | Self::Snowballer => FireMode::Projectile,
        }
    }

    /// Aura broadcast to nearby towers, if any.
    #[must_use]
    pub const fn aura(self) -> Option<AuraKind> {
        match self {
            Self::Commander => Some(AuraKind::FireRate),
            Self::RadarCamp => Some(AuraKind::RangeAndDamage),
            _ => None,
        }
    }

    /// Impact radius of the tower's projectiles; zero for single-target shots.
    #[must_use]
    pub const fn splash_radius(self) -> f32 {
        match self {
            Self::Rocketeer => 40.0,
            Self::Mortar => 60.0,
            _ => 0.0,
        }
    }

    /// Whether the tower's hits add chill stacks.
    #[must_use]
    pub const fn chills(self) -> bool {
        matches!(self, Self::Snowballer)
    }

    /// Whether the turret rotates toward its target at all.
    #[must_use]
    pub const fn has_turret(self) -> bool {
        !matches!(
            self.fire_mode(),
            FireMode::Production(_) | FireMode::Passive
        )
    }

    /// Stat block of a freshly placed tower.
    #[must_use]
    pub fn base_stats(self) -> TowerStats {
        let base = TowerStats::blank();
        match self {
            Self::Scout => TowerStats {
                damage: 2.0,
                range: 100.0,
                cooldown: 30,
                cost: 400,
                detects_hidden: true,
                rotation_speed: 0.2,
                ..base
            },
            Self::Soldier => TowerStats {
                damage: 3.0,
                range: 120.0,
                cooldown: 100,
                cost: 550,
                rotation_speed: 0.15,
                burst: Some(BurstProfile {
                    shots: 3,
                    interval: 10,
                }),
                ..base
            },
            Self::Minigunner => TowerStats {
                damage: 1.0,
                range: 140.0,
                cooldown: 8,
                cost: 2_200,
                rotation_speed: 0.08,
                placement_limit: Some(8),
                ..base
            },
            Self::Sniper => TowerStats {
                damage: 30.0,
                range: 300.0,
                cooldown: 120,
                cost: 1_000,
                pierces_lead: true,
                cliff_only: true,
                rotation_speed: 0.1,
                placement_limit: Some(10),
                ..base
            },
            Self::Rocketeer => TowerStats {
                damage: 15.0,
                range: 130.0,
                cooldown: 90,
                cost: 850,
                pierces_lead: true,
                rotation_speed: 0.1,
                placement_limit: Some(8),
                ..base
            },
            Self::Medic => TowerStats {
                damage: 3.0,
                range: 100.0,
                cooldown: 60,
                cost: 750,
                rotation_speed: 0.2,
                placement_limit: Some(4),
                ability: Some(AbilityProfile {
                    cooldown: 900,
                    duration: 0,
                }),
                ..base
            },
            Self::Commander => TowerStats {
                damage: 8.0,
                range: 120.0,
                cooldown: 60,
                cost: 1_500,
                detects_hidden: true,
                rotation_speed: 0.15,
                placement_limit: Some(3),
                ability: Some(AbilityProfile {
                    cooldown: 1_200,
                    duration: 300,
                }),
                ..base
            },
            Self::RadarCamp => TowerStats {
                range: 120.0,
                cooldown: 1_000,
                cost: 900,
                placement_radius: LARGE_RADIUS,
                placement_limit: Some(4),
                ability: Some(AbilityProfile {
                    cooldown: 1_800,
                    duration: 600,
                }),
                ..base
            },
            Self::MilitaryBase => TowerStats {
                cooldown: 1_200,
                cost: 2_500,
                placement_radius: LARGE_RADIUS,
                placement_limit: Some(4),
                ..base
            },
            Self::Barracks => TowerStats {
                cooldown: 900,
                cost: 1_500,
                placement_radius: LARGE_RADIUS,
                placement_limit: Some(6),
                ..base
            },
            Self::Railgunner => TowerStats {
                damage: 80.0,
                range: 350.0,
                cooldown: 180,
                cost: 2_800,
                pierces_lead: true,
                cliff_only: true,
                rotation_speed: 0.05,
                placement_limit: Some(4),
                ..base
            },
            Self::Mortar => TowerStats {
                damage: 40.0,
                range: 200.0,
                cooldown: 180,
                cost: 1_200,
                cliff_only: true,
                rotation_speed: 0.08,
                placement_limit: Some(6),
                ..base
            },
            Self::Farm => TowerStats {
                cost: 1_250,
                placement_radius: LARGE_RADIUS,
                placement_limit: Some(8),
                ..base
            },
            Self::Cowboy => TowerStats {
                damage: 12.0,
                range: 110.0,
                cooldown: 40,
                cost: 900,
                rotation_speed: 0.25,
                placement_limit: Some(4),
                ..base
            },
            Self::Phaser => TowerStats {
                damage: 2.0,
                range: 180.0,
                cooldown: 120,
                cost: 4_000,
                pierces_lead: true,
                rotation_speed: 0.1,
                placement_limit: Some(4),
                charge: Some(ChargeProfile {
                    charge_frames: 300,
                    fire_frames: 300,
                }),
                ..base
            },
            Self::Shocker => TowerStats {
                damage: 2.0,
                range: 100.0,
                cooldown: 60,
                cost: 750,
                pierces_lead: true,
                placement_limit: Some(6),
                chain: Some(ChainProfile {
                    links: 3,
                    stun_frames: 30,
                }),
                ..base
            },
            Self::Snowballer => TowerStats {
                damage: 2.0,
                range: 120.0,
                cooldown: 40,
                cost: 600,
                rotation_speed: 0.15,
                placement_limit: Some(6),
                ..base
            },
        }
    }

    /// Upgrade tier purchased when moving from `level` to `level + 1`.
    #[must_use]
    pub fn upgrade(self, level: u8) -> Option<&'static UpgradeTier> {
        self.upgrades().get(usize::from(level))
    }

    /// All five upgrade tiers in purchase order.
    #[must_use]
    pub fn upgrades(self) -> &'static [UpgradeTier] {
        match self {
            Self::Scout => &SCOUT_UPGRADES,
            Self::Soldier => &SOLDIER_UPGRADES,
            Self::Minigunner => &MINIGUNNER_UPGRADES,
            Self::Sniper => &SNIPER_UPGRADES,
            Self::Rocketeer => &ROCKETEER_UPGRADES,
            Self::Medic => &MEDIC_UPGRADES,
            Self::Commander => &COMMANDER_UPGRADES,
            Self::RadarCamp => &RADAR_CAMP_UPGRADES,
            Self::MilitaryBase => &MILITARY_BASE_UPGRADES,
            Self::Barracks => &BARRACKS_UPGRADES,
            Self::Railgunner => &RAILGUNNER_UPGRADES,
            Self::Mortar => &MORTAR_UPGRADES,
            Self::Farm => &FARM_UPGRADES,
            Self::Cowboy => &COWBOY_UPGRADES,
            Self::Phaser => &PHASER_UPGRADES,
            Self::Shocker => &SHOCKER_UPGRADES,
            Self::Snowballer => &SNOWBALLER_UPGRADES,
        }
    }
}

use StatChange::*;

const SCOUT_UPGRADES: [UpgradeTier; 5] = [
    tier("Sharp Eyes", 150, &[Damage(3.0)]),
    tier("Binoculars", 300, &[Range(130.0)]),
    tier("Quick Draw", 600, &[Cooldown(20)]),
    tier("Dual Pistols", 1_200, &[Damage(6.0)]),
    tier("Elite Scout", 2_500, &[Cooldown(10), Range(160.0)]),
];

const SOLDIER_UPGRADES: [UpgradeTier; 5] = [
    tier("Extended Mag", 300, &[BurstShots(4), Damage(4.0)]),
    tier("Night Vision", 600, &[Range(150.0), DetectsHidden]),
    tier("Gas Piston", 1_200, &[Cooldown(80), BurstInterval(8)]),
    tier("Assault Rifle", 2_400, &[Damage(10.0), BurstShots(6)]),
    tier("Spec Ops", 5_000, &[Cooldown(50), BurstShots(10), BurstInterval(5)]),
];

const MINIGUNNER_UPGRADES: [UpgradeTier; 5] = [
    tier("Heavy Barrels", 1_000, &[Damage(2.0)]),
    tier("Motor Upgrade", 2_000, &[Cooldown(5)]),
    tier("Long Belt", 3_500, &[Range(180.0)]),
    tier("Depleted Uranium", 6_000, &[Damage(5.0), PiercesLead]),
    tier("Vulcan Cannon", 12_000, &[Cooldown(2), Damage(8.0)]),
];

const SNIPER_UPGRADES: [UpgradeTier; 5] = [
    tier("Large Bore", 500, &[Damage(50.0)]),
    tier("Thermal Scope", 1_200, &[Range(500.0), DetectsHidden]),
    tier("Full Metal Jacket", 2_500, &[Damage(120.0), Cooldown(100)]),
    tier("Anti-Materiel", 5_000, &[Damage(300.0)]),
    tier("Rail Sniper", 9_000, &[Damage(800.0), Range(1_200.0)]),
];

const ROCKETEER_UPGRADES: [UpgradeTier; 5] = [
    tier("Larger Payload", 400, &[Damage(25.0)]),
    tier("Rocket Propellant", 900, &[Range(160.0)]),
    tier("Double Barrel", 2_000, &[Damage(50.0), Cooldown(70)]),
    tier("High Explosive", 4_500, &[Damage(100.0)]),
    tier("Rocket Storm", 8_500, &[Cooldown(30), Damage(150.0)]),
];

const MEDIC_UPGRADES: [UpgradeTier; 5] = [
    tier("Self Defense", 400, &[Damage(6.0)]),
    tier("Field Kit", 1_000, &[Range(140.0)]),
    tier("Combat Medic", 2_500, &[Damage(12.0), AbilityCooldown(600)]),
    tier("Rapid Response", 5_000, &[Cooldown(40)]),
    tier("Surgeon General", 10_000, &[Damage(25.0), AbilityCooldown(300)]),
];

const COMMANDER_UPGRADES: [UpgradeTier; 5] = [
    tier("Megaphone", 800, &[Range(150.0)]),
    tier("Sidearm Training", 2_000, &[Damage(15.0)]),
    tier("Tactical Uplink", 4_500, &[Range(180.0)]),
    tier("Call in Support", 8_000, &[Cooldown(40), AbilityDuration(600)]),
    tier("General", 15_000, &[Damage(30.0), AbilityCooldown(900)]),
];

const RADAR_CAMP_UPGRADES: [UpgradeTier; 5] = [
    tier("Better Antenna", 500, &[Range(150.0)]),
    tier("Satellite Link", 1_200, &[Range(180.0)]),
    tier("Command Center", 2_800, &[Range(220.0)]),
    tier("Global Network", 6_000, &[Range(260.0), AbilityCooldown(1_200)]),
    tier("Orbital Scanner", 12_000, &[Range(300.0)]),
];

const MILITARY_BASE_UPGRADES: [UpgradeTier; 5] = [
    tier("Faster Production", 1_800, &[Cooldown(1_000)]),
    tier("Armored Jeeps", 4_000, &[Cooldown(900)]),
    tier("Tank Factory", 8_000, &[Cooldown(800)]),
    tier("Mass Production", 15_000, &[Cooldown(600)]),
    tier("War Machine", 30_000, &[Cooldown(400)]),
];

const BARRACKS_UPGRADES: [UpgradeTier; 5] = [
    tier("Recruitment", 1_000, &[Cooldown(800)]),
    tier("Drill Sergeant", 2_200, &[Cooldown(700)]),
    tier("Special Forces", 4_500, &[Cooldown(600)]),
    tier("Elite Squad", 9_000, &[Cooldown(500)]),
    tier("Clone Army", 18_000, &[Cooldown(400)]),
];

const RAILGUNNER_UPGRADES: [UpgradeTier; 5] = [
    tier("Capacitors", 1_800, &[Damage(120.0)]),
    tier("Superconductors", 4_000, &[Damage(200.0), Range(400.0)]),
    tier("Auto-Loader", 8_000, &[Cooldown(150)]),
    tier("Hyper Velocity", 16_000, &[Damage(400.0)]),
    tier("Doomsday Cannon", 32_000, &[Damage(1_000.0), PiercesLead]),
];

const MORTAR_UPGRADES: [UpgradeTier; 5] = [
    tier("Bigger Shells", 800, &[Damage(60.0)]),
    tier("Long Barrel", 1_800, &[Range(250.0)]),
    tier("Cluster Bomb", 4_000, &[Damage(120.0), Cooldown(150)]),
    tier("Napalm", 8_500, &[Damage(250.0)]),
    tier("Nuke", 16_000, &[Damage(600.0), Range(350.0)]),
];

const FARM_UPGRADES: [UpgradeTier; 5] = [
    tier("Faster GPUs", 500, &[]),
    tier("Solar Power", 1_200, &[]),
    tier("Server Rack", 2_500, &[]),
    tier("Data Center", 6_000, &[]),
    tier("Quantum Computer", 15_000, &[]),
];

const COWBOY_UPGRADES: [UpgradeTier; 5] = [
    tier("Magnum", 600, &[Damage(18.0)]),
    tier("Quick Hands", 1_400, &[Cooldown(30)]),
    tier("Rifle", 3_000, &[Damage(35.0), Range(140.0)]),
    tier("Wanted Dead or Alive", 7_000, &[Damage(70.0)]),
    tier("High Noon", 14_000, &[Cooldown(10), Damage(120.0)]),
];

const PHASER_UPGRADES: [UpgradeTier; 5] = [
    tier("Focus Lens", 2_500, &[Damage(4.0)]),
    tier("Capacitor Bank", 5_000, &[ChargeFrames(240)]),
    tier("Heat Sink", 10_000, &[FireFrames(420), Damage(8.0)]),
    tier("Plasma Injection", 20_000, &[Damage(15.0), Range(220.0)]),
    tier("Singularity Beam", 40_000, &[Cooldown(90), ChargeFrames(120), Damage(30.0)]),
];

const SHOCKER_UPGRADES: [UpgradeTier; 5] = [
    tier("Higher Voltage", 450, &[Damage(4.0)]),
    tier("Arc Reactor", 1_000, &[Range(130.0), ChainLinks(5)]),
    tier("Overcharge", 2_200, &[Cooldown(40), StunFrames(45)]),
    tier("Storm Generator", 5_000, &[Damage(10.0), ChainLinks(8)]),
    tier("Zeus Module", 10_000, &[Range(180.0), Cooldown(20)]),
];

const SNOWBALLER_UPGRADES: [UpgradeTier; 5] = [
    tier("Packed Ice", 350, &[Damage(5.0)]),
    tier("Strong Arm", 800, &[Range(150.0), Cooldown(30)]),
    tier("Snow Cannon", 2_000, &[Damage(10.0)]),
    tier("Blizzard", 4_000, &[Cooldown(15)]),
    tier("Absolute Zero", 9_000, &[Damage(15.0)]),
];

const fn tier(name: &'static str, cost: u64, changes: &'static [StatChange]) -> UpgradeTier {
    UpgradeTier {
        name,
        cost,
        changes,
    }
}

/// Burst-fire parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurstProfile {
    /// Number of shots emitted per cooldown trigger.
    pub shots: u32,
    /// Ticks between consecutive shots in a burst.
    pub interval: u32,
}

/// Charge-beam timings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeProfile {
    /// Ticks spent charging before the beam fires.
    pub charge_frames: u32,
    /// Ticks the beam stays on.
    pub fire_frames: u32,
}

/// Chain-lightning parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainProfile {
    /// Maximum number of enemies struck per discharge.
    pub links: u32,
    /// Freeze applied to every struck enemy, in ticks.
    pub stun_frames: u32,
}

/// Active-ability timings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityProfile {
    /// Ticks before the ability may be used again.
    pub cooldown: u32,
    /// Ticks the effect stays live; instantaneous abilities use zero.
    pub duration: u32,
}

/// Mutable stat block carried by every placed tower.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    /// Raw damage per hit before buffs.
    pub damage: f32,
    /// Targeting radius in world units before buffs.
    pub range: f32,
    /// Ticks between shots, or between productions for production buildings.
    pub cooldown: u32,
    /// Purchase price of the base tower.
    pub cost: u64,
    /// Whether hidden enemies are valid targets.
    pub detects_hidden: bool,
    /// Whether hits bypass lead armour.
    pub pierces_lead: bool,
    /// Whether the tower must stand on cliff tiles rather than grass.
    pub cliff_only: bool,
    /// Footprint radius used for overlap checks.
    pub placement_radius: f32,
    /// Maximum number of towers of this kind on the map.
    pub placement_limit: Option<u32>,
    /// Turret rotation in radians per tick; zero means omnidirectional.
    pub rotation_speed: f32,
    /// Burst-fire parameters.
    pub burst: Option<BurstProfile>,
    /// Charge-beam parameters.
    pub charge: Option<ChargeProfile>,
    /// Chain-lightning parameters.
    pub chain: Option<ChainProfile>,
    /// Active-ability parameters.
    pub ability: Option<AbilityProfile>,
}

impl TowerStats {
    const fn blank() -> Self {
        Self {
            damage: 0.0,
            range: 0.0,
            cooldown: 0,
            cost: 0,
            detects_hidden: false,
            pierces_lead: false,
            cliff_only: false,
            placement_radius: DEFAULT_RADIUS,
            placement_limit: None,
            rotation_speed: 0.0,
            burst: None,
            charge: None,
            chain: None,
            ability: None,
        }
    }

    /// Applies a single upgrade delta to the stat block.
    pub fn apply(&mut self, change: StatChange) {
        match change {
            StatChange::Damage(value) => self.damage = value,
            StatChange::Range(value) => self.range = value,
            StatChange::Cooldown(value) => self.cooldown = value,
            StatChange::DetectsHidden => self.detects_hidden = true,
            StatChange::PiercesLead => self.pierces_lead = true,
            StatChange::BurstShots(shots) => {
                if let Some(burst) = self.burst.as_mut() {
                    burst.shots = shots;
                }
            }
            StatChange::BurstInterval(interval) => {
                if let Some(burst) = self.burst.as_mut() {
                    burst.interval = interval;
                }
            }
            StatChange::ChargeFrames(frames) => {
                if let Some(charge) = self.charge.as_mut() {
                    charge.charge_frames = frames;
                }
            }
            StatChange::FireFrames(frames) => {
                if let Some(charge) = self.charge.as_mut() {
                    charge.fire_frames = frames;
                }
            }
            StatChange::ChainLinks(links) => {
                if let Some(chain) = self.chain.as_mut() {
                    chain.links = links;
                }
            }
            StatChange::StunFrames(frames) => {
                if let Some(chain) = self.chain.as_mut() {
                    chain.stun_frames = frames;
                }
            }
            StatChange::AbilityCooldown(frames) => {
                if let Some(ability) = self.ability.as_mut() {
                    ability.cooldown = frames;
                }
            }
            StatChange::AbilityDuration(frames) => {
                if let Some(ability) = self.ability.as_mut() {
                    ability.duration = frames;
                }
            }
        }
    }
}

/// Single stat override carried by an upgrade tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatChange {
    /// Replaces the damage per hit.
    Damage(f32),
    /// Replaces the base range.
    Range(f32),
    /// Replaces the cooldown in ticks.
    Cooldown(u32),
    /// Grants hidden detection.
    DetectsHidden,
    /// Grants lead piercing.
    PiercesLead,
    /// Replaces the burst shot count.
    BurstShots(u32),
    /// Replaces the ticks between burst shots.
    BurstInterval(u32),
    /// Replaces the charge duration.
    ChargeFrames(u32),
    /// Replaces the beam duration.
    FireFrames(u32),
    /// Replaces the chain link count.
    ChainLinks(u32),
    /// Replaces the chain freeze duration.
    StunFrames(u32),
    /// Replaces the ability cooldown.
    AbilityCooldown(u32),
    /// Replaces the ability duration.
    AbilityDuration(u32),
}

/// Named upgrade purchasable for a tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpgradeTier {
    /// Player-facing upgrade name.
    pub name: &'static str,
    /// Price of the upgrade.
    pub cost: u64,
    /// Stat deltas applied on purchase.
    pub changes: &'static [StatChange],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_five_upgrade_tiers() {
        for kind in TowerKind::ALL {
            assert_eq!(
                kind.upgrades().len(),
                usize::from(MAX_TOWER_LEVEL),
                "{kind:?} should expose one tier per level"
            );
        }
    }

    #[test]
    fn upgrade_beyond_max_level_is_absent() {
        assert!(TowerKind::Scout.upgrade(MAX_TOWER_LEVEL).is_none());
        assert_eq!(
            TowerKind::Scout.upgrade(0).map(|tier| tier.cost),
            Some(150)
        );
    }

    #[test]
    fn soldier_upgrades_reshape_burst() {
        let mut stats = TowerKind::Soldier.base_stats();
        for tier in TowerKind::Soldier.upgrades() {
            for change in tier.changes {
                stats.apply(*change);
            }
        }
        assert_eq!(
            stats.burst,
            Some(BurstProfile {
                shots: 10,
                interval: 5
            })
        );
        assert_eq!(stats.cooldown, 50);
        assert!(stats.detects_hidden);
    }

    #[test]
    fn burst_change_is_ignored_without_burst_profile() {
        let mut stats = TowerKind::Scout.base_stats();
        stats.apply(StatChange::BurstShots(9));
        assert!(stats.burst.is_none());
    }

    #[test]
    fn aura_and_fire_modes_are_consistent() {
        assert_eq!(TowerKind::Commander.aura(), Some(AuraKind::FireRate));
        assert_eq!(TowerKind::RadarCamp.fire_mode(), FireMode::Passive);
        assert_eq!(
            TowerKind::Barracks.fire_mode(),
            FireMode::Production(UnitKind::Squad)
        );
        assert!(!TowerKind::Farm.has_turret());
        assert!(TowerKind::Shocker.has_turret());
    }
}
