//! Allied units deployed by production towers.

use serde::{Deserialize, Serialize};

/// Kinds of units a production tower can deploy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Collision unit that drives down the path and detonates on contact.
    Transport,
    /// Ranged infantry that halts to shoot enemies in range.
    Squad,
}

/// Static numbers describing a freshly deployed unit at level zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitProfile {
    /// Starting health.
    pub health: f32,
    /// Damage per detonation or per shot.
    pub damage: f32,
    /// Firing radius for ranged units; zero for collision units.
    pub range: f32,
    /// Ticks between shots for ranged units.
    pub cooldown: u32,
    /// World units travelled per tick, toward the spawn.
    pub speed: f32,
    /// Whether the unit is consumed by its first contact.
    pub collision: bool,
}

impl UnitKind {
    /// Level-zero profile for the kind.
    #[must_use]
    pub const fn profile(self) -> UnitProfile {
        match self {
            Self::Transport => UnitProfile {
                health: 50.0,
                damage: 100.0,
                range: 0.0,
                cooldown: 0,
                speed: 2.4,
                collision: true,
            },
            Self::Squad => UnitProfile {
                health: 30.0,
                damage: 5.0,
                range: 80.0,
                cooldown: 40,
                speed: 1.0,
                collision: false,
            },
        }
    }

    /// Health and damage multiplier applied by the producing tower's level.
    #[must_use]
    pub fn level_scale(level: u8) -> f32 {
        1.0 + f32::from(level) * 0.5
    }
}
