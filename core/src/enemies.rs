//! Closed bestiary of enemy kinds and their spawn profiles.

use serde::{Deserialize, Serialize};

/// Types of enemies the wave scheduler can spawn.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[allow(missing_docs)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    Bandit,
    Wolf,
    Slime,
    Goblin,
    Orc,
    Zombie,
    ZombieRunner,
    Ghoul,
    Abomination,
    MechDroid,
    MechWalker,
    ShieldBot,
    DroneSwarm,
    FireSprite,
    IceGolem,
    RockElemental,
    StormWisp,
    ArmoredLead,
    Assassin,
    Paladin,
    Hidden,
    Lead,
    BossStomper,
    BossSummoner,
    BossTitan,
    BossSpeedster,
    BossPhantom,
    BossNecromancer,
    BossConstructor,
    BossInferno,
    BossZero,
    BossTheEnd,
}

/// Static per-kind numbers used when an enemy enters the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyProfile {
    /// Health before wave scaling.
    pub health: f32,
    /// World units advanced per tick.
    pub speed: f32,
    /// Money paid when the enemy dies.
    pub reward: u64,
    /// Collision and drawing radius.
    pub radius: f32,
    /// Health restored per regeneration pulse, divided by ten.
    pub regen: Option<f32>,
}

const fn profile(health: f32, speed: f32, reward: u64, radius: f32) -> EnemyProfile {
    EnemyProfile {
        health,
        speed,
        reward,
        radius,
        regen: None,
    }
}

impl EnemyKind {
    /// Every enemy kind in declaration order, bosses included.
    pub const ALL: [EnemyKind; 35] = [
        Self::Basic,
        Self::Fast,
        Self::Tank,
        Self::Bandit,
        Self::Wolf,
        Self::Slime,
        Self::Goblin,
        Self::Orc,
        Self::Zombie,
        Self::ZombieRunner,
        Self::Ghoul,
        Self::Abomination,
        Self::MechDroid,
        Self::MechWalker,
        Self::ShieldBot,
        Self::DroneSwarm,
        Self::FireSprite,
        Self::IceGolem,
        Self::RockElemental,
        Self::StormWisp,
        Self::ArmoredLead,
        Self::Assassin,
        Self::Paladin,
        Self::Hidden,
        Self::Lead,
        Self::BossStomper,
        Self::BossSummoner,
        Self::BossTitan,
        Self::BossSpeedster,
        Self::BossPhantom,
        Self::BossNecromancer,
        Self::BossConstructor,
        Self::BossInferno,
        Self::BossZero,
        Self::BossTheEnd,
    ];

    /// Spawn profile for the kind.
    #[must_use]
    pub const fn profile(self) -> EnemyProfile {
        match self {
            Self::Basic => profile(5.0, 1.2, 3, 12.0),
            Self::Bandit => profile(8.0, 1.3, 4, 13.0),
            Self::Wolf => profile(6.0, 2.0, 4, 10.0),
            Self::Slime => profile(15.0, 0.8, 5, 11.0),
            Self::Goblin => profile(10.0, 1.5, 5, 10.0),
            Self::Orc => profile(35.0, 0.9, 8, 15.0),
            Self::Fast => profile(4.0, 2.5, 4, 10.0),
            Self::Tank => profile(20.0, 0.7, 8, 16.0),
            Self::Zombie => profile(12.0, 1.0, 5, 13.0),
            Self::ZombieRunner => profile(8.0, 2.2, 6, 11.0),
            Self::Ghoul => profile(15.0, 1.8, 10, 12.0),
            Self::Abomination => profile(60.0, 0.5, 20, 20.0),
            Self::MechDroid => profile(30.0, 1.5, 12, 14.0),
            Self::MechWalker => profile(80.0, 0.6, 25, 22.0),
            Self::ShieldBot => profile(50.0, 1.0, 20, 16.0),
            Self::DroneSwarm => profile(5.0, 3.5, 2, 6.0),
            Self::FireSprite => profile(40.0, 2.0, 15, 12.0),
            Self::IceGolem => profile(120.0, 0.4, 30, 24.0),
            Self::RockElemental => profile(150.0, 0.5, 35, 24.0),
            Self::StormWisp => profile(25.0, 3.0, 20, 10.0),
            Self::ArmoredLead => profile(200.0, 0.8, 50, 18.0),
            Self::Assassin => profile(80.0, 4.0, 60, 12.0),
            Self::Paladin => EnemyProfile {
                regen: Some(0.5),
                ..profile(500.0, 0.5, 100, 25.0)
            },
            Self::Hidden => profile(20.0, 1.8, 12, 12.0),
            Self::Lead => profile(35.0, 0.9, 20, 14.0),
            Self::BossStomper => profile(800.0, 0.6, 500, 30.0),
            Self::BossSummoner => profile(600.0, 0.7, 500, 30.0),
            Self::BossTitan => profile(2_000.0, 0.3, 1_000, 45.0),
            Self::BossSpeedster => profile(500.0, 3.0, 600, 20.0),
            Self::BossPhantom => profile(400.0, 1.5, 800, 25.0),
            Self::BossNecromancer => profile(700.0, 0.5, 700, 28.0),
            Self::BossConstructor => profile(1_000.0, 0.4, 900, 35.0),
            Self::BossInferno => profile(1_500.0, 0.8, 1_000, 32.0),
            Self::BossZero => profile(1_200.0, 0.6, 1_000, 32.0),
            Self::BossTheEnd => profile(10_000.0, 0.2, 5_000, 60.0),
        }
    }

    /// Whether small non-piercing hits bounce off this kind.
    #[must_use]
    pub const fn is_armored(self) -> bool {
        matches!(self, Self::Lead | Self::ArmoredLead | Self::ShieldBot)
    }

    /// Whether towers need hidden detection to target this kind.
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(
            self,
            Self::Hidden | Self::Ghoul | Self::BossPhantom | Self::Assassin
        )
    }

    /// Whether the kind is one of the single-token boss waves.
    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(
            self,
            Self::BossStomper
                | Self::BossSummoner
                | Self::BossTitan
                | Self::BossSpeedster
                | Self::BossPhantom
                | Self::BossNecromancer
                | Self::BossConstructor
                | Self::BossInferno
                | Self::BossZero
                | Self::BossTheEnd
        )
    }
}

#[cfg(test)]
mod tests {
    use super::EnemyKind;

    #[test]
    fn status_flags_match_bestiary() {
        let armored: Vec<_> = EnemyKind::ALL
            .into_iter()
            .filter(|kind| kind.is_armored())
            .collect();
        assert_eq!(
            armored,
            vec![EnemyKind::ShieldBot, EnemyKind::ArmoredLead, EnemyKind::Lead]
        );

        let hidden = EnemyKind::ALL
            .into_iter()
            .filter(|kind| kind.is_hidden())
            .count();
        assert_eq!(hidden, 4);
        assert_eq!(
            EnemyKind::ALL.into_iter().filter(|k| k.is_boss()).count(),
            10
        );
    }

    #[test]
    fn only_paladin_regenerates() {
        for kind in EnemyKind::ALL {
            let regenerates = kind.profile().regen.is_some();
            assert_eq!(regenerates, kind == EnemyKind::Paladin, "{kind:?}");
        }
    }
}
