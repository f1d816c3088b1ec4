#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave composition and difficulty scaling.
//!
//! A wave is an ordered queue of [`EnemyKind`] tokens. Early waves draw from
//! small themed pools that widen as the wave number grows, fixed milestones are
//! reserved for a single boss, and past the last milestone every kind is fair
//! game. Randomness is derived from a master seed and the wave number so the
//! same seed always replays the same queues.

use frontier_defence_core::EnemyKind;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Last wave that uses the themed pools and the gentler health growth.
pub const LAST_SCRIPTED_WAVE: u32 = 50;

/// Ticks between a wave starting and its first spawn.
pub const FIRST_SPAWN_DELAY: u32 = 60;

/// Milestone waves and the single boss each one spawns.
pub const BOSS_WAVES: [(u32, EnemyKind); 7] = [
    (10, EnemyKind::BossStomper),
    (20, EnemyKind::BossSummoner),
    (30, EnemyKind::BossTitan),
    (35, EnemyKind::BossSpeedster),
    (40, EnemyKind::BossNecromancer),
    (45, EnemyKind::BossInferno),
    (50, EnemyKind::BossTheEnd),
];

const EARLY_GROWTH: f32 = 1.12;
const LATE_GROWTH: f32 = 1.15;
const MIN_SPAWN_INTERVAL: u32 = 10;

/// Pure system that composes enemy queues from a master seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveGeneration {
    global_seed: u64,
}

impl WaveGeneration {
    /// Creates a generator whose queues are derived from `global_seed`.
    #[must_use]
    pub const fn new(global_seed: u64) -> Self {
        Self { global_seed }
    }

    /// Builds the spawn queue for the provided wave, in spawn order.
    #[must_use]
    pub fn compose(&self, wave: u32) -> Vec<EnemyKind> {
        if let Some(boss) = boss_for(wave) {
            return vec![boss];
        }

        let mut rng = ChaCha8Rng::seed_from_u64(derive_wave_seed(self.global_seed, wave));
        if wave > LAST_SCRIPTED_WAVE {
            if wave % 5 == 0 {
                return vec![any_kind(&mut rng)];
            }
            return (0..enemy_count(wave)).map(|_| any_kind(&mut rng)).collect();
        }

        (0..enemy_count(wave))
            .map(|index| scripted_token(wave, index, &mut rng))
            .collect()
    }
}

/// Boss reserved for a milestone wave, if any.
#[must_use]
pub fn boss_for(wave: u32) -> Option<EnemyKind> {
    BOSS_WAVES
        .iter()
        .find(|(milestone, _)| *milestone == wave)
        .map(|(_, boss)| *boss)
}

/// Number of tokens in a non-boss wave.
#[must_use]
pub const fn enemy_count(wave: u32) -> u32 {
    5 + wave.saturating_mul(2)
}

/// Health an enemy of the provided kind spawns with on the provided wave.
#[must_use]
pub fn spawn_health(kind: EnemyKind, wave: u32) -> f32 {
    let growth = if wave > LAST_SCRIPTED_WAVE {
        LATE_GROWTH
    } else {
        EARLY_GROWTH
    };
    let exponent = i32::try_from(wave.saturating_sub(1)).unwrap_or(i32::MAX);
    kind.profile().health * growth.powi(exponent)
}

/// Ticks between consecutive spawns once the first enemy is out.
#[must_use]
pub fn spawn_interval(wave: u32) -> u32 {
    FIRST_SPAWN_DELAY
        .saturating_sub(wave)
        .max(MIN_SPAWN_INTERVAL)
}

fn scripted_token(wave: u32, index: u32, rng: &mut ChaCha8Rng) -> EnemyKind {
    let roll: f64 = rng.gen();
    match wave {
        0..=5 => {
            const POOL: [EnemyKind; 4] = [
                EnemyKind::Basic,
                EnemyKind::Bandit,
                EnemyKind::Wolf,
                EnemyKind::Slime,
            ];
            let unlocked = POOL.len().min(1 + (wave / 2) as usize);
            POOL[rng.gen_range(0..unlocked)]
        }
        6..=9 => {
            const POOL: [EnemyKind; 4] = [
                EnemyKind::Fast,
                EnemyKind::Goblin,
                EnemyKind::Orc,
                EnemyKind::Wolf,
            ];
            POOL[rng.gen_range(0..POOL.len())]
        }
        10..=14 if index % 5 == 0 => EnemyKind::Tank,
        10..=14 if roll > 0.6 => EnemyKind::ZombieRunner,
        10..=14 => EnemyKind::Zombie,
        15..=19 if index % 8 == 0 => EnemyKind::Hidden,
        15..=19 if roll > 0.7 => EnemyKind::Ghoul,
        15..=19 => EnemyKind::Zombie,
        20..=24 if roll > 0.8 => EnemyKind::MechDroid,
        20..=24 => EnemyKind::Abomination,
        25..=29 if index % 10 == 0 => EnemyKind::Lead,
        25..=29 => EnemyKind::MechWalker,
        30..=34 if roll > 0.5 => EnemyKind::FireSprite,
        30..=34 => EnemyKind::IceGolem,
        35..=39 if roll > 0.5 => EnemyKind::RockElemental,
        35..=39 => EnemyKind::StormWisp,
        _ if roll > 0.9 => EnemyKind::ArmoredLead,
        _ if roll > 0.8 => EnemyKind::Assassin,
        _ => EnemyKind::Paladin,
    }
}

fn any_kind(rng: &mut ChaCha8Rng) -> EnemyKind {
    EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())]
}

fn derive_wave_seed(global_seed: u64, wave: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(global_seed.to_le_bytes());
    hasher.update(b"wave");
    hasher.update(wave.to_le_bytes());
    finalize_seed(hasher)
}

fn finalize_seed(hasher: Sha256) -> u64 {
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestone_waves_spawn_a_single_boss_for_any_seed() {
        for seed in [0, 1, 42, u64::MAX] {
            let generator = WaveGeneration::new(seed);
            assert_eq!(generator.compose(10), vec![EnemyKind::BossStomper]);
            for (wave, boss) in BOSS_WAVES {
                assert_eq!(generator.compose(wave), vec![boss]);
                assert!(boss.is_boss());
            }
        }
    }

    #[test]
    fn first_wave_only_unlocks_the_basic_pool_entry() {
        let queue = WaveGeneration::new(9).compose(1);
        assert_eq!(queue.len(), 7);
        assert!(queue.iter().all(|kind| *kind == EnemyKind::Basic));
    }

    #[test]
    fn early_pool_widens_with_wave_number() {
        let queue = WaveGeneration::new(3).compose(4);
        assert_eq!(queue.len(), 13);
        assert!(queue
            .iter()
            .all(|kind| matches!(kind, EnemyKind::Basic | EnemyKind::Bandit | EnemyKind::Wolf)));
    }

    #[test]
    fn zombie_band_leads_every_fifth_slot_with_a_tank() {
        let queue = WaveGeneration::new(5).compose(12);
        assert_eq!(queue.len(), 29);
        for (index, kind) in queue.iter().enumerate() {
            if index % 5 == 0 {
                assert_eq!(*kind, EnemyKind::Tank);
            } else {
                assert!(matches!(kind, EnemyKind::Zombie | EnemyKind::ZombieRunner));
            }
        }
    }

    #[test]
    fn composition_replays_for_identical_seeds() {
        let first = WaveGeneration::new(77);
        let second = WaveGeneration::new(77);
        for wave in [3, 17, 42, 61] {
            assert_eq!(first.compose(wave), second.compose(wave));
        }
    }

    #[test]
    fn endless_waves_alternate_swarms_and_single_tokens() {
        let generator = WaveGeneration::new(8);
        assert_eq!(generator.compose(55).len(), 1);
        assert_eq!(generator.compose(61).len(), 127);
    }

    #[test]
    fn spawn_health_switches_growth_after_wave_fifty() {
        let basic = EnemyKind::Basic.profile().health;
        assert_eq!(spawn_health(EnemyKind::Basic, 1), basic);
        let wave_ten = spawn_health(EnemyKind::Basic, 10);
        assert!((wave_ten - basic * 1.12_f32.powi(9)).abs() < 1e-3);
        let wave_fifty_one = spawn_health(EnemyKind::Basic, 51);
        assert!((wave_fifty_one / (basic * 1.15_f32.powi(50)) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn spawn_interval_shrinks_to_a_floor() {
        assert_eq!(spawn_interval(1), 59);
        assert_eq!(spawn_interval(45), 15);
        assert_eq!(spawn_interval(80), 10);
    }
}
