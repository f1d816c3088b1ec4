#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks a tower's target from world snapshots.
//!
//! Candidates are enemies inside the tower's buffed range that are alive and
//! either visible or detectable by the tower. The tower's [`TargetingMode`]
//! then reduces the candidate set to a single enemy. Ties always resolve to
//! the enemy that spawned first.

use frontier_defence_core::{EnemyId, EnemySnapshot, EnemyView, TargetingMode, TowerSnapshot};
use rand::Rng;

/// Tower targeting system that reuses a scratch buffer for random picks.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    candidates: Vec<EnemyId>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the enemy the tower should engage, if any is eligible.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        tower: &TowerSnapshot,
        enemies: &EnemyView,
        rng: &mut R,
    ) -> Option<EnemyId> {
        let candidates = enemies
            .iter()
            .filter(|enemy| is_candidate(tower, enemy));

        let best = match tower.targeting {
            TargetingMode::First => reduce_by(candidates, |enemy| enemy.progress, Prefer::Max),
            TargetingMode::Last => reduce_by(candidates, |enemy| enemy.progress, Prefer::Min),
            TargetingMode::Strongest => reduce_by(candidates, |enemy| enemy.health, Prefer::Max),
            TargetingMode::Weakest => reduce_by(candidates, |enemy| enemy.health, Prefer::Min),
            TargetingMode::Closest => reduce_by(
                candidates,
                |enemy| enemy.position.distance_squared(tower.position),
                Prefer::Min,
            ),
            TargetingMode::Random => {
                self.candidates.clear();
                self.candidates.extend(candidates.map(|enemy| enemy.id));
                if self.candidates.is_empty() {
                    return None;
                }
                let index = rng.gen_range(0..self.candidates.len());
                return self.candidates.get(index).copied();
            }
        };

        best.map(|enemy| enemy.id)
    }
}

/// Reports whether the tower may engage the enemy this tick.
#[must_use]
pub fn is_candidate(tower: &TowerSnapshot, enemy: &EnemySnapshot) -> bool {
    if enemy.health <= 0.0 {
        return false;
    }
    if enemy.hidden && !tower.stats.detects_hidden {
        return false;
    }
    enemy.position.distance(tower.position) <= tower.effective_range()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prefer {
    Max,
    Min,
}

fn reduce_by<'a, I, F>(candidates: I, key: F, prefer: Prefer) -> Option<&'a EnemySnapshot>
where
    I: Iterator<Item = &'a EnemySnapshot>,
    F: Fn(&EnemySnapshot) -> f32,
{
    let mut best: Option<(&EnemySnapshot, f32)> = None;
    for enemy in candidates {
        let value = key(enemy);
        let replaces = match best {
            None => true,
            Some((_, current)) => match prefer {
                Prefer::Max => value > current,
                Prefer::Min => value < current,
            },
        };
        if replaces {
            best = Some((enemy, value));
        }
    }
    best.map(|(enemy, _)| enemy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontier_defence_core::{
        EnemyKind, TowerBuffs, TowerCombatState, TowerId, TowerKind, Vec2,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tower(kind: TowerKind, mode: TargetingMode) -> TowerSnapshot {
        let stats = kind.base_stats();
        TowerSnapshot {
            id: TowerId::new(1),
            kind,
            level: 0,
            position: Vec2::ZERO,
            stats,
            buffs: TowerBuffs::NEUTRAL,
            targeting: mode,
            combat: TowerCombatState::default(),
            ability_cooldown: 0,
            ability_active: 0,
            stunned_until: 0,
            damage_dealt: 0.0,
            cash_generated: 0,
            invested: stats.cost,
        }
    }

    fn enemy(id: u32, position: Vec2, progress: f32, health: f32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Basic,
            position,
            progress,
            health,
            max_health: health,
            speed: 1.2,
            frozen: 0,
            chill_stacks: 0,
            armored: false,
            hidden: false,
        }
    }

    fn pick(tower: &TowerSnapshot, enemies: Vec<EnemySnapshot>) -> Option<EnemyId> {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        TowerTargeting::new().select(tower, &EnemyView::from_snapshots(enemies), &mut rng)
    }

    fn spread() -> Vec<EnemySnapshot> {
        vec![
            enemy(1, Vec2::new(90.0, 0.0), 40.0, 30.0),
            enemy(2, Vec2::new(20.0, 0.0), 80.0, 5.0),
            enemy(3, Vec2::new(50.0, 0.0), 10.0, 12.0),
        ]
    }

    #[test]
    fn each_mode_reduces_to_expected_enemy() {
        let cases = [
            (TargetingMode::First, 2),
            (TargetingMode::Last, 3),
            (TargetingMode::Strongest, 1),
            (TargetingMode::Weakest, 2),
            (TargetingMode::Closest, 2),
        ];
        for (mode, expected) in cases {
            let scout = tower(TowerKind::Scout, mode);
            assert_eq!(
                pick(&scout, spread()),
                Some(EnemyId::new(expected)),
                "{mode:?}"
            );
        }
    }

    #[test]
    fn ties_favour_earliest_spawn() {
        let scout = tower(TowerKind::Scout, TargetingMode::Strongest);
        let enemies = vec![
            enemy(8, Vec2::new(10.0, 0.0), 5.0, 20.0),
            enemy(4, Vec2::new(30.0, 0.0), 5.0, 20.0),
        ];
        assert_eq!(pick(&scout, enemies), Some(EnemyId::new(4)));
    }

    #[test]
    fn range_uses_buff_multiplier() {
        let mut scout = tower(TowerKind::Scout, TargetingMode::First);
        let enemies = vec![enemy(1, Vec2::new(115.0, 0.0), 0.0, 5.0)];
        assert_eq!(pick(&scout, enemies.clone()), None);

        scout.buffs.range = 1.2;
        assert_eq!(pick(&scout, enemies), Some(EnemyId::new(1)));
    }

    #[test]
    fn hidden_enemies_require_detection() {
        let mut hidden = enemy(1, Vec2::new(10.0, 0.0), 0.0, 5.0);
        hidden.hidden = true;

        let soldier = tower(TowerKind::Soldier, TargetingMode::First);
        assert_eq!(pick(&soldier, vec![hidden]), None);

        let scout = tower(TowerKind::Scout, TargetingMode::First);
        assert_eq!(pick(&scout, vec![hidden]), Some(EnemyId::new(1)));
    }

    #[test]
    fn dead_enemies_are_not_candidates() {
        let scout = tower(TowerKind::Scout, TargetingMode::Weakest);
        let enemies = vec![
            enemy(1, Vec2::new(10.0, 0.0), 0.0, 0.0),
            enemy(2, Vec2::new(10.0, 0.0), 0.0, 3.0),
        ];
        assert_eq!(pick(&scout, enemies), Some(EnemyId::new(2)));
    }

    #[test]
    fn random_mode_only_returns_candidates() {
        let scout = tower(TowerKind::Scout, TargetingMode::Random);
        let mut enemies = spread();
        enemies.push(enemy(9, Vec2::new(500.0, 0.0), 99.0, 99.0));
        let view = EnemyView::from_snapshots(enemies);

        let mut system = TowerTargeting::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..64 {
            let picked = system.select(&scout, &view, &mut rng);
            assert!(matches!(picked.map(|id| id.get()), Some(1..=3)));
        }
    }

    #[test]
    fn empty_view_yields_no_target() {
        let scout = tower(TowerKind::Scout, TargetingMode::Random);
        assert_eq!(pick(&scout, Vec::new()), None);
    }
}
