#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that recomputes aura buffs from the current tower snapshot.
//!
//! Every tick starts from neutral multipliers. Each aura tower then adds its
//! per-level increment to every other tower inside its unbuffed range, plus a
//! larger increment while its ability is active. Overlapping auras stack
//! additively. The pass compares every aura tower with every tower.

use frontier_defence_core::{AuraKind, Command, TowerBuffs, TowerId, TowerSnapshot, TowerView};

const BASE_INCREMENT: f32 = 0.1;
const LEVEL_INCREMENT: f32 = 0.05;
const OVERDRIVE_FIRE_RATE: f32 = 0.3;
const SCAN_RANGE: f32 = 0.2;
const SCAN_DAMAGE: f32 = 0.2;

/// Aura system that queues the buff table installed before towers act.
#[derive(Debug, Default)]
pub struct TowerAuras {
    grants: Vec<(TowerId, TowerBuffs)>,
}

impl TowerAuras {
    /// Creates a new aura system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a single `Command::ApplyBuffs` carrying every non-neutral grant.
    ///
    /// The command is emitted even when no tower is buffed so the world still
    /// resets last tick's multipliers.
    pub fn handle(&mut self, towers: &TowerView, out: &mut Vec<Command>) {
        self.grants.clear();

        for target in towers.iter() {
            let mut buffs = TowerBuffs::NEUTRAL;
            for source in towers.iter() {
                if source.id != target.id {
                    contribute(source, target, &mut buffs);
                }
            }
            if buffs != TowerBuffs::NEUTRAL {
                self.grants.push((target.id, buffs));
            }
        }

        out.push(Command::ApplyBuffs {
            buffs: self.grants.clone(),
        });
    }
}

fn contribute(source: &TowerSnapshot, target: &TowerSnapshot, buffs: &mut TowerBuffs) {
    let Some(aura) = source.kind.aura() else {
        return;
    };
    if source.position.distance(target.position) > source.stats.range {
        return;
    }

    let passive = BASE_INCREMENT + LEVEL_INCREMENT * f32::from(source.level);
    let active = source.ability_active > 0;
    match aura {
        AuraKind::FireRate => {
            buffs.fire_rate += passive;
            if active {
                buffs.fire_rate += OVERDRIVE_FIRE_RATE;
            }
        }
        AuraKind::RangeAndDamage => {
            buffs.range += passive;
            if active {
                buffs.range += SCAN_RANGE;
                buffs.damage += SCAN_DAMAGE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontier_defence_core::{TargetingMode, TowerCombatState, TowerKind, Vec2};

    fn snapshot(id: u32, kind: TowerKind, x: f32) -> TowerSnapshot {
        let stats = kind.base_stats();
        TowerSnapshot {
            id: TowerId::new(id),
            kind,
            level: 0,
            position: Vec2::new(x, 0.0),
            stats,
            buffs: TowerBuffs::NEUTRAL,
            targeting: TargetingMode::First,
            combat: TowerCombatState::default(),
            ability_cooldown: 0,
            ability_active: 0,
            stunned_until: 0,
            damage_dealt: 0.0,
            cash_generated: 0,
            invested: stats.cost,
        }
    }

    fn grants(towers: Vec<TowerSnapshot>) -> Vec<(TowerId, TowerBuffs)> {
        let mut system = TowerAuras::new();
        let mut out = Vec::new();
        system.handle(&TowerView::from_snapshots(towers), &mut out);
        match out.pop() {
            Some(Command::ApplyBuffs { buffs }) => buffs,
            other => panic!("unexpected output {other:?}"),
        }
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn level_zero_commander_adds_a_tenth_fire_rate() {
        let buffs = grants(vec![
            snapshot(1, TowerKind::Commander, 0.0),
            snapshot(2, TowerKind::Scout, 60.0),
        ]);
        assert_eq!(buffs.len(), 1);
        let (id, granted) = buffs[0];
        assert_eq!(id, TowerId::new(2));
        assert_close(granted.fire_rate, 1.1);
        assert_close(granted.range, 1.0);
        assert_close(granted.damage, 1.0);
    }

    #[test]
    fn active_overdrive_adds_on_top_of_passive() {
        let mut commander = snapshot(1, TowerKind::Commander, 0.0);
        commander.level = 2;
        commander.ability_active = 10;
        let buffs = grants(vec![commander, snapshot(2, TowerKind::Scout, 60.0)]);
        assert_close(buffs[0].1.fire_rate, 1.0 + 0.2 + 0.3);
    }

    #[test]
    fn radar_scan_boosts_range_and_damage() {
        let mut camp = snapshot(1, TowerKind::RadarCamp, 0.0);
        let buffs = grants(vec![camp.clone(), snapshot(2, TowerKind::Sniper, 100.0)]);
        assert_close(buffs[0].1.range, 1.1);
        assert_close(buffs[0].1.damage, 1.0);

        camp.ability_active = 1;
        let buffs = grants(vec![camp, snapshot(2, TowerKind::Sniper, 100.0)]);
        assert_close(buffs[0].1.range, 1.3);
        assert_close(buffs[0].1.damage, 1.2);
    }

    #[test]
    fn overlapping_auras_stack_and_skip_self() {
        let buffs = grants(vec![
            snapshot(1, TowerKind::Commander, 0.0),
            snapshot(2, TowerKind::Commander, 50.0),
            snapshot(3, TowerKind::Scout, 100.0),
        ]);
        let by_id = |id: u32| {
            buffs
                .iter()
                .find(|(tower, _)| *tower == TowerId::new(id))
                .map(|(_, buffs)| buffs.fire_rate)
        };
        assert_close(by_id(1).unwrap_or_default(), 1.1);
        assert_close(by_id(2).unwrap_or_default(), 1.1);
        assert_close(by_id(3).unwrap_or_default(), 1.2);
    }

    #[test]
    fn towers_out_of_range_stay_neutral() {
        let buffs = grants(vec![
            snapshot(1, TowerKind::Commander, 0.0),
            snapshot(2, TowerKind::Scout, 121.0),
        ]);
        assert!(buffs.is_empty());
    }
}
