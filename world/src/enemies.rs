//! Live enemy state and the per-hit damage rule.

use frontier_defence_core::{DamageKind, EnemyId, EnemyKind, EnemySnapshot, Vec2};

/// Raw damage at or above which lead armour stops protecting.
pub(crate) const ARMOR_BYPASS_DAMAGE: f32 = 50.0;

const CHILL_FACTOR: f32 = 0.8;
const MIN_CHILLED_SPEED: f32 = 0.2;
const CHILL_STACKS_TO_FREEZE: u32 = 3;
const CHILL_FREEZE_FRAMES: u32 = 60;

/// Enemy stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct EnemyState {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) position: Vec2,
    pub(crate) progress: f32,
    pub(crate) health: f32,
    pub(crate) max_health: f32,
    pub(crate) speed: f32,
    pub(crate) frozen: u32,
    pub(crate) chill_stacks: u32,
}

impl EnemyState {
    pub(crate) fn spawn(id: EnemyId, kind: EnemyKind, health: f32, position: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            progress: 0.0,
            health,
            max_health: health,
            speed: kind.profile().speed,
            frozen: 0,
            chill_stacks: 0,
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Applies a single hit and reports whether it landed.
    ///
    /// Armoured enemies shrug off non-piercing hits below
    /// [`ARMOR_BYPASS_DAMAGE`] with no side effects at all.
    pub(crate) fn take_hit(&mut self, damage: f32, kind: DamageKind) -> bool {
        if self.kind.is_armored() && !kind.pierces_armor() && damage < ARMOR_BYPASS_DAMAGE {
            return false;
        }

        self.health -= damage;
        if kind.chills() {
            self.chill();
        }
        true
    }

    /// Extends the hard freeze without ever shortening it.
    pub(crate) fn freeze(&mut self, frames: u32) {
        self.frozen = self.frozen.max(frames);
    }

    fn chill(&mut self) {
        self.chill_stacks += 1;
        self.speed = (self.speed * CHILL_FACTOR).max(MIN_CHILLED_SPEED);
        if self.chill_stacks >= CHILL_STACKS_TO_FREEZE {
            self.frozen = CHILL_FREEZE_FRAMES;
            self.chill_stacks = 0;
        }
    }

    pub(crate) fn regenerate(&mut self) {
        if let Some(rate) = self.kind.profile().regen {
            self.health = (self.health + rate * 10.0).min(self.max_health);
        }
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            progress: self.progress,
            health: self.health,
            max_health: self.max_health,
            speed: self.speed,
            frozen: self.frozen,
            chill_stacks: self.chill_stacks,
            armored: self.kind.is_armored(),
            hidden: self.kind.is_hidden(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(kind: EnemyKind, health: f32) -> EnemyState {
        EnemyState::spawn(EnemyId::new(1), kind, health, Vec2::ZERO)
    }

    #[test]
    fn armor_negates_small_physical_hits() {
        let mut lead = enemy(EnemyKind::Lead, 100.0);
        assert!(!lead.take_hit(49.9, DamageKind::Physical));
        assert!(!lead.take_hit(10.0, DamageKind::Frost));
        assert_eq!(lead.health, 100.0);
        assert_eq!(lead.chill_stacks, 0);
    }

    #[test]
    fn armor_yields_to_heavy_or_piercing_hits() {
        let mut lead = enemy(EnemyKind::ArmoredLead, 100.0);
        assert!(lead.take_hit(50.0, DamageKind::Physical));
        assert_eq!(lead.health, 50.0);
        assert!(lead.take_hit(3.0, DamageKind::Energy));
        assert!(lead.take_hit(4.0, DamageKind::Explosive));
        assert_eq!(lead.health, 43.0);
    }

    #[test]
    fn third_chill_stack_freezes_and_resets() {
        let mut zombie = enemy(EnemyKind::Zombie, 100.0);
        for _ in 0..2 {
            assert!(zombie.take_hit(1.0, DamageKind::Frost));
        }
        assert_eq!(zombie.chill_stacks, 2);
        assert!((zombie.speed - 0.64).abs() < 1e-5);
        assert!(zombie.take_hit(1.0, DamageKind::Frost));
        assert_eq!(zombie.chill_stacks, 0);
        assert_eq!(zombie.frozen, 60);
    }

    #[test]
    fn chill_never_drops_speed_below_floor() {
        let mut golem = enemy(EnemyKind::IceGolem, 1_000.0);
        for _ in 0..30 {
            let _ = golem.take_hit(1.0, DamageKind::Frost);
        }
        assert!((golem.speed - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn regeneration_caps_at_max_health() {
        let mut paladin = enemy(EnemyKind::Paladin, 500.0);
        paladin.health = 498.0;
        paladin.regenerate();
        assert_eq!(paladin.health, 500.0);

        let mut zombie = enemy(EnemyKind::Zombie, 12.0);
        zombie.health = 6.0;
        zombie.regenerate();
        assert_eq!(zombie.health, 6.0);
    }
}
