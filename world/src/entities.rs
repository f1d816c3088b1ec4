//! Projectiles, deployed units and cosmetic effects stored inside the world.

use frontier_defence_core::{
    DamageKind, EffectKind, EffectSnapshot, EnemyId, ProjectileId, ProjectileSnapshot, TowerId,
    UnitId, UnitKind, UnitSnapshot, Vec2,
};

/// Distance a projectile covers per tick.
pub(crate) const PROJECTILE_SPEED: f32 = 15.0;

#[derive(Clone, Debug)]
pub(crate) struct ProjectileState {
    pub(crate) id: ProjectileId,
    pub(crate) source: TowerId,
    pub(crate) target: EnemyId,
    pub(crate) position: Vec2,
    pub(crate) damage: f32,
    pub(crate) kind: DamageKind,
    pub(crate) splash: f32,
}

impl ProjectileState {
    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            position: self.position,
            target: self.target,
            source: self.source,
            damage: self.damage,
            kind: self.kind,
            splash: self.splash,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct UnitState {
    pub(crate) id: UnitId,
    pub(crate) kind: UnitKind,
    pub(crate) position: Vec2,
    pub(crate) progress: f32,
    pub(crate) health: f32,
    pub(crate) damage: f32,
    pub(crate) advancing: bool,
    /// Ticks accumulated toward the next shot of a ranged unit.
    pub(crate) attack_timer: u32,
}

impl UnitState {
    pub(crate) fn deploy(id: UnitId, kind: UnitKind, level: u8, position: Vec2, progress: f32) -> Self {
        let profile = kind.profile();
        let scale = UnitKind::level_scale(level);
        Self {
            id,
            kind,
            position,
            progress,
            health: profile.health * scale,
            damage: profile.damage * scale,
            advancing: true,
            attack_timer: 0,
        }
    }

    pub(crate) fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            progress: self.progress,
            health: self.health,
            damage: self.damage,
            advancing: self.advancing,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct EffectState {
    pub(crate) kind: EffectKind,
    pub(crate) from: Vec2,
    pub(crate) to: Vec2,
    pub(crate) remaining: u32,
    pub(crate) lifetime: u32,
}

impl EffectState {
    pub(crate) fn new(kind: EffectKind, from: Vec2, to: Vec2) -> Self {
        let lifetime = match kind {
            EffectKind::Beam => 15,
            EffectKind::Chain | EffectKind::Explosion => 10,
        };
        Self {
            kind,
            from,
            to,
            remaining: lifetime,
            lifetime,
        }
    }

    pub(crate) fn snapshot(&self) -> EffectSnapshot {
        EffectSnapshot {
            kind: self.kind,
            from: self.from,
            to: self.to,
            remaining: self.remaining,
            lifetime: self.lifetime,
        }
    }
}
