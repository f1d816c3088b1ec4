#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that runs each tower's behaviour and emits combat commands.
//!
//! The system never mutates towers directly. It reads a [`TowerSnapshot`],
//! advances a copy of the tower's [`TowerCombatState`], and queues the
//! resulting firing commands followed by a `Command::UpdateTowerCombat` when
//! the state changed.

use std::f32::consts::{PI, TAU};

use frontier_defence_core::{
    Command, DamageKind, EnemyId, EnemySnapshot, EnemyView, FireMode, PhaserState,
    TowerCombatState, TowerSnapshot, UnitKind, Vec2,
};
use frontier_defence_system_tower_targeting::{is_candidate, TowerTargeting};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Largest heading error, in radians, at which a turret may fire.
pub const AIM_TOLERANCE: f32 = 0.8;

/// Radius within which chain lightning jumps from one enemy to the next.
pub const CHAIN_RADIUS: f32 = 100.0;

/// Charge beams deal damage on ticks divisible by this value.
pub const PHASER_PULSE_INTERVAL: u64 = 5;

/// Tower combat system that owns the targeting scratch space and random stream.
#[derive(Debug)]
pub struct TowerCombat {
    targeting: TowerTargeting,
    rng: ChaCha8Rng,
    chain: Vec<EnemyId>,
}

impl TowerCombat {
    /// Creates a combat system whose random targeting is seeded deterministically.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            targeting: TowerTargeting::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            chain: Vec::new(),
        }
    }

    /// Runs one tick of the tower's behaviour.
    ///
    /// Stunned and passive towers emit nothing.
    pub fn handle(
        &mut self,
        frame: u64,
        tower: &TowerSnapshot,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if tower.is_stunned(frame) {
            return;
        }

        let mut state = tower.combat;
        match tower.kind.fire_mode() {
            FireMode::Passive => return,
            FireMode::Production(kind) => produce(tower, kind, &mut state, out),
            FireMode::ChargeBeam => self.run_phaser(frame, tower, enemies, &mut state, out),
            FireMode::Projectile | FireMode::InstantBeam | FireMode::ChainLightning => {
                self.engage(frame, tower, enemies, &mut state, out);
            }
        }

        if state != tower.combat {
            out.push(Command::UpdateTowerCombat {
                tower: tower.id,
                state,
            });
        }
    }

    fn engage(
        &mut self,
        frame: u64,
        tower: &TowerSnapshot,
        enemies: &EnemyView,
        state: &mut TowerCombatState,
        out: &mut Vec<Command>,
    ) {
        let target = self
            .targeting
            .select(tower, enemies, &mut self.rng)
            .and_then(|id| enemies.get(id));
        if let Some(target) = target {
            state.desired_rotation = heading(tower.position, target.position);
        }
        rotate(state, tower.stats.rotation_speed);
        let Some(target) = target else {
            return;
        };

        let aimed = wrap_angle(state.desired_rotation - state.rotation).abs() < AIM_TOLERANCE;
        let ready = cooldown_elapsed(frame, state.last_shot_frame, tower);

        if let Some(burst) = tower.stats.burst {
            if state.burst_remaining > 0 {
                state.burst_timer = state.burst_timer.saturating_sub(1);
                if state.burst_timer == 0 {
                    out.push(projectile(tower, target.id));
                    state.burst_remaining -= 1;
                    state.burst_timer = burst.interval;
                    state.last_shot_frame = frame;
                }
            } else if ready && aimed {
                out.push(projectile(tower, target.id));
                state.burst_remaining = burst.shots.saturating_sub(1);
                state.burst_timer = burst.interval;
                state.last_shot_frame = frame;
            }
            return;
        }

        if !(ready && aimed) {
            return;
        }
        state.last_shot_frame = frame;

        match tower.kind.fire_mode() {
            FireMode::InstantBeam => out.push(Command::FireBeam {
                tower: tower.id,
                target: target.id,
                damage: tower.effective_damage(),
            }),
            FireMode::ChainLightning => self.discharge(tower, target, enemies, out),
            _ => out.push(projectile(tower, target.id)),
        }
    }

    fn discharge(
        &mut self,
        tower: &TowerSnapshot,
        first: &EnemySnapshot,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        let Some(chain) = tower.stats.chain else {
            return;
        };

        self.chain.clear();
        self.chain.push(first.id);
        let mut link = first.position;
        while self.chain.len() < chain.links as usize {
            let next = enemies
                .iter()
                .filter(|enemy| enemy.health > 0.0 && !self.chain.contains(&enemy.id))
                .map(|enemy| (enemy, enemy.position.distance(link)))
                .filter(|(_, distance)| *distance < CHAIN_RADIUS)
                .fold(None::<(&EnemySnapshot, f32)>, |best, candidate| match best {
                    Some((_, closest)) if closest <= candidate.1 => best,
                    _ => Some(candidate),
                });
            let Some((enemy, _)) = next else {
                break;
            };
            self.chain.push(enemy.id);
            link = enemy.position;
        }

        out.push(Command::StrikeChain {
            tower: tower.id,
            chain: self.chain.clone(),
            damage: tower.effective_damage(),
            stun_frames: chain.stun_frames,
        });
    }

    fn run_phaser(
        &mut self,
        frame: u64,
        tower: &TowerSnapshot,
        enemies: &EnemyView,
        state: &mut TowerCombatState,
        out: &mut Vec<Command>,
    ) {
        let Some(charge) = tower.stats.charge else {
            return;
        };
        let cooldown = PhaserState::Cooldown {
            remaining: tower.stats.cooldown.max(1),
        };

        state.phaser = match state.phaser {
            PhaserState::Idle => match self.targeting.select(tower, enemies, &mut self.rng) {
                Some(target) => {
                    track(state, tower, enemies, target);
                    PhaserState::Charging {
                        remaining: charge.charge_frames.max(1),
                        target,
                    }
                }
                None => PhaserState::Idle,
            },
            PhaserState::Charging { remaining, target } => {
                // The charge always completes; losing the target is settled in Firing.
                let target = match self.revalidate(tower, enemies, target) {
                    Some(target) => {
                        track(state, tower, enemies, target);
                        target
                    }
                    None => target,
                };
                if remaining <= 1 {
                    PhaserState::Firing {
                        remaining: charge.fire_frames.max(1),
                        target,
                    }
                } else {
                    PhaserState::Charging {
                        remaining: remaining - 1,
                        target,
                    }
                }
            }
            PhaserState::Firing { remaining, target } => {
                match self.revalidate(tower, enemies, target) {
                    None => cooldown,
                    Some(target) => {
                        track(state, tower, enemies, target);
                        if frame % PHASER_PULSE_INTERVAL == 0 {
                            out.push(Command::StrikeEnemy {
                                tower: tower.id,
                                target,
                                damage: tower.effective_damage(),
                            });
                        }
                        if remaining <= 1 {
                            cooldown
                        } else {
                            PhaserState::Firing {
                                remaining: remaining - 1,
                                target,
                            }
                        }
                    }
                }
            }
            PhaserState::Cooldown { remaining } => {
                if remaining <= 1 {
                    PhaserState::Idle
                } else {
                    PhaserState::Cooldown {
                        remaining: remaining - 1,
                    }
                }
            }
        };
    }

    /// Keeps the locked target while it remains eligible, otherwise reacquires.
    fn revalidate(
        &mut self,
        tower: &TowerSnapshot,
        enemies: &EnemyView,
        target: EnemyId,
    ) -> Option<EnemyId> {
        match enemies.get(target) {
            Some(enemy) if is_candidate(tower, enemy) => Some(target),
            _ => self.targeting.select(tower, enemies, &mut self.rng),
        }
    }
}

fn produce(
    tower: &TowerSnapshot,
    kind: UnitKind,
    state: &mut TowerCombatState,
    out: &mut Vec<Command>,
) {
    state.production_timer += 1;
    if state.production_timer >= tower.stats.cooldown {
        out.push(Command::DeployUnit {
            tower: tower.id,
            kind,
            level: tower.level,
        });
        state.production_timer = 0;
    }
}

fn projectile(tower: &TowerSnapshot, target: EnemyId) -> Command {
    let kind = if tower.stats.pierces_lead {
        DamageKind::Energy
    } else if tower.kind.chills() {
        DamageKind::Frost
    } else {
        DamageKind::Physical
    };
    Command::FireProjectile {
        tower: tower.id,
        target,
        damage: tower.effective_damage(),
        kind,
        splash: tower.kind.splash_radius(),
    }
}

fn cooldown_elapsed(frame: u64, last_shot_frame: u64, tower: &TowerSnapshot) -> bool {
    let elapsed = frame.saturating_sub(last_shot_frame) as f32;
    elapsed >= tower.stats.cooldown as f32 / tower.buffs.fire_rate
}

/// Snaps the turret onto the target, as charge beams do.
fn track(state: &mut TowerCombatState, tower: &TowerSnapshot, enemies: &EnemyView, target: EnemyId) {
    if let Some(enemy) = enemies.get(target) {
        state.desired_rotation = heading(tower.position, enemy.position);
        state.rotation = state.desired_rotation;
    }
}

/// Steps the turret toward its desired heading; zero speed snaps.
fn rotate(state: &mut TowerCombatState, speed: f32) {
    let diff = wrap_angle(state.desired_rotation - state.rotation);
    if speed <= 0.0 || diff.abs() < speed {
        state.rotation = state.desired_rotation;
    } else {
        state.rotation = wrap_angle(state.rotation + diff.signum() * speed);
    }
}

fn heading(from: Vec2, to: Vec2) -> f32 {
    let offset = to - from;
    offset.y.atan2(offset.x)
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped < -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
