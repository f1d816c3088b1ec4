//! Hit resolution and per-tick advancement of units, projectiles and enemies.

use std::mem;

use frontier_defence_core::{
    DamageKind, EffectKind, EnemyId, Event, ProjectileId, TowerId, TowerKind, UnitId, UnitKind,
    FRAMES_PER_SECOND,
};
use log::{debug, info};

use crate::{
    enemies::EnemyState,
    entities::{EffectState, ProjectileState, UnitState, PROJECTILE_SPEED},
    World,
};

const CASH_PER_DAMAGE: f32 = 0.2;
const BOUNTY_BASE_BONUS: u64 = 2;
const UNIT_CONTACT_RADIUS: f32 = 30.0;
const SQUAD_CONTACT_DAMAGE: f32 = 5.0;

/// Origin of a hit, used to decide who earns cash for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HitSource {
    Tower(TowerId),
    Unit,
}

impl World {
    pub(crate) fn enemy_index(&self, id: EnemyId) -> Option<usize> {
        self.enemies
            .binary_search_by_key(&id, |enemy| enemy.id)
            .ok()
    }

    /// Applies the damage rule to one enemy and credits the firing tower.
    pub(crate) fn strike(&mut self, index: usize, damage: f32, kind: DamageKind, source: HitSource) {
        let Some(enemy) = self.enemies.get_mut(index) else {
            return;
        };
        if !enemy.take_hit(damage, kind) {
            return;
        }

        let HitSource::Tower(tower_id) = source else {
            return;
        };
        let Some(tower) = self.towers.get_mut(tower_id) else {
            return;
        };

        tower.damage_dealt += damage;
        let mut cash = (damage * CASH_PER_DAMAGE).floor().max(1.0) as u64;
        if tower.kind == TowerKind::Cowboy {
            cash += BOUNTY_BASE_BONUS + u64::from(tower.level);
        }
        tower.cash_generated += cash;
        self.money += cash;
    }

    pub(crate) fn fire_projectile(
        &mut self,
        tower: TowerId,
        target: EnemyId,
        damage: f32,
        kind: DamageKind,
        splash: f32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(position) = self.towers.get(tower).map(|state| state.position) else {
            debug!("dropping projectile from missing tower {}", tower.get());
            return;
        };
        if self.enemy_index(target).is_none() {
            debug!("dropping projectile aimed at missing enemy {}", target.get());
            return;
        }

        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id = self.next_projectile_id.wrapping_add(1);
        self.projectiles.push(ProjectileState {
            id,
            source: tower,
            target,
            position,
            damage,
            kind,
            splash,
        });
        out_events.push(Event::ProjectileFired {
            projectile: id,
            tower,
            target,
        });
    }

    pub(crate) fn fire_beam(&mut self, tower: TowerId, target: EnemyId, damage: f32) {
        let Some(origin) = self.towers.get(tower).map(|state| state.position) else {
            return;
        };
        let Some(index) = self.enemy_index(target) else {
            debug!("beam target {} already gone", target.get());
            return;
        };
        if let Some(enemy) = self.enemies.get(index) {
            self.effects
                .push(EffectState::new(EffectKind::Beam, origin, enemy.position));
        }
        self.strike(index, damage, DamageKind::Energy, HitSource::Tower(tower));
    }

    pub(crate) fn strike_enemy(&mut self, tower: TowerId, target: EnemyId, damage: f32) {
        match self.enemy_index(target) {
            Some(index) => self.strike(index, damage, DamageKind::Energy, HitSource::Tower(tower)),
            None => debug!("pulse target {} already gone", target.get()),
        }
    }

    pub(crate) fn strike_chain(
        &mut self,
        tower: TowerId,
        chain: &[EnemyId],
        damage: f32,
        stun_frames: u32,
    ) {
        let Some(mut from) = self.towers.get(tower).map(|state| state.position) else {
            return;
        };
        for &link in chain {
            let Some(index) = self.enemy_index(link) else {
                debug!("chain link {} already gone", link.get());
                continue;
            };
            self.strike(index, damage, DamageKind::Energy, HitSource::Tower(tower));
            if let Some(enemy) = self.enemies.get_mut(index) {
                enemy.freeze(stun_frames);
                self.effects
                    .push(EffectState::new(EffectKind::Chain, from, enemy.position));
                from = enemy.position;
            }
        }
    }

    pub(crate) fn deploy_unit(
        &mut self,
        tower: TowerId,
        kind: UnitKind,
        level: u8,
        out_events: &mut Vec<Event>,
    ) {
        if self.path.is_empty() {
            debug!("no path to deploy {kind:?} onto");
            return;
        }
        let progress = self.path.length();
        let id = UnitId::new(self.next_unit_id);
        self.next_unit_id = self.next_unit_id.wrapping_add(1);
        self.units.push(UnitState::deploy(
            id,
            kind,
            level,
            self.path.point_at(progress),
            progress,
        ));
        out_events.push(Event::UnitDeployed {
            unit: id,
            tower,
            kind,
        });
    }

    /// Runs the unit, projectile, enemy and effect phases in that order.
    pub(crate) fn advance_entities(&mut self, out_events: &mut Vec<Event>) {
        self.advance_units();
        self.advance_projectiles();
        self.advance_enemies(out_events);
        self.advance_effects();
    }

    fn advance_units(&mut self) {
        let mut units = mem::take(&mut self.units);
        for unit in &mut units {
            if unit.health <= 0.0 {
                continue;
            }

            let profile = unit.kind.profile();
            if unit.advancing {
                unit.progress = (unit.progress - profile.speed).max(0.0);
                unit.position = self.path.point_at(unit.progress);
            }

            let contact = self.enemies.iter().position(|enemy| {
                enemy.is_alive() && enemy.position.distance(unit.position) < UNIT_CONTACT_RADIUS
            });
            match contact {
                Some(index) if profile.collision => {
                    self.strike(index, unit.damage, DamageKind::Explosive, HitSource::Unit);
                    unit.health = 0.0;
                }
                Some(_) => unit.health -= SQUAD_CONTACT_DAMAGE,
                None => {}
            }

            if unit.health > 0.0 && !profile.collision {
                let target = self.enemies.iter().position(|enemy| {
                    enemy.is_alive() && enemy.position.distance(unit.position) <= profile.range
                });
                if let Some(index) = target {
                    unit.advancing = false;
                    unit.attack_timer += 1;
                    if unit.attack_timer >= profile.cooldown {
                        unit.attack_timer = 0;
                        self.strike(index, unit.damage, DamageKind::Physical, HitSource::Unit);
                    }
                } else {
                    unit.advancing = true;
                }
            }
        }
        units.retain(|unit| unit.health > 0.0);
        self.units = units;
    }

    fn advance_projectiles(&mut self) {
        let mut in_flight = Vec::with_capacity(self.projectiles.len());
        for mut projectile in mem::take(&mut self.projectiles) {
            let Some((index, target)) = self
                .enemy_index(projectile.target)
                .and_then(|index| self.enemies.get(index).map(|enemy| (index, enemy.position)))
            else {
                debug!(
                    "discarding projectile {} whose target {} is gone",
                    projectile.id.get(),
                    projectile.target.get()
                );
                continue;
            };

            let offset = target - projectile.position;
            let distance = offset.length();
            if distance < PROJECTILE_SPEED {
                self.impact(&projectile, index);
            } else {
                projectile.position += offset / distance * PROJECTILE_SPEED;
                in_flight.push(projectile);
            }
        }
        self.projectiles = in_flight;
    }

    fn impact(&mut self, projectile: &ProjectileState, target_index: usize) {
        let source = HitSource::Tower(projectile.source);
        if projectile.splash <= 0.0 {
            self.strike(target_index, projectile.damage, projectile.kind, source);
            return;
        }

        let centre = projectile.position;
        self.effects
            .push(EffectState::new(EffectKind::Explosion, centre, centre));
        for index in 0..self.enemies.len() {
            let within = self
                .enemies
                .get(index)
                .map_or(false, |enemy| enemy.position.distance(centre) <= projectile.splash);
            if within {
                self.strike(index, projectile.damage, projectile.kind, source);
            }
        }
    }

    fn advance_enemies(&mut self, out_events: &mut Vec<Event>) {
        let regen_pulse = self.frame % FRAMES_PER_SECOND == 0;
        let length = self.path.length();
        let mut survivors = Vec::with_capacity(self.enemies.len());

        for mut enemy in mem::take(&mut self.enemies) {
            if !enemy.is_alive() {
                let reward = enemy.kind.profile().reward;
                self.money += reward;
                out_events.push(Event::EnemyKilled {
                    enemy: enemy.id,
                    kind: enemy.kind,
                    reward,
                });
                continue;
            }

            if regen_pulse {
                enemy.regenerate();
            }

            if enemy.frozen > 0 {
                enemy.frozen -= 1;
                survivors.push(enemy);
                continue;
            }

            enemy.progress += enemy.speed;
            if enemy.progress >= length {
                self.breach(&enemy, out_events);
                continue;
            }
            enemy.position = self.path.point_at(enemy.progress);
            survivors.push(enemy);
        }

        self.enemies = survivors;
    }

    fn breach(&mut self, enemy: &EnemyState, out_events: &mut Vec<Event>) {
        let damage = if self.god_mode {
            0
        } else {
            enemy.health.ceil() as i32
        };
        let was_standing = self.base_health > 0;
        self.base_health = self.base_health.saturating_sub(damage);
        self.perfect_wave = false;
        out_events.push(Event::BaseBreached {
            enemy: enemy.id,
            damage,
        });

        if was_standing && self.base_health <= 0 {
            info!("base destroyed during wave {}", self.wave);
            out_events.push(Event::BaseDestroyed { wave: self.wave });
        }
    }

    fn advance_effects(&mut self) {
        for effect in &mut self.effects {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        self.effects.retain(|effect| effect.remaining > 0);
    }
}
