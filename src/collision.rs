/// Collision resolution for one playing tick.
///
/// Each phase first scans the collections without touching them and emits
/// [`Intent`]s, then applies those intents in one go.  Indices in an intent
/// always refer to the collection as it was when the phase's scan started.
use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

use crate::config::{BULLET_DAMAGE, ENEMY_KILL_SCORE, EXPLOSION_SIZE};
use crate::entities::{Enemy, Entity, Explosion, Point, PowerUp, PowerUpKind, RamOutcome};
use crate::world::World;

#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    /// A bullet struck the enemy at index `enemy`.
    Hit { enemy: usize, bullet: usize },
    RemoveEnemy(usize),
    RemovePowerUp(usize),
    AddScore(u32),
    SpawnEnemy,
    SpawnExplosion(Point),
    /// Roll the drop chance for a power-up at this point.
    MaybeDropPowerUp(Point),
    /// An enemy rammed the ship.
    Ram,
    Collect(PowerUpKind),
}

/// Summary of what one tick of collisions did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub bullet_hits: u32,
    pub kills: u32,
    pub rams: u32,
    pub pickups: u32,
    pub player_destroyed: bool,
}

/// Run all three phases in their fixed order.
pub fn resolve<R: Rng + ?Sized>(world: &mut World, now_ms: u64, rng: &mut R) -> CollisionReport {
    let mut report = CollisionReport::default();

    let intents = scan_bullets_vs_enemies(world);
    apply(world, intents, now_ms, rng, &mut report);

    let intents = scan_player_vs_enemies(world);
    apply(world, intents, now_ms, rng, &mut report);

    let intents = scan_player_vs_powerups(world);
    apply(world, intents, now_ms, rng, &mut report);

    if report.kills > 0 || report.rams > 0 || report.pickups > 0 {
        debug!(
            kills = report.kills,
            rams = report.rams,
            pickups = report.pickups,
            score = world.score,
            "collisions resolved"
        );
    }
    report
}

// ── Scans ─────────────────────────────────────────────────────────────────────

/// Enemies are scanned in order; each bullet is spent on the first enemy it
/// overlaps, so it can never pierce a second one.
pub fn scan_bullets_vs_enemies(world: &World) -> Vec<Intent> {
    let mut intents = Vec::new();
    let mut spent: BTreeSet<usize> = BTreeSet::new();

    for (ei, enemy) in world.enemies.iter().enumerate() {
        let bounds = enemy.bounds();
        let mut health = enemy.health;

        for (bi, bullet) in world.bullets.iter().enumerate() {
            if spent.contains(&bi) || !bounds.overlaps(&bullet.bounds()) {
                continue;
            }
            spent.insert(bi);
            health -= BULLET_DAMAGE;
            intents.push(Intent::Hit {
                enemy: ei,
                bullet: bi,
            });
        }

        if health <= 0 && health != enemy.health {
            let center = bounds.center();
            intents.push(Intent::AddScore(ENEMY_KILL_SCORE));
            intents.push(Intent::SpawnExplosion(center));
            intents.push(Intent::RemoveEnemy(ei));
            intents.push(Intent::MaybeDropPowerUp(center));
            intents.push(Intent::SpawnEnemy);
        }
    }
    intents
}

/// Ramming always destroys the enemy, whatever state the ship is in.
pub fn scan_player_vs_enemies(world: &World) -> Vec<Intent> {
    let ship = world.player.bounds();
    let mut intents = Vec::new();
    for (ei, enemy) in world.enemies.iter().enumerate() {
        let bounds = enemy.bounds();
        if !ship.overlaps(&bounds) {
            continue;
        }
        intents.push(Intent::RemoveEnemy(ei));
        intents.push(Intent::SpawnExplosion(bounds.center()));
        intents.push(Intent::SpawnEnemy);
        intents.push(Intent::Ram);
    }
    intents
}

pub fn scan_player_vs_powerups(world: &World) -> Vec<Intent> {
    let ship = world.player.bounds();
    let mut intents = Vec::new();
    for (pi, powerup) in world.powerups.iter().enumerate() {
        if ship.overlaps(&powerup.bounds()) {
            intents.push(Intent::RemovePowerUp(pi));
            intents.push(Intent::Collect(powerup.kind));
        }
    }
    intents
}

// ── Apply ─────────────────────────────────────────────────────────────────────

pub fn apply<R: Rng + ?Sized>(
    world: &mut World,
    intents: Vec<Intent>,
    now_ms: u64,
    rng: &mut R,
    report: &mut CollisionReport,
) {
    let mut spent_bullets: BTreeSet<usize> = BTreeSet::new();
    let mut dead_enemies: BTreeSet<usize> = BTreeSet::new();
    let mut taken_powerups: BTreeSet<usize> = BTreeSet::new();
    let mut new_enemies = 0usize;

    for intent in intents {
        match intent {
            Intent::Hit { enemy, bullet } => {
                if let Some(e) = world.enemies.get_mut(enemy) {
                    e.health -= BULLET_DAMAGE;
                }
                spent_bullets.insert(bullet);
                report.bullet_hits += 1;
            }
            Intent::RemoveEnemy(ei) => {
                dead_enemies.insert(ei);
            }
            Intent::RemovePowerUp(pi) => {
                taken_powerups.insert(pi);
            }
            Intent::AddScore(points) => {
                world.score = world.score.saturating_add(points);
                report.kills += 1;
            }
            Intent::SpawnEnemy => new_enemies += 1,
            Intent::SpawnExplosion(center) => {
                world
                    .explosions
                    .push(Explosion::new(center, EXPLOSION_SIZE, now_ms));
            }
            Intent::MaybeDropPowerUp(center) => {
                if rng.gen_bool(world.powerup_drop_chance) {
                    world.powerups.push(PowerUp::drop_at(center, rng));
                }
            }
            Intent::Ram => {
                report.rams += 1;
                if !report.player_destroyed
                    && world.player.take_ram() == RamOutcome::Destroyed
                {
                    report.player_destroyed = true;
                }
            }
            Intent::Collect(kind) => {
                world.player.collect(kind, now_ms, rng);
                report.pickups += 1;
            }
        }
    }

    remove_indices(&mut world.bullets, &spent_bullets);
    remove_indices(&mut world.enemies, &dead_enemies);
    remove_indices(&mut world.powerups, &taken_powerups);

    let field = world.field;
    world
        .enemies
        .extend((0..new_enemies).map(|_| Enemy::spawn(field, rng)));
}

fn remove_indices<T>(items: &mut Vec<T>, indices: &BTreeSet<usize>) {
    if indices.is_empty() {
        return;
    }
    let mut i = 0;
    items.retain(|_| {
        let keep = !indices.contains(&i);
        i += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_indices_keeps_order() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        remove_indices(&mut v, &BTreeSet::from([0, 2]));
        assert_eq!(v, vec!['b', 'd']);
    }

    #[test]
    fn remove_indices_ignores_out_of_range() {
        let mut v = vec![1, 2];
        remove_indices(&mut v, &BTreeSet::from([5]));
        assert_eq!(v, vec![1, 2]);
    }
}
