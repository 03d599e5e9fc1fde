/// The entity collections of one run, plus its score.
///
/// A `World` exists only while the game is in the playing state; entering
/// that state builds a fresh one and leaving it drops it.
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Actor, Bullet, Directions, Enemy, Entity, Explosion, Field, Lifecycle, Player, PowerUp,
    TickContext,
};

#[derive(Clone, Debug)]
pub struct World {
    pub field: Field,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    /// Drop probability used by the collision pass.
    pub powerup_drop_chance: f64,
}

impl World {
    /// A new run: one ship, a full enemy wave, nothing else.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, now_ms: u64, rng: &mut R) -> Self {
        let field = Field::from_config(config);
        let enemies = (0..config.enemy_count)
            .map(|_| Enemy::spawn(field, rng))
            .collect();
        Self {
            field,
            player: Player::spawn(field, now_ms, config),
            enemies,
            bullets: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            powerup_drop_chance: config.powerup_drop_chance,
        }
    }

    pub fn shoot(&mut self, now_ms: u64) -> bool {
        self.player.shoot(now_ms, &mut self.bullets)
    }

    /// Advance every entity by one tick and drop the ones that expired.
    pub fn update<R: Rng + ?Sized>(&mut self, held: Directions, now_ms: u64, rng: &mut R) {
        let ctx = TickContext {
            now_ms,
            field: self.field,
        };

        self.player.steer(held, self.field);
        self.player.update(&ctx, rng);

        for enemy in &mut self.enemies {
            enemy.update(&ctx, rng);
        }
        update_all(&mut self.bullets, &ctx, rng);
        update_all(&mut self.powerups, &ctx, rng);
        update_all(&mut self.explosions, &ctx, rng);
    }

    /// Every entity in draw order: ship first, explosions last.
    pub fn actors(&self) -> impl Iterator<Item = Actor<'_>> {
        std::iter::once(Actor::Player(&self.player))
            .chain(self.enemies.iter().map(Actor::Enemy))
            .chain(self.bullets.iter().map(Actor::Bullet))
            .chain(self.powerups.iter().map(Actor::PowerUp))
            .chain(self.explosions.iter().map(Actor::Explosion))
    }
}

fn update_all<E: Entity, R: Rng + ?Sized>(items: &mut Vec<E>, ctx: &TickContext, rng: &mut R) {
    items.retain_mut(|item| item.update(ctx, rng) == Lifecycle::Alive);
}
