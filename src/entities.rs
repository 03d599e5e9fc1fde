/// Game entity types and their per-tick rules.
///
/// Every kind implements [`Entity`]; time and randomness are always passed in
/// so the same inputs replay the same run.
use rand::Rng;

use crate::config::{
    GameConfig, BULLET_HEIGHT, BULLET_SPEED, BULLET_WIDTH, ENEMY_HEALTH, ENEMY_HEIGHT,
    ENEMY_MAX_SPEED, ENEMY_MIN_SPEED, ENEMY_SPAWN_Y_MAX, ENEMY_SPAWN_Y_MIN, ENEMY_WIDTH,
    EXPLOSION_FRAMES, EXPLOSION_FRAME_MS, PLAYER_BOTTOM_MARGIN, PLAYER_HEIGHT, PLAYER_MAX_HEALTH,
    PLAYER_MAX_SHIELD, PLAYER_SPEED, PLAYER_WIDTH, POWERUP_SIZE, POWERUP_SPEED,
    RAM_SHIELD_DAMAGE, SHIELD_PICKUP_MAX, SHIELD_PICKUP_MIN,
};

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in field units, y growing downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Point, w: i32, h: i32) -> Self {
        Self::new(center.x - w / 2, center.y - h / 2, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn centery(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn center(&self) -> Point {
        Point::new(self.centerx(), self.centery())
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Half-open containment, matching how a pixel grid is hit-tested.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

/// The playable area, anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Field {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            width: config.field_width,
            height: config.field_height,
        }
    }
}

// ── Entity contract ───────────────────────────────────────────────────────────

/// Whether an entity survives the tick it was just updated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Expired,
}

/// Per-tick inputs shared by every entity update.
#[derive(Clone, Copy, Debug)]
pub struct TickContext {
    pub now_ms: u64,
    pub field: Field,
}

pub trait Entity {
    fn bounds(&self) -> Rect;

    fn update<R: Rng + ?Sized>(&mut self, ctx: &TickContext, rng: &mut R) -> Lifecycle;
}

/// Directions held down during the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// What an enemy ramming the ship did to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RamOutcome {
    /// The shield soaked the hit.
    Absorbed,
    /// The shield broke: one health lost and the shield recharged.
    ShieldBroken,
    /// The last point of health is gone.
    Destroyed,
}

/// The ship.  Health and shield live in `0..=100` and power never drops
/// below 1; every mutator clamps on write.
#[derive(Clone, Debug)]
pub struct Player {
    rect: Rect,
    health: i32,
    shield: i32,
    power: u32,
    last_shot: u64,
    power_time: u64,
    shoot_delay_ms: u64,
    power_decay_ms: u64,
}

impl Player {
    pub fn spawn(field: Field, now_ms: u64, config: &GameConfig) -> Self {
        let x = field.width / 2 - PLAYER_WIDTH / 2;
        let y = field.height - PLAYER_BOTTOM_MARGIN - PLAYER_HEIGHT;
        Self {
            rect: Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            health: PLAYER_MAX_HEALTH,
            shield: PLAYER_MAX_SHIELD,
            power: 1,
            last_shot: now_ms,
            power_time: now_ms,
            shoot_delay_ms: config.shoot_delay_ms,
            power_decay_ms: config.power_decay_ms,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn shield(&self) -> i32 {
        self.shield
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, PLAYER_MAX_HEALTH);
    }

    pub fn set_shield(&mut self, shield: i32) {
        self.shield = shield.clamp(0, PLAYER_MAX_SHIELD);
    }

    /// Set the power level and restart its decay window at `now_ms`.
    pub fn set_power(&mut self, power: u32, now_ms: u64) {
        self.power = power.max(1);
        self.power_time = now_ms;
    }

    /// Move the ship's top-left corner, keeping it inside `field`.
    pub fn place_at(&mut self, x: i32, y: i32, field: Field) {
        self.rect.x = x.clamp(0, field.width - self.rect.w);
        self.rect.y = y.clamp(0, field.height - self.rect.h);
    }

    pub fn steer(&mut self, dirs: Directions, field: Field) {
        let mut x = self.rect.x;
        let mut y = self.rect.y;
        if dirs.left {
            x -= PLAYER_SPEED;
        }
        if dirs.right {
            x += PLAYER_SPEED;
        }
        if dirs.up {
            y -= PLAYER_SPEED;
        }
        if dirs.down {
            y += PLAYER_SPEED;
        }
        self.place_at(x, y, field);
    }

    /// Fire if the cooldown has elapsed, pushing the new bullets.
    /// Returns whether anything was fired.
    pub fn shoot(&mut self, now_ms: u64, bullets: &mut Vec<Bullet>) -> bool {
        if now_ms.saturating_sub(self.last_shot) <= self.shoot_delay_ms {
            return false;
        }
        self.last_shot = now_ms;
        let top = self.rect.top();
        if self.power == 1 {
            bullets.push(Bullet::fired_from(self.rect.centerx(), top));
        } else {
            bullets.push(Bullet::fired_from(self.rect.left(), top));
            bullets.push(Bullet::fired_from(self.rect.right(), top));
        }
        true
    }

    /// Drop one power level once the current level's window has run out.
    pub fn tick_power_decay(&mut self, now_ms: u64) -> bool {
        if self.power >= 2 && now_ms.saturating_sub(self.power_time) > self.power_decay_ms {
            self.power -= 1;
            self.power_time = now_ms;
            return true;
        }
        false
    }

    pub fn take_ram(&mut self) -> RamOutcome {
        self.set_shield(self.shield - RAM_SHIELD_DAMAGE);
        if self.shield > 0 {
            return RamOutcome::Absorbed;
        }
        self.set_health(self.health - 1);
        self.shield = PLAYER_MAX_SHIELD;
        if self.health == 0 {
            RamOutcome::Destroyed
        } else {
            RamOutcome::ShieldBroken
        }
    }

    pub fn collect<R: Rng + ?Sized>(&mut self, kind: PowerUpKind, now_ms: u64, rng: &mut R) {
        match kind {
            PowerUpKind::Shield => {
                let boost = rng.gen_range(SHIELD_PICKUP_MIN..SHIELD_PICKUP_MAX);
                self.set_shield(self.shield + boost);
            }
            PowerUpKind::Gun => self.set_power(self.power + 1, now_ms),
        }
    }
}

impl Entity for Player {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update<R: Rng + ?Sized>(&mut self, ctx: &TickContext, _rng: &mut R) -> Lifecycle {
        self.tick_power_decay(ctx.now_ms);
        Lifecycle::Alive
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: i32,
    pub health: i32,
}

impl Enemy {
    /// A fresh enemy somewhere in the band above the field.
    pub fn spawn<R: Rng + ?Sized>(field: Field, rng: &mut R) -> Self {
        let mut enemy = Self::at(0, 0, ENEMY_MIN_SPEED);
        enemy.respawn(field, rng);
        enemy
    }

    pub fn at(x: i32, y: i32, speed: i32) -> Self {
        Self {
            rect: Rect::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
            speed,
            health: ENEMY_HEALTH,
        }
    }

    /// Re-roll position and speed.  Health is untouched: a damaged enemy
    /// that slips past keeps its wounds.
    pub fn respawn<R: Rng + ?Sized>(&mut self, field: Field, rng: &mut R) {
        self.rect.x = rng.gen_range(0..=(field.width - self.rect.w).max(0));
        self.rect.y = rng.gen_range(ENEMY_SPAWN_Y_MIN..=ENEMY_SPAWN_Y_MAX);
        self.speed = rng.gen_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED);
    }
}

impl Entity for Enemy {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update<R: Rng + ?Sized>(&mut self, ctx: &TickContext, rng: &mut R) -> Lifecycle {
        self.rect.y += self.speed;
        if self.rect.top() > ctx.field.height {
            self.respawn(ctx.field, rng);
        }
        Lifecycle::Alive
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
}

impl Bullet {
    /// A bullet whose bottom-centre sits at `(x, y)`.
    pub fn fired_from(x: i32, y: i32) -> Self {
        Self {
            rect: Rect::new(x - BULLET_WIDTH / 2, y - BULLET_HEIGHT, BULLET_WIDTH, BULLET_HEIGHT),
        }
    }
}

impl Entity for Bullet {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update<R: Rng + ?Sized>(&mut self, _ctx: &TickContext, _rng: &mut R) -> Lifecycle {
        self.rect.y -= BULLET_SPEED;
        if self.rect.bottom() < 0 {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Recharges part of the shield.
    Shield,
    /// Raises the power level by one, adding a second gun.
    Gun,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn drop_at<R: Rng + ?Sized>(center: Point, rng: &mut R) -> Self {
        let kind = if rng.gen_bool(0.5) {
            PowerUpKind::Shield
        } else {
            PowerUpKind::Gun
        };
        Self::new(center, kind)
    }

    pub fn new(center: Point, kind: PowerUpKind) -> Self {
        Self {
            rect: Rect::from_center(center, POWERUP_SIZE, POWERUP_SIZE),
            kind,
        }
    }
}

impl Entity for PowerUp {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update<R: Rng + ?Sized>(&mut self, ctx: &TickContext, _rng: &mut R) -> Lifecycle {
        self.rect.y += POWERUP_SPEED;
        if self.rect.top() > ctx.field.height {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }
}

// ── Explosion ─────────────────────────────────────────────────────────────────

/// Purely cosmetic burst; never takes part in collisions.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub rect: Rect,
    pub frame: u32,
    last_update: u64,
}

impl Explosion {
    pub fn new(center: Point, size: i32, now_ms: u64) -> Self {
        Self {
            rect: Rect::from_center(center, size, size),
            frame: 0,
            last_update: now_ms,
        }
    }
}

impl Entity for Explosion {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update<R: Rng + ?Sized>(&mut self, ctx: &TickContext, _rng: &mut R) -> Lifecycle {
        if ctx.now_ms.saturating_sub(self.last_update) > EXPLOSION_FRAME_MS {
            self.last_update = ctx.now_ms;
            self.frame += 1;
            if self.frame >= EXPLOSION_FRAMES {
                return Lifecycle::Expired;
            }
        }
        Lifecycle::Alive
    }
}

// ── Drawing view ──────────────────────────────────────────────────────────────

/// Borrowed view over any entity, in the order they are drawn.
#[derive(Clone, Copy, Debug)]
pub enum Actor<'a> {
    Player(&'a Player),
    Enemy(&'a Enemy),
    Bullet(&'a Bullet),
    PowerUp(&'a PowerUp),
    Explosion(&'a Explosion),
}

impl Actor<'_> {
    pub fn bounds(&self) -> Rect {
        match self {
            Actor::Player(p) => p.bounds(),
            Actor::Enemy(e) => e.bounds(),
            Actor::Bullet(b) => b.bounds(),
            Actor::PowerUp(p) => p.bounds(),
            Actor::Explosion(x) => x.bounds(),
        }
    }
}
