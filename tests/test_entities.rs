use space_shooter::config::GameConfig;
use space_shooter::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn ctx(now_ms: u64) -> TickContext {
    TickContext {
        now_ms,
        field: Field::default(),
    }
}

fn make_player() -> Player {
    Player::spawn(Field::default(), 0, &GameConfig::default())
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10, 20, 30, 40);
    assert_eq!((r.left(), r.right(), r.top(), r.bottom()), (10, 40, 20, 60));
    assert_eq!(r.center(), Point::new(25, 40));
    assert_eq!(Rect::from_center(Point::new(25, 40), 30, 40), r);
}

#[test]
fn touching_rects_do_not_overlap() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
    assert!(!a.overlaps(&Rect::new(0, 10, 10, 10)));
    assert!(a.overlaps(&Rect::new(9, 9, 10, 10)));
}

#[test]
fn contains_is_half_open() {
    let r = Rect::new(0, 0, 10, 10);
    assert!(r.contains(Point::new(0, 0)));
    assert!(r.contains(Point::new(9, 9)));
    assert!(!r.contains(Point::new(10, 5)));
}

// ── Player movement ───────────────────────────────────────────────────────────

#[test]
fn player_spawns_bottom_centre() {
    let p = make_player();
    assert_eq!(p.rect().centerx(), 400);
    assert_eq!(p.rect().bottom(), 590);
    assert_eq!((p.health(), p.shield(), p.power()), (100, 100, 1));
}

#[test]
fn steer_moves_five_units_per_direction() {
    let mut p = make_player();
    let start = p.rect();
    p.steer(
        Directions {
            left: true,
            up: true,
            ..Directions::default()
        },
        Field::default(),
    );
    assert_eq!(p.rect().x, start.x - 5);
    assert_eq!(p.rect().y, start.y - 5);
}

#[test]
fn steer_clamps_to_field() {
    let field = Field::default();
    let mut p = make_player();

    p.place_at(2, 2, field);
    p.steer(
        Directions {
            left: true,
            up: true,
            ..Directions::default()
        },
        field,
    );
    assert_eq!((p.rect().x, p.rect().y), (0, 0));

    p.place_at(750, 560, field);
    p.steer(
        Directions {
            right: true,
            down: true,
            ..Directions::default()
        },
        field,
    );
    assert_eq!((p.rect().right(), p.rect().bottom()), (800, 600));
}

#[test]
fn opposite_directions_cancel() {
    let mut p = make_player();
    let start = p.rect();
    p.steer(
        Directions {
            left: true,
            right: true,
            ..Directions::default()
        },
        Field::default(),
    );
    assert_eq!(p.rect(), start);
}

// ── Player shooting ───────────────────────────────────────────────────────────

#[test]
fn shoot_respects_cooldown() {
    let mut p = make_player();
    let mut bullets = Vec::new();
    assert!(!p.shoot(250, &mut bullets)); // needs strictly more than 250ms
    assert!(p.shoot(251, &mut bullets));
    assert!(!p.shoot(400, &mut bullets));
    assert!(p.shoot(502, &mut bullets));
    assert_eq!(bullets.len(), 2);
}

#[test]
fn single_gun_fires_from_ship_top_centre() {
    let mut p = make_player();
    let mut bullets = Vec::new();
    p.shoot(1000, &mut bullets);
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].rect.centerx(), p.rect().centerx());
    assert_eq!(bullets[0].rect.bottom(), p.rect().top());
}

#[test]
fn double_gun_fires_from_both_edges() {
    let mut p = make_player();
    p.set_power(2, 0);
    let mut bullets = Vec::new();
    p.shoot(1000, &mut bullets);
    let xs: Vec<i32> = bullets.iter().map(|b| b.rect.centerx()).collect();
    assert_eq!(xs, vec![p.rect().left(), p.rect().right()]);
}

// ── Power decay ───────────────────────────────────────────────────────────────

#[test]
fn power_decays_one_level_per_window() {
    let mut p = make_player();
    p.set_power(3, 0);

    assert!(!p.tick_power_decay(5000));
    assert!(p.tick_power_decay(5001));
    assert_eq!(p.power(), 2);

    // The next level gets a fresh window from the moment of the drop.
    assert!(!p.tick_power_decay(10_001));
    assert!(p.tick_power_decay(10_002));
    assert_eq!(p.power(), 1);

    assert!(!p.tick_power_decay(60_000));
    assert_eq!(p.power(), 1);
}

#[test]
fn power_decay_over_ticks() {
    let mut p = make_player();
    let mut rng = seeded_rng();
    p.set_power(3, 0);
    let mut now = 0;
    while now <= 5016 {
        p.update(&ctx(now), &mut rng);
        now += 16;
    }
    assert_eq!(p.power(), 2);
    while now <= 10_032 {
        p.update(&ctx(now), &mut rng);
        now += 16;
    }
    assert_eq!(p.power(), 1);
}

#[test]
fn power_never_below_one() {
    let mut p = make_player();
    p.set_power(0, 0);
    assert_eq!(p.power(), 1);
}

// ── Player damage & pickups ───────────────────────────────────────────────────

#[test]
fn ram_drains_shield_first() {
    let mut p = make_player();
    assert_eq!(p.take_ram(), RamOutcome::Absorbed);
    assert_eq!((p.health(), p.shield()), (100, 80));
}

#[test]
fn ram_breaking_shield_costs_health() {
    let mut p = make_player();
    p.set_shield(20);
    assert_eq!(p.take_ram(), RamOutcome::ShieldBroken);
    assert_eq!((p.health(), p.shield()), (99, 100));
}

#[test]
fn ram_on_low_shield_clamps_before_breaking() {
    let mut p = make_player();
    p.set_shield(5);
    assert_eq!(p.take_ram(), RamOutcome::ShieldBroken);
    assert_eq!(p.shield(), 100);
}

#[test]
fn last_health_point_destroys() {
    let mut p = make_player();
    p.set_health(1);
    p.set_shield(20);
    assert_eq!(p.take_ram(), RamOutcome::Destroyed);
    assert_eq!(p.health(), 0);
}

#[test]
fn setters_clamp() {
    let mut p = make_player();
    p.set_health(250);
    p.set_shield(-40);
    assert_eq!((p.health(), p.shield()), (100, 0));
}

#[test]
fn shield_pickup_adds_ten_to_thirty() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let mut p = make_player();
        p.set_shield(50);
        p.collect(PowerUpKind::Shield, 0, &mut rng);
        assert!((60..80).contains(&p.shield()), "shield {}", p.shield());
    }
}

#[test]
fn shield_pickup_caps_at_hundred() {
    let mut p = make_player();
    p.set_shield(95);
    p.collect(PowerUpKind::Shield, 0, &mut seeded_rng());
    assert_eq!(p.shield(), 100);
}

#[test]
fn gun_pickup_raises_power_and_restarts_window() {
    let mut p = make_player();
    p.collect(PowerUpKind::Gun, 3000, &mut seeded_rng());
    assert_eq!(p.power(), 2);
    assert!(!p.tick_power_decay(8000));
    assert!(p.tick_power_decay(8001));
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_spawns_above_field() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        let e = Enemy::spawn(Field::default(), &mut rng);
        assert!((-100..=-40).contains(&e.rect.y));
        assert!((0..=770).contains(&e.rect.x));
        assert!((1..=3).contains(&e.speed));
        assert_eq!(e.health, 30);
    }
}

#[test]
fn enemy_descends_by_speed() {
    let mut e = Enemy::at(100, 100, 3);
    e.update(&ctx(0), &mut seeded_rng());
    assert_eq!(e.rect.y, 103);
}

#[test]
fn enemy_recycles_below_field() {
    let mut e = Enemy::at(100, 598, 3);
    e.health = 20;
    assert_eq!(e.update(&ctx(0), &mut seeded_rng()), Lifecycle::Alive);
    assert!((-100..=-40).contains(&e.rect.y));
    assert_eq!(e.health, 20);
}

#[test]
fn enemy_at_bottom_edge_is_not_recycled_yet() {
    let mut e = Enemy::at(100, 597, 3);
    e.update(&ctx(0), &mut seeded_rng());
    assert_eq!(e.rect.y, 600);
}

// ── Bullet / PowerUp / Explosion ──────────────────────────────────────────────

#[test]
fn bullet_moves_up_and_expires_above_field() {
    let mut rng = seeded_rng();
    let mut b = Bullet::fired_from(100, 10);
    assert_eq!(b.update(&ctx(0), &mut rng), Lifecycle::Alive);
    assert_eq!(b.rect.bottom(), 3);
    assert_eq!(b.update(&ctx(0), &mut rng), Lifecycle::Expired);
}

#[test]
fn powerup_falls_and_expires_below_field() {
    let mut rng = seeded_rng();
    let mut p = PowerUp::new(Point::new(100, 608), PowerUpKind::Gun);
    assert_eq!(p.rect.top(), 598);
    assert_eq!(p.update(&ctx(0), &mut rng), Lifecycle::Alive);
    assert_eq!(p.update(&ctx(0), &mut rng), Lifecycle::Expired);
}

#[test]
fn dropped_powerups_use_both_kinds() {
    let mut rng = seeded_rng();
    let kinds: Vec<PowerUpKind> = (0..64)
        .map(|_| PowerUp::drop_at(Point::new(0, 0), &mut rng).kind)
        .collect();
    assert!(kinds.contains(&PowerUpKind::Shield));
    assert!(kinds.contains(&PowerUpKind::Gun));
}

#[test]
fn explosion_lives_eight_frames() {
    let mut rng = seeded_rng();
    let mut x = Explosion::new(Point::new(50, 50), 50, 0);
    assert_eq!(x.update(&ctx(50), &mut rng), Lifecycle::Alive);
    assert_eq!(x.frame, 0);

    let mut now = 0;
    for frame in 1..8 {
        now += 51;
        assert_eq!(x.update(&ctx(now), &mut rng), Lifecycle::Alive);
        assert_eq!(x.frame, frame);
    }
    now += 51;
    assert_eq!(x.update(&ctx(now), &mut rng), Lifecycle::Expired);
}

#[test]
fn actor_bounds_match_entity() {
    let e = Enemy::at(1, 2, 1);
    assert_eq!(Actor::Enemy(&e).bounds(), e.rect);
}
