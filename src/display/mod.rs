/// Screen composition: turns the current game state into draw calls.
///
/// No game logic is performed here; every function only reads state and
/// talks to a [`Renderer`].
use rand::Rng;

use crate::entities::{Actor, Point, PowerUpKind, Rect};
use crate::game::{Game, GameState, Menu};
use crate::platform::{Color, Renderer, TextAlign};
use crate::ui::Button;
use crate::world::World;

pub mod terminal;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::BLACK;
const C_TEXT: Color = Color::WHITE;
const C_PLAYER: Color = Color::BLUE;
const C_ENEMY: Color = Color::rgb(170, 60, 220);
const C_BULLET: Color = Color::YELLOW;
const C_POWERUP_SHIELD: Color = Color::rgb(0, 200, 255);
const C_POWERUP_GUN: Color = Color::GREEN;
const C_EXPLOSION: Color = Color::RED;
const C_HEALTH_BACK: Color = Color::RED;
const C_HEALTH: Color = Color::GREEN;
const C_SHIELD_BACK: Color = Color::BLUE;
const C_SHIELD: Color = Color::WHITE;
const C_GAME_OVER: Color = Color::RED;

/// Width of a full health or shield bar.
const BAR_WIDTH: i32 = 200;
const BAR_HEIGHT: i32 = 20;

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame for whatever state the game is in.
pub fn render<R: Rng>(renderer: &mut impl Renderer, game: &Game<R>) -> anyhow::Result<()> {
    renderer.clear(C_BACKGROUND);

    let width = game.config().field_width;
    let height = game.config().field_height;
    match game.state() {
        GameState::Menu => draw_menu(renderer, game.menu(), game.high_score(), width, height),
        GameState::Playing(world) => draw_world(renderer, world),
        GameState::GameOver {
            final_score,
            new_record,
        } => draw_game_over(renderer, *final_score, *new_record, width, height),
    }

    renderer.present()
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu(
    renderer: &mut impl Renderer,
    menu: &Menu,
    high_score: u32,
    width: i32,
    height: i32,
) {
    renderer.draw_text(
        "SPACE SHOOTER",
        Point::new(width / 2, height / 4),
        C_TEXT,
        TextAlign::Center,
    );
    draw_button(renderer, &menu.start);
    draw_button(renderer, &menu.quit);
    renderer.draw_text(
        &format!("High Score: {high_score}"),
        Point::new(width / 2 - 100, height / 2 + 150),
        C_TEXT,
        TextAlign::Left,
    );
}

pub fn draw_button(renderer: &mut impl Renderer, button: &Button) {
    renderer.fill_rect(button.rect, button.fill());
    renderer.stroke_rect(button.rect, C_TEXT);
    renderer.draw_text(&button.label, button.rect.center(), C_TEXT, TextAlign::Center);
}

// ── Playing ───────────────────────────────────────────────────────────────────

fn draw_world(renderer: &mut impl Renderer, world: &World) {
    for actor in world.actors() {
        renderer.fill_rect(actor.bounds(), actor_color(&actor));
    }
    draw_hud(renderer, world);
}

fn actor_color(actor: &Actor<'_>) -> Color {
    match actor {
        Actor::Player(_) => C_PLAYER,
        Actor::Enemy(_) => C_ENEMY,
        Actor::Bullet(_) => C_BULLET,
        Actor::PowerUp(p) => match p.kind {
            PowerUpKind::Shield => C_POWERUP_SHIELD,
            PowerUpKind::Gun => C_POWERUP_GUN,
        },
        Actor::Explosion(_) => C_EXPLOSION,
    }
}

fn draw_hud(renderer: &mut impl Renderer, world: &World) {
    renderer.draw_text(
        &format!("Score: {}", world.score),
        Point::new(10, 10),
        C_TEXT,
        TextAlign::Left,
    );

    let player = &world.player;
    draw_bar(renderer, 50, player.health(), C_HEALTH_BACK, C_HEALTH);
    draw_bar(renderer, 80, player.shield(), C_SHIELD_BACK, C_SHIELD);

    if player.power() > 1 {
        renderer.draw_text(
            &format!("Power x{}", player.power()),
            Point::new(10, 110),
            C_POWERUP_GUN,
            TextAlign::Left,
        );
    }
}

/// `value` is a percentage; the bar is two units per point.
fn draw_bar(renderer: &mut impl Renderer, y: i32, value: i32, back: Color, front: Color) {
    renderer.fill_rect(Rect::new(10, y, BAR_WIDTH, BAR_HEIGHT), back);
    let filled = value.clamp(0, 100) * BAR_WIDTH / 100;
    if filled > 0 {
        renderer.fill_rect(Rect::new(10, y, filled, BAR_HEIGHT), front);
    }
}

// ── Game over ─────────────────────────────────────────────────────────────────

fn draw_game_over(
    renderer: &mut impl Renderer,
    final_score: u32,
    new_record: bool,
    width: i32,
    height: i32,
) {
    let cx = width / 2;
    renderer.draw_text("GAME OVER", Point::new(cx, height / 3), C_GAME_OVER, TextAlign::Center);
    renderer.draw_text(
        &format!("Final Score: {final_score}"),
        Point::new(cx, height / 2),
        C_TEXT,
        TextAlign::Center,
    );
    if new_record {
        renderer.draw_text(
            "New High Score!",
            Point::new(cx, height / 2 + 25),
            Color::YELLOW,
            TextAlign::Center,
        );
    }
    renderer.draw_text(
        "Press ENTER to return to menu",
        Point::new(cx, height / 2 + 50),
        C_TEXT,
        TextAlign::Center,
    );
}
