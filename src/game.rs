/// The top-level state machine: menu, playing and game-over.
///
/// Legal transitions are
///   Menu ──start clicked──▶ Playing ──health gone──▶ GameOver ──Enter──▶ Menu
/// and nothing else.  The run's [`World`] lives inside the playing state, so
/// it cannot outlive it.
use rand::Rng;
use tracing::{info, warn};

use crate::collision::{self, CollisionReport};
use crate::config::GameConfig;
use crate::entities::{Field, Point, Rect};
use crate::platform::{Color, InputEvent, InputFrame, Key};
use crate::score::HighScoreStore;
use crate::ui::Button;
use crate::world::World;

#[derive(Clone, Debug)]
pub enum GameState {
    Menu,
    Playing(World),
    GameOver { final_score: u32, new_record: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Clone, Debug)]
pub struct Menu {
    pub start: Button,
    pub quit: Button,
}

impl Menu {
    pub fn new(field: Field) -> Self {
        let x = field.width / 2 - 100;
        let y = field.height / 2;
        Self {
            start: Button::new(
                Rect::new(x, y - 25, 200, 50),
                "Start Game",
                Color::BLUE,
                Color::rgb(0, 0, 200),
            ),
            quit: Button::new(
                Rect::new(x, y + 50, 200, 50),
                "Quit Game",
                Color::RED,
                Color::rgb(200, 0, 0),
            ),
        }
    }
}

pub struct Game<R: Rng> {
    state: GameState,
    high_score: u32,
    menu: Menu,
    store: Box<dyn HighScoreStore>,
    config: GameConfig,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Starts at the menu with the high score read from `store`.
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>, rng: R) -> Self {
        let high_score = store.load();
        info!(high_score, "high score loaded");
        Self {
            state: GameState::Menu,
            high_score,
            menu: Menu::new(Field::from_config(&config)),
            store,
            config,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> Option<&World> {
        match &self.state {
            GameState::Playing(world) => Some(world),
            _ => None,
        }
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        match &mut self.state {
            GameState::Playing(world) => Some(world),
            _ => None,
        }
    }

    /// One tick: route this tick's input, then (while playing) update and
    /// resolve collisions.
    pub fn tick(&mut self, input: &InputFrame, now_ms: u64) -> Flow {
        if matches!(self.state, GameState::Menu) {
            self.menu.start.check_hover(input.pointer);
            self.menu.quit.check_hover(input.pointer);
        }

        for event in &input.events {
            if self.handle_event(event, input.pointer, now_ms) == Flow::Quit {
                return Flow::Quit;
            }
        }

        let mut finished = None;
        if let GameState::Playing(world) = &mut self.state {
            world.update(input.held, now_ms, &mut self.rng);
            let report: CollisionReport = collision::resolve(world, now_ms, &mut self.rng);
            if report.player_destroyed {
                finished = Some(world.score);
            }
        }
        if let Some(score) = finished {
            self.finish_run(score);
        }
        Flow::Continue
    }

    fn handle_event(&mut self, event: &InputEvent, pointer: Point, now_ms: u64) -> Flow {
        if *event == InputEvent::Quit {
            info!("quit requested");
            return Flow::Quit;
        }
        let pointer = match event {
            InputEvent::PointerDown { pos, .. } => *pos,
            _ => pointer,
        };

        match &mut self.state {
            GameState::Menu => {
                if self.menu.start.is_clicked(pointer, event) {
                    self.start_run(now_ms);
                } else if self.menu.quit.is_clicked(pointer, event) {
                    info!("quit from menu");
                    return Flow::Quit;
                }
            }
            GameState::Playing(world) => {
                if *event == InputEvent::KeyDown(Key::Space) {
                    world.shoot(now_ms);
                }
            }
            GameState::GameOver { .. } => {
                if *event == InputEvent::KeyDown(Key::Enter) {
                    self.acknowledge();
                }
            }
        }
        Flow::Continue
    }

    /// Menu → Playing with a fresh world.  Ignored in any other state.
    pub fn start_run(&mut self, now_ms: u64) -> bool {
        if !matches!(self.state, GameState::Menu) {
            return false;
        }
        let world = World::new(&self.config, now_ms, &mut self.rng);
        info!(enemies = world.enemies.len(), "run started");
        self.state = GameState::Playing(world);
        true
    }

    /// GameOver → Menu.  Ignored in any other state.
    pub fn acknowledge(&mut self) -> bool {
        if !matches!(self.state, GameState::GameOver { .. }) {
            return false;
        }
        self.state = GameState::Menu;
        true
    }

    fn finish_run(&mut self, score: u32) {
        info!(score, high_score = self.high_score, "game over");
        let new_record = score > self.high_score;
        if new_record {
            self.high_score = score;
            if let Err(err) = self.store.save(score) {
                warn!(error = %format!("{err:#}"), "could not persist high score");
            }
        }
        self.state = GameState::GameOver {
            final_score: score,
            new_record,
        };
    }
}
