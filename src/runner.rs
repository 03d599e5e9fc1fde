/// The fixed-rate loop: poll, tick, draw, pace.
use rand::Rng;
use tracing::{info, warn};

use crate::display;
use crate::game::{Flow, Game};
use crate::platform::{Clock, InputSource, Renderer};

/// Run until a quit signal arrives, returning how many ticks completed.
///
/// Drawing failures are logged and skipped; only quitting ends the loop.
pub fn run<R: Rng>(
    game: &mut Game<R>,
    renderer: &mut impl Renderer,
    input: &mut impl InputSource,
    clock: &mut impl Clock,
) -> u64 {
    let mut ticks = 0u64;
    let mut failing = false;
    loop {
        let frame = input.poll();
        if game.tick(&frame, clock.now_ms()) == Flow::Quit {
            break;
        }

        match display::render(renderer, game) {
            Ok(()) => failing = false,
            Err(err) => {
                // One warning per streak, not one per frame.
                if !failing {
                    warn!(error = %format!("{err:#}"), "frame not presented");
                }
                failing = true;
            }
        }

        ticks += 1;
        clock.pace();
    }
    info!(ticks, "loop finished");
    ticks
}
