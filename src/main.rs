//! Native entry point
//!
//! The arcade runs in the browser through the `web` module. Natively this
//! binary plays each game headlessly with random input and prints the result,
//! which is handy for eyeballing the engines and their logs.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hackterm_arcade::{ArcadeConfig, GameKind, platform};

    platform::init_logging();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2024);
    log::info!("hackterm-arcade (native) demo, seed {}", seed);

    let config = ArcadeConfig::default();
    for kind in GameKind::ALL {
        let summary = demo::autoplay(&config, kind, seed, demo::MAX_STEPS);
        println!(
            "{:<6} score {:>6}  steps {:>5}  {}",
            kind.as_str(),
            summary.score,
            summary.steps,
            if summary.game_over { "game over" } else { "still running" }
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::WebArcade`, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use hackterm_arcade::rng::seeded;
    use hackterm_arcade::{ArcadeConfig, Command, Direction, GameKind, Session};
    use rand::seq::IndexedRandom;

    pub const MAX_STEPS: u32 = 5_000;

    // Soft drop twice as likely as the rest
    const BLOCKS_INPUT: [Command; 6] = [
        Command::Rotate,
        Command::Move(Direction::Left),
        Command::Move(Direction::Right),
        Command::HardDrop,
        Command::SoftDrop,
        Command::SoftDrop,
    ];

    const GRID_INPUT: [Command; 4] = [
        Command::Move(Direction::Up),
        Command::Move(Direction::Down),
        Command::Move(Direction::Left),
        Command::Move(Direction::Right),
    ];

    pub struct Summary {
        pub score: u64,
        pub steps: u32,
        pub game_over: bool,
    }

    /// Play one game with random input until it ends or `max_steps` pass
    pub fn autoplay(config: &ArcadeConfig, kind: GameKind, seed: u64, max_steps: u32) -> Summary {
        let mut session = Session::new(config.game(kind), seed);
        let mut input = seeded(seed.wrapping_add(1));

        let mut steps = 0;
        while steps < max_steps && !session.is_game_over() {
            let choices: &[Command] = match kind {
                GameKind::Blocks => &BLOCKS_INPUT,
                GameKind::Snake | GameKind::Tiles => &GRID_INPUT,
            };
            let Some(&command) = choices.choose(&mut input) else {
                break;
            };
            session.apply(command);
            session.tick();
            steps += 1;
        }

        Summary {
            score: session.score(),
            steps,
            game_over: session.is_game_over(),
        }
    }
}
