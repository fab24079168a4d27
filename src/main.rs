//! Arcade Core entry point
//!
//! The browser build is a library driven from JavaScript. Natively this binary
//! runs a headless attract-mode game: the player paddle follows the ball like a
//! pointer would, and the final snapshot is printed as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use env_logger::{Builder, Env};
    use log::LevelFilter;

    use arcade_core::sim::{GameState, Message, Movement};
    use arcade_core::{GameConfig, GameMode, Session, Snapshot};

    /// Headless attract-mode run of the Pong/Breakout simulation
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Game to play: pong or breakout
        #[arg(short, long, default_value = "pong")]
        mode: String,

        /// JSON configuration file (overrides --mode)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Sequence seed; drawn at random when omitted
        #[arg(short, long)]
        seed: Option<u32>,

        /// Maximum ticks to simulate
        #[arg(short, long, default_value_t = 50_000)]
        ticks: u64,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    }

    fn init_logging(verbose: bool) {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let env = Env::default().default_filter_or(level.to_string());
        // Only fails if a logger is already installed
        let _ = Builder::from_env(env).try_init();
    }

    fn load_config(args: &Args) -> Result<GameConfig> {
        if let Some(path) = &args.config {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            return GameConfig::from_json(&json)
                .with_context(|| format!("loading {}", path.display()));
        }
        let mode = GameMode::from_str(&args.mode)
            .with_context(|| format!("unknown game mode: {}", args.mode))?;
        Ok(GameConfig::preset(mode))
    }

    /// Pointer input that keeps the paddle centred on the ball
    fn follow_ball(state: &GameState, config: &GameConfig) -> Message {
        let ball = state.ball.center();
        let coordinate = match config.mode {
            GameMode::Pong => ball.y - config.paddle_length / 2.0,
            GameMode::Breakout => ball.x - config.paddle_length / 2.0,
        };
        Message::Move(Movement::Position(coordinate))
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        init_logging(args.verbose);

        let config = load_config(&args)?;
        let seed = args.seed.unwrap_or_else(arcade_core::random_seed);
        log::info!("Seed {seed} (pass --seed {seed} to replay this run)");

        let mut session = Session::new(config.clone(), seed)?;
        let mut last_score = (0, 0, config.starting_lives);

        for elapsed in 1..=args.ticks {
            let steer = follow_ball(session.state(), &config);
            session.run([steer, Message::Tick { elapsed }], |snapshot: &Snapshot| {
                let score = (snapshot.score, snapshot.opponent_score, snapshot.lives);
                if score != last_score {
                    log::info!(
                        "tick {}: score {} - {}, lives {}",
                        snapshot.time,
                        score.0,
                        score.1,
                        score.2
                    );
                    last_score = score;
                }
            });
            if session.state().is_over() {
                break;
            }
        }

        let snapshot = session.snapshot();
        match snapshot.game_over_text() {
            Some(text) => log::info!("{text}"),
            None => log::info!("Stopped after {} ticks", snapshot.time),
        }
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds are driven through `arcade_core::web::WebGame`
}
