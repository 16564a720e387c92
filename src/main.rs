//! Swifty Duck headless driver
//!
//! Plays the simulation core without a display: a simple autopilot stands in
//! for the player and every ended run is logged. Useful for soak-testing a
//! config file and for reproducing a seed.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use anyhow::{Context, Result, anyhow};
    use clap::Parser;

    use swifty_duck::platform::{Clock, ManualClock, SystemClock};
    use swifty_duck::sim::{GamePhase, GapSource, RngGapSource, Simulation};
    use swifty_duck::{SimConfig, Variant};

    #[derive(Parser, Debug)]
    #[command(name = "swifty-duck")]
    #[command(about = "Headless frame driver for the Swifty Duck simulation core")]
    struct Cli {
        /// JSON config file; omitted fields keep their defaults
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the config's variant (classic | start_screen)
        #[arg(long)]
        variant: Option<String>,
        /// Gap placement seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Frames to simulate
        #[arg(long, default_value_t = 3_600)]
        frames: u64,
        /// Simulated display refresh rate
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Pace frames against the wall clock instead of simulated time
        #[arg(long)]
        realtime: bool,
        /// Print the effective config as JSON and exit
        #[arg(long)]
        print_config: bool,
    }

    #[derive(Debug, Default)]
    struct Summary {
        frames: u64,
        flaps: u64,
        runs: Vec<u32>,
        final_score: u32,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let mut config = match &cli.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        if let Some(name) = &cli.variant {
            config.variant =
                Variant::from_str(name).ok_or_else(|| anyhow!("unknown variant '{name}'"))?;
            config.validate()?;
        }
        if cli.print_config {
            println!("{}", config.to_json());
            return Ok(());
        }
        if cli.fps == 0 {
            return Err(anyhow!("fps must be > 0"));
        }

        let seed = cli.seed.unwrap_or_else(rand::random);
        let frame_ms = 1000.0 / cli.fps as f64;
        log::info!(
            "Swifty Duck (headless) starting: {} variant, seed {}, {} frames",
            config.variant.as_str(),
            seed,
            cli.frames
        );

        let summary = if cli.realtime {
            let mut sim =
                Simulation::with_sources(config, RngGapSource::seeded(seed), SystemClock::new())
                    .context("building session")?;
            let pause = Duration::from_secs_f64(frame_ms / 1000.0);
            drive(&mut sim, cli.frames, || std::thread::sleep(pause))
        } else {
            let clock = ManualClock::new(0.0);
            let mut sim =
                Simulation::with_sources(config, RngGapSource::seeded(seed), clock.clone())
                    .context("building session")?;
            drive(&mut sim, cli.frames, || clock.advance(frame_ms))
        };

        println!("seed:         {seed}");
        println!("frames:       {}", summary.frames);
        println!("flaps:        {}", summary.flaps);
        println!("runs ended:   {}", summary.runs.len());
        println!(
            "best score:   {}",
            summary.runs.iter().copied().chain([summary.final_score]).max().unwrap_or(0)
        );
        println!("final score:  {}", summary.final_score);
        Ok(())
    }

    /// The host frame loop: input edge, then one tick, then wait for the next frame
    fn drive<G: GapSource, C: Clock>(
        sim: &mut Simulation<G, C>,
        frames: u64,
        mut next_frame: impl FnMut(),
    ) -> Summary {
        let mut summary = Summary::default();
        for _ in 0..frames {
            if wants_flap(sim) {
                sim.flap();
                summary.flaps += 1;
            }
            let result = sim.tick();
            if result.collided {
                let cause = result.cause.map(|c| c.to_string()).unwrap_or_default();
                log::info!("Run {} over ({}): score {}", summary.runs.len() + 1, cause, result.score);
                summary.runs.push(result.score);
            }
            summary.frames += 1;
            next_frame();
        }
        summary.final_score = sim.score();
        summary
    }

    /// Flap when falling would carry the player below the next gap
    fn wants_flap<G: GapSource, C: Clock>(sim: &Simulation<G, C>) -> bool {
        let config = sim.config();
        if sim.phase() == GamePhase::AwaitingStart {
            return true;
        }

        let player = sim.player();
        let target_bottom = sim
            .obstacles()
            .iter()
            .find(|o| o.trailing_edge(config.obstacle_width) > config.player_x)
            .map(|o| o.gap_bottom(config.gap_height) - 10.0)
            .unwrap_or(config.height * 0.6);

        let next_bottom = player.y + config.player_size + player.vel + config.gravity;
        player.vel >= 0.0 && next_bottom > target_bottom
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is swifty_duck::web::wasm_main, this is just to satisfy the compiler
}
