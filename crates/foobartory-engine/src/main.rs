//! Foobartory binary.
//!
//! Two modes, selected by the first CLI argument:
//!
//! - `run` (default): drive a single factory with the configured
//!   decider until the robot-count goal is reached, logging every
//!   factory notification to the console.
//! - `train`: breed policy populations generation after generation
//!   until Ctrl-C, then save the best policy if a model path is
//!   configured.
//!
//! Settings come from `foobartory-config.yaml` in the working
//! directory; a missing file means defaults.
//!
//! The runtime is single-threaded on purpose: robot operations rely on
//! cooperative interleaving where every synchronous step is atomic.

mod console;
mod error;
mod settings;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use foobartory_factory::Factory;
use foobartory_policy::MlpPolicy;
use foobartory_strategy::{
    HeuristicDecider, Policy, RandomDecider, StopFlag, run_until_goal,
};
use foobartory_trainer::Trainer;

use crate::error::EngineError;
use crate::settings::{Settings, StrategyKind};

/// Entry point: initialize logging, load settings, dispatch the mode.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("foobartory-engine starting");

    let settings = load_settings()?;
    info!(
        world_speed = settings.world.world_speed,
        robot_goal = settings.world.robot_goal,
        strategy = ?settings.strategy,
        "settings loaded"
    );

    match std::env::args().nth(1).as_deref() {
        Some("train") => train(settings).await,
        _ => run(settings).await,
    }
}

/// Run a single factory to the population goal with the configured
/// decider.
async fn run(settings: Settings) -> Result<(), EngineError> {
    let factory = Arc::new(Factory::new(Arc::new(settings.world)));
    console::attach(&factory);

    let stop = StopFlag::default();
    let rng = SmallRng::from_os_rng();
    let won = match settings.strategy {
        StrategyKind::Heuristic => {
            run_until_goal(Arc::clone(&factory), HeuristicDecider::new(rng), stop).await
        }
        StrategyKind::Random => {
            run_until_goal(Arc::clone(&factory), RandomDecider::new(rng), stop).await
        }
    };

    let status = factory.status();
    info!(
        won,
        robots = status.robot_count,
        balance = %status.balance,
        elapsed_ms = factory.clock().cumulative_ms(),
        "simulation finished"
    );
    Ok(())
}

/// Loop generations until Ctrl-C, then save the best policy.
async fn train(settings: Settings) -> Result<(), EngineError> {
    let model_path = settings.trainer.model_path.clone();
    let mut trainer: Trainer<MlpPolicy> = Trainer::new(
        settings.trainer,
        Arc::new(settings.world),
        SmallRng::from_os_rng(),
    );

    if let Some(path) = &model_path {
        if path.exists() {
            trainer.seed(MlpPolicy::load(path)?);
        } else {
            info!(path = %path.display(), "no previous model found, starting fresh");
        }
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested, finishing the current generation");
            flag.store(true, Ordering::SeqCst);
        }
    });

    while !shutdown.load(Ordering::SeqCst) {
        let report = trainer.run_generation().await;
        let winners = report.results.iter().filter(|result| result.won).count();
        info!(generation = report.generation, winners, "generation complete");
    }

    if let Some(path) = &model_path {
        trainer.save_best(path)?;
    } else {
        info!("no model path configured, training result discarded");
    }
    Ok(())
}

/// Load `foobartory-config.yaml` from the working directory, falling
/// back to defaults when the file is absent.
fn load_settings() -> Result<Settings, EngineError> {
    let path = Path::new("foobartory-config.yaml");
    if path.exists() {
        Ok(Settings::from_file(path)?)
    } else {
        info!("settings file not found, using defaults");
        Ok(Settings::default())
    }
}
