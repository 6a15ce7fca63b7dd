use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use steering_core::attempt::BoundaryPolicy;
use steering_core::config::EngineConfig;
use steering_engine::replay::{ReplayError, load_condition, load_trajectory, replay};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (Some(condition_path), Some(trajectory_path)) = (args.first(), args.get(1)) else {
        eprintln!("usage: steering-replay <condition.toml> <trajectory.json> [--policy=enforce|mark_only|ignore]");
        return ExitCode::from(2);
    };
    let policy = match args
        .get(2)
        .and_then(|a| a.strip_prefix("--policy="))
        .map(parse_policy)
    {
        Some(Some(p)) => p,
        Some(None) => {
            tracing::error!("Unknown policy {:?}", args[2]);
            return ExitCode::from(2);
        },
        None => BoundaryPolicy::default(),
    };

    match run(
        PathBuf::from(condition_path),
        PathBuf::from(trajectory_path),
        policy,
    ) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!("Replay failed: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run(
    condition_path: PathBuf,
    trajectory_path: PathBuf,
    policy: BoundaryPolicy,
) -> Result<String, ReplayError> {
    let condition = load_condition(&condition_path)?;
    let samples = load_trajectory(&trajectory_path)?;
    let config = EngineConfig::load();
    tracing::info!(
        condition = condition.id,
        samples = samples.len(),
        ?policy,
        "Replaying trajectory"
    );
    let record = replay(condition, config, policy, &samples)?;
    Ok(serde_json::to_string_pretty(&record)?)
}

fn parse_policy(name: &str) -> Option<BoundaryPolicy> {
    match name {
        "enforce" => Some(BoundaryPolicy::Enforce),
        "mark_only" => Some(BoundaryPolicy::MarkOnly),
        "ignore" => Some(BoundaryPolicy::Ignore),
        _ => None,
    }
}
