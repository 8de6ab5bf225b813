// Demonstration: run the pricing environment and evaluate a baseline policy.
//
// Build/run from the repo root:
//   cargo run --example pricing_env_demo -- --policy undercut --episodes 50

use std::env;

use mpmg::{
    EnvConfig, Environment, EvaluationMetrics, PricingPolicy, RandomPolicy, UndercutPolicy,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let policy_name = arg_value(&args, "--policy").unwrap_or("undercut");
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(25);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let config = EnvConfig::default();
    let mut env = match Environment::new(config.clone(), seed) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Failed to build environment: {e}");
            std::process::exit(1);
        }
    };

    let mut policy: Box<dyn PricingPolicy> = match policy_name {
        "random" => Box::new(RandomPolicy::new(&config, seed)),
        "undercut" => Box::new(UndercutPolicy::new(config.clone(), 0.5)),
        other => {
            eprintln!("Unknown --policy '{}'; expected 'undercut' or 'random'.", other);
            std::process::exit(2);
        }
    };

    match EvaluationMetrics::evaluate(&mut env, policy.as_mut(), episodes) {
        Ok(metrics) => {
            println!("Policy: {}", policy.name());
            println!("{}", metrics);
        }
        Err(e) => {
            eprintln!("Evaluation failed: {e}");
            std::process::exit(1);
        }
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
