// Demonstration: scripted rounds showing the minimum-price allocation rule.
//
// Build/run from the repo root:
//   cargo run --example tie_break_demo

use std::collections::HashMap;

use mpmg::{
    AgentId, CostDistribution, DemandDistribution, EnvConfig, Environment,
};

fn main() {
    env_logger::init();

    let config = EnvConfig {
        n_agents: 3,
        horizon: 2,
        cost_distribution: CostDistribution::Fixed(vec![2.0, 3.0, 2.5]),
        demand_distribution: DemandDistribution::Fixed(9.0),
        ..EnvConfig::default()
    };
    let mut env = Environment::new(config, 7).expect("valid config");
    env.reset().expect("reset");
    println!("Costs: {:?}", env.costs());

    // Round 0: agent 0 undercuts and takes the whole market.
    play(&mut env, &[4.0, 6.0, 6.0]);

    // Round 1: agents 0 and 2 tie at the minimum and split demand.
    play(&mut env, &[5.0, 6.0, 5.0]);
}

fn play(env: &mut Environment, prices: &[f64]) {
    let actions: HashMap<AgentId, f64> = prices.iter().copied().enumerate().collect();
    let result = env.step(&actions).expect("step");
    println!(
        "round {}: prices {:?} -> clearing price {:.1}, winners {:?}, rewards {:?}",
        result.info.round, prices, result.info.clearing_price, result.info.winners, result.rewards
    );
}
