//! Learn the topology of a noisy ring and a separate blob.
//!
//! Run with `RUST_LOG=gng=debug` to watch seeding and insertions.

use gng::{GngConfig, GrowingNeuralGas, HealthCheck};
use rand::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> gng::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = StdRng::seed_from_u64(0);
    let samples: Vec<Vec<f64>> = (0..20_000)
        .map(|_| {
            if rng.random::<f64>() < 0.75 {
                let theta = rng.random_range(0.0..std::f64::consts::TAU);
                let r = 2.0 + rng.random_range(-0.15..0.15);
                vec![r * theta.cos(), r * theta.sin()]
            } else {
                vec![
                    6.0 + rng.random_range(-0.5..0.5),
                    rng.random_range(-0.5..0.5),
                ]
            }
        })
        .collect();

    let config = GngConfig::default()
        .with_insertion_interval(100)
        .with_max_age(50)
        .with_max_nodes(60);
    let mut gng = GrowingNeuralGas::with_seed(2, config, 1)?;
    gng.train(&samples)?;

    let components = gng.label_components();
    println!("{}", gng.health_check());
    println!("components: {components}");

    for query in [[2.0, 0.0], [0.0, -2.0], [6.0, 0.0], [4.0, 0.0]] {
        let (id, dist) = gng.nearest(&query)?;
        let label = gng.node(id).and_then(|n| n.label());
        println!("{query:?} -> node {id} (component {label:?}) at distance {dist:.3}");
    }

    Ok(())
}
