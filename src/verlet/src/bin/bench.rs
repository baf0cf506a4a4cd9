use std::time::Instant;

use protocol::config::{Config, NarrowPhaseMode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;
use verlet::scene;
use verlet::time_manager::FIXED_DT;

fn main() -> verlet::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();
	let bodies: usize = std::env::args()
		.nth(1)
		.and_then(|x| x.parse().ok())
		.unwrap_or(100);
	let rframes = 600;

	let configs = [
		("naive gjk", Config::default()),
		("grid gjk", Config::default().with_grid(40.)),
		(
			"grid sat",
			Config::default()
				.with_grid(40.)
				.with_narrow_phase(NarrowPhaseMode::Sat),
		),
	];
	for (name, config) in configs {
		let mut rng = StdRng::seed_from_u64(0);
		let objects = scene::random_scene(&mut rng, &config.bounds, bodies);
		let mut engine = scene::load(config, &objects)?;
		let mut tests = 0;
		let start = Instant::now();
		for _ in 0..rframes {
			engine.step(FIXED_DT);
			tests += engine.collision_tests();
		}
		let time = rframes as f64 * FIXED_DT;
		let duration = start.elapsed().as_secs_f64();
		eprintln!(
			"{}: {} bodies, {:.1} tests/step, {:.3}% of real time",
			name,
			engine.bodies().len(),
			tests as f64 / rframes as f64,
			duration / time * 100.,
		);
	}
	Ok(())
}
