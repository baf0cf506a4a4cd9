use protocol::{Command, Message};
use tracing_subscriber::EnvFilter;
use verlet::scene;
use verlet::worker;

// drops the triangle on the slab and prints its lowest point once a second
fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();
	let seconds: usize = std::env::args()
		.nth(1)
		.and_then(|x| x.parse().ok())
		.unwrap_or(5);

	let (tx, rx, handle) = worker::spawn();
	let (config, objects) = scene::drop_test();
	if tx.send(Command::Start { config, objects }).is_err() {
		return;
	}
	let mut frames = 0;
	for msg in rx.iter() {
		match msg {
			Message::Ready => tracing::info!("worker ready"),
			Message::Rejected(reason) => tracing::warn!("{}", reason),
			Message::State(state) => {
				frames += 1;
				if frames % 60 != 0 {
					continue;
				}
				let lowest = state.objects[1]
					.positions()
					.map(|p| p[1])
					.fold(f32::NEG_INFINITY, f32::max);
				println!(
					"t={}s lowest={:.2} colliders={} tests={}",
					frames / 60,
					lowest,
					state.colliders.len(),
					state.collision_tests
				);
				if frames / 60 >= seconds {
					break;
				}
			}
		}
	}
	let _ = tx.send(Command::Stop);
	let _ = handle.join();
}
