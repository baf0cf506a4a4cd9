use rand::Rng;

use crate::engine::Engine;
use crate::error::Result;
use protocol::body_request::{BodyRequest, BodyType};
use protocol::config::{Bounds, Config};

/// A static 100x20 slab under a triangle dropped from the origin.
pub fn drop_test() -> (Config, Vec<BodyRequest>) {
	let config = Config::default().with_bounds(Bounds::new([-1000., -1000.], [1000., 1000.]));
	let objects = vec![
		BodyRequest::new(BodyType::Rectangle, 0., 100.)
			.with_width(100.)
			.with_height(20.)
			.with_static(true),
		BodyRequest::new(BodyType::Triangle, 0., 0.).with_size(40.),
	];
	(config, objects)
}

/// `n` random bodies scattered over the upper part of the world, above a
/// static floor.
pub fn random_scene<R: Rng>(rng: &mut R, bounds: &Bounds, n: usize) -> Vec<BodyRequest> {
	let (w, h) = (bounds.width(), bounds.height());
	let [x0, y0] = bounds.top;
	let mut result = vec![BodyRequest::new(BodyType::Rectangle, x0 + w / 2., y0 + h * 0.95)
		.with_width(w * 0.9)
		.with_height(h * 0.04)
		.with_static(true)];
	for _ in 0..n {
		let x = x0 + rng.gen_range(0.1..0.9) * w;
		let y = y0 + rng.gen_range(0.05..0.7) * h;
		let size = rng.gen_range(15.0..40.0);
		let req = match rng.gen_range(0..4) {
			0 => BodyRequest::new(BodyType::Triangle, x, y),
			1 => BodyRequest::new(BodyType::Rectangle, x, y)
				.with_width(size)
				.with_height(rng.gen_range(15.0..40.0)),
			2 => BodyRequest::new(BodyType::Polygon, x, y).with_k(rng.gen_range(3..9)),
			_ => BodyRequest::new(BodyType::Trellis, x, y)
				.with_grid(rng.gen_range(1..5), rng.gen_range(1..5))
				.with_stiff(rng.gen_bool(0.5))
				.with_reinforce(rng.gen_bool(0.5)),
		};
		result.push(req.with_size(size));
	}
	result
}

pub fn load(config: Config, objects: &[BodyRequest]) -> Result<Engine> {
	let mut engine = Engine::new(config)?;
	for req in objects.iter() {
		engine.spawn(req)?;
	}
	Ok(engine)
}

#[cfg(test)]
mod test {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	#[test]
	fn test_random_scene_loads() {
		let config = Config::default();
		let mut rng = StdRng::seed_from_u64(11);
		let objects = random_scene(&mut rng, &config.bounds, 30);
		assert_eq!(objects.len(), 31);
		let mut engine = load(config, &objects).unwrap();
		for _ in 0..30 {
			engine.step(1. / 60.);
		}
		assert_eq!(engine.bodies().len(), 31);
		let posbox = *engine.posbox();
		for body in engine.bodies() {
			for p in body.particles.iter() {
				assert!(p.pos[0] >= posbox.xmin - 1. && p.pos[0] <= posbox.xmax + 1.);
				assert!(p.pos[1].is_finite());
			}
		}
	}
}
