pub mod epa;
pub mod gjk;
pub mod sat;

use crate::geometry::ConvexShape;
use crate::V2;
use protocol::config::NarrowPhaseMode;

/// Minimum translation: `normal` points from shape A towards shape B.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
	pub normal: V2,
	pub depth: f64,
}

/// Per-body collision record, rebuilt every step. `normal` is the direction
/// this body must be pushed to leave the other one.
#[derive(Clone, Debug, PartialEq)]
pub struct Collider {
	pub body: usize,
	pub normal: V2,
	pub depth: f64,
	// particle indices of the contact edge, filled in by resolution
	pub contacts: Vec<usize>,
}

impl Collider {
	pub fn new(body: usize, normal: V2, depth: f64) -> Self {
		Self {
			body,
			normal,
			depth,
			contacts: Vec::new(),
		}
	}
}

/// Support point of the Minkowski difference A - B along `d`.
pub fn support(a: &ConvexShape, b: &ConvexShape, d: V2) -> V2 {
	a.support(d) - b.support(-d)
}

/// (a x b) x c expanded for 2D: b (c . a) - a (c . b).
pub fn triple_product(a: V2, b: V2, c: V2) -> V2 {
	b * c.dot(&a) - a * c.dot(&b)
}

pub fn collide(mode: NarrowPhaseMode, a: &ConvexShape, b: &ConvexShape) -> Option<Hit> {
	if a.is_empty() || b.is_empty() {
		return None;
	}
	match mode {
		NarrowPhaseMode::GjkEpa => {
			let simplex = gjk::gjk(a, b)?;
			Some(epa::epa(a, b, simplex))
		}
		NarrowPhaseMode::Sat => sat::sat(a, b),
	}
}

#[cfg(test)]
pub(crate) mod test_util {
	use crate::particle::Particle;
	use crate::V2;

	pub fn rect(cx: f64, cy: f64, w: f64, h: f64) -> Vec<Particle> {
		let (w2, h2) = (w / 2., h / 2.);
		[
			[cx - w2, cy - h2],
			[cx + w2, cy - h2],
			[cx + w2, cy + h2],
			[cx - w2, cy + h2],
		]
		.iter()
		.map(|p| Particle::unit(V2::new(p[0], p[1]), false))
		.collect()
	}

	pub const QUAD: [usize; 4] = [0, 1, 2, 3];
}
