pub mod polygon;
pub mod trellis;

use crate::constraint::CRef;
use crate::geometry::{Aabb, ConvexShape};
use crate::hull::convex_hull;
use crate::particle::Particle;
use crate::posbox::Posbox;
use protocol::pr_model::PrObject;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
	Polygon,
	Trellis { nx: usize, ny: usize },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangulation {
	pub uvs: Vec<[f64; 2]>,
	// particle indices, three per triangle
	pub indices: Vec<usize>,
}

#[derive(Clone)]
pub struct Body {
	pub particles: Vec<Particle>,
	pub constraints: Vec<CRef>,
	shape: Shape,
	aabb: Option<Aabb>,
	hull: Option<Vec<usize>>,
}

impl Body {
	pub fn new(particles: Vec<Particle>, constraints: Vec<CRef>, shape: Shape) -> Self {
		Self {
			particles,
			constraints,
			shape,
			aabb: None,
			hull: None,
		}
	}

	pub fn shape(&self) -> Shape {
		self.shape
	}

	pub fn is_static(&self) -> bool {
		!self.particles.is_empty() && self.particles.iter().all(|p| p.is_static())
	}

	/// Drops the cached bounding box and hull; call whenever particles move.
	pub fn invalidate(&mut self) {
		self.aabb = None;
		self.hull = None;
	}

	pub fn aabb(&mut self) -> Option<Aabb> {
		if self.aabb.is_none() {
			self.aabb = Aabb::from_points(self.particles.iter().map(|p| p.pos));
		}
		self.aabb
	}

	pub fn convex_hull(&mut self) -> &[usize] {
		let particles = &self.particles;
		self.hull.get_or_insert_with(|| convex_hull(particles))
	}

	pub fn refresh(&mut self) {
		self.aabb();
		self.convex_hull();
	}

	pub fn cached_aabb(&self) -> Option<Aabb> {
		self.aabb
	}

	pub fn cached_hull(&self) -> Option<&[usize]> {
		self.hull.as_deref()
	}

	/// The hull as a polygon view, if the cache is fresh.
	pub fn hull_shape(&self) -> Option<ConvexShape<'_>> {
		self.hull
			.as_deref()
			.map(|hull| ConvexShape::new(&self.particles, hull))
	}

	pub fn integrate(&mut self, dt: f64, gravity: crate::V2, damping: f64) {
		for p in self.particles.iter_mut() {
			p.update(dt, gravity, damping);
		}
	}

	// boundary clamp, then one pass over the constraints
	pub fn relax(&mut self, posbox: &Posbox, iterations: usize) {
		for _ in 0..iterations {
			for p in self.particles.iter_mut() {
				p.clamp(posbox);
			}
			for constraint in self.constraints.iter() {
				constraint.relax(&mut self.particles);
			}
		}
	}

	pub fn triangulate(&mut self) -> Triangulation {
		match self.shape {
			Shape::Polygon => {
				let hull = self.convex_hull().to_vec();
				polygon::triangulate(&self.particles, &hull)
			}
			Shape::Trellis { nx, ny } => trellis::triangulate(nx, ny),
		}
	}

	pub fn render(&self) -> PrObject {
		PrObject {
			particles: self.particles.iter().flat_map(|p| p.render()).collect(),
			constraints: self
				.constraints
				.iter()
				.flat_map(|c| c.particles())
				.map(|i| i as u32)
				.collect(),
			is_static: self.is_static(),
		}
	}
}
