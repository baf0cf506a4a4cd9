// pr_model: read-only simulation snapshot for rendering / diagnostics

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrObject {
	// x0, y0, x1, y1, ...
	pub particles: Vec<f32>,
	// particle index pairs, flattened
	pub constraints: Vec<u32>,
	pub is_static: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrCollider {
	pub convex_hull: Vec<f32>,
	pub contact_points: Vec<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
	pub objects: Vec<PrObject>,
	pub colliders: Vec<PrCollider>,
	pub particle_count: usize,
	pub constraint_count: usize,
	pub collision_tests: usize,
}

impl PrObject {
	pub fn particle_len(&self) -> usize {
		self.particles.len() / 2
	}

	pub fn positions(&self) -> impl Iterator<Item = [f32; 2]> + '_ {
		self.particles.chunks_exact(2).map(|c| [c[0], c[1]])
	}
}
