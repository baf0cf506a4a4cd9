use crate::body::{Body, Shape, Triangulation};
use crate::constraint::linear::LinearConstraint;
use crate::constraint::CRef;
use crate::particle::Particle;
use crate::V2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrellisTemplate {
	pub corner: V2,
	pub size: V2,
	pub nx: usize,
	pub ny: usize,
	// shear diagonals
	pub stiff: bool,
	// corner-to-corner struts
	pub reinforce: bool,
	pub is_static: bool,
}

impl TrellisTemplate {
	pub fn new(corner: V2, size: V2, nx: usize, ny: usize) -> Self {
		Self {
			corner,
			size,
			nx,
			ny,
			stiff: false,
			reinforce: false,
			is_static: false,
		}
	}

	pub fn stiff(mut self) -> Self {
		self.stiff = true;
		self
	}

	pub fn reinforced(mut self) -> Self {
		self.reinforce = true;
		self
	}

	pub fn pinned(mut self) -> Self {
		self.is_static = true;
		self
	}

	/// Row-major `(nx + 1) x (ny + 1)` particle grid.
	pub fn build(&self) -> Body {
		let nx = self.nx.max(1);
		let ny = self.ny.max(1);
		let dx = V2::new(self.size[0] / nx as f64, 0.);
		let dy = V2::new(0., self.size[1] / ny as f64);
		let m = nx + 1;

		let mut particles = Vec::with_capacity(m * (ny + 1));
		for i in 0..=ny {
			for j in 0..=nx {
				let pos = self.corner + dy * i as f64 + dx * j as f64;
				particles.push(Particle::unit(pos, self.is_static));
			}
		}

		let mut constraints: Vec<CRef> = Vec::new();
		let mut link = |a: usize, b: usize| {
			constraints.push(LinearConstraint::new(&particles, a, b).build());
		};
		for i in 0..=ny {
			for j in 0..=nx {
				let k = i * m + j;
				if j > 0 {
					link(k, k - 1);
				}
				if i > 0 {
					link(k, k - m);
				}
				if i > 0 && j > 0 && self.stiff {
					link(k - 1, k - m);
					link(k, k - m - 1);
				}
			}
		}
		if nx > 1 && ny > 1 && self.reinforce {
			let last = particles.len() - 1;
			let bottom_left = particles.len() - m;
			let top_right = m - 1;
			link(0, last);
			link(0, top_right);
			link(0, bottom_left);
			link(bottom_left, top_right);
			link(top_right, last);
			link(bottom_left, last);
		}
		Body::new(particles, constraints, Shape::Trellis { nx, ny })
	}
}

pub fn triangulate(nx: usize, ny: usize) -> Triangulation {
	let cols = nx + 1;
	let rows = ny + 1;
	let mut uvs = Vec::with_capacity(cols * rows);
	for j in 0..rows {
		for i in 0..cols {
			uvs.push([i as f64 / nx as f64, j as f64 / ny as f64]);
		}
	}
	let mut indices = Vec::with_capacity(6 * nx * ny);
	for j in 0..ny {
		for i in 0..nx {
			let v0 = j * cols + i;
			let v1 = v0 + 1;
			let v2 = v0 + cols;
			let v3 = v2 + 1;
			indices.extend_from_slice(&[v0, v1, v2, v1, v3, v2]);
		}
	}
	Triangulation { uvs, indices }
}
