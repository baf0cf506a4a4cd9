use crate::constraint::{CRef, Constraint};
use crate::particle::Particle;

const LENGTH_EPS: f64 = 1e-9;

pub const DEFAULT_RESTITUTION: f64 = 0.5;

#[derive(Clone, Debug)]
pub struct LinearConstraint {
	ps: [usize; 2],
	l0: f64,
	restitution: f64,
	active: bool,
}

impl LinearConstraint {
	pub fn new(particles: &[Particle], p0: usize, p1: usize) -> Self {
		let l0 = (particles[p1].pos - particles[p0].pos).magnitude();
		Self::new_with_l0(p0, p1, l0)
	}

	pub fn new_with_l0(p0: usize, p1: usize, l0: f64) -> Self {
		Self {
			ps: [p0, p1],
			l0: l0.max(0.),
			restitution: DEFAULT_RESTITUTION,
			active: true,
		}
	}

	pub fn with_restitution(mut self, restitution: f64) -> Self {
		self.restitution = restitution.clamp(0., 1.);
		self
	}

	pub fn inactive(mut self) -> Self {
		self.active = false;
		self
	}

	pub fn build(self) -> CRef {
		Box::new(self)
	}
}

impl Constraint for LinearConstraint {
	fn relax(&self, particles: &mut [Particle]) {
		if !self.active {
			return;
		}
		let [i0, i1] = self.ps;
		let imass0 = particles[i0].get_imass();
		let imass1 = particles[i1].get_imass();
		let imass = imass0 + imass1;
		if imass == 0. {
			return;
		}
		let delta = particles[i1].pos - particles[i0].pos;
		let l = delta.magnitude();
		if l < LENGTH_EPS {
			tracing::trace!("skip degenerate constraint {:?}", self.ps);
			return;
		}
		let diff = (l - self.l0) / (l * imass);
		particles[i0].add_pos(delta * (imass0 * diff * self.restitution));
		particles[i1].add_pos(-delta * (imass1 * diff * self.restitution));
	}

	fn particles(&self) -> [usize; 2] {
		self.ps
	}

	fn rest_length(&self) -> f64 {
		self.l0
	}

	fn is_active(&self) -> bool {
		self.active
	}

	fn set_active(&mut self, active: bool) {
		self.active = active;
	}
}
