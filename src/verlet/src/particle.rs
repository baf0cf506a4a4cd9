use crate::error::{EngineError, Result};
use crate::posbox::Posbox;
use crate::V2;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub pos: V2,
	pub ppos: V2,
	imass: f64, // 0 iff static
}

impl Particle {
	pub fn new(pos: V2, mass: f64) -> Result<Self> {
		if !mass.is_finite() || mass <= 0. {
			return Err(EngineError::InvalidMass(mass));
		}
		Ok(Self {
			pos,
			ppos: pos,
			imass: 1. / mass,
		})
	}

	pub fn new_static(pos: V2) -> Self {
		Self {
			pos,
			ppos: pos,
			imass: 0.,
		}
	}

	// unit mass, optionally pinned
	pub fn unit(pos: V2, is_static: bool) -> Self {
		if is_static {
			Self::new_static(pos)
		} else {
			Self {
				pos,
				ppos: pos,
				imass: 1.,
			}
		}
	}

	pub fn get_imass(&self) -> f64 {
		self.imass
	}

	pub fn is_static(&self) -> bool {
		self.imass == 0.
	}

	pub fn add_pos(&mut self, dp: V2) {
		if self.is_static() {
			return;
		}
		self.pos += dp;
	}

	pub fn offset_pos(&mut self, dp: V2) {
		if self.is_static() {
			return;
		}
		self.pos += dp;
		self.ppos += dp;
	}

	// world boundary; pinned particles stay where they were placed
	pub fn clamp(&mut self, posbox: &Posbox) -> bool {
		if self.is_static() {
			return false;
		}
		posbox.apply(&mut self.pos)
	}

	// verlet step, drag is proportional to the implicit velocity
	pub fn update(&mut self, dt: f64, gravity: V2, damping: f64) {
		if self.is_static() {
			return;
		}
		let velocity = self.pos - self.ppos;
		self.ppos = self.pos;
		let accel = gravity - velocity * damping;
		self.pos += velocity + accel * dt * dt;
	}

	pub fn render(&self) -> [f32; 2] {
		[self.pos[0] as f32, self.pos[1] as f32]
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn test_mass_invariant() {
		let p = Particle::new(V2::new(0., 0.), 2.).unwrap();
		assert!(!p.is_static());
		assert_relative_eq!(p.get_imass(), 0.5);
		let p = Particle::new_static(V2::new(0., 0.));
		assert!(p.is_static());
		assert_eq!(p.get_imass(), 0.);
		assert!(Particle::new(V2::zeros(), 0.).is_err());
		assert!(Particle::new(V2::zeros(), f64::NAN).is_err());
	}

	#[test]
	fn test_static_never_moves() {
		let pos = V2::new(5., 5.);
		let mut p = Particle::new_static(pos);
		p.ppos = V2::new(0., 0.);
		p.update(1. / 60., V2::new(0., 98.), 10.);
		p.add_pos(V2::new(100., -3.));
		p.offset_pos(V2::new(1., 1.));
		assert_eq!(p.pos, pos);
	}

	#[test]
	fn test_clamp() {
		let posbox = Posbox {
			xmin: 0.,
			xmax: 10.,
			ymin: 0.,
			ymax: 10.,
		};
		let mut p = Particle::unit(V2::new(-5., 20.), false);
		assert!(p.clamp(&posbox));
		assert_eq!(p.pos, V2::new(0., 10.));
		assert!(!p.clamp(&posbox));

		let mut p = Particle::new_static(V2::new(-5., 20.));
		assert!(!p.clamp(&posbox));
		assert_eq!(p.pos, V2::new(-5., 20.));
	}

	#[test]
	fn test_free_fall() {
		let mut p = Particle::unit(V2::new(0., 0.), false);
		let dt = 1. / 60.;
		for _ in 0..60 {
			p.update(dt, V2::new(0., 98.), 0.);
		}
		// discrete verlet from rest: g dt^2 n(n+1)/2
		let expected = 98. * dt * dt * 60. * 61. / 2.;
		assert_relative_eq!(p.pos[1], expected, epsilon = 1e-9);
		assert_eq!(p.pos[0], 0.);
	}

	#[test]
	fn test_drag_slows_down() {
		let mut free = Particle::unit(V2::new(0., 0.), false);
		let mut damped = free.clone();
		free.ppos = V2::new(-1., 0.);
		damped.ppos = V2::new(-1., 0.);
		for _ in 0..10 {
			free.update(0.1, V2::zeros(), 0.);
			damped.update(0.1, V2::zeros(), 10.);
		}
		assert!(damped.pos[0] < free.pos[0]);
		assert!(damped.pos[0] > 0.);
	}
}
