pub mod linear;

use dyn_clone::DynClone;

use crate::particle::Particle;

pub type CRef = Box<dyn Constraint>;

/// Relaxation strategy over particles owned by one body; particles are
/// addressed by index into that body's particle list.
pub trait Constraint: DynClone + Send + Sync {
	fn relax(&self, particles: &mut [Particle]);

	fn particles(&self) -> [usize; 2];

	fn rest_length(&self) -> f64;

	fn is_active(&self) -> bool;

	fn set_active(&mut self, active: bool);
}

dyn_clone::clone_trait_object!(Constraint);
