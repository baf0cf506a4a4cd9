use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BroadPhaseMode {
	Naive,
	Grid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrowPhaseMode {
	GjkEpa,
	Sat,
}

// top: min corner, right: max corner
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
	pub top: [f64; 2],
	pub right: [f64; 2],
}

impl Bounds {
	pub fn new(top: [f64; 2], right: [f64; 2]) -> Self {
		Self { top, right }
	}

	pub fn from_size(width: f64, height: f64) -> Self {
		Self {
			top: [0., 0.],
			right: [width, height],
		}
	}

	pub fn width(&self) -> f64 {
		self.right[0] - self.top[0]
	}

	pub fn height(&self) -> f64 {
		self.right[1] - self.top[1]
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
	pub bounds: Bounds,
	pub broad_phase: BroadPhaseMode,
	pub narrow_phase: NarrowPhaseMode,
	// grid mode only
	pub cell_size: Option<f64>,
	pub gravity: [f64; 2],
	pub damping: f64,
	pub iterations: usize,
	pub pause_on_collision: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			bounds: Bounds::from_size(800., 600.),
			broad_phase: BroadPhaseMode::Naive,
			narrow_phase: NarrowPhaseMode::GjkEpa,
			cell_size: None,
			gravity: [0., 98.],
			damping: 10.,
			iterations: 3,
			pause_on_collision: false,
		}
	}
}

impl Config {
	pub fn with_bounds(mut self, bounds: Bounds) -> Self {
		self.bounds = bounds;
		self
	}

	pub fn with_broad_phase(mut self, mode: BroadPhaseMode) -> Self {
		self.broad_phase = mode;
		self
	}

	pub fn with_grid(mut self, cell_size: f64) -> Self {
		self.broad_phase = BroadPhaseMode::Grid;
		self.cell_size = Some(cell_size);
		self
	}

	pub fn with_narrow_phase(mut self, mode: NarrowPhaseMode) -> Self {
		self.narrow_phase = mode;
		self
	}

	pub fn with_gravity(mut self, gravity: [f64; 2]) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_damping(mut self, k: f64) -> Self {
		self.damping = k;
		self
	}

	pub fn with_iterations(mut self, iterations: usize) -> Self {
		self.iterations = iterations;
		self
	}

	pub fn with_pause_on_collision(mut self) -> Self {
		self.pause_on_collision = true;
		self
	}
}
