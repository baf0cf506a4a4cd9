use std::time::{Duration, Instant};

pub const FIXED_DT: f64 = 1. / 60.;
const MAX_CATCH_UP: usize = 5;

pub enum TimeModel {
	// exactly one step per frame regardless of wall time
	VideoRender,
	// as many fixed steps as wall time asks for, then sleep out the frame
	RtFrameLock,
}

pub struct TimeManager {
	dt: f64,
	max_steps: usize,
	model: TimeModel,
	accumulator: f64,
	start_time: Instant,
}

impl Default for TimeManager {
	fn default() -> Self {
		Self {
			dt: FIXED_DT,
			max_steps: MAX_CATCH_UP,
			model: TimeModel::RtFrameLock,
			accumulator: 0.,
			start_time: Instant::now(),
		}
	}
}

impl TimeManager {
	pub fn with_model(mut self, model: TimeModel) -> Self {
		self.model = model;
		self
	}

	pub fn with_dt(mut self, dt: f64) -> Self {
		self.dt = dt;
		self
	}

	pub fn with_max_steps(mut self, max_steps: usize) -> Self {
		self.max_steps = max_steps.max(1);
		self
	}

	pub fn dt(&self) -> f64 {
		self.dt
	}

	pub fn reset(&mut self) {
		self.accumulator = 0.;
		self.start_time = Instant::now();
	}

	/// Adds `elapsed` seconds and returns how many fixed steps are due.
	/// A backlog beyond the catch-up cap is dropped.
	pub fn accumulate(&mut self, elapsed: f64) -> usize {
		self.accumulator += elapsed.max(0.);
		let due = (self.accumulator / self.dt).floor() as usize;
		if due > self.max_steps {
			tracing::debug!("dropping {} steps of backlog", due - self.max_steps);
			self.accumulator = 0.;
			return self.max_steps;
		}
		self.accumulator -= due as f64 * self.dt;
		due
	}

	pub fn take_steps(&mut self) -> usize {
		match self.model {
			TimeModel::VideoRender => 1,
			TimeModel::RtFrameLock => {
				let now = Instant::now();
				let passed = now.duration_since(self.start_time).as_secs_f64();
				self.start_time = now;
				self.accumulate(passed)
			}
		}
	}

	// sleep out the remainder of the current frame
	pub fn wait(&self) {
		let frame = Duration::from_secs_f64(self.dt);
		let spent = self.start_time.elapsed();
		if spent < frame {
			std::thread::sleep(frame - spent);
		}
	}
}
