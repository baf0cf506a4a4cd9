use crate::body::Body;
use crate::broad_phase::{BroadPhase, Pair};
use crate::collision::{collide, Collider};
use crate::config;
use crate::error::Result;
use crate::factory;
use crate::grid::GridPartition;
use crate::hull::convex_hull;
use crate::posbox::Posbox;
use crate::V2;
use protocol::body_request::BodyRequest;
use protocol::config::{BroadPhaseMode, Config};
use protocol::pr_model::{PrCollider, SimulationState};

pub struct Engine {
	config: Config,
	posbox: Posbox,
	gravity: V2,
	bodies: Vec<Body>,
	broad_phase: BroadPhase,
	colliders: Vec<Collider>,
	collision_tests: usize,

	// pause_on_collision: stop before resolving, the next step after
	// resume() resolves without pausing again
	paused: bool,
	skip: bool,
}

impl Engine {
	pub fn new(config: Config) -> Result<Self> {
		let posbox = config::validate(&config)?;
		let broad_phase = match config.broad_phase {
			BroadPhaseMode::Naive => BroadPhase::Naive,
			BroadPhaseMode::Grid => {
				let csize = config::cell_size(&config, &posbox);
				let grid = GridPartition::new(&posbox, csize);
				let (nrows, ncols) = grid.dims();
				tracing::debug!("grid {}x{}, cell size {}", nrows, ncols, csize);
				BroadPhase::Grid(grid)
			}
		};
		tracing::info!(
			"engine: {:?} broad phase, {:?} narrow phase, world {}x{}",
			config.broad_phase,
			config.narrow_phase,
			posbox.width(),
			posbox.height(),
		);
		Ok(Self {
			gravity: V2::new(config.gravity[0], config.gravity[1]),
			config,
			posbox,
			bodies: Vec::new(),
			broad_phase,
			colliders: Vec::new(),
			collision_tests: 0,
			paused: false,
			skip: false,
		})
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn posbox(&self) -> &Posbox {
		&self.posbox
	}

	pub fn add_body(&mut self, mut body: Body) -> usize {
		let id = self.bodies.len();
		if let Some(aabb) = body.aabb() {
			self.broad_phase.insert(id, &aabb);
		}
		tracing::info!(
			"add body {}: {} particles, {} constraints",
			id,
			body.particles.len(),
			body.constraints.len()
		);
		self.bodies.push(body);
		id
	}

	pub fn spawn(&mut self, req: &BodyRequest) -> Result<usize> {
		let body = factory::build(req)?;
		Ok(self.add_body(body))
	}

	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	pub fn colliders(&self) -> &[Collider] {
		&self.colliders
	}

	pub fn particle_count(&self) -> usize {
		self.bodies.iter().map(|b| b.particles.len()).sum()
	}

	pub fn constraint_count(&self) -> usize {
		self.bodies.iter().map(|b| b.constraints.len()).sum()
	}

	pub fn collision_tests(&self) -> usize {
		self.collision_tests
	}

	pub fn is_paused(&self) -> bool {
		self.paused
	}

	pub fn pause(&mut self) {
		self.paused = true;
	}

	pub fn resume(&mut self) {
		if self.paused {
			self.paused = false;
			self.skip = true;
		}
	}

	#[cfg(feature = "parallel")]
	fn integrate(&mut self, dt: f64) {
		use rayon::prelude::*;
		let (gravity, damping) = (self.gravity, self.config.damping);
		self.bodies.par_iter_mut().for_each(|body| {
			body.invalidate();
			body.integrate(dt, gravity, damping);
			body.refresh();
		});
	}

	#[cfg(not(feature = "parallel"))]
	fn integrate(&mut self, dt: f64) {
		let (gravity, damping) = (self.gravity, self.config.damping);
		self.bodies.iter_mut().for_each(|body| {
			body.invalidate();
			body.integrate(dt, gravity, damping);
			body.refresh();
		});
	}

	#[cfg(feature = "parallel")]
	fn relax(&mut self) {
		use rayon::prelude::*;
		let (posbox, iterations) = (self.posbox, self.config.iterations);
		self.bodies
			.par_iter_mut()
			.for_each(|body| body.relax(&posbox, iterations));
	}

	#[cfg(not(feature = "parallel"))]
	fn relax(&mut self) {
		let (posbox, iterations) = (self.posbox, self.config.iterations);
		self.bodies
			.iter_mut()
			.for_each(|body| body.relax(&posbox, iterations));
	}

	fn find_pairs(&mut self) -> Vec<Pair> {
		let aabbs: Vec<_> = self.bodies.iter().map(|b| b.cached_aabb()).collect();
		self.broad_phase.rebuild(&aabbs);
		let (pairs, tests) = self.broad_phase.pairs(&aabbs);
		self.collision_tests = tests;
		pairs
	}

	fn narrow_phase(&mut self, pairs: &[Pair]) {
		let mode = self.config.narrow_phase;
		for &(i, j) in pairs {
			let (a, b) = match (self.bodies[i].hull_shape(), self.bodies[j].hull_shape()) {
				(Some(a), Some(b)) => (a, b),
				_ => continue,
			};
			if let Some(hit) = collide(mode, &a, &b) {
				let depth = hit.depth / 2.;
				self.colliders.push(Collider::new(i, -hit.normal, depth));
				self.colliders.push(Collider::new(j, hit.normal, depth));
			}
		}
	}

	// contact feature of each body: its hull's farthest edge against the
	// push direction, i.e. the part sunk into the other body
	fn find_contacts(&mut self) {
		let bodies = &self.bodies;
		for collider in self.colliders.iter_mut() {
			if let Some(shape) = bodies[collider.body].hull_shape() {
				collider.contacts = shape.farthest_edge(-collider.normal);
			}
		}
	}

	fn resolve(&mut self) {
		for collider in self.colliders.iter() {
			if collider.contacts.is_empty() {
				continue;
			}
			let body = &mut self.bodies[collider.body];
			let share = collider.normal * collider.depth / collider.contacts.len() as f64;
			for &id in collider.contacts.iter() {
				let p = &mut body.particles[id];
				let imass = p.get_imass();
				p.add_pos(share * imass);
			}
		}
	}

	pub fn step(&mut self, dt: f64) {
		if self.paused {
			return;
		}
		self.colliders.clear();
		self.collision_tests = 0;

		self.integrate(dt);
		let pairs = self.find_pairs();
		self.narrow_phase(&pairs);
		self.find_contacts();

		if self.config.pause_on_collision && !self.skip && !self.colliders.is_empty() {
			tracing::info!("paused on {} colliders", self.colliders.len());
			self.paused = true;
		} else {
			self.resolve();
		}
		self.relax();
		self.skip = false;

		tracing::debug!(
			"step: {} pairs, {} tests, {} colliders",
			pairs.len(),
			self.collision_tests,
			self.colliders.len()
		);
	}

	// collider hulls are rebuilt from the published positions, the cached
	// ones predate resolution and relaxation
	pub fn snapshot(&self) -> SimulationState {
		let colliders = self
			.colliders
			.iter()
			.map(|c| {
				let body = &self.bodies[c.body];
				let convex_hull = convex_hull(&body.particles)
					.into_iter()
					.flat_map(|i| body.particles[i].render())
					.collect();
				let contact_points = c
					.contacts
					.iter()
					.flat_map(|&i| body.particles[i].render())
					.collect();
				PrCollider {
					convex_hull,
					contact_points,
				}
			})
			.collect();
		SimulationState {
			objects: self.bodies.iter().map(|b| b.render()).collect(),
			colliders,
			particle_count: self.particle_count(),
			constraint_count: self.constraint_count(),
			collision_tests: self.collision_tests,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::error::EngineError;
	use approx::assert_relative_eq;
	use protocol::body_request::BodyType;
	use protocol::config::{Bounds, NarrowPhaseMode};

	const DT: f64 = 1. / 60.;

	fn still_world() -> Config {
		Config::default()
			.with_bounds(Bounds::new([-1000., -1000.], [1000., 1000.]))
			.with_gravity([0., 0.])
	}

	fn centroid(body: &Body) -> V2 {
		body.particles.iter().map(|p| p.pos).sum::<V2>() / body.particles.len() as f64
	}

	fn overlapping_pair(engine: &mut Engine) {
		engine
			.spawn(&BodyRequest::new(BodyType::Rectangle, 0., 0.))
			.unwrap();
		engine
			.spawn(&BodyRequest::new(BodyType::Rectangle, 30., 5.))
			.unwrap();
	}

	#[test]
	fn test_new_rejects() {
		let config = Config::default().with_grid(-1.);
		assert_eq!(
			Engine::new(config).err(),
			Some(EngineError::InvalidCellSize(-1.))
		);
		let config = Config::default().with_grid(1e-300);
		assert_eq!(
			Engine::new(config).err(),
			Some(EngineError::InvalidCellSize(1e-300))
		);
	}

	#[test]
	fn test_snapshot_hull_follows_particles() {
		let mut engine = Engine::new(still_world()).unwrap();
		overlapping_pair(&mut engine);
		engine.step(DT);
		let state = engine.snapshot();
		assert_eq!(state.colliders.len(), 2);
		for (collider, info) in engine.colliders().iter().zip(state.colliders.iter()) {
			let body = &engine.bodies()[collider.body];
			let expected: Vec<f32> = convex_hull(&body.particles)
				.into_iter()
				.flat_map(|i| body.particles[i].render())
				.collect();
			assert_eq!(info.convex_hull, expected);
		}
		// body 0 was pushed left, its hull must show that
		let xmax = state.colliders[0]
			.convex_hull
			.chunks_exact(2)
			.map(|p| p[0])
			.fold(f32::NEG_INFINITY, f32::max);
		assert!(xmax < 20.);
	}

	#[test]
	fn test_counters() {
		let mut engine = Engine::new(Config::default()).unwrap();
		engine
			.spawn(&BodyRequest::new(BodyType::Triangle, 100., 100.))
			.unwrap();
		let id = engine
			.spawn(&BodyRequest::new(BodyType::Trellis, 300., 100.).with_grid(2, 2))
			.unwrap();
		assert_eq!(id, 1);
		assert_eq!(engine.particle_count(), 3 + 9);
		assert_eq!(engine.constraint_count(), 3 + 12);
		assert!(engine
			.spawn(&BodyRequest::new(BodyType::Polygon, 0., 0.).with_k(1))
			.is_err());
		assert_eq!(engine.bodies().len(), 2);
	}

	#[test]
	fn test_overlap_pushes_apart() {
		for mode in [NarrowPhaseMode::GjkEpa, NarrowPhaseMode::Sat] {
			let mut engine = Engine::new(still_world().with_narrow_phase(mode)).unwrap();
			overlapping_pair(&mut engine);
			engine.step(DT);
			assert_eq!(engine.collision_tests(), 1);
			let colliders = engine.colliders();
			assert_eq!(colliders.len(), 2);
			assert_eq!(colliders[0].body, 0);
			assert_relative_eq!(colliders[0].normal[0], -1., epsilon = 1e-9);
			assert_relative_eq!(colliders[1].normal[0], 1., epsilon = 1e-9);
			assert_relative_eq!(colliders[0].depth, 5., epsilon = 1e-6);
			assert_eq!(colliders[0].contacts.len(), 2);

			// equal masses: relaxation keeps the centroid, so only the push shows
			let a = centroid(&engine.bodies()[0]);
			let b = centroid(&engine.bodies()[1]);
			assert_relative_eq!(a[0], -1.25, epsilon = 1e-6);
			assert_relative_eq!(b[0], 31.25, epsilon = 1e-6);
		}
	}

	#[test]
	fn test_static_body_not_pushed() {
		let mut engine = Engine::new(still_world()).unwrap();
		engine
			.spawn(&BodyRequest::new(BodyType::Rectangle, 0., 0.).with_static(true))
			.unwrap();
		engine
			.spawn(&BodyRequest::new(BodyType::Rectangle, 30., 5.))
			.unwrap();
		let before = engine.bodies()[0].particles.clone();
		for _ in 0..20 {
			engine.step(DT);
		}
		assert_eq!(engine.bodies()[0].particles, before);
		assert!(centroid(&engine.bodies()[1])[0] > 30.);
	}

	#[test]
	fn test_pause_on_collision() {
		let mut engine = Engine::new(still_world().with_pause_on_collision()).unwrap();
		overlapping_pair(&mut engine);
		engine.step(DT);
		assert!(engine.is_paused());
		assert_eq!(engine.colliders().len(), 2);
		assert!(engine.colliders().iter().all(|c| c.contacts.len() == 2));
		assert_relative_eq!(centroid(&engine.bodies()[0])[0], 0., epsilon = 1e-9);

		let state = engine.snapshot();
		engine.step(DT);
		assert_eq!(engine.snapshot(), state);
		assert_eq!(state.colliders.len(), 2);
		assert_eq!(state.colliders[0].convex_hull.len(), 8);
		assert_eq!(state.colliders[0].contact_points.len(), 4);

		engine.resume();
		engine.step(DT);
		assert!(!engine.is_paused());
		assert!(centroid(&engine.bodies()[0])[0] < 0.);
	}

	#[test]
	fn test_grid_matches_naive() {
		let requests = [
			BodyRequest::new(BodyType::Rectangle, 400., 550.)
				.with_width(600.)
				.with_height(20.)
				.with_static(true),
			BodyRequest::new(BodyType::Triangle, 300., 100.),
			BodyRequest::new(BodyType::Rectangle, 320., 30.),
			BodyRequest::new(BodyType::Polygon, 500., 200.).with_k(6),
			BodyRequest::new(BodyType::Trellis, 480., 60.).with_stiff(true),
		];
		let mut naive = Engine::new(Config::default()).unwrap();
		let mut grid = Engine::new(Config::default().with_grid(50.)).unwrap();
		for req in requests.iter() {
			naive.spawn(req).unwrap();
			grid.spawn(req).unwrap();
		}
		for _ in 0..240 {
			naive.step(DT);
			grid.step(DT);
		}
		assert_eq!(naive.snapshot().objects, grid.snapshot().objects);
	}

	#[test]
	fn test_snapshot() {
		let mut engine = Engine::new(Config::default()).unwrap();
		engine
			.spawn(&BodyRequest::new(BodyType::Rectangle, 100., 100.))
			.unwrap();
		let state = engine.snapshot();
		assert_eq!(state.objects.len(), 1);
		assert_eq!(state.objects[0].particle_len(), 4);
		assert_eq!(state.particle_count, 4);
		assert_eq!(state.constraint_count, 6);
		assert!(state.colliders.is_empty());
	}
}
