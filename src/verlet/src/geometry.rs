use crate::particle::Particle;
use crate::V2;

const AREA_EPS: f64 = 1e-12;
const AXIS_EPS: f64 = 1e-12;
const EDGE_TOLERANCE: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
	pub min: V2,
	pub max: V2,
}

impl Aabb {
	pub fn new(min: V2, max: V2) -> Self {
		Self { min, max }
	}

	pub fn from_points(points: impl IntoIterator<Item = V2>) -> Option<Self> {
		let mut iter = points.into_iter();
		let first = iter.next()?;
		let mut result = Self::new(first, first);
		for p in iter {
			result.min = result.min.inf(&p);
			result.max = result.max.sup(&p);
		}
		Some(result)
	}

	// touching edges do not count
	pub fn overlaps(&self, other: &Aabb) -> bool {
		!(self.max[0] <= other.min[0]
			|| other.max[0] <= self.min[0]
			|| self.max[1] <= other.min[1]
			|| other.max[1] <= self.min[1])
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
	pub min: f64,
	pub max: f64,
}

impl Projection {
	pub fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	pub fn overlap(&self, other: &Projection) -> f64 {
		if self.max >= other.min && other.max >= self.min {
			self.max.min(other.max) - self.min.max(other.min)
		} else {
			0.
		}
	}
}

/// A convex polygon borrowed from a body: hull indices into its particles.
#[derive(Clone, Copy)]
pub struct ConvexShape<'a> {
	particles: &'a [Particle],
	hull: &'a [usize],
}

impl<'a> ConvexShape<'a> {
	pub fn new(particles: &'a [Particle], hull: &'a [usize]) -> Self {
		Self { particles, hull }
	}

	pub fn len(&self) -> usize {
		self.hull.len()
	}

	pub fn is_empty(&self) -> bool {
		self.hull.is_empty()
	}

	pub fn indices(&self) -> &'a [usize] {
		self.hull
	}

	pub fn point(&self, i: usize) -> V2 {
		self.particles[self.hull[i]].pos
	}

	pub fn points(&self) -> impl Iterator<Item = V2> + 'a {
		let particles = self.particles;
		self.hull.iter().map(move |&i| particles[i].pos)
	}

	fn vertex_mean(&self) -> V2 {
		if self.hull.is_empty() {
			return V2::zeros();
		}
		self.points().sum::<V2>() / self.hull.len() as f64
	}

	/// Area centroid, vertex mean when the area vanishes.
	pub fn centroid(&self) -> V2 {
		let n = self.hull.len();
		let mut area = 0.;
		let mut c = V2::zeros();
		for i in 0..n {
			let p0 = self.point(i);
			let p1 = self.point((i + 1) % n);
			let cross = p0[0] * p1[1] - p1[0] * p0[1];
			area += cross;
			c += (p0 + p1) * cross;
		}
		area *= 0.5;
		if area.abs() < AREA_EPS {
			tracing::trace!("degenerate centroid, {} points", n);
			return self.vertex_mean();
		}
		c / (6. * area)
	}

	/// Index into the hull of the point farthest along `d`, first wins ties.
	pub fn farthest_point(&self, d: V2) -> usize {
		let mut best = 0;
		let mut max = f64::NEG_INFINITY;
		for (i, p) in self.points().enumerate() {
			let proj = d.dot(&p);
			if proj > max {
				max = proj;
				best = i;
			}
		}
		best
	}

	pub fn support(&self, d: V2) -> V2 {
		self.point(self.farthest_point(d))
	}

	/// Particle indices of the feature farthest along `d`: the best vertex,
	/// or the two best when they are within a small tolerance (a true edge).
	pub fn farthest_edge(&self, d: V2) -> Vec<usize> {
		let mut max = f64::NEG_INFINITY;
		let mut max2 = f64::NEG_INFINITY;
		let mut best = None;
		let mut best2 = None;
		for (i, p) in self.points().enumerate() {
			let proj = d.dot(&p);
			if proj > max {
				max2 = max;
				best2 = best;
				max = proj;
				best = Some(i);
			} else if proj > max2 {
				max2 = proj;
				best2 = Some(i);
			}
		}
		match (best, best2) {
			(Some(b), Some(b2)) if (max - max2).abs() < EDGE_TOLERANCE => {
				vec![self.hull[b2], self.hull[b]]
			}
			(Some(b), _) => vec![self.hull[b]],
			_ => Vec::new(),
		}
	}

	/// Unit edge normals, degenerate edges skipped.
	pub fn axes(&self) -> Vec<V2> {
		let n = self.hull.len();
		let mut result = Vec::with_capacity(n);
		for i in 0..n {
			let edge = self.point(i) - self.point((i + 1) % n);
			let perp = V2::new(-edge[1], edge[0]);
			let len = perp.magnitude();
			if len > AXIS_EPS {
				result.push(perp / len);
			}
		}
		result
	}

	pub fn project(&self, axis: V2) -> Projection {
		let mut min = f64::INFINITY;
		let mut max = f64::NEG_INFINITY;
		for p in self.points() {
			let proj = axis.dot(&p);
			min = min.min(proj);
			max = max.max(proj);
		}
		Projection::new(min, max)
	}
}
