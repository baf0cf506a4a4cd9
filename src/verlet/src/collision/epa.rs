use crate::collision::gjk::Simplex;
use crate::collision::{support, triple_product, Hit};
use crate::geometry::ConvexShape;
use crate::V2;

const TOLERANCE: f64 = 1e-6;
const MAX_ITERATIONS: usize = 30;

struct Edge {
	// insertion point for a new vertex splitting this edge
	index: usize,
	normal: V2,
	distance: f64,
}

// polytope is kept clockwise (non-positive signed area), so the outward
// normal of an edge e is (-e.y, e.x)
fn closest_edge(polytope: &[V2]) -> Edge {
	let n = polytope.len();
	let mut result = Edge {
		index: 1 % n.max(1),
		normal: V2::new(1., 0.),
		distance: f64::INFINITY,
	};
	for i in 0..n {
		let j = (i + 1) % n;
		let a = polytope[i];
		let e = polytope[j] - a;
		if e.magnitude_squared() < TOLERANCE * TOLERANCE {
			continue;
		}
		let perp = triple_product(e, a, e);
		let normal = if perp.magnitude() < TOLERANCE {
			// edge passes through the origin
			V2::new(-e[1], e[0]).normalize()
		} else {
			perp.normalize()
		};
		let distance = normal.dot(&a);
		if distance < result.distance {
			result = Edge {
				index: j,
				normal,
				distance,
			};
		}
	}
	if !result.distance.is_finite() {
		result.distance = 0.;
	}
	result
}

/// Expands the GJK simplex to the boundary of A - B. The returned normal
/// points from A towards B.
pub fn epa(a: &ConvexShape, b: &ConvexShape, simplex: Simplex) -> Hit {
	let mut polytope = simplex;
	if polytope.len() >= 3 {
		let cross = (polytope[1] - polytope[0]).perp(&(polytope[2] - polytope[0]));
		if cross > 0. {
			polytope.reverse();
		}
	}

	for _ in 0..MAX_ITERATIONS {
		let edge = closest_edge(&polytope);
		let p = support(a, b, edge.normal);
		if polytope
			.iter()
			.any(|q| (q - p).magnitude_squared() < TOLERANCE * TOLERANCE)
		{
			return Hit {
				normal: edge.normal,
				depth: edge.distance,
			};
		}
		let projected = p.dot(&edge.normal);
		if (projected - edge.distance).abs() < TOLERANCE {
			return Hit {
				normal: edge.normal,
				depth: projected,
			};
		}
		polytope.insert(edge.index, p);
	}

	tracing::debug!("epa hit iteration cap, {} vertices", polytope.len());
	let edge = closest_edge(&polytope);
	Hit {
		normal: edge.normal,
		depth: edge.distance,
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::collision::gjk::gjk;
	use crate::collision::test_util::*;
	use crate::particle::Particle;
	use approx::assert_relative_eq;

	fn run(a: &[Particle], b: &[Particle]) -> Hit {
		let (sa, sb) = (ConvexShape::new(a, &QUAD), ConvexShape::new(b, &QUAD));
		let simplex = gjk(&sa, &sb).unwrap();
		epa(&sa, &sb, simplex)
	}

	#[test]
	fn test_axis_aligned_depth() {
		let a = rect(0., 0., 40., 40.);
		for delta in [1., 4., 10.] {
			let hit = run(&a, &rect(40. - delta, 5., 40., 40.));
			assert_relative_eq!(hit.depth, delta, epsilon = 1e-6);
			assert_relative_eq!(hit.normal[0], 1., epsilon = 1e-6);

			let hit = run(&a, &rect(-3., 40. - delta, 40., 40.));
			assert_relative_eq!(hit.depth, delta, epsilon = 1e-6);
			assert_relative_eq!(hit.normal[1], 1., epsilon = 1e-6);
		}
	}

	#[test]
	fn test_normal_points_to_b() {
		let a = rect(0., 0., 40., 40.);
		let hit = run(&a, &rect(-35., -2., 40., 40.));
		assert_relative_eq!(hit.depth, 5., epsilon = 1e-6);
		assert_relative_eq!(hit.normal[0], -1., epsilon = 1e-6);
		assert_relative_eq!(hit.normal[1], 0., epsilon = 1e-6);
	}

	#[test]
	fn test_closest_edge_square() {
		let polytope = vec![
			V2::new(-1., -1.),
			V2::new(-1., 3.),
			V2::new(2., 3.),
			V2::new(2., -1.),
		];
		let edge = closest_edge(&polytope);
		assert_relative_eq!(edge.distance, 1.);
		assert!(edge.normal[1] < 0. || edge.normal[0] < 0.);
	}
}
