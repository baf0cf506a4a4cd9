use crate::particle::Particle;
use crate::V2;

const COLLINEAR_EPS: f64 = 1e-12;

fn cross(o: V2, a: V2, b: V2) -> f64 {
	let oa = a - o;
	let ob = b - o;
	oa[0] * ob[1] - oa[1] * ob[0]
}

fn same_point(a: V2, b: V2) -> bool {
	(a - b).magnitude_squared() < COLLINEAR_EPS
}

/// Quickhull over body particles. Returns particle indices, counter-clockwise
/// (positive shoelace area), starting at the leftmost point.
///
/// Fewer than three particles are returned as they are (two coincident
/// particles collapse into one); a collinear cloud yields its two extreme
/// points ordered by x then y.
pub fn convex_hull(particles: &[Particle]) -> Vec<usize> {
	let n = particles.len();
	let pos = |i: usize| particles[i].pos;
	if n < 3 {
		if n == 2 && same_point(pos(0), pos(1)) {
			return vec![0];
		}
		return (0..n).collect();
	}

	let mut imin = 0;
	let mut imax = 0;
	for i in 1..n {
		if pos(i)[0] < pos(imin)[0] {
			imin = i;
		} else if pos(i)[0] > pos(imax)[0] {
			imax = i;
		}
	}

	let collinear =
		(0..n).all(|i| cross(pos(imin), pos(imax), pos(i)).abs() <= COLLINEAR_EPS);
	if collinear {
		let mut sorted: Vec<usize> = (0..n).collect();
		sorted.sort_by(|&a, &b| {
			let (pa, pb) = (pos(a), pos(b));
			pa[0].total_cmp(&pb[0]).then(pa[1].total_cmp(&pb[1]))
		});
		let first = sorted[0];
		let last = sorted[n - 1];
		if same_point(pos(first), pos(last)) {
			return vec![first];
		}
		return vec![first, last];
	}

	let mut right = Vec::new();
	let mut left = Vec::new();
	for i in 0..n {
		if i == imin || i == imax {
			continue;
		}
		let side = cross(pos(imin), pos(imax), pos(i));
		if side < 0. {
			right.push(i);
		} else if side > 0. {
			left.push(i);
		}
	}

	let mut hull = vec![imin, imax];
	expand(particles, imin, imax, &right, &mut hull);
	expand(particles, imax, imin, &left, &mut hull);

	// hull[0] is always imin: expansions only insert before imax or imin
	let start = hull.iter().position(|&i| i == imin).unwrap_or(0);
	hull.rotate_left(start);
	hull
}

// candidates lie strictly right of p0 -> p1
fn expand(
	particles: &[Particle],
	p0: usize,
	p1: usize,
	candidates: &[usize],
	hull: &mut Vec<usize>,
) {
	let a = particles[p0].pos;
	let b = particles[p1].pos;
	let mut farthest = None;
	let mut max = 0.;
	for &i in candidates {
		let d = -cross(a, b, particles[i].pos);
		if d > max {
			max = d;
			farthest = Some(i);
		}
	}
	let far = match farthest {
		Some(far) => far,
		None => return,
	};
	if let Some(at) = hull.iter().position(|&i| i == p1) {
		hull.insert(at, far);
	}

	let f = particles[far].pos;
	let mut set1 = Vec::new();
	let mut set2 = Vec::new();
	for &i in candidates {
		if i == far {
			continue;
		}
		let p = particles[i].pos;
		if cross(a, f, p) < 0. {
			set1.push(i);
		} else if cross(f, b, p) < 0. {
			set2.push(i);
		}
	}
	expand(particles, p0, far, &set1, hull);
	expand(particles, far, p1, &set2, hull);
}

#[cfg(test)]
mod test {
	use super::*;
	use rand::{Rng, SeedableRng};

	fn signed_area(points: &[V2]) -> f64 {
		let n = points.len();
		let mut area = 0.;
		for i in 0..n {
			let p0 = points[i];
			let p1 = points[(i + 1) % n];
			area += p0[0] * p1[1] - p1[0] * p0[1];
		}
		area * 0.5
	}

	fn particles(points: &[[f64; 2]]) -> Vec<Particle> {
		points
			.iter()
			.map(|p| Particle::unit(V2::new(p[0], p[1]), false))
			.collect()
	}

	fn hull_points(ps: &[Particle], hull: &[usize]) -> Vec<V2> {
		hull.iter().map(|&i| ps[i].pos).collect()
	}

	#[test]
	fn test_identical_pair() {
		let ps = particles(&[[1., 1.], [1., 1.]]);
		assert_eq!(convex_hull(&ps), vec![0]);
	}

	#[test]
	fn test_small_inputs() {
		assert!(convex_hull(&[]).is_empty());
		let ps = particles(&[[1., 1.]]);
		assert_eq!(convex_hull(&ps), vec![0]);
		let ps = particles(&[[1., 1.], [2., 0.]]);
		assert_eq!(convex_hull(&ps), vec![0, 1]);
	}

	#[test]
	fn test_collinear() {
		let ps = particles(&[[1., 1.], [0., 0.], [2., 2.]]);
		assert_eq!(convex_hull(&ps), vec![1, 2]);
		let ps = particles(&[[0., 3.], [0., 1.], [0., 2.], [0., -4.]]);
		assert_eq!(convex_hull(&ps), vec![3, 0]);
		let ps = particles(&[[5., 5.], [5., 5.], [5., 5.]]);
		assert_eq!(convex_hull(&ps).len(), 1);
	}

	#[test]
	fn test_square_ccw() {
		let ps = particles(&[[0., 0.], [1., 0.], [1., 1.], [0., 1.]]);
		let hull = convex_hull(&ps);
		assert_eq!(hull, vec![0, 1, 2, 3]);
		assert!(signed_area(&hull_points(&ps, &hull)) > 0.);

		// shuffled input, same polygon
		let ps = particles(&[[1., 1.], [0., 0.], [0., 1.], [1., 0.]]);
		let hull = convex_hull(&ps);
		assert_eq!(hull.len(), 4);
		assert!((signed_area(&hull_points(&ps, &hull)) - 1.).abs() < 1e-12);
	}

	#[test]
	fn test_interior_points_dropped() {
		let ps = particles(&[
			[0., 0.],
			[4., 0.],
			[4., 4.],
			[0., 4.],
			[2., 2.],
			[1., 3.],
			[3., 1.],
			[2., 0.],
		]);
		let mut hull = convex_hull(&ps);
		hull.sort();
		assert_eq!(hull, vec![0, 1, 2, 3]);
	}

	#[test]
	fn test_random_clouds_convex() {
		let mut rng = rand::rngs::StdRng::seed_from_u64(7);
		for _ in 0..50 {
			let n = rng.gen_range(3..40);
			let ps: Vec<Particle> = (0..n)
				.map(|_| {
					Particle::unit(
						V2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)),
						false,
					)
				})
				.collect();
			let hull = convex_hull(&ps);
			let pts = hull_points(&ps, &hull);
			let m = pts.len();
			assert!(m >= 3);
			// every turn is a left turn and every input point is inside
			for i in 0..m {
				let a = pts[i];
				let b = pts[(i + 1) % m];
				assert!(cross(a, b, pts[(i + 2) % m]) > 0.);
				for p in ps.iter() {
					assert!(cross(a, b, p.pos) >= -1e-9);
				}
			}
		}
	}
}
