use crate::collision::{support, triple_product};
use crate::geometry::ConvexShape;
use crate::V2;

const MAX_ITERATIONS: usize = 30;
const CENTER_EPS: f64 = 1e-3;
const PROGRESS_EPS: f64 = 1e-3;
const DUPLICATE_EPS: f64 = 1e-3;
const DIRECTION_EPS: f64 = 1e-3;
const LINE_EPS: f64 = 1e-10;

/// Terminal simplex in Minkowski-difference space, enclosing the origin.
pub type Simplex = Vec<V2>;

/// `None` when the shapes are disjoint or the search does not converge.
pub fn gjk(a: &ConvexShape, b: &ConvexShape) -> Option<Simplex> {
	let mut d = b.centroid() - a.centroid();
	if d.magnitude() < CENTER_EPS {
		d = V2::new(1., 0.);
	} else {
		d.normalize_mut();
	}

	let mut simplex: Simplex = vec![support(a, b, d)];
	d = -d;

	for _ in 0..MAX_ITERATIONS {
		let p = support(a, b, d);
		if p.dot(&d) <= PROGRESS_EPS {
			return None;
		}
		if simplex
			.iter()
			.any(|q| (q - p).magnitude_squared() < DUPLICATE_EPS)
		{
			return None;
		}
		simplex.push(p);
		if contains_origin(&mut simplex, &mut d) {
			return Some(simplex);
		}
		if d.magnitude_squared() < DIRECTION_EPS {
			return None;
		}
	}
	None
}

fn contains_origin(simplex: &mut Simplex, d: &mut V2) -> bool {
	match simplex.len() {
		2 => line_case(simplex, d),
		3 => triangle_case(simplex, d),
		_ => false,
	}
}

fn line_case(simplex: &Simplex, d: &mut V2) -> bool {
	let a = simplex[1];
	let b = simplex[0];
	let ao = -a;
	let ab = b - a;
	let perp = triple_product(ab, ao, ab);
	if perp.magnitude() <= LINE_EPS {
		// origin on the line through ab
		*d = ao;
	} else {
		*d = perp.normalize();
	}
	false
}

fn triangle_case(simplex: &mut Simplex, d: &mut V2) -> bool {
	let a = simplex[2];
	let b = simplex[1];
	let c = simplex[0];
	let ao = -a;
	let ab = b - a;
	let ac = c - a;
	let ab_perp = triple_product(ac, ab, ab);
	let ac_perp = triple_product(ab, ac, ac);

	if ab_perp.dot(&ao) > 0. {
		simplex.remove(0);
		*d = ab_perp.normalize();
		return false;
	}
	if ac_perp.dot(&ao) > 0. {
		simplex.remove(1);
		*d = ac_perp.normalize();
		return false;
	}
	true
}
