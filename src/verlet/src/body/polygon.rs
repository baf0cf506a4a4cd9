use std::f64::consts::PI;

use crate::body::{Body, Shape, Triangulation};
use crate::constraint::linear::{LinearConstraint, DEFAULT_RESTITUTION};
use crate::constraint::CRef;
use crate::particle::Particle;
use crate::V2;

/// Closed ring plus skip-one struts.
pub fn from_particles(particles: Vec<Particle>, restitution: f64) -> Body {
	let n = particles.len();
	let mut constraints: Vec<CRef> = Vec::new();
	if n >= 2 {
		for i in 0..n {
			let j = (i + 1) % n;
			if n == 2 && i == 1 {
				break;
			}
			constraints.push(
				LinearConstraint::new(&particles, i, j)
					.with_restitution(restitution)
					.build(),
			);
		}
	}
	if n >= 4 {
		for i in 0..n {
			let j = (i + 2) % n;
			// a square would list each diagonal twice
			if n == 4 && i >= 2 {
				break;
			}
			constraints.push(
				LinearConstraint::new(&particles, i, j)
					.with_restitution(DEFAULT_RESTITUTION)
					.build(),
			);
		}
	}
	Body::new(particles, constraints, Shape::Polygon)
}

pub fn from_points(points: &[V2], is_static: bool, restitution: f64) -> Body {
	let particles = points.iter().map(|&p| Particle::unit(p, is_static)).collect();
	from_particles(particles, restitution)
}

// regular k-gon of circumradius `size`, first vertex at angle 0
pub fn regular(x: f64, y: f64, size: f64, k: usize, is_static: bool, restitution: f64) -> Body {
	let points: Vec<V2> = (0..k)
		.map(|i| {
			let angle = i as f64 / k as f64 * 2. * PI;
			V2::new(x + size * angle.cos(), y + size * angle.sin())
		})
		.collect();
	from_points(&points, is_static, restitution)
}

pub fn rectangle(
	x: f64,
	y: f64,
	width: f64,
	height: f64,
	is_static: bool,
	restitution: f64,
) -> Body {
	let w2 = width / 2.;
	let h2 = height / 2.;
	from_points(
		&[
			V2::new(x - w2, y - h2),
			V2::new(x + w2, y - h2),
			V2::new(x + w2, y + h2),
			V2::new(x - w2, y + h2),
		],
		is_static,
		restitution,
	)
}

// equilateral, apex towards +y
pub fn triangle(x: f64, y: f64, size: f64, is_static: bool, restitution: f64) -> Body {
	let h = size * 3f64.sqrt() / 2.;
	from_points(
		&[
			V2::new(x, y + 2. / 3. * h),
			V2::new(x - size / 2., y - h / 3.),
			V2::new(x + size / 2., y - h / 3.),
		],
		is_static,
		restitution,
	)
}

/// Fan over the convex hull, uvs from the hull's bounding box.
pub fn triangulate(particles: &[Particle], hull: &[usize]) -> Triangulation {
	let mut min = V2::repeat(f64::INFINITY);
	let mut max = V2::repeat(f64::NEG_INFINITY);
	for &i in hull {
		min = min.inf(&particles[i].pos);
		max = max.sup(&particles[i].pos);
	}
	let extent = max - min;
	let uv = |v: f64, lo: f64, len: f64| if len > 0. { (v - lo) / len } else { 0. };
	let uvs = hull
		.iter()
		.map(|&i| {
			let p = particles[i].pos;
			[uv(p[0], min[0], extent[0]), uv(p[1], min[1], extent[1])]
		})
		.collect();
	let mut indices = Vec::new();
	for i in 1..hull.len().saturating_sub(1) {
		indices.extend_from_slice(&[hull[0], hull[i], hull[i + 1]]);
	}
	Triangulation { uvs, indices }
}
