use crate::collision::Hit;
use crate::geometry::ConvexShape;

const SEPARATION_EPS: f64 = 1e-3;

/// Separating axis test over the edge normals of both hulls. The normal of
/// the smallest overlap is oriented from A's centroid towards B's.
pub fn sat(a: &ConvexShape, b: &ConvexShape) -> Option<Hit> {
	let axes = a.axes().into_iter().chain(b.axes());
	let offset = b.centroid() - a.centroid();
	let mut best: Option<Hit> = None;
	for axis in axes {
		let overlap = a.project(axis).overlap(&b.project(axis));
		if overlap <= SEPARATION_EPS {
			return None;
		}
		if best.map_or(true, |hit| overlap < hit.depth) {
			let normal = if offset.dot(&axis) < 0. { -axis } else { axis };
			best = Some(Hit {
				normal,
				depth: overlap,
			});
		}
	}
	best
}
