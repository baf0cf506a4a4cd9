use crate::geometry::Aabb;
use crate::grid::GridPartition;

/// Body index pair, smaller index first.
pub type Pair = (usize, usize);

pub enum BroadPhase {
	Naive,
	Grid(GridPartition),
}

impl BroadPhase {
	pub fn insert(&mut self, body: usize, aabb: &Aabb) {
		if let BroadPhase::Grid(grid) = self {
			grid.insert(body, aabb);
		}
	}

	pub fn rebuild(&mut self, aabbs: &[Option<Aabb>]) {
		if let BroadPhase::Grid(grid) = self {
			grid.clear();
			for (i, aabb) in aabbs.iter().enumerate() {
				if let Some(aabb) = aabb {
					grid.insert(i, aabb);
				}
			}
		}
	}

	/// Candidate pairs in ascending order, plus the number of AABB tests.
	pub fn pairs(&self, aabbs: &[Option<Aabb>]) -> (Vec<Pair>, usize) {
		match self {
			BroadPhase::Naive => naive(aabbs),
			BroadPhase::Grid(grid) => grid.candidate_pairs(aabbs),
		}
	}
}

pub fn naive(aabbs: &[Option<Aabb>]) -> (Vec<Pair>, usize) {
	let mut pairs = Vec::new();
	let mut tests = 0;
	for (i, a) in aabbs.iter().enumerate() {
		let a = match a {
			Some(a) => a,
			None => continue,
		};
		for (j, b) in aabbs.iter().enumerate().skip(i + 1) {
			if let Some(b) = b {
				tests += 1;
				if a.overlaps(b) {
					pairs.push((i, j));
				}
			}
		}
	}
	(pairs, tests)
}
