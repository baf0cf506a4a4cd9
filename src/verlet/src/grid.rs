use fnv::FnvHashSet;

use crate::broad_phase::Pair;
use crate::geometry::Aabb;
use crate::posbox::Posbox;
use crate::{C2, V2};

/// Uniform grid over the world box; each cell lists the bodies whose AABB
/// touches it.
pub struct GridPartition {
	csize: f64,
	offset: V2,
	nrows: usize,
	ncols: usize,
	// [row][col] -> body indices
	data: Vec<Vec<Vec<usize>>>,
}

impl GridPartition {
	pub fn new(posbox: &Posbox, csize: f64) -> Self {
		let nrows = ((posbox.height() / csize).ceil() as usize).max(1);
		let ncols = ((posbox.width() / csize).ceil() as usize).max(1);
		Self {
			csize,
			offset: V2::new(posbox.xmin, posbox.ymin),
			nrows,
			ncols,
			data: vec![vec![Vec::new(); ncols]; nrows],
		}
	}

	pub fn dims(&self) -> (usize, usize) {
		(self.nrows, self.ncols)
	}

	// (col, row), clamped into the grid
	fn get_cpos(&self, p: V2) -> C2 {
		let dp = (p - self.offset) / self.csize;
		let clamp = |x: f64, n: usize| (x.floor().max(0.) as usize).min(n - 1);
		C2::new(clamp(dp[0], self.ncols), clamp(dp[1], self.nrows))
	}

	pub fn clear(&mut self) {
		for cell in self.data.iter_mut().flatten() {
			cell.clear();
		}
	}

	pub fn insert(&mut self, body: usize, aabb: &Aabb) {
		let c0 = self.get_cpos(aabb.min);
		let c1 = self.get_cpos(aabb.max);
		for row in c0[1]..=c1[1] {
			for col in c0[0]..=c1[0] {
				self.data[row][col].push(body);
			}
		}
	}

	#[cfg(test)]
	fn occupancy(&self, body: usize) -> usize {
		self.data
			.iter()
			.flatten()
			.filter(|cell| cell.contains(&body))
			.count()
	}

	/// Overlapping pairs among bodies sharing a cell, each pair tested once.
	/// Returns the pairs sorted, and the number of AABB tests performed.
	pub fn candidate_pairs(&self, aabbs: &[Option<Aabb>]) -> (Vec<Pair>, usize) {
		let mut tested: FnvHashSet<Pair> = FnvHashSet::default();
		let mut pairs = Vec::new();
		for cell in self.data.iter().flatten() {
			for (n, &i) in cell.iter().enumerate() {
				for &j in cell[n + 1..].iter() {
					if i == j {
						continue;
					}
					let pair = (i.min(j), i.max(j));
					if !tested.insert(pair) {
						continue;
					}
					if let (Some(a), Some(b)) = (&aabbs[pair.0], &aabbs[pair.1]) {
						if a.overlaps(b) {
							pairs.push(pair);
						}
					}
				}
			}
		}
		pairs.sort_unstable();
		(pairs, tested.len())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn world() -> Posbox {
		Posbox {
			xmin: 0.,
			xmax: 100.,
			ymin: 0.,
			ymax: 60.,
		}
	}

	fn aabb(x0: f64, y0: f64, x1: f64, y1: f64) -> Aabb {
		Aabb::new(V2::new(x0, y0), V2::new(x1, y1))
	}

	#[test]
	fn test_dims() {
		let grid = GridPartition::new(&world(), 25.);
		assert_eq!(grid.dims(), (3, 4));
		let grid = GridPartition::new(&world(), 1000.);
		assert_eq!(grid.dims(), (1, 1));
	}

	#[test]
	fn test_insert_spans_cells() {
		let mut grid = GridPartition::new(&world(), 10.);
		grid.insert(0, &aabb(5., 5., 25., 15.));
		assert_eq!(grid.occupancy(0), 6);
		// outside the world lands on the border cells
		grid.insert(1, &aabb(-50., -50., -40., -40.));
		assert_eq!(grid.occupancy(1), 1);
		grid.clear();
		assert_eq!(grid.occupancy(0), 0);
	}

	#[test]
	fn test_pairs_deduplicated() {
		let mut grid = GridPartition::new(&world(), 10.);
		let boxes = vec![
			Some(aabb(5., 5., 35., 35.)),
			Some(aabb(15., 15., 45., 45.)),
			Some(aabb(80., 40., 90., 50.)),
			None,
		];
		for (i, b) in boxes.iter().enumerate() {
			if let Some(b) = b {
				grid.insert(i, b);
			}
		}
		let (pairs, tests) = grid.candidate_pairs(&boxes);
		assert_eq!(pairs, vec![(0, 1)]);
		assert_eq!(tests, 1);
	}
}
