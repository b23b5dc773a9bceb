//! Random placement of snake cells and items on free grid cells.
//!
//! Placement enumerates the free cells and samples among them, so a crowded
//! board costs one pass over the grid instead of an open-ended retry loop.

use rand::seq::SliceRandom;
use rand::Rng;

use super::state::Position;

/// Grid side as a coordinate bound, clamped to what `i32` can address
fn extent(grid_size: usize) -> i32 {
    i32::try_from(grid_size).unwrap_or(i32::MAX)
}

/// Every cell of a `grid_size × grid_size` grid, row by row
pub fn all_cells(grid_size: usize) -> impl Iterator<Item = Position> {
    let n = extent(grid_size);
    (0..n).flat_map(move |y| (0..n).map(move |x| Position::new(x, y)))
}

/// Pick a uniformly random cell for which `is_forbidden` is false.
///
/// Returns `None` when every cell is forbidden; callers treat the item as
/// absent in that case.
pub fn sample<R, F>(rng: &mut R, grid_size: usize, is_forbidden: F) -> Option<Position>
where
    R: Rng,
    F: Fn(Position) -> bool,
{
    let free: Vec<Position> = all_cells(grid_size).filter(|&p| !is_forbidden(p)).collect();
    free.choose(rng).copied()
}

/// [`sample`] with an explicit list of occupied cells
pub fn sample_excluding<R>(rng: &mut R, grid_size: usize, forbidden: &[Position]) -> Option<Position>
where
    R: Rng,
{
    // Sparse board: a few plain draws almost always hit a free cell.
    if forbidden.len().saturating_mul(2) < grid_size.saturating_mul(grid_size) {
        for _ in 0..8 {
            let candidate = random_cell(rng, grid_size);
            if !forbidden.contains(&candidate) {
                return Some(candidate);
            }
        }
    }
    sample(rng, grid_size, |p| forbidden.contains(&p))
}

/// Any cell of the grid, occupied or not
pub fn random_cell<R: Rng>(rng: &mut R, grid_size: usize) -> Position {
    let n = extent(grid_size);
    Position::new(rng.gen_range(0..n), rng.gen_range(0..n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_all_cells_covers_grid_once() {
        let cells: Vec<_> = all_cells(4).collect();
        assert_eq!(cells.len(), 16);
        let unique: HashSet<_> = cells.iter().copied().collect();
        assert_eq!(unique.len(), 16);
        assert!(cells.iter().all(|p| (0..4).contains(&p.x) && (0..4).contains(&p.y)));
    }

    #[test]
    fn test_sample_avoids_forbidden_cells() {
        let mut rng = StdRng::seed_from_u64(1);
        let forbidden: Vec<_> = all_cells(5).filter(|p| p.x != 3).collect();
        for _ in 0..50 {
            let pos = sample_excluding(&mut rng, 5, &forbidden).unwrap();
            assert_eq!(pos.x, 3);
        }
    }

    #[test]
    fn test_sample_returns_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(2);
        let hole = Position::new(2, 1);
        let forbidden: Vec<_> = all_cells(3).filter(|&p| p != hole).collect();
        assert_eq!(sample_excluding(&mut rng, 3, &forbidden), Some(hole));
    }

    #[test]
    fn test_sample_full_grid_is_none() {
        let mut rng = StdRng::seed_from_u64(3);
        let forbidden: Vec<_> = all_cells(3).collect();
        assert_eq!(sample_excluding(&mut rng, 3, &forbidden), None);
        assert_eq!(sample(&mut rng, 3, |_| true), None);
    }

    #[test]
    fn test_sample_reaches_every_free_cell() {
        let mut rng = StdRng::seed_from_u64(4);
        let seen: HashSet<_> = (0..500).filter_map(|_| sample(&mut rng, 3, |_| false)).collect();
        assert_eq!(seen.len(), 9);
    }
}
