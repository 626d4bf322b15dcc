//! Bomb blast propagation
//!
//! A blast is a plus shape. Each arm walks outward independently: Empty cells
//! burn and the arm continues, a Soft tile is cleared and burns but ends the
//! arm, a Hard tile ends the arm without burning. Bombs and powerups caught in
//! the blast are left alone.

use glam::IVec2;

use super::grid::{GridMap, Tile};
use super::state::{Direction, FlameCell, FlameShape};

/// Outcome of one detonation
#[derive(Debug, Clone, Default)]
pub struct Blast {
    /// Flame cells to register, center first
    pub flames: Vec<FlameCell>,
    /// Soft tiles this blast turned Empty
    pub cleared: Vec<IVec2>,
}

/// Detonate at `center` with the given range, mutating the grid
pub fn explode(grid: &mut GridMap, center: IVec2, range: u32, life_ticks: u32) -> Blast {
    let mut blast = Blast::default();
    blast.flames.push(FlameCell {
        cell: center,
        shape: FlameShape::Center,
        life_ticks,
    });

    // Arms stop at the map edge long before an oversized range matters
    let reach = i32::try_from(range).unwrap_or(i32::MAX);
    for dir in Direction::ALL {
        for step in 1..=reach {
            let cell = center + dir.delta() * step;
            match grid.tile_at(cell) {
                Tile::Hard => break,
                Tile::Soft => {
                    grid.destroy_soft(cell);
                    blast.cleared.push(cell);
                    blast.flames.push(FlameCell {
                        cell,
                        shape: FlameShape::Arm(dir),
                        life_ticks,
                    });
                    break;
                }
                Tile::Empty => blast.flames.push(FlameCell {
                    cell,
                    shape: FlameShape::Arm(dir),
                    life_ticks,
                }),
            }
        }
    }

    log::debug!(
        "Blast at {:?} range {}: {} flames, {} tiles cleared",
        center,
        range,
        blast.flames.len(),
        blast.cleared.len()
    );
    blast
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn flames_at(blast: &Blast, cell: IVec2) -> usize {
        blast.flames.iter().filter(|f| f.cell == cell).count()
    }

    #[test]
    fn test_open_field_plus_shape() {
        let mut grid = GridMap::filled(7, 7, Tile::Empty);
        let blast = explode(&mut grid, IVec2::new(3, 3), 2, 30);

        assert_eq!(blast.flames.len(), 1 + 4 * 2);
        assert_eq!(blast.flames[0].shape, FlameShape::Center);
        assert_eq!(flames_at(&blast, IVec2::new(5, 3)), 1);
        assert_eq!(flames_at(&blast, IVec2::new(3, 1)), 1);
        assert_eq!(flames_at(&blast, IVec2::new(4, 4)), 0);
        assert!(blast.cleared.is_empty());
        assert!(blast.flames.iter().all(|f| f.life_ticks == 30));
    }

    #[test]
    fn test_soft_then_hard_scenario() {
        let mut grid = GridMap::filled(7, 7, Tile::Empty);
        let c = IVec2::new(2, 3);
        grid.set_tile(c + IVec2::new(1, 0), Tile::Soft);
        grid.set_tile(c + IVec2::new(2, 0), Tile::Hard);

        let blast = explode(&mut grid, c, 2, 30);

        assert_eq!(grid.tile_at(c + IVec2::new(1, 0)), Tile::Empty);
        assert_eq!(grid.tile_at(c + IVec2::new(2, 0)), Tile::Hard);
        assert_eq!(flames_at(&blast, c + IVec2::new(1, 0)), 1);
        assert_eq!(flames_at(&blast, c + IVec2::new(2, 0)), 0);
        let right = blast
            .flames
            .iter()
            .find(|f| f.cell == c + IVec2::new(1, 0))
            .map(|f| f.shape);
        assert_eq!(right, Some(FlameShape::Arm(Direction::Right)));
        assert_eq!(blast.cleared, vec![c + IVec2::new(1, 0)]);
    }

    #[test]
    fn test_soft_tile_stops_arm() {
        let mut grid = GridMap::filled(9, 1, Tile::Soft);
        let center = IVec2::new(4, 0);
        grid.set_tile(center, Tile::Empty);

        let blast = explode(&mut grid, center, 4, 30);

        // Only the adjacent brick on each side goes
        assert_eq!(grid.tile_at(IVec2::new(3, 0)), Tile::Empty);
        assert_eq!(grid.tile_at(IVec2::new(5, 0)), Tile::Empty);
        assert_eq!(grid.tile_at(IVec2::new(2, 0)), Tile::Soft);
        assert_eq!(grid.tile_at(IVec2::new(6, 0)), Tile::Soft);
        assert_eq!(blast.cleared.len(), 2);
    }

    #[test]
    fn test_arms_are_independent() {
        let mut grid = GridMap::filled(5, 5, Tile::Empty);
        let center = IVec2::new(2, 2);
        grid.set_tile(IVec2::new(2, 1), Tile::Hard);

        let blast = explode(&mut grid, center, 2, 30);

        assert_eq!(flames_at(&blast, IVec2::new(2, 1)), 0);
        assert_eq!(flames_at(&blast, IVec2::new(2, 0)), 0);
        assert_eq!(flames_at(&blast, IVec2::new(2, 4)), 1);
        assert_eq!(flames_at(&blast, IVec2::new(0, 2)), 1);
        assert_eq!(flames_at(&blast, IVec2::new(4, 2)), 1);
    }

    #[test]
    fn test_map_edge_stops_arm() {
        let mut grid = GridMap::filled(3, 3, Tile::Empty);
        let blast = explode(&mut grid, IVec2::new(0, 0), 5, 30);
        assert!(blast.flames.iter().all(|f| grid.in_bounds(f.cell)));
        assert_eq!(blast.flames.len(), 1 + 2 + 2);
    }

    #[test]
    fn test_huge_range_stops_at_map_edge() {
        let mut grid = GridMap::filled(3, 3, Tile::Empty);
        let blast = explode(&mut grid, IVec2::new(1, 1), u32::MAX, 30);
        assert_eq!(blast.flames.len(), 1 + 4);
        assert!(blast.flames.iter().all(|f| grid.in_bounds(f.cell)));
    }

    proptest! {
        #[test]
        fn blast_clears_at_most_one_soft_per_arm(
            seed in any::<u64>(),
            col in 1i32..14,
            row in 1i32..14,
            range in 1u32..8,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut grid = GridMap::generate(&mut rng, 0.7);
            let before = grid.clone();
            let center = IVec2::new(col, row);

            let blast = explode(&mut grid, center, range, 30);

            prop_assert!(blast.cleared.len() <= 4);
            for dir in Direction::ALL {
                let per_arm = blast
                    .cleared
                    .iter()
                    .filter(|&&cell| {
                        let d = cell - center;
                        d.signum() == dir.delta()
                    })
                    .count();
                prop_assert!(per_arm <= 1);
            }
            for (cell, tile) in before.iter() {
                if tile == Tile::Hard {
                    prop_assert_eq!(grid.tile_at(cell), Tile::Hard);
                }
                if tile == Tile::Soft && grid.tile_at(cell) == Tile::Empty {
                    prop_assert!(blast.cleared.contains(&cell));
                }
            }
        }
    }
}
