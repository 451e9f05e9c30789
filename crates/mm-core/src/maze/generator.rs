//! Maze generation
//!
//! Randomized depth-first carving produces a perfect maze, a braiding pass
//! knocks out a share of the walls to add loops, and the remaining dead ends
//! supply the level's endpoints and starting cell.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::cell::{Coord, Tile};
use super::grid::MazeGrid;
use crate::action::Direction;
use crate::rng::RandomSource;
use crate::world::errors::MazeError;
use crate::{BRAID_ATTEMPTS_PER_CELL, BRAID_MAX_PERCENT, BRAID_MIN_PERCENT};

/// Counters collected while a maze is built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Connectors opened by the carving pass (N²−1 for a perfect maze)
    pub connectors_carved: usize,
    /// Wall cells in the whole grid when braiding started
    pub total_walls: usize,
    /// Number of walls the braiding pass aimed to remove
    pub braid_target: usize,
    /// Number of walls the braiding pass actually removed
    pub walls_removed: usize,
    /// Coordinates drawn by the braiding pass, accepted or not
    pub braid_attempts: usize,
}

/// A finished maze together with its gameplay markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeLayout {
    pub grid: MazeGrid,
    /// Where the player enters the level
    pub start: Coord,
    /// Level-completion cells, never empty, in scan order
    pub endpoints: Vec<Coord>,
    /// Every dead end found after braiding, in scan order
    pub dead_ends: Vec<Coord>,
    pub stats: GenerationStats,
}

impl MazeLayout {
    pub fn is_endpoint(&self, at: Coord) -> bool {
        self.endpoints.contains(&at)
    }
}

/// Builds one maze; each pass can also be driven on its own
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    size: usize,
    grid: MazeGrid,
    braid_min: usize,
    braid_max: usize,
    endpoint_count: usize,
    stats: GenerationStats,
}

impl MazeGenerator {
    /// Prepare a generator for a maze of `size` × `size` logical cells
    pub fn new(size: usize) -> Result<Self, MazeError> {
        if size == 0 {
            return Err(MazeError::InvalidSize(size));
        }
        Ok(Self {
            size,
            grid: MazeGrid::new(size),
            braid_min: BRAID_MIN_PERCENT,
            braid_max: BRAID_MAX_PERCENT,
            endpoint_count: 1,
            stats: GenerationStats::default(),
        })
    }

    /// Set the braiding target range, in percent of all wall cells
    pub fn with_braiding(mut self, min_percent: usize, max_percent: usize) -> Self {
        let max_percent = max_percent.min(100);
        self.braid_min = min_percent.min(max_percent);
        self.braid_max = max_percent;
        self
    }

    /// Number of endpoints to pick; at least one is always chosen
    pub fn with_endpoints(mut self, count: usize) -> Self {
        self.endpoint_count = count.max(1);
        self
    }

    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// Run every pass and return the finished layout
    pub fn generate<R: RandomSource>(mut self, rng: &mut R) -> MazeLayout {
        self.carve(rng);
        self.braid(rng);
        let layout = self.finish(rng);
        debug!(
            size = layout.grid.size(),
            connectors = layout.stats.connectors_carved,
            braid_target = layout.stats.braid_target,
            walls_removed = layout.stats.walls_removed,
            dead_ends = layout.dead_ends.len(),
            "maze generated"
        );
        layout
    }

    /// Depth-first carving from logical cell (0,0) until every cell is visited
    pub fn carve<R: RandomSource>(&mut self, rng: &mut R) {
        let n = self.size;
        let mut visited = vec![false; n * n];
        let mut stack: Vec<(usize, usize)> = Vec::with_capacity(n * n);

        self.grid.set(Coord::from_logical(0, 0), Tile::Path);
        visited[0] = true;
        stack.push((0, 0));

        while let Some(&(row, col)) = stack.last() {
            let mut dirs = Direction::ALL;
            rng.shuffle(&mut dirs);

            let mut open = [(0usize, 0usize); 4];
            let mut q = 0;
            for dir in dirs {
                let (dr, dc) = dir.delta();
                let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
                else {
                    continue;
                };
                if nr < n && nc < n && !visited[nr * n + nc] {
                    open[q] = (nr, nc);
                    q += 1;
                }
            }

            if q == 0 {
                stack.pop();
                continue;
            }

            let (nr, nc) = open[rng.index(q)];
            let here = Coord::from_logical(row, col);
            let there = Coord::from_logical(nr, nc);
            let connector = Coord::new((here.row + there.row) / 2, (here.col + there.col) / 2);
            self.grid.set(connector, Tile::Path);
            self.grid.set(there, Tile::Path);
            self.stats.connectors_carved += 1;

            visited[nr * n + nc] = true;
            stack.push((nr, nc));
        }
    }

    /// Open random interior walls that already touch at least two path cells.
    ///
    /// Returns the number of walls removed.
    pub fn braid<R: RandomSource>(&mut self, rng: &mut R) -> usize {
        let total_walls = self.grid.count(Tile::Wall);
        let lo = total_walls * self.braid_min / 100;
        let hi = total_walls * self.braid_max / 100;
        let goal = rng.range_inclusive(lo, hi);

        let interior = self.grid.side() - 2;
        let max_attempts = interior * interior * BRAID_ATTEMPTS_PER_CELL;
        let mut removed = 0;
        let mut attempts = 0;

        while removed < goal {
            if attempts >= max_attempts {
                warn!(goal, removed, attempts, "braiding gave up before reaching its goal");
                break;
            }
            attempts += 1;

            let at = Coord::new(1 + rng.index(interior), 1 + rng.index(interior));
            if self.grid.is_wall(at) && self.grid.wall_neighbors(at) < 3 {
                self.grid.set(at, Tile::Path);
                removed += 1;
            }
        }

        self.stats.total_walls = total_walls;
        self.stats.braid_target = goal;
        self.stats.walls_removed += removed;
        self.stats.braid_attempts += attempts;
        removed
    }

    /// Logical cells with exactly one open side, in row-major order
    pub fn dead_ends(&self) -> Vec<Coord> {
        self.grid
            .logical_cells()
            .filter(|&at| self.grid.is_path(at) && self.grid.wall_neighbors(at) == 3)
            .collect()
    }

    /// Classify dead ends, pick endpoints and the start, and hand over the grid
    pub fn finish<R: RandomSource>(self, rng: &mut R) -> MazeLayout {
        let dead_ends = self.dead_ends();
        let endpoints = self.select_endpoints(&dead_ends, rng);
        let start = self.select_start(&dead_ends, &endpoints, rng);

        MazeLayout {
            grid: self.grid,
            start,
            endpoints,
            dead_ends,
            stats: self.stats,
        }
    }

    /// Endpoints come from the last quarter of the dead-end list
    fn select_endpoints<R: RandomSource>(&self, dead_ends: &[Coord], rng: &mut R) -> Vec<Coord> {
        if dead_ends.is_empty() {
            let corner = self.grid.side() - 2;
            return vec![Coord::new(corner, corner)];
        }

        let quarter = (dead_ends.len() / 4).max(1);
        let mut pool = dead_ends[dead_ends.len() - quarter..].to_vec();
        rng.shuffle(&mut pool);
        pool.truncate(self.endpoint_count.min(quarter));
        pool.sort();
        pool
    }

    /// The start comes from the first tenth of the remaining dead ends
    fn select_start<R: RandomSource>(
        &self,
        dead_ends: &[Coord],
        endpoints: &[Coord],
        rng: &mut R,
    ) -> Coord {
        let candidates: Vec<Coord> = dead_ends
            .iter()
            .copied()
            .filter(|at| !endpoints.contains(at))
            .collect();

        if !candidates.is_empty() {
            let tenth = candidates.len() / 10;
            return candidates[rng.index(tenth + 1)];
        }

        self.grid
            .logical_cells()
            .find(|at| self.grid.is_path(*at) && !endpoints.contains(at))
            .unwrap_or(Coord::new(1, 1))
    }
}

/// Generate a complete maze with default braiding and a single endpoint
pub fn generate<R: RandomSource>(size: usize, rng: &mut R) -> Result<MazeLayout, MazeError> {
    Ok(MazeGenerator::new(size)?.generate(rng))
}
