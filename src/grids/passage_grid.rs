use std::fmt;
use std::io::Write;
use std::str::FromStr;

use log::debug;

use crate::error::{MazeError, Result};
use crate::grids::{Dimensions, Direction, Neighborhood, Passages};

/// Rectangular maze stored as one [`Passages`] bitmask per cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageGrid {
    dims: Dimensions,
    cells: Vec<Passages>,
}

impl PassageGrid {
    /// Creates a grid of isolated cells.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimension {
                width: width as i64,
                height: height as i64,
            });
        }

        let len = width
            .checked_mul(height)
            .ok_or(MazeError::AllocationFailure {
                cells: width.saturating_mul(height),
            })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| MazeError::AllocationFailure { cells: len })?;
        cells.resize(len, Passages::empty());

        debug!("allocated {}x{} grid ({} cells)", width, height, len);

        Ok(Self {
            dims: Dimensions { width, height },
            cells,
        })
    }

    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dims.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[Passages] {
        &self.cells
    }

    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.dims.width && y < self.dims.height);
        (self.dims.width * y) + x
    }

    #[inline]
    pub fn coordinates_of(&self, index: usize) -> (usize, usize) {
        (index % self.dims.width, index / self.dims.width)
    }

    pub fn has_neighbor(&self, index: usize, direction: Direction) -> bool {
        let (x, y) = self.coordinates_of(index);
        match direction {
            Direction::Left => x > 0,
            Direction::Top => y > 0,
            Direction::Right => x < self.dims.width - 1,
            Direction::Bottom => y < self.dims.height - 1,
        }
    }

    /// Index of the adjacent cell, `None` at the edge of the world.
    pub fn neighbor_of(&self, index: usize, direction: Direction) -> Option<usize> {
        if !self.has_neighbor(index, direction) {
            return None;
        }

        // the bounds check above rules out wrapping onto another row
        let neighbor = match direction {
            Direction::Left => index - 1,
            Direction::Right => index + 1,
            Direction::Top => {
                let (x, y) = self.coordinates_of(index);
                self.index_of(x, y - 1)
            }
            Direction::Bottom => {
                let (x, y) = self.coordinates_of(index);
                self.index_of(x, y + 1)
            }
        };
        Some(neighbor)
    }

    pub fn neighborhood_of(&self, index: usize) -> Neighborhood {
        let mut hood = Neighborhood::new();
        for direction in Direction::ALL {
            hood.set(direction, self.neighbor_of(index, direction));
        }
        hood
    }

    #[inline]
    pub fn passages(&self, index: usize) -> Passages {
        self.cells[index]
    }

    #[inline]
    pub fn is_open(&self, index: usize, direction: Direction) -> bool {
        self.cells[index].has(direction)
    }

    /// A cell with no passage at all.
    #[inline]
    pub fn is_isolated(&self, index: usize) -> bool {
        self.cells[index].is_empty()
    }

    /// Opens the passage on both sides and returns the neighbour's index.
    /// Reopening an existing passage changes nothing.
    pub fn open_passage(&mut self, index: usize, direction: Direction) -> usize {
        let neighbor = match self.neighbor_of(index, direction) {
            Some(neighbor) => neighbor,
            None => panic!(
                "cell {:?} has no neighbor to the {:?}",
                self.coordinates_of(index),
                direction
            ),
        };

        self.cells[index] |= direction.passage();
        self.cells[neighbor] |= direction.reverse().passage();
        neighbor
    }

    /// Streams the text rendering (see the `Display` impl) into `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}", self)?;
        Ok(())
    }
}

/// One line per row, each cell as a zero-padded two digit bitmask followed by a space.
impl fmt::Display for PassageGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.dims.width) {
            for cell in row {
                write!(f, "{:02} ", cell.bits())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for PassageGrid {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        let mut rows: Vec<(usize, Vec<Passages>)> = Vec::new();

        for (number, line) in s.lines().enumerate() {
            let line_no = number + 1;
            if line.trim().is_empty() {
                continue;
            }

            let row = line
                .split_whitespace()
                .map(|field| parse_cell(field, line_no))
                .collect::<Result<Vec<_>>>()?;

            if let Some((_, first)) = rows.first() {
                if first.len() != row.len() {
                    return Err(MazeError::Parse {
                        line: line_no,
                        reason: format!("expected {} cells, found {}", first.len(), row.len()),
                    });
                }
            }
            rows.push((line_no, row));
        }

        let width = match rows.first() {
            Some((_, first)) => first.len(),
            None => {
                return Err(MazeError::Parse {
                    line: 1,
                    reason: "no rows".to_string(),
                })
            }
        };

        let mut grid = PassageGrid::new(width, rows.len())?;
        let lines: Vec<usize> = rows.iter().map(|(line, _)| *line).collect();
        grid.cells = rows.into_iter().flat_map(|(_, row)| row).collect();

        for index in 0..grid.len() {
            for direction in Direction::ALL {
                if !grid.is_open(index, direction) {
                    continue;
                }
                let (x, y) = grid.coordinates_of(index);
                let reason = match grid.neighbor_of(index, direction) {
                    None => format!("cell ({}, {}) opens {:?} off the grid", x, y, direction),
                    Some(neighbor) if !grid.is_open(neighbor, -direction) => {
                        format!(
                            "cell ({}, {}) opens {:?} but its neighbor is closed",
                            x, y, direction
                        )
                    }
                    Some(_) => continue,
                };
                return Err(MazeError::Parse {
                    line: lines[y],
                    reason,
                });
            }
        }

        Ok(grid)
    }
}

fn parse_cell(field: &str, line: usize) -> Result<Passages> {
    let value: u8 = field.parse().map_err(|_| MazeError::Parse {
        line,
        reason: format!("invalid cell value {:?}", field),
    })?;

    Passages::from_bits(value).ok_or_else(|| MazeError::Parse {
        line,
        reason: format!("cell value {} is outside 0..=15", value),
    })
}

#[cfg(test)]
mod test_passage_grid {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            PassageGrid::new(0, 4),
            Err(MazeError::InvalidDimension { width: 0, height: 4 })
        ));
        assert!(matches!(
            PassageGrid::new(3, 0),
            Err(MazeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn overflowing_size_is_an_allocation_failure() {
        assert!(matches!(
            PassageGrid::new(usize::MAX, 2),
            Err(MazeError::AllocationFailure { .. })
        ));
    }

    #[test]
    fn starts_isolated() {
        let grid = PassageGrid::new(4, 3).unwrap();
        assert_eq!(grid.len(), 12);
        assert!((0..grid.len()).all(|i| grid.is_isolated(i)));
    }

    #[test]
    fn coordinates_round_trip() {
        let grid = PassageGrid::new(5, 3).unwrap();
        assert_eq!(grid.index_of(0, 0), 0);
        assert_eq!(grid.index_of(4, 0), 4);
        assert_eq!(grid.index_of(0, 1), 5);
        assert_eq!(grid.index_of(3, 2), 13);
        for index in 0..grid.len() {
            let (x, y) = grid.coordinates_of(index);
            assert_eq!(grid.index_of(x, y), index);
        }
    }

    #[test]
    fn edges_have_no_neighbors() {
        let grid = PassageGrid::new(3, 2).unwrap();
        // top-left corner
        assert!(!grid.has_neighbor(0, Direction::Left));
        assert!(!grid.has_neighbor(0, Direction::Top));
        assert!(grid.has_neighbor(0, Direction::Right));
        assert!(grid.has_neighbor(0, Direction::Bottom));
        // end of the first row must not wrap onto the second
        assert!(!grid.has_neighbor(2, Direction::Right));
        assert_eq!(grid.neighbor_of(2, Direction::Right), None);
        assert!(!grid.has_neighbor(3, Direction::Left));
        assert_eq!(grid.neighbor_of(4, Direction::Top), Some(1));
        assert_eq!(grid.neighbor_of(1, Direction::Bottom), Some(4));
        assert_eq!(grid.neighbor_of(4, Direction::Left), Some(3));
    }

    #[test]
    fn single_column_and_row() {
        let column = PassageGrid::new(1, 3).unwrap();
        assert!(!column.has_neighbor(1, Direction::Left));
        assert!(!column.has_neighbor(1, Direction::Right));
        assert_eq!(column.neighborhood_of(1).count(), 2);

        let single = PassageGrid::new(1, 1).unwrap();
        assert_eq!(single.neighborhood_of(0).count(), 0);
    }

    #[test]
    fn open_passage_sets_both_sides() {
        let mut grid = PassageGrid::new(2, 2).unwrap();
        let neighbor = grid.open_passage(0, Direction::Bottom);
        assert_eq!(neighbor, 2);
        assert!(grid.is_open(0, Direction::Bottom));
        assert!(grid.is_open(2, Direction::Top));
        assert!(grid.is_isolated(1));

        // idempotent
        let before = grid.clone();
        grid.open_passage(2, Direction::Top);
        assert_eq!(grid, before);
    }

    #[test]
    #[should_panic]
    fn opening_off_the_edge_panics() {
        let mut grid = PassageGrid::new(2, 2).unwrap();
        grid.open_passage(1, Direction::Right);
    }

    #[test]
    fn renders_single_cell() {
        let grid = PassageGrid::new(1, 1).unwrap();
        assert_eq!(grid.to_string(), "00 \n");
    }

    #[test]
    fn renders_two_digit_fields() {
        let mut grid = PassageGrid::new(2, 2).unwrap();
        grid.open_passage(0, Direction::Right);
        grid.open_passage(1, Direction::Bottom);
        grid.open_passage(2, Direction::Right);
        assert_eq!(grid.to_string(), "04 09 \n04 03 \n");

        let mut out = Vec::new();
        grid.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), grid.to_string());
    }

    #[test]
    fn renders_partial_grid() {
        let grid = PassageGrid::new(3, 1).unwrap();
        assert_eq!(grid.to_string(), "00 00 00 \n");
    }

    #[test]
    fn parses_rendered_grid() {
        let mut grid = PassageGrid::new(3, 2).unwrap();
        grid.open_passage(0, Direction::Right);
        grid.open_passage(1, Direction::Right);
        grid.open_passage(2, Direction::Bottom);
        grid.open_passage(5, Direction::Left);
        grid.open_passage(4, Direction::Left);

        let parsed: PassageGrid = grid.to_string().parse().unwrap();
        assert_eq!(parsed, grid);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            "".parse::<PassageGrid>(),
            Err(MazeError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            "04 01\n00\n".parse::<PassageGrid>(),
            Err(MazeError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            "16\n".parse::<PassageGrid>(),
            Err(MazeError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            "ab\n".parse::<PassageGrid>(),
            Err(MazeError::Parse { line: 1, .. })
        ));
        // one-sided passage
        assert!(matches!(
            "04 00\n".parse::<PassageGrid>(),
            Err(MazeError::Parse { line: 1, .. })
        ));
        // opens off the grid
        assert!(matches!(
            "01\n".parse::<PassageGrid>(),
            Err(MazeError::Parse { line: 1, .. })
        ));
    }
}
