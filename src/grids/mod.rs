pub mod passage_grid;

pub use passage_grid::PassageGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

/// The four sides of a cell. Discriminants are the passage bit of each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left = 1,
    Top = 2,
    Right = 4,
    Bottom = 8,
}

impl Direction {
    /// Fixed scan order; random draws index into it, so it must not change.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
    ];

    pub fn reverse(self) -> Direction {
        -self
    }

    pub fn passage(self) -> Passages {
        Passages::from_bits_truncate(self as u8)
    }

    /// Position of this direction in [`Direction::ALL`].
    pub fn slot(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Top => 1,
            Direction::Right => 2,
            Direction::Bottom => 3,
        }
    }

    fn next_in_order(self) -> Option<Direction> {
        Direction::ALL.get(self.slot() + 1).copied()
    }
}

impl std::ops::Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Self::Output {
        match self {
            Direction::Left => Direction::Right,
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
        }
    }
}

impl From<usize> for Direction {
    fn from(slot: usize) -> Self {
        match slot {
            0 => Direction::Left,
            1 => Direction::Top,
            2 => Direction::Right,
            3 => Direction::Bottom,
            _ => unreachable!("direction slot out of range: {}", slot),
        }
    }
}

bitflags::bitflags! {
    /// Open sides of a single cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Passages: u8 {
        const LEFT   = 0b0001;
        const TOP    = 0b0010;
        const RIGHT  = 0b0100;
        const BOTTOM = 0b1000;
    }
}

impl Passages {
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.passage())
    }

    /// Number of open sides.
    pub fn degree(self) -> u32 {
        self.bits().count_ones()
    }
}

/// In-bounds neighbours of a cell, iterated in [`Direction::ALL`] order.
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood {
    pub left: Option<usize>,
    pub top: Option<usize>,
    pub right: Option<usize>,
    pub bottom: Option<usize>,

    counter: Option<Direction>,
}

impl Neighborhood {
    pub fn new() -> Self {
        Self {
            left: None,
            top: None,
            right: None,
            bottom: None,
            counter: Some(Direction::Left),
        }
    }

    pub fn get(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Left => self.left,
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, direction: Direction, index: Option<usize>) {
        match direction {
            Direction::Left => self.left = index,
            Direction::Top => self.top = index,
            Direction::Right => self.right = index,
            Direction::Bottom => self.bottom = index,
        }
    }
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Neighborhood {
    type Item = (usize, Direction);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(direction) = self.counter {
            self.counter = direction.next_in_order();
            if let Some(index) = self.get(direction) {
                return Some((index, direction));
            }
        }
        None
    }
}
