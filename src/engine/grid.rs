//! Static map layout: dimensions, islands and the coordinate helpers used by
//! the movement and ordnance rules.
//!
//! A map is parsed once and never mutated afterwards. Text maps use one row
//! per line, `X` for islands and `.` for open water, with an optional `WxH`
//! header line.

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use rand::Rng;

use crate::engine::config::SECTOR_SIZE;

/// Smallest island grown by [`GridMap::generate_random`].
const MIN_ISLAND_SIZE: usize = 1;
/// Largest island grown by [`GridMap::generate_random`].
const MAX_ISLAND_SIZE: usize = 8;

/// A cell on the grid. `x` grows eastwards, `y` grows southwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step towards `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    pub fn chebyshev(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// The four orthogonal neighbours, in `Direction::ALL` order.
    pub fn neighbours(self) -> impl Iterator<Item = Coord> {
        Direction::ALL.into_iter().map(move |d| self.step(d))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Cardinal heading for a captain move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    N,
    S,
    E,
    W,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::N, Direction::S, Direction::E, Direction::W];

    /// Unit vector `(dx, dy)`; north is `y - 1`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::S => (0, 1),
            Direction::E => (1, 0),
            Direction::W => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::N => Direction::S,
            Direction::S => Direction::N,
            Direction::E => Direction::W,
            Direction::W => Direction::E,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::N => "N",
            Direction::S => "S",
            Direction::E => "E",
            Direction::W => "W",
        };
        f.write_str(s)
    }
}

/// Error returned when a direction string is not one of N, S, E, W.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid direction '{}'. Use N, S, E, or W", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::N),
            "s" | "south" => Ok(Direction::S),
            "e" | "east" => Ok(Direction::E),
            "w" | "west" => Ok(Direction::W),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Errors raised while building a map. These are configuration errors and are
/// never produced mid-game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapFormatError {
    /// No map rows were found.
    Empty,
    /// The `WxH` header line could not be parsed.
    InvalidHeader(String),
    /// Width or height is zero.
    InvalidDimensions { width: usize, height: usize },
    /// A row's length differs from the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A row contains a character other than `X` or `.`.
    UnexpectedChar { row: usize, col: usize, ch: char },
    /// Header dimensions disagree with the rows that follow.
    DimensionMismatch {
        declared: (usize, usize),
        found: (usize, usize),
    },
    /// An island lies outside the map.
    IslandOutOfBounds(Coord),
    /// Fewer than two open cells remain for the submarines.
    TooFewOpenCells,
    /// The map file could not be read.
    Io(String),
}

impl fmt::Display for MapFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapFormatError::Empty => write!(f, "Map has no rows"),
            MapFormatError::InvalidHeader(line) => write!(f, "Invalid map header '{}'", line),
            MapFormatError::InvalidDimensions { width, height } => {
                write!(f, "Invalid map dimensions {}x{}", width, height)
            }
            MapFormatError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} cells, expected {}",
                row, found, expected
            ),
            MapFormatError::UnexpectedChar { row, col, ch } => {
                write!(f, "Unexpected character '{}' at row {}, column {}", ch, row, col)
            }
            MapFormatError::DimensionMismatch { declared, found } => write!(
                f,
                "Header declares {}x{} but rows form {}x{}",
                declared.0, declared.1, found.0, found.1
            ),
            MapFormatError::IslandOutOfBounds(c) => write!(f, "Island {} is outside the map", c),
            MapFormatError::TooFewOpenCells => write!(f, "Map needs at least two open cells"),
            MapFormatError::Io(e) => write!(f, "Unable to read map: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MapFormatError {}

/// Largest width or height a map may have; every cell must fit an `i32`
/// coordinate.
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// Total number of cells, rejecting empty or oversized maps.
fn cell_count(width: usize, height: usize) -> Result<usize, MapFormatError> {
    let invalid = MapFormatError::InvalidDimensions { width, height };
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(invalid);
    }
    width.checked_mul(height).ok_or(invalid)
}

fn within(c: Coord, width: usize, height: usize) -> bool {
    c.x >= 0 && c.y >= 0 && (c.x as usize) < width && (c.y as usize) < height
}

/// Immutable grid: dimensions and island cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    islands: BTreeSet<Coord>,
}

impl GridMap {
    /// Build a map from its dimensions and island cells.
    pub fn new<I>(width: usize, height: usize, islands: I) -> Result<Self, MapFormatError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let cells = cell_count(width, height)?;
        let islands: BTreeSet<Coord> = islands.into_iter().collect();
        if let Some(&c) = islands.iter().find(|&&c| !within(c, width, height)) {
            return Err(MapFormatError::IslandOutOfBounds(c));
        }
        if cells < islands.len().saturating_add(2) {
            return Err(MapFormatError::TooFewOpenCells);
        }
        Ok(Self {
            width,
            height,
            islands,
        })
    }

    /// Island-free map of the given size.
    pub fn open(width: usize, height: usize) -> Result<Self, MapFormatError> {
        Self::new(width, height, core::iter::empty())
    }

    /// Parse a textual map.
    pub fn parse(text: &str) -> Result<Self, MapFormatError> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .peekable();

        let declared = match lines.peek() {
            Some(first) if first.starts_with(|ch: char| ch.is_ascii_digit()) => {
                let dims = parse_header(first)?;
                lines.next();
                Some(dims)
            }
            _ => None,
        };

        let mut width: Option<usize> = None;
        let mut height = 0;
        let mut islands = BTreeSet::new();
        for (row, line) in lines.enumerate() {
            let found = line.chars().count();
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(MapFormatError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    'X' | 'x' => {
                        islands.insert(Coord::new(col as i32, row as i32));
                    }
                    '.' => {}
                    other => {
                        return Err(MapFormatError::UnexpectedChar {
                            row,
                            col,
                            ch: other,
                        })
                    }
                }
            }
            height = row + 1;
        }

        let width = width.ok_or(MapFormatError::Empty)?;
        if let Some(declared) = declared {
            if declared != (width, height) {
                return Err(MapFormatError::DimensionMismatch {
                    declared,
                    found: (width, height),
                });
            }
        }
        Self::new(width, height, islands)
    }

    /// Read and parse a map file.
    #[cfg(feature = "std")]
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, MapFormatError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| MapFormatError::Io(e.to_string()))?;
        Self::parse(&text)
    }

    /// Grow up to `islands` random island blobs over an open map.
    pub fn generate_random<R: Rng + ?Sized>(
        rng: &mut R,
        width: usize,
        height: usize,
        islands: usize,
    ) -> Result<Self, MapFormatError> {
        cell_count(width, height)?;
        let mut cells: BTreeSet<Coord> = BTreeSet::new();
        let mut placed = 0;
        let mut attempts = 0;
        let max_attempts = islands.saturating_mul(20);

        while placed < islands && attempts < max_attempts {
            attempts += 1;
            let start = Coord::new(
                rng.random_range(0..width) as i32,
                rng.random_range(0..height) as i32,
            );
            if cells.contains(&start) {
                continue;
            }
            let size = rng.random_range(MIN_ISLAND_SIZE..=MAX_ISLAND_SIZE);
            cells.insert(start);
            let mut grown = 1;
            let mut frontier: Vec<Coord> = start
                .neighbours()
                .filter(|&n| within(n, width, height) && !cells.contains(&n))
                .collect();

            while grown < size && !frontier.is_empty() {
                let next = frontier.swap_remove(rng.random_range(0..frontier.len()));
                if !cells.insert(next) {
                    continue;
                }
                grown += 1;
                for n in next.neighbours() {
                    if within(n, width, height) && !cells.contains(&n) && !frontier.contains(&n) {
                        frontier.push(n);
                    }
                }
            }
            placed += 1;
        }

        Self::new(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn islands(&self) -> &BTreeSet<Coord> {
        &self.islands
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        within(c, self.width, self.height)
    }

    pub fn is_island(&self, c: Coord) -> bool {
        self.islands.contains(&c)
    }

    /// True iff the cell is an island or outside the grid.
    pub fn is_blocked(&self, c: Coord) -> bool {
        !self.in_bounds(c) || self.is_island(c)
    }

    /// Open water cells in row-major order.
    pub fn open_cells(&self) -> impl DoubleEndedIterator<Item = Coord> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Coord::new(x, y)))
            .filter(move |&c| !self.is_island(c))
    }

    /// 1-based sector number, counting square sectors row by row.
    pub fn sector_of(&self, c: Coord) -> Option<u32> {
        if !self.in_bounds(c) {
            return None;
        }
        let cols = self.width.div_ceil(SECTOR_SIZE);
        let row = c.y as usize / SECTOR_SIZE;
        let col = c.x as usize / SECTOR_SIZE;
        Some((row * cols + col + 1) as u32)
    }

    /// Render the map, letting `overlay` replace the character of any cell.
    pub fn render<F>(&self, overlay: F) -> String
    where
        F: Fn(Coord) -> Option<char>,
    {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height as i32 {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..self.width as i32 {
                let c = Coord::new(x, y);
                let ch = overlay(c).unwrap_or(if self.is_island(c) { 'X' } else { '.' });
                out.push(ch);
            }
        }
        out
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|_| None))
    }
}

fn parse_header(line: &str) -> Result<(usize, usize), MapFormatError> {
    let invalid = || MapFormatError::InvalidHeader(line.to_string());
    let (w, h) = line.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: usize = w.trim().parse().map_err(|_| invalid())?;
    let height: usize = h.trim().parse().map_err(|_| invalid())?;
    cell_count(width, height)?;
    Ok((width, height))
}
