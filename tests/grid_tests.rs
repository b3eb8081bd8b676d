use captain_sonar::{Coord, GridMap, MapFormatError, DEFAULT_MAP, MAX_DIMENSION};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn parse_rows_into_islands() {
    let grid = GridMap::parse("..X\n.X.\n...\n").unwrap();
    assert_eq!((grid.width(), grid.height()), (3, 3));
    assert_eq!(grid.islands().len(), 2);
    assert!(grid.is_island(Coord::new(2, 0)));
    assert!(grid.is_island(Coord::new(1, 1)));
    assert!(!grid.is_island(Coord::new(0, 0)));
}

#[test]
fn blocked_means_island_or_off_grid() {
    let grid = GridMap::parse("X.\n..").unwrap();
    assert!(grid.is_blocked(Coord::new(0, 0)));
    assert!(grid.is_blocked(Coord::new(-1, 1)));
    assert!(grid.is_blocked(Coord::new(2, 0)));
    assert!(grid.is_blocked(Coord::new(0, 2)));
    assert!(!grid.is_blocked(Coord::new(1, 1)));
}

#[test]
fn header_must_match_rows() {
    let grid = GridMap::parse("3x2\n...\n.X.").unwrap();
    assert_eq!((grid.width(), grid.height()), (3, 2));

    assert_eq!(
        GridMap::parse("4x2\n...\n...").unwrap_err(),
        MapFormatError::DimensionMismatch {
            declared: (4, 2),
            found: (3, 2)
        }
    );
    assert!(matches!(
        GridMap::parse("3y2\n...").unwrap_err(),
        MapFormatError::InvalidHeader(_)
    ));
    assert_eq!(
        GridMap::parse("0x2\n...").unwrap_err(),
        MapFormatError::InvalidDimensions {
            width: 0,
            height: 2
        }
    );
}

#[test]
fn malformed_rows_are_rejected() {
    assert_eq!(GridMap::parse("").unwrap_err(), MapFormatError::Empty);
    assert_eq!(GridMap::parse("\n  \n").unwrap_err(), MapFormatError::Empty);
    assert_eq!(
        GridMap::parse("...\n..\n").unwrap_err(),
        MapFormatError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2
        }
    );
    assert_eq!(
        GridMap::parse("..\n.#").unwrap_err(),
        MapFormatError::UnexpectedChar {
            row: 1,
            col: 1,
            ch: '#'
        }
    );
    assert_eq!(
        GridMap::parse("XX\nX.").unwrap_err(),
        MapFormatError::TooFewOpenCells
    );
}

#[test]
fn islands_must_lie_on_the_map() {
    assert_eq!(
        GridMap::new(3, 3, [Coord::new(3, 0)]).unwrap_err(),
        MapFormatError::IslandOutOfBounds(Coord::new(3, 0))
    );
}

#[test]
fn display_round_trips_text_map() {
    let text = "..X\n.X.\n...";
    let grid = GridMap::parse(text).unwrap();
    assert_eq!(grid.to_string(), text);
}

#[test]
fn default_map_is_valid() {
    let grid = GridMap::parse(DEFAULT_MAP).unwrap();
    assert_eq!((grid.width(), grid.height()), (15, 15));
    assert!(!grid.is_blocked(Coord::new(0, 0)));
    assert!(!grid.is_blocked(Coord::new(14, 14)));
}

#[test]
fn sectors_are_numbered_row_major() {
    let grid = GridMap::open(15, 15).unwrap();
    assert_eq!(grid.sector_of(Coord::new(0, 0)), Some(1));
    assert_eq!(grid.sector_of(Coord::new(14, 0)), Some(3));
    assert_eq!(grid.sector_of(Coord::new(5, 5)), Some(5));
    assert_eq!(grid.sector_of(Coord::new(14, 14)), Some(9));
    assert_eq!(grid.sector_of(Coord::new(15, 0)), None);
}

#[test]
fn random_maps_are_reproducible_and_in_bounds() {
    let mut rng1 = SmallRng::seed_from_u64(99);
    let mut rng2 = SmallRng::seed_from_u64(99);
    let a = GridMap::generate_random(&mut rng1, 15, 15, 10).unwrap();
    let b = GridMap::generate_random(&mut rng2, 15, 15, 10).unwrap();
    assert_eq!(a, b);
    assert!(!a.islands().is_empty());
    assert!(a.islands().len() <= 10 * 8);
    assert!(a.islands().iter().all(|&c| a.in_bounds(c)));
}

#[test]
fn open_cells_skip_islands() {
    let grid = GridMap::parse("X..\n...").unwrap();
    let cells: Vec<Coord> = grid.open_cells().collect();
    assert_eq!(cells.len(), 5);
    assert_eq!(cells[0], Coord::new(1, 0));
    assert_eq!(cells[4], Coord::new(2, 1));
}

#[test]
fn oversized_dimensions_are_rejected() {
    assert_eq!(
        GridMap::open(usize::MAX, 2).unwrap_err(),
        MapFormatError::InvalidDimensions {
            width: usize::MAX,
            height: 2
        }
    );
    assert!(matches!(
        GridMap::open(2, MAX_DIMENSION + 1).unwrap_err(),
        MapFormatError::InvalidDimensions { .. }
    ));
    let mut rng = SmallRng::seed_from_u64(3);
    assert!(matches!(
        GridMap::generate_random(&mut rng, usize::MAX, usize::MAX, usize::MAX).unwrap_err(),
        MapFormatError::InvalidDimensions { .. }
    ));
    assert!(matches!(
        GridMap::parse("2147483648x2\n..\n..").unwrap_err(),
        MapFormatError::InvalidDimensions { .. }
    ));
}
