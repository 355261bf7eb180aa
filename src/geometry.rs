use std::fmt::{self, Debug, Display};
use std::iter::successors;

pub const SQUARE_COUNT: u8 = 64;

/// A board cell numbered 1 to 64.
///
/// Numbering runs along the rank from the h-file to the a-file and then up a rank, so square 1 is h1,
/// 8 is a1, 57 is h8 and 64 is a8. Row 0 is rank 1 and column 0 is the h-file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const fn new(value: u8) -> Option<Square> {
        if value >= 1 && value <= SQUARE_COUNT {
            Some(Square(value))
        } else {
            None
        }
    }

    /// Only for compile time tables where the value is known to be in range.
    pub(crate) const fn from_const(value: u8) -> Square {
        assert!(value >= 1 && value <= SQUARE_COUNT);
        Square(value)
    }

    pub const fn from_row_col(row: u8, col: u8) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col + 1))
        } else {
            None
        }
    }

    /// `file` is an ASCII letter `a`..=`h` and `rank` an ASCII digit `1`..=`8`.
    pub const fn from_algebraic(file: u8, rank: u8) -> Option<Square> {
        match (file_to_col(file), rank_to_row(rank)) {
            (Some(col), Some(row)) => Square::from_row_col(row, col),
            _ => None,
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn row(self) -> u8 {
        (self.0 - 1) / 8
    }

    pub const fn col(self) -> u8 {
        (self.0 - 1) % 8
    }

    pub const fn file_char(self) -> char {
        (b'a' + 7 - self.col()) as char
    }

    pub const fn rank_char(self) -> char {
        (b'1' + self.row()) as char
    }

    /// Moves by whole rows (toward rank 8 when positive) and columns (toward the a-file when positive).
    pub fn offset(self, rows: i8, cols: i8) -> Option<Square> {
        let row = self.row() as i8 + rows;
        let col = self.col() as i8 + cols;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Square::from_row_col(row as u8, col as u8)
        } else {
            None
        }
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({} {})", self.0, self)
    }
}

pub const fn file_to_col(file: u8) -> Option<u8> {
    match file {
        b'a'..=b'h' => Some(7 - (file - b'a')),
        _ => None,
    }
}

pub const fn rank_to_row(rank: u8) -> Option<u8> {
    match rank {
        b'1'..=b'8' => Some(rank - b'1'),
        _ => None,
    }
}

/// Compass directions as seen from White's side of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// (row step, column step) in square numbering terms. East is toward the h-file, i.e. the lower column.
    pub const fn step(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::South => (-1, 0),
            Direction::East => (0, -1),
            Direction::West => (0, 1),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (1, 1),
            Direction::SouthEast => (-1, -1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::NorthWest | Direction::SouthEast | Direction::SouthWest
        )
    }

    /// The direction leading from `from` to `to` along a row, column or diagonal, if they share one.
    pub fn between(from: Square, to: Square) -> Option<Direction> {
        let rows = to.row() as i8 - from.row() as i8;
        let cols = to.col() as i8 - from.col() as i8;

        if rows == 0 && cols == 0 {
            return None;
        }
        if rows != 0 && cols != 0 && rows.abs() != cols.abs() {
            return None;
        }

        let direction = match (rows.signum(), cols.signum()) {
            (1, 0) => Direction::North,
            (-1, 0) => Direction::South,
            (0, -1) => Direction::East,
            (0, 1) => Direction::West,
            (1, -1) => Direction::NorthEast,
            (1, 1) => Direction::NorthWest,
            (-1, -1) => Direction::SouthEast,
            _ => Direction::SouthWest,
        };
        Some(direction)
    }
}

/// Every square past `from` in `direction`, nearest first, stopping at the board edge.
pub fn ray(from: Square, direction: Direction) -> impl Iterator<Item = Square> {
    let (rows, cols) = direction.step();
    successors(from.offset(rows, cols), move |s| s.offset(rows, cols))
}

pub fn same_row(a: Square, b: Square) -> bool {
    a.row() == b.row()
}

pub fn same_col(a: Square, b: Square) -> bool {
    a.col() == b.col()
}

fn along(a: Square, b: Square, direction: Direction) -> bool {
    Direction::between(a, b) == Some(direction)
}

/// Either square lies north-east of the other (the 7-step diagonal family).
pub fn ne_diag(a: Square, b: Square) -> bool {
    along(a, b, Direction::NorthEast) || along(b, a, Direction::NorthEast)
}

/// Either square lies north-west of the other (the 9-step diagonal family).
pub fn nw_diag(a: Square, b: Square) -> bool {
    along(a, b, Direction::NorthWest) || along(b, a, Direction::NorthWest)
}

pub fn se_diag(a: Square, b: Square) -> bool {
    along(a, b, Direction::SouthEast) || along(b, a, Direction::SouthEast)
}

pub fn sw_diag(a: Square, b: Square) -> bool {
    along(a, b, Direction::SouthWest) || along(b, a, Direction::SouthWest)
}

pub fn same_diag(a: Square, b: Square) -> bool {
    ne_diag(a, b) || nw_diag(a, b)
}

/// True when `test` sits strictly between `a` and `b` on the line joining them.
pub fn blocked(a: Square, b: Square, test: Square) -> bool {
    if test == a || test == b {
        return false;
    }

    match Direction::between(a, b) {
        Some(direction) => ray(a, direction).take_while(|s| *s != b).any(|s| s == test),
        None => false,
    }
}

pub fn rook_reach(from: Square, to: Square) -> bool {
    from != to && (same_row(from, to) || same_col(from, to))
}

pub fn bishop_reach(from: Square, to: Square) -> bool {
    same_diag(from, to)
}

pub fn knight_reach(from: Square, to: Square) -> bool {
    let rows = (to.row() as i8 - from.row() as i8).abs();
    let cols = (to.col() as i8 - from.col() as i8).abs();

    (rows == 1 && cols == 2) || (rows == 2 && cols == 1)
}

#[cfg(test)]
mod geometry_tests {
    use super::*;

    fn sq(value: u8) -> Square {
        Square::new(value).unwrap()
    }

    fn all_squares() -> impl Iterator<Item = Square> {
        (1..=SQUARE_COUNT).map(sq)
    }

    #[test]
    pub fn algebraic_numbering() {
        assert_eq!(sq(1), Square::from_algebraic(b'h', b'1').unwrap());
        assert_eq!(sq(8), Square::from_algebraic(b'a', b'1').unwrap());
        assert_eq!(sq(12), Square::from_algebraic(b'e', b'2').unwrap());
        assert_eq!(sq(28), Square::from_algebraic(b'e', b'4').unwrap());
        assert_eq!(sq(19), Square::from_algebraic(b'f', b'3').unwrap());
        assert_eq!(sq(64), Square::from_algebraic(b'a', b'8').unwrap());
        assert_eq!(None, Square::from_algebraic(b'i', b'1'));
        assert_eq!(None, Square::from_algebraic(b'a', b'9'));

        for s in all_squares() {
            let text = s.to_string();
            let bytes = text.as_bytes();
            assert_eq!(Some(s), Square::from_algebraic(bytes[0], bytes[1]));
        }
    }

    #[test]
    pub fn out_of_range_squares() {
        assert_eq!(None, Square::new(0));
        assert_eq!(None, Square::new(65));
        assert_eq!(None, sq(1).offset(0, -1));
        assert_eq!(None, sq(64).offset(1, 0));
        assert_eq!(Some(sq(10)), sq(1).offset(1, 1));
    }

    #[test]
    pub fn predicates_are_symmetric() {
        let predicates: [fn(Square, Square) -> bool; 9] = [
            same_row,
            same_col,
            ne_diag,
            nw_diag,
            se_diag,
            sw_diag,
            rook_reach,
            bishop_reach,
            knight_reach,
        ];

        for a in all_squares() {
            for b in all_squares() {
                for p in predicates {
                    assert_eq!(p(a, b), p(b, a), "asymmetric for {a} {b}");
                }
            }
        }
    }

    #[test]
    pub fn diagonal_families() {
        // h1-g2 runs north-west, a1-b2 runs north-east
        assert!(nw_diag(sq(1), sq(10)));
        assert!(se_diag(sq(1), sq(10)));
        assert!(!ne_diag(sq(1), sq(10)));
        assert!(ne_diag(sq(8), sq(15)));
        assert!(sw_diag(sq(8), sq(15)));
        assert!(!nw_diag(sq(8), sq(15)));

        // h1-a8 long diagonal
        assert!(nw_diag(sq(1), sq(64)));
        // no wrapping across the board edge
        assert!(!same_diag(sq(8), sq(17)));
        assert!(!same_diag(sq(9), sq(16)));
        assert!(!same_diag(sq(8), sq(9)));
        assert!(!same_diag(sq(28), sq(28)));
    }

    #[test]
    pub fn blocked_only_strictly_between() {
        // a1 to a8 through a4
        assert!(blocked(sq(8), sq(64), sq(32)));
        assert!(!blocked(sq(8), sq(64), sq(8)));
        assert!(!blocked(sq(8), sq(64), sq(64)));
        assert!(!blocked(sq(8), sq(64), sq(31)));

        // h1 to a8 through e4 but not d4
        assert!(blocked(sq(1), sq(64), sq(28)));
        assert!(blocked(sq(64), sq(1), sq(28)));
        assert!(!blocked(sq(1), sq(64), sq(29)));

        assert!(blocked(sq(1), sq(3), sq(2)));
        assert!(!blocked(sq(1), sq(3), sq(9)));

        // not aligned
        assert!(!blocked(sq(1), sq(12), sq(2)));

        for a in all_squares() {
            for b in all_squares() {
                assert!(!blocked(a, b, a));
                assert!(!blocked(a, b, b));
            }
        }
    }

    #[test]
    pub fn knight_moves_respect_edges() {
        // g1 reaches f3, h3 and e2
        assert!(knight_reach(sq(2), sq(19)));
        assert!(knight_reach(sq(2), sq(17)));
        assert!(knight_reach(sq(2), sq(12)));
        assert!(!knight_reach(sq(2), sq(18)));

        // h1 + 6 would be a2 on the other edge of the board
        assert!(!knight_reach(sq(1), sq(7)));
        assert!(knight_reach(sq(1), sq(11)));

        let from_corner = all_squares().filter(|s| knight_reach(sq(8), *s)).count();
        assert_eq!(2, from_corner);
        let from_centre = all_squares().filter(|s| knight_reach(sq(28), *s)).count();
        assert_eq!(8, from_centre);
    }

    #[test]
    pub fn rays_stop_at_edge() {
        let north: Vec<u8> = ray(sq(28), Direction::North).map(Square::get).collect();
        assert_eq!(vec![36, 44, 52, 60], north);

        let east: Vec<u8> = ray(sq(28), Direction::East).map(Square::get).collect();
        assert_eq!(vec![27, 26, 25], east);

        assert_eq!(0, ray(sq(1), Direction::SouthEast).count());
    }
}
