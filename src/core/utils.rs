use crate::core::definitions::Square;

#[derive(Debug)]
pub struct BetweenIterator {
    current: Square,
    target: Square,
    step: (i8, i8),
}

impl Iterator for BetweenIterator {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.current = self.current.offset(self.step.0, self.step.1)?;
        if self.current == self.target {
            None
        } else {
            Some(self.current)
        }
    }
}

/// Squares strictly between `from` and `to`, walking one unit step at a time.
pub fn between(from: Square, to: Square) -> BetweenIterator {
    #[cfg(debug_assertions)]
    if !is_in_diagonal_line(from, to) && !is_in_straight_line(from, to) {
        panic!("Points can't form line to search between them!")
    }
    let step = (
        (to.row as i8 - from.row as i8).signum(),
        (to.col as i8 - from.col as i8).signum(),
    );
    BetweenIterator {
        current: from,
        target: to,
        step,
    }
}

/// Manhattan distance.
pub fn distance(a: Square, b: Square) -> u8 {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// Number of king steps between squares.
pub fn king_distance(a: Square, b: Square) -> u8 {
    a.row.abs_diff(b.row).max(a.col.abs_diff(b.col))
}

pub fn is_in_straight_line(a: Square, b: Square) -> bool {
    a.row == b.row || a.col == b.col
}

pub fn is_in_diagonal_line(a: Square, b: Square) -> bool {
    a.row.abs_diff(b.row) == a.col.abs_diff(b.col)
}

#[rustfmt::skip]
const SQUARE_NAMES: [&str; 64] = [
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
];

pub fn square_name(square: Square) -> &'static str {
    SQUARE_NAMES[(square.row * 8 + square.col) as usize]
}
