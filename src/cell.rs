// vim: set ai et ts=4 sts=4:
use std::fmt;
use super::util::fmt_location;
use super::error::InvariantViolation;

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum CellStatus {
    Unknown,
    Filled,
    Empty,
}
impl CellStatus {
    pub fn is_unknown(&self) -> bool { *self == CellStatus::Unknown }
    pub fn is_filled(&self)  -> bool { *self == CellStatus::Filled }
    pub fn is_empty(&self)   -> bool { *self == CellStatus::Empty }

    // symbols of the "I<cells>I ..." text form
    pub fn to_symbol(&self) -> char {
        match self {
            CellStatus::Unknown => '?',
            CellStatus::Filled  => '#',
            CellStatus::Empty   => ' ',
        }
    }
    pub fn from_symbol(c: char) -> Option<CellStatus> {
        match c {
            '?' => Some(CellStatus::Unknown),
            '#' => Some(CellStatus::Filled),
            ' ' => Some(CellStatus::Empty),
            _   => None,
        }
    }
}
impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            CellStatus::Unknown => "Unknown",
            CellStatus::Filled  => "Filled",
            CellStatus::Empty   => "Empty",
        })
    }
}

// ------------------------------------------------

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    pub status: CellStatus,
}
impl CellChange {
    pub fn new(row: usize, col: usize, status: CellStatus) -> Self {
        Self { row, col, status }
    }
}
impl fmt::Display for CellChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Change: cell {} was resolved to {}",
            fmt_location(self.row, self.col),
            self.status)
    }
}
pub type Changes = Vec<CellChange>;

// ------------------------------------------------

#[derive(Debug, Clone)]
pub struct Cell {
    row: usize,
    col: usize,
    status: CellStatus,
}
impl Cell {
    pub fn new(x: usize, y: usize) -> Cell {
        Cell {
            row: y,
            col: x,
            status: CellStatus::Unknown,
        }
    }

    pub fn get_row(&self) -> usize { self.row }
    pub fn get_col(&self) -> usize { self.col }
    pub fn get_status(&self) -> CellStatus { self.status }

    // a cell resolves exactly once: Unknown -> Filled or Unknown -> Empty;
    // every other write is a conflict, a repeat of the same value included
    pub fn set_status(&mut self, new_status: CellStatus) -> Result<CellChange, InvariantViolation> {
        if self.status != CellStatus::Unknown || new_status == CellStatus::Unknown {
            return Err(InvariantViolation::ChangeRejected {
                row: self.row,
                col: self.col,
                current: self.status,
                attempted: new_status,
            });
        }
        self.status = new_status;
        Ok(CellChange::new(self.row, self.col, new_status))
    }

    pub fn fmt_visual(&self) -> &str {
        match self.status {
            CellStatus::Empty   => " ",
            CellStatus::Filled  => "\u{25A0}",
            CellStatus::Unknown => ".",
        }
    }
}
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fmt_visual())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for &status in &[CellStatus::Unknown, CellStatus::Filled, CellStatus::Empty] {
            assert_eq!(CellStatus::from_symbol(status.to_symbol()), Some(status));
        }
        assert_eq!(CellStatus::from_symbol('x'), None);
        assert_eq!(CellStatus::from_symbol('I'), None);
    }

    #[test]
    fn status_helpers() {
        assert!(CellStatus::Unknown.is_unknown());
        assert!(CellStatus::Filled.is_filled());
        assert!(CellStatus::Empty.is_empty());
        assert!(!CellStatus::Filled.is_unknown());
    }

    #[test]
    fn first_write_resolves_the_cell() {
        let mut cell = Cell::new(3, 1);
        assert_eq!(cell.get_col(), 3);
        assert_eq!(cell.get_row(), 1);
        let change = cell.set_status(CellStatus::Filled).unwrap();
        assert_eq!(change, CellChange::new(1, 3, CellStatus::Filled));
        assert_eq!(cell.get_status(), CellStatus::Filled);
    }

    #[test]
    fn second_write_is_rejected_even_with_the_same_value() {
        let mut cell = Cell::new(0, 0);
        cell.set_status(CellStatus::Empty).unwrap();
        let err = cell.set_status(CellStatus::Empty).unwrap_err();
        assert_eq!(err, InvariantViolation::ChangeRejected {
            row: 0, col: 0,
            current: CellStatus::Empty,
            attempted: CellStatus::Empty,
        });
        // the cell keeps its first resolution
        assert_eq!(cell.get_status(), CellStatus::Empty);
    }

    #[test]
    fn unknown_is_not_writable() {
        let mut cell = Cell::new(2, 2);
        assert!(cell.set_status(CellStatus::Unknown).is_err());
        assert!(cell.get_status().is_unknown());
    }
}
