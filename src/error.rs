// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use super::util::{Direction, fmt_location};
use super::cell::CellStatus;

// Rejections of the puzzle description itself, before any solving starts.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum InputError {
    NoClues,                                              // a line must carry at least one clue
    EmptyLine,                                            // lines of length zero make no sense
    ZeroClueNotAlone,                                     // a 0 clue stands for an empty line and must be its only clue
    CluesDoNotFit { clues: Vec<usize>, line_length: usize },
    EmptyGrid,                                            // no rows or no columns
    MalformedLine(String),                                // text form isn't "I<cells>I <clue> <clue> ..."
    BadSymbol(char),
    BadClueNumber(String),
    BadPuzzleYaml(String),
}
impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InputError: {}", match self {
            InputError::NoClues =>
                "a line needs at least one clue".to_string(),
            InputError::EmptyLine =>
                "a line needs at least one cell".to_string(),
            InputError::ZeroClueNotAlone =>
                "a 0 clue must be the only clue of its line".to_string(),
            InputError::CluesDoNotFit { clues, line_length } =>
                format!("clues {:?} cannot fit in a line of length {}", clues, line_length),
            InputError::EmptyGrid =>
                "a grid needs at least one row and one column".to_string(),
            InputError::MalformedLine(text) =>
                format!("malformed line {:?}, expected \"I<cells>I <clue> <clue> ...\"", text),
            InputError::BadSymbol(c) =>
                format!("invalid cell symbol {:?}, expected '?', '#' or ' '", c),
            InputError::BadClueNumber(token) =>
                format!("invalid clue number {:?}", token),
            InputError::BadPuzzleYaml(msg) =>
                format!("invalid puzzle document: {}", msg),
        })
    }
}

// The solver tried to resolve a cell that is no longer open; whichever pass
// gets there second trips this, including writes arriving through the
// crossing line.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum InvariantViolation {
    ChangeRejected {
        row: usize,
        col: usize,
        current: CellStatus,
        attempted: CellStatus,
    },
}
impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvariantViolation: {}", match self {
            InvariantViolation::ChangeRejected { row, col, current, attempted } =>
                format!("in cell {}, attempt to set status {} was rejected: status is already {}",
                    fmt_location(*row, *col), attempted, current),
        })
    }
}

// The puzzle admits no solution; the offending line is reported in its text
// form as it stood when the dead end was found.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Contradiction {
    NoWindowForClue {
        direction: Direction,
        line_index: usize,
        clue_index: usize,
        length: usize,
        lowest_start: usize,
        highest_end: usize,
        line: String,
    },
    FilledOutsideClues {
        direction: Direction,
        line_index: usize,
        at: usize,
        line: String,
    },
}
impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Contradiction: {}", match self {
            Contradiction::NoWindowForClue { direction, line_index, clue_index, length,
                                             lowest_start, highest_end, line } =>
                format!("no remaining window for clue #{} of length {} in {} line {}, bounds were [{}, {}]: {}",
                    clue_index+1, length, direction, line_index, lowest_start, highest_end, line),
            Contradiction::FilledOutsideClues { direction, line_index, at, line } =>
                format!("filled cell at offset {} in {} line {} belongs to no clue: {}",
                    at, direction, line_index, line),
        })
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Error {
    Invariant(InvariantViolation),
    Contradiction(Contradiction),
}
impl From<InvariantViolation> for Error {
    fn from(other: InvariantViolation) -> Self {
        Error::Invariant(other)
    }
}
impl From<Contradiction> for Error {
    fn from(other: Contradiction) -> Self {
        Error::Contradiction(other)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Error::Invariant(x)     => x.to_string(),
            Error::Contradiction(x) => x.to_string(),
        })
    }
}

pub type InputResult<T> = Result<T, InputError>;
pub type SolveResult<T> = Result<T, Error>;
