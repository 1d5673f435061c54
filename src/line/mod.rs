// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

use std::fmt;
use std::rc::Rc;
use std::cell::RefCell;

use super::util::{Direction, Direction::*};
use super::board::{Board, LineView};
use super::cell::{CellStatus, CellChange};
use super::clue::Clue;
use super::error::{InputError, InputResult, SolveResult};

// One row or column of a puzzle: a directional view onto the shared board
// plus the clues that constrain it. `updated` marks that something changed
// since the line's last deduction round (a resolved cell, a moved window, or
// news from a crossing line); `finished` latches once no cell is Unknown.
#[derive(Debug)]
pub struct Line {
    pub direction:  Direction,
    pub index:      usize,
    pub length:     usize,
    pub clues:      Vec<Clue>,
    pub board:      Rc<RefCell<Board>>,
    updated:        bool,
    finished:       bool,
}

impl Line {
    pub fn new(board: &Rc<RefCell<Board>>,
               direction: Direction,
               index: usize,
               clue_lengths: &[usize]) -> InputResult<Line>
    {
        let length = match direction {
            Horizontal => board.borrow().width(),
            Vertical   => board.borrow().height(),
        };
        let clues = Self::_build_clues(clue_lengths, length)?;
        Ok(Line {
            direction,
            index,
            length,
            clues,
            board: Rc::clone(board),
            updated: true,
            finished: false,
        })
    }

    fn _build_clues(clue_lengths: &[usize], line_length: usize) -> InputResult<Vec<Clue>> {
        if line_length == 0 {
            return Err(InputError::EmptyLine);
        }
        if clue_lengths.is_empty() {
            return Err(InputError::NoClues);
        }
        if clue_lengths.contains(&0) && clue_lengths.len() > 1 {
            return Err(InputError::ZeroClueNotAlone);
        }
        // clues + one-cell gaps; a span too big for usize cannot fit any line
        let min_span = clue_lengths.iter()
                                   .try_fold(0usize, |total, &len| total.checked_add(len))
                                   .and_then(|total| total.checked_add(clue_lengths.len() - 1));
        if min_span.map_or(true, |span| span > line_length) {
            return Err(InputError::CluesDoNotFit {
                clues: clue_lengths.to_vec(),
                line_length,
            });
        }
        Ok(clue_lengths.iter()
                       .map(|&len| Clue::new(len, line_length))
                       .collect())
    }

    // Reads a standalone line from its text form and gives it a private
    // single-row board. The cells between the two 'I' delimiters are taken
    // verbatim; a leading or trailing Empty cell counts like any other.
    pub fn parse(text: &str) -> InputResult<Line> {
        if !text.starts_with('I') {
            return Err(InputError::MalformedLine(text.to_string()));
        }
        let rest = &text[1..];
        let close = match rest.find('I') {
            Some(i) => i,
            None => return Err(InputError::MalformedLine(text.to_string())),
        };
        let cells_part = &rest[..close];
        let clues_part = &rest[close+1..];

        let mut statuses = Vec::<CellStatus>::new();
        for c in cells_part.chars() {
            match CellStatus::from_symbol(c) {
                Some(status) => statuses.push(status),
                None => return Err(InputError::BadSymbol(c)),
            }
        }
        let mut clue_lengths = Vec::<usize>::new();
        for token in clues_part.split_whitespace() {
            match token.parse::<usize>() {
                Ok(n) => clue_lengths.push(n),
                Err(_) => return Err(InputError::BadClueNumber(token.to_string())),
            }
        }

        let board = Rc::new(RefCell::new(Board::new(statuses.len(), 1)));
        let line = Line::new(&board, Horizontal, 0, &clue_lengths)?;
        for (at, &status) in statuses.iter().enumerate() {
            if status != CellStatus::Unknown {
                // a fresh board is all Unknown, the write cannot be rejected
                line.get_cell_mut(at).set_status(status)
                    .expect("Could not write into a fresh board");
            }
        }
        Ok(line)
    }

    // Guarded write from outside the line's own deduction; rejected unless
    // the cell is still Unknown.
    pub fn set_status(&mut self, at: usize, status: CellStatus) -> SolveResult<CellChange> {
        let change = self.get_cell_mut(at).set_status(status)?;
        self.updated = true;
        Ok(change)
    }

    // Wakeup from the grid: a crossing line resolved one of our cells.
    pub fn mark_updated(&mut self) {
        self.updated = true;
    }

    pub fn is_updated(&self) -> bool {
        self.updated
    }
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn statuses(&self) -> Vec<CellStatus> {
        (0..self.length).map(|at| self.get_cell(at).get_status())
                        .collect()
    }
    pub fn clue_lengths(&self) -> Vec<usize> {
        self.clues.iter().map(|clue| clue.get_length()).collect()
    }
}

impl LineView for Line {
    fn get_line_index(&self) -> usize { self.index }
    fn get_direction(&self) -> Direction { self.direction }
    fn get_board(&self)     -> &Rc<RefCell<Board>> { &self.board }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "I")?;
        for at in 0..self.length {
            write!(f, "{}", self.get_cell(at).get_status().to_symbol())?;
        }
        write!(f, "I")?;
        for clue in &self.clues {
            write!(f, " {}", clue)?;
        }
        Ok(())
    }
}
