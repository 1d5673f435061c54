// vim: set ai et ts=4 sts=4:
use std::fmt;
use std::rc::Rc;
use std::cell::RefCell;
use log::trace;

use super::util::{Direction, Direction::*};
use super::board::Board;
use super::cell::Changes;
use super::line::Line;
use super::error::{InputError, InputResult, SolveResult};

// A full puzzle: one line per row and per column, all sharing one board.
// Rows and columns never talk to each other directly; whenever a pass
// resolves a cell, the line crossing that cell is marked updated so it takes
// another look on the next step.
pub struct Grid {
    pub rows: Vec<Line>,
    pub cols: Vec<Line>,
    pub board: Rc<RefCell<Board>>,
}

impl Grid {
    pub fn new(row_clues: &[Vec<usize>], col_clues: &[Vec<usize>]) -> InputResult<Grid> {
        if row_clues.is_empty() || col_clues.is_empty() {
            return Err(InputError::EmptyGrid);
        }
        let board = Rc::new(RefCell::new(Board::new(col_clues.len(), row_clues.len())));
        let rows = row_clues.iter().enumerate()
                            .map(|(y, lengths)| Line::new(&board, Horizontal, y, lengths))
                            .collect::<InputResult<Vec<_>>>()?;
        let cols = col_clues.iter().enumerate()
                            .map(|(x, lengths)| Line::new(&board, Vertical, x, lengths))
                            .collect::<InputResult<Vec<_>>>()?;
        Ok(Grid { rows, cols, board })
    }

    pub fn width(&self) -> usize { self.board.borrow().width() }
    pub fn height(&self) -> usize { self.board.borrow().height() }

    // One full round: every pending row, then every pending column, then the
    // wakeups. Returns whether any line made progress; once this settles to
    // false it stays false, and the caller stops driving the loop.
    pub fn solve_step(&mut self) -> SolveResult<bool> {
        let (row_changes, rows_worked) = Self::_solve_lines(&mut self.rows)?;
        let (col_changes, cols_worked) = Self::_solve_lines(&mut self.cols)?;
        if !rows_worked && !cols_worked {
            return Ok(false);
        }
        self._synchronize(&row_changes, Vertical);
        self._synchronize(&col_changes, Horizontal);
        Ok(true)
    }

    fn _solve_lines(lines: &mut Vec<Line>) -> SolveResult<(Changes, bool)> {
        let mut changes = Changes::new();
        let mut worked = false;
        for line in lines.iter_mut() {
            if line.is_finished() {
                continue;
            }
            changes.extend(line.solve_step()?);
            if line.is_updated() {
                worked = true;
            }
        }
        Ok((changes, worked))
    }

    // Each resolved cell is news to the line crossing it.
    fn _synchronize(&mut self, changes: &Changes, target: Direction) {
        for change in changes {
            let line = match target {
                Vertical   => &mut self.cols[change.col],
                Horizontal => &mut self.rows[change.row],
            };
            if !line.is_finished() {
                trace!("{} line {} woken by change at (col={}, row={})",
                       target, line.index, change.col, change.row);
                line.mark_updated();
            }
        }
    }

    pub fn is_solved(&self) -> bool {
        self.rows.iter().all(|line| line.is_finished())
            && self.cols.iter().all(|line| line.is_finished())
    }

    pub fn unknown_count(&self) -> usize {
        let board = self.board.borrow();
        (0..board.height())
            .map(|y| (0..board.width()).filter(|&x| board.get_cell(x, y).get_status().is_unknown())
                                       .count())
            .sum()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "rows:")?;
        for line in &self.rows {
            writeln!(f, "  {}", line)?;
        }
        writeln!(f, "cols:")?;
        for line in &self.cols {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}
impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::cell::CellStatus;
    use super::super::error::Error;

    #[test]
    fn construction_sizes_the_board_from_the_clue_lists() {
        let grid = Grid::new(&[vec![1], vec![1], vec![1]], &[vec![1], vec![3]]).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.cols.len(), 2);
        assert_eq!(grid.unknown_count(), 6);
    }

    #[test]
    fn construction_rejects_degenerate_grids() {
        assert_eq!(Grid::new(&[], &[vec![1]]).unwrap_err(), InputError::EmptyGrid);
        assert_eq!(Grid::new(&[vec![1]], &[]).unwrap_err(), InputError::EmptyGrid);
        // per-line validation propagates
        assert_eq!(Grid::new(&[vec![]], &[vec![1]]).unwrap_err(), InputError::NoClues);
        assert_eq!(Grid::new(&[vec![3]], &[vec![1], vec![1]]).unwrap_err(),
                   InputError::CluesDoNotFit { clues: vec![3], line_length: 2 });
    }

    #[test]
    fn single_cell_grid_solves_in_one_step() {
        let mut grid = Grid::new(&[vec![1]], &[vec![1]]).unwrap();
        assert_eq!(grid.solve_step(), Ok(true));
        assert!(grid.is_solved());
        assert_eq!(grid.solve_step(), Ok(false));
        assert!(grid.board.borrow().get_cell(0, 0).get_status().is_filled());
    }

    #[test]
    fn row_knowledge_wakes_the_columns() {
        // the full row resolves first; the columns only learn through the
        // shared board and the wakeups that follow
        let mut grid = Grid::new(&[vec![2], vec![0]], &[vec![1], vec![1]]).unwrap();
        let mut steps = 0;
        while grid.solve_step().unwrap() {
            steps += 1;
            assert!(steps < 10);
        }
        assert!(grid.is_solved());
        assert_eq!(grid.rows[0].to_string(), "I##I 2");
        assert_eq!(grid.rows[1].to_string(), "I  I 0");
        assert_eq!(grid.cols[0].statuses(), vec![CellStatus::Filled, CellStatus::Empty]);
        assert_eq!(grid.cols[1].statuses(), vec![CellStatus::Filled, CellStatus::Empty]);
    }

    #[test]
    fn stalled_grids_settle_to_false_and_stay_there() {
        // 2x2 with a single 1 everywhere is ambiguous under line deduction
        let clues = vec![vec![1], vec![1]];
        let mut grid = Grid::new(&clues, &clues).unwrap();
        while grid.solve_step().unwrap() {}
        assert!(!grid.is_solved());
        assert_eq!(grid.unknown_count(), 4);
        // the fixed point is stable
        assert_eq!(grid.solve_step(), Ok(false));
        assert_eq!(grid.solve_step(), Ok(false));
    }

    #[test]
    fn conflicting_clue_sets_surface_a_contradiction() {
        // columns want every cell filled, rows allow one per row
        let mut grid = Grid::new(&[vec![1], vec![1]], &[vec![2], vec![2]]).unwrap();
        let mut result = Ok(true);
        for _ in 0..10 {
            result = grid.solve_step();
            match result {
                Ok(true) => continue,
                _ => break,
            }
        }
        match result {
            Err(Error::Contradiction(_)) => {}
            other => panic!("expected a contradiction, got {:?}", other),
        }
    }

    #[test]
    fn display_dumps_every_line() {
        let grid = Grid::new(&[vec![1], vec![1]], &[vec![1], vec![1]]).unwrap();
        let dump = grid.to_string();
        assert!(dump.contains("rows:"));
        assert!(dump.contains("cols:"));
        assert_eq!(dump.matches("I??I 1").count(), 4);
    }
}
