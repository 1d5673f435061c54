// vim: set ai et ts=4 sts=4 sw=4:
use log::trace;

use super::Line;
use super::super::board::LineView;
use super::super::cell::{CellStatus, Changes};
use super::super::clue::WindowFailure;
use super::super::error::{Error, Contradiction, SolveResult};

impl Line {
    // One deduction round. Does nothing unless the line saw a change since
    // its last round; afterwards `is_updated` tells whether this round made
    // progress (a moved window counts, not just resolved cells). Resolved
    // cells are returned so the grid can wake the crossing lines.
    pub fn solve_step(&mut self) -> SolveResult<Changes> {
        if self.finished {
            // nothing is ever pending on a finished line
            self.updated = false;
            return Ok(Changes::new());
        }
        if !self.updated {
            return Ok(Changes::new());
        }
        self.updated = false;

        let mut changes = Changes::new();
        self.narrow_windows()?;
        self.attribute_filled_cells()?;
        self.fill_overlaps(&mut changes)?;
        self.mark_unreachable_cells(&mut changes)?;
        self.update_finished();

        if self.updated {
            trace!("{} line {}: round resolved {} cell(s): {}",
                   self.direction, self.index, changes.len(), self);
        }
        Ok(changes)
    }

    // Tighten every clue's window against the current cell statuses: a
    // forward pass keeping each clue one gap behind its predecessor, then a
    // backward pass keeping it one gap ahead of its successor.
    fn narrow_windows(&mut self) -> SolveResult<()> {
        let statuses = self.statuses();
        for k in 0..self.clues.len() {
            let (front, rest) = self.clues.split_at_mut(k);
            match rest[0].narrow_lowest(front.last(), &statuses) {
                Ok(moved)    => { if moved { self.updated = true; } }
                Err(failure) => return Err(self._no_window(k, failure)),
            }
        }
        for k in (0..self.clues.len()).rev() {
            let (front, back) = self.clues.split_at_mut(k+1);
            match front[k].narrow_highest(back.first(), &statuses) {
                Ok(moved)    => { if moved { self.updated = true; } }
                Err(failure) => return Err(self._no_window(k, failure)),
            }
        }
        Ok(())
    }

    // Every filled cell must belong to some clue. A filled cell no window
    // can reach proves the puzzle wrong; one that exactly one window can
    // reach pins that clue down.
    fn attribute_filled_cells(&mut self) -> SolveResult<()> {
        for at in 0..self.length {
            if !self.get_cell(at).get_status().is_filled() {
                continue;
            }
            let candidates = self.clues.iter().enumerate()
                                       .filter(|(_, clue)| clue.can_contain(at))
                                       .map(|(k, _)| k)
                                       .collect::<Vec<_>>();
            if candidates.is_empty() {
                return Err(Error::Contradiction(Contradiction::FilledOutsideClues {
                    direction: self.direction,
                    line_index: self.index,
                    at,
                    line: self.to_string(),
                }));
            }
            if candidates.len() == 1 {
                if self.clues[candidates[0]].must_contain(at) {
                    self.updated = true;
                }
            }
            // several candidates: nothing to conclude for this cell yet
        }
        Ok(())
    }

    // Fill the cells every remaining placement agrees on, then check whether
    // a window has become exact.
    fn fill_overlaps(&mut self, changes: &mut Changes) -> SolveResult<()> {
        for k in 0..self.clues.len() {
            if self.clues[k].is_placed() {
                continue;
            }
            if self.clues[k].fill_forced_cells(self, changes)? {
                self.updated = true;
            }
            self.clues[k] = self.clues[k].check_placed();
        }
        Ok(())
    }

    // An Unknown cell that no clue's window covers can only be Empty.
    fn mark_unreachable_cells(&mut self, changes: &mut Changes) -> SolveResult<()> {
        for at in 0..self.length {
            if !self.get_cell(at).get_status().is_unknown() {
                continue;
            }
            if self.clues.iter().any(|clue| clue.can_contain(at)) {
                continue;
            }
            let change = self.get_cell_mut(at).set_status(CellStatus::Empty)?;
            changes.push(change);
            self.updated = true;
        }
        Ok(())
    }

    fn update_finished(&mut self) {
        self.finished = (0..self.length).all(|at| !self.get_cell(at).get_status().is_unknown());
    }

    fn _no_window(&self, clue_index: usize, failure: WindowFailure) -> Error {
        Error::Contradiction(Contradiction::NoWindowForClue {
            direction: self.direction,
            line_index: self.index,
            clue_index,
            length: failure.length,
            lowest_start: failure.lowest_start,
            highest_end: failure.highest_end,
            line: self.to_string(),
        })
    }
}
