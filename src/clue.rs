// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::ops::Range;
use std::cmp::{min, max};
use ansi_term::{Colour, Style, ANSIString};

use super::board::LineView;
use super::cell::{CellStatus, Changes};
use super::error::InvariantViolation;

// Window state of a clue at the moment narrowing ran out of room; the line
// turns this into a full contradiction report.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct WindowFailure {
    pub length: usize,
    pub lowest_start: usize,
    pub highest_end: usize,
}

// A clue is a run of `length` consecutive filled cells somewhere in its line.
// While unplaced it carries the inclusive window [lowest_start, highest_end]
// of offsets its cells might still occupy; both bounds only ever tighten.
// Once the window is exactly `length` wide the clue collapses to Placed and
// answers every deduction with "nothing to do".
//
// A 0 clue (an empty line) is Placed from the start with an empty span; it
// never takes part in window or neighbour arithmetic.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Clue {
    Unplaced {
        length: usize,
        lowest_start: usize,
        highest_end: usize,
    },
    Placed {
        length: usize,
        span: Range<usize>,
    },
}

impl Clue {
    pub fn new(length: usize, line_length: usize) -> Clue {
        if length == 0 {
            return Clue::Placed { length: 0, span: 0..0 };
        }
        Clue::Unplaced {
            length,
            lowest_start: 0,
            highest_end: line_length - 1,
        }
    }

    pub fn get_length(&self) -> usize {
        match self {
            Clue::Unplaced { length, .. } => *length,
            Clue::Placed { length, .. }   => *length,
        }
    }
    pub fn is_placed(&self) -> bool {
        match self {
            Clue::Placed { .. } => true,
            _                   => false,
        }
    }
    pub fn lowest_start(&self) -> usize {
        match self {
            Clue::Unplaced { lowest_start, .. } => *lowest_start,
            Clue::Placed { span, .. }           => span.start,
        }
    }
    pub fn highest_end(&self) -> usize {
        match self {
            Clue::Unplaced { highest_end, .. } => *highest_end,
            Clue::Placed { span, .. }          => span.end - 1,
        }
    }
    pub fn lowest_end(&self) -> usize {
        self.lowest_start() + self.get_length() - 1
    }
    pub fn highest_start(&self) -> usize {
        self.highest_end() + 1 - self.get_length()
    }
    pub fn window_size(&self) -> usize {
        self.highest_end() + 1 - self.lowest_start()
    }

    pub fn can_contain(&self, at: usize) -> bool {
        match self {
            Clue::Unplaced { lowest_start, highest_end, .. } =>
                *lowest_start <= at && at <= *highest_end,
            Clue::Placed { span, .. } =>
                span.contains(&at),
        }
    }

    // Slide lowest_start forward to the first offset where this clue still
    // fits: `length` cells none of which is Empty, with no Filled cell
    // directly before or after (it would attach to the run and lengthen it).
    // A predecessor pushes the window right first: one cell of gap after its
    // own earliest end.
    pub fn narrow_lowest(&mut self, prev: Option<&Clue>, statuses: &[CellStatus])
        -> Result<bool, WindowFailure>
    {
        match self {
            Clue::Placed { .. } => Ok(false),
            Clue::Unplaced { length, lowest_start, highest_end } => {
                let mut from = *lowest_start;
                if let Some(prev) = prev {
                    from = max(from, prev.lowest_end() + 2);
                }
                let fit = match _first_fit_forward(statuses, *length, from) {
                    Some(s) => s,
                    None => return Err(WindowFailure {
                        length: *length,
                        lowest_start: from,
                        highest_end: *highest_end,
                    }),
                };
                let moved = fit != *lowest_start;
                *lowest_start = fit;
                if *lowest_start + *length - 1 > *highest_end {
                    return Err(WindowFailure {
                        length: *length,
                        lowest_start: *lowest_start,
                        highest_end: *highest_end,
                    });
                }
                Ok(moved)
            }
        }
    }

    // Mirror image of narrow_lowest: slide highest_end backward, capped one
    // gap below the successor's latest start.
    pub fn narrow_highest(&mut self, next: Option<&Clue>, statuses: &[CellStatus])
        -> Result<bool, WindowFailure>
    {
        match self {
            Clue::Placed { .. } => Ok(false),
            Clue::Unplaced { length, lowest_start, highest_end } => {
                let mut until = *highest_end;
                if let Some(next) = next {
                    until = match next.highest_start().checked_sub(2) {
                        Some(cap) => min(until, cap),
                        None => return Err(WindowFailure {
                            length: *length,
                            lowest_start: *lowest_start,
                            highest_end: *highest_end,
                        }),
                    };
                }
                let fit = match _first_fit_backward(statuses, *length, until) {
                    Some(e) => e,
                    None => return Err(WindowFailure {
                        length: *length,
                        lowest_start: *lowest_start,
                        highest_end: until,
                    }),
                };
                let moved = fit != *highest_end;
                *highest_end = fit;
                if *lowest_start + *length - 1 > *highest_end {
                    return Err(WindowFailure {
                        length: *length,
                        lowest_start: *lowest_start,
                        highest_end: *highest_end,
                    });
                }
                Ok(moved)
            }
        }
    }

    // Cell `at` is known to belong to this clue; only placements covering it
    // survive. Returns whether a bound actually shrank.
    pub fn must_contain(&mut self, at: usize) -> bool {
        match self {
            Clue::Placed { .. } => false,
            Clue::Unplaced { length, lowest_start, highest_end } => {
                let mut shrank = false;
                let cap = at + *length - 1;
                if *highest_end > cap {
                    *highest_end = cap;
                    shrank = true;
                }
                let floor = (at + 1).saturating_sub(*length);
                if *lowest_start < floor {
                    *lowest_start = floor;
                    shrank = true;
                }
                shrank
            }
        }
    }

    // Every placement that is still possible covers the cells between the
    // latest start and the earliest end; those can be filled in right away.
    // The region is empty until the window gets tighter than twice the
    // clue's length.
    pub fn fill_forced_cells<V: LineView>(&self, view: &V, changes: &mut Changes)
        -> Result<bool, InvariantViolation>
    {
        let forced = match self {
            Clue::Placed { .. } => return Ok(false),
            Clue::Unplaced { length, lowest_start, highest_end } =>
                (*highest_end + 1 - *length)..(*lowest_start + *length),
        };
        let mut worked = false;
        for at in forced {
            if view.get_cell(at).get_status().is_filled() {
                continue;
            }
            let change = view.get_cell_mut(at).set_status(CellStatus::Filled)?;
            changes.push(change);
            worked = true;
        }
        Ok(worked)
    }

    pub fn check_placed(&self) -> Clue {
        match self {
            Clue::Placed { .. } => self.clone(),
            Clue::Unplaced { length, lowest_start, highest_end } => {
                if *highest_end + 1 - *lowest_start == *length {
                    Clue::Placed {
                        length: *length,
                        span: *lowest_start..*lowest_start + *length,
                    }
                } else {
                    self.clone()
                }
            }
        }
    }

    pub fn to_colored_string(&self) -> ANSIString {
        let style = match self.is_placed() {
            true  => Style::new().fg(Colour::Fixed(241)),
            false => Style::default(),
        };
        style.paint(self.to_string())
    }
}
impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.get_length())
    }
}

fn _first_fit_forward(statuses: &[CellStatus], length: usize, from: usize) -> Option<usize> {
    let mut s = from;
    while s + length <= statuses.len() {
        // a filled cell directly before the window would attach to the run
        if s > 0 && statuses[s-1].is_filled() {
            s += 1;
            continue;
        }
        // the window itself may not cross an empty cell
        if let Some(blocked) = (s..s+length).rev().find(|&i| statuses[i].is_empty()) {
            s = blocked + 1;
            continue;
        }
        // nor may a filled cell follow directly after
        if s + length < statuses.len() && statuses[s+length].is_filled() {
            s += 1;
            continue;
        }
        return Some(s);
    }
    None
}

fn _first_fit_backward(statuses: &[CellStatus], length: usize, until: usize) -> Option<usize> {
    let mut e = min(until, statuses.len().checked_sub(1)?);
    while e + 1 >= length {
        let start = e + 1 - length;
        if e + 1 < statuses.len() && statuses[e+1].is_filled() {
            if e == 0 { break; }
            e -= 1;
            continue;
        }
        if let Some(blocked) = (start..=e).find(|&i| statuses[i].is_empty()) {
            // the whole window has to move in front of the empty cell
            if blocked == 0 { break; }
            e = blocked - 1;
            continue;
        }
        if start > 0 && statuses[start-1].is_filled() {
            if e == 0 { break; }
            e -= 1;
            continue;
        }
        return Some(e);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(text: &str) -> Vec<CellStatus> {
        text.chars()
            .map(|c| CellStatus::from_symbol(c).unwrap())
            .collect()
    }

    #[test]
    fn new_clue_spans_the_whole_line() {
        let clue = Clue::new(3, 8);
        assert_eq!(clue, Clue::Unplaced { length: 3, lowest_start: 0, highest_end: 7 });
        assert_eq!(clue.window_size(), 8);
        assert_eq!(clue.lowest_end(), 2);
        assert_eq!(clue.highest_start(), 5);
        assert!(!clue.is_placed());
    }

    #[test]
    fn zero_clue_is_placed_from_the_start() {
        let clue = Clue::new(0, 5);
        assert!(clue.is_placed());
        for at in 0..5 {
            assert!(!clue.can_contain(at));
        }
    }

    #[test]
    fn can_contain_respects_the_window() {
        let clue = Clue::Unplaced { length: 2, lowest_start: 2, highest_end: 5 };
        assert!(!clue.can_contain(1));
        assert!(clue.can_contain(2));
        assert!(clue.can_contain(5));
        assert!(!clue.can_contain(6));
    }

    #[test]
    fn narrowing_on_a_blank_line_changes_nothing() {
        let line = statuses("?????");
        let mut clue = Clue::new(3, 5);
        assert_eq!(clue.narrow_lowest(None, &line), Ok(false));
        assert_eq!(clue.narrow_highest(None, &line), Ok(false));
        assert_eq!(clue, Clue::new(3, 5));
    }

    #[test]
    fn narrowing_slides_past_empty_cells() {
        // a length-3 window cannot cross the empty cells at 1 and 3
        let line = statuses("? ? ????");
        let mut clue = Clue::new(3, 8);
        assert_eq!(clue.narrow_lowest(None, &line), Ok(true));
        assert_eq!(clue.lowest_start(), 4);
        assert_eq!(clue.narrow_highest(None, &line), Ok(false));
        assert_eq!(clue.highest_end(), 7);
    }

    #[test]
    fn narrowing_avoids_touching_filled_neighbours() {
        // placing at 0 would leave the filled cell at 2 attached to the run
        let line = statuses("??#??");
        let mut clue = Clue::new(2, 5);
        assert_eq!(clue.narrow_lowest(None, &line), Ok(true));
        assert_eq!(clue.lowest_start(), 1);
        assert_eq!(clue.narrow_highest(None, &line), Ok(true));
        assert_eq!(clue.highest_end(), 3);
    }

    #[test]
    fn predecessor_pushes_the_window_right() {
        let line = statuses("????????");
        let prev = Clue::Unplaced { length: 2, lowest_start: 0, highest_end: 7 };
        let mut clue = Clue::new(3, 8);
        // prev occupies [0,1] at the earliest, so this clue starts at 3 at the earliest
        assert_eq!(clue.narrow_lowest(Some(&prev), &line), Ok(true));
        assert_eq!(clue.lowest_start(), 3);
    }

    #[test]
    fn successor_caps_the_window() {
        let line = statuses("????????");
        let next = Clue::Unplaced { length: 2, lowest_start: 0, highest_end: 7 };
        let mut clue = Clue::new(3, 8);
        // next starts at 6 at the latest, so this clue ends at 4 at the latest
        assert_eq!(clue.narrow_highest(Some(&next), &line), Ok(true));
        assert_eq!(clue.highest_end(), 4);
    }

    #[test]
    fn no_room_at_all_is_a_window_failure() {
        let line = statuses("? ?");
        let mut clue = Clue::new(2, 3);
        let failure = clue.narrow_lowest(None, &line).unwrap_err();
        assert_eq!(failure.length, 2);
    }

    #[test]
    fn crossing_bounds_are_a_window_failure() {
        // forward fit forces start 2, but the window already ends at 2
        let line = statuses("  ????");
        let mut clue = Clue::Unplaced { length: 2, lowest_start: 0, highest_end: 2 };
        assert!(clue.narrow_lowest(None, &line).is_err());
    }

    #[test]
    fn must_contain_clamps_both_bounds() {
        let mut clue = Clue::new(3, 10);
        assert!(clue.must_contain(4));
        assert_eq!(clue.lowest_start(), 2);
        assert_eq!(clue.highest_end(), 6);
        // a second report of the same cell has nothing left to do
        assert!(!clue.must_contain(4));
    }

    #[test]
    fn must_contain_near_the_border_saturates() {
        let mut clue = Clue::new(4, 10);
        assert!(clue.must_contain(1));
        assert_eq!(clue.lowest_start(), 0);
        assert_eq!(clue.highest_end(), 4);
    }

    #[test]
    fn placed_clues_ignore_deduction() {
        let line = statuses("?????");
        let mut clue = Clue::Placed { length: 2, span: 1..3 };
        assert_eq!(clue.narrow_lowest(None, &line), Ok(false));
        assert_eq!(clue.narrow_highest(None, &line), Ok(false));
        assert!(!clue.must_contain(2));
        assert!(clue.can_contain(1));
        assert!(!clue.can_contain(3));
    }

    #[test]
    fn check_placed_collapses_exact_windows() {
        let clue = Clue::Unplaced { length: 3, lowest_start: 2, highest_end: 4 };
        assert_eq!(clue.check_placed(), Clue::Placed { length: 3, span: 2..5 });

        let clue = Clue::Unplaced { length: 3, lowest_start: 2, highest_end: 5 };
        assert_eq!(clue.check_placed(), clue);
    }

    #[test]
    fn first_fit_scans() {
        let line = statuses("??#??");
        assert_eq!(_first_fit_forward(&line, 2, 0), Some(1));
        assert_eq!(_first_fit_backward(&line, 2, 4), Some(3));

        // run of 2 cannot sit on a lone cell between empties
        let line = statuses(" ? ??");
        assert_eq!(_first_fit_forward(&line, 2, 0), Some(3));
        assert_eq!(_first_fit_backward(&line, 2, 4), Some(4));
        assert_eq!(_first_fit_forward(&line, 3, 0), None);
        assert_eq!(_first_fit_backward(&line, 3, 4), None);
    }
}
