// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::rc::Rc;
use std::cell::{Ref, RefMut, RefCell};
use super::util::{Direction, Direction::*};
use super::cell::Cell;

// The single backing store for a puzzle. Rows and columns are views onto
// this matrix, so a cell resolved through one orientation is immediately
// visible through the other.
#[derive(Clone)]
pub struct Board {
    pub cells: Vec<Vec<Cell>>,
}
impl Board {
    pub fn new(width: usize, height: usize)
        -> Self
    {
        Board {
            cells: (0..height).map(|y| (0..width).map(|x| Cell::new(x, y))
                                                 .collect::<Vec<_>>())
                              .collect(),
        }
    }

    pub fn width(&self) -> usize { self.cells[0].len() }
    pub fn height(&self) -> usize { self.cells.len() }
    pub fn get_cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[y][x]
    }
    pub fn get_cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        &mut self.cells[y][x]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(w={}, h={})", self.width(), self.height())
    }
}

// ------------------------------------------------

pub trait LineView
{
    fn get_line_index(&self) -> usize;
    fn get_direction(&self) -> Direction;
    fn get_board(&self) -> &Rc<RefCell<Board>>;

    fn cell_position(&self, at: usize) -> (usize, usize) {
        match self.get_direction() {
            Horizontal => (at, self.get_line_index()),
            Vertical   => (self.get_line_index(), at),
        }
    }
    fn get_cell(&self, at: usize) -> Ref<Cell> {
        let board = self.get_board().borrow();
        let (x,y) = self.cell_position(at);
        Ref::map(board, |b| b.get_cell(x, y))
    }
    fn get_cell_mut(&self, at: usize) -> RefMut<Cell> {
        let board = self.get_board().borrow_mut();
        let (x,y) = self.cell_position(at);
        RefMut::map(board, |b| b.get_cell_mut(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::cell::CellStatus;

    struct TestView {
        index: usize,
        direction: Direction,
        board: Rc<RefCell<Board>>,
    }
    impl LineView for TestView {
        fn get_line_index(&self) -> usize { self.index }
        fn get_direction(&self) -> Direction { self.direction }
        fn get_board(&self) -> &Rc<RefCell<Board>> { &self.board }
    }

    #[test]
    fn views_map_offsets_by_direction() {
        let board = Rc::new(RefCell::new(Board::new(4, 3)));
        let row = TestView { index: 2, direction: Horizontal, board: Rc::clone(&board) };
        let col = TestView { index: 1, direction: Vertical,   board: Rc::clone(&board) };

        assert_eq!(row.cell_position(3), (3, 2));
        assert_eq!(col.cell_position(2), (1, 2));
        assert_eq!(row.get_cell(3).get_col(), 3);
        assert_eq!(col.get_cell(2).get_row(), 2);
    }

    #[test]
    fn views_share_the_board() {
        let board = Rc::new(RefCell::new(Board::new(2, 2)));
        let row = TestView { index: 0, direction: Horizontal, board: Rc::clone(&board) };
        let col = TestView { index: 1, direction: Vertical,   board: Rc::clone(&board) };

        row.get_cell_mut(1).set_status(CellStatus::Filled).unwrap();
        // same cell, seen from the crossing view
        assert!(col.get_cell(0).get_status().is_filled());
    }
}
