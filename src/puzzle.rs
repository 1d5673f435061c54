// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::convert::TryFrom;
use yaml_rust::Yaml;
use ansi_term::ANSIString;
use log::debug;

use super::grid::Grid;
use super::util::{ralign, lalign_colored, ralign_joined_coloreds};
use super::error::{InputError, InputResult, SolveResult};

#[derive(Debug)]
pub struct Puzzle {
    pub grid: Grid,
}

impl Puzzle {
    pub fn new(row_clues: &[Vec<usize>], col_clues: &[Vec<usize>]) -> InputResult<Puzzle> {
        Ok(Puzzle {
            grid: Grid::new(row_clues, col_clues)?,
        })
    }
    pub fn width(&self) -> usize { self.grid.width() }
    pub fn height(&self) -> usize { self.grid.height() }

    pub fn from_yaml(doc: &Yaml) -> InputResult<Puzzle>
    {
        let row_clues = Self::_parse_clue_lists(&doc["rows"], "rows")?;
        let col_clues = Self::_parse_clue_lists(&doc["cols"], "cols")?;
        Puzzle::new(&row_clues, &col_clues)
    }

    fn _parse_clue_lists(input: &Yaml, key: &str) -> InputResult<Vec<Vec<usize>>> {
        let list = match input.as_vec() {
            Some(list) => list,
            None => return Err(InputError::BadPuzzleYaml(format!("expected a list under '{}'", key))),
        };
        list.iter()
            .map(|entry| Self::_parse_line_clues(entry))
            .collect()
    }

    fn _parse_line_clues(input: &Yaml) -> InputResult<Vec<usize>> {
        match input {
            Yaml::String(s) => {
                s.split_whitespace()
                 .map(|token| token.parse::<usize>()
                                   .map_err(|_| InputError::BadClueNumber(token.to_string())))
                 .collect()
            }
            Yaml::Integer(n) => {
                let n = usize::try_from(*n).map_err(|_| InputError::BadClueNumber(n.to_string()))?;
                Ok(vec![n])
            }
            // an unclued entry stands for a line with no filled cells
            Yaml::Null => Ok(vec![0]),
            _ => Err(InputError::BadPuzzleYaml(format!("unexpected clue entry: {:?}", input))),
        }
    }

    // Drives solve_step to its fixed point and reports the number of rounds
    // that made progress. Solved or stalled is the caller's question to ask
    // afterwards; an error means the puzzle itself is broken.
    pub fn solve(&mut self) -> SolveResult<usize> {
        let mut rounds = 0;
        while self.grid.solve_step()? {
            rounds += 1;
            debug!("round {}: {} unknown cell(s) left", rounds, self.grid.unknown_count());
        }
        Ok(rounds)
    }
}

impl Puzzle {
    // helper functions for Puzzle::render
    pub fn render(&self, emit_color: bool, subdivision: Option<usize>)
        -> String
    {
        // if subdivision is given, a separator line crosses the board every Nth row/col
        let row_prefixes: Vec<Vec<ANSIString>> =
            self.grid.rows.iter()
                     .map(|line| line.clues.iter()
                                      .map(|clue| clue.to_colored_string())
                                      .collect::<Vec<_>>())
                     .collect();

        let prefix_len = row_prefixes.iter()
                                     .map(|parts| parts.iter()
                                                       .fold(0, |sum, ansi_str| sum + ansi_str.len() + 1)
                                                  -1) // minus one at the end to match the length of a join(" ")
                                     .max().unwrap_or(0);
        let max_col_clues = self.grid.cols.iter()
                                     .map(|line| line.clues.len())
                                     .max().unwrap_or(0);

        let mut result = String::new();
        let board = self.grid.board.borrow();

        for i in (0..max_col_clues).rev() {
            result.push_str(&self._fmt_header(i, prefix_len, subdivision, emit_color));
        }

        // top board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{2554}",
            "\u{2557}",
            "\u{2564}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        for y in 0..self.height() {
            // board content line
            result.push_str(&Self::_fmt_line(
                &ralign_joined_coloreds(&row_prefixes[y], prefix_len, emit_color),
                "\u{2551}",
                "\u{2551}",
                "\u{2502}",
                subdivision,
                &board.cells[y].iter()
                               .map(|cell| format!(" {:1} ", cell))
                               .collect::<Vec<_>>()
            ));

            // horizontal subdivisor line
            if let Some(subdiv) = subdivision {
                if ((y+1) % subdiv == 0) && (y != self.height()-1) {
                    result.push_str(&Self::_fmt_line(
                        &ralign("", prefix_len),
                        "\u{255F}",
                        "\u{2562}",
                        "\u{253C}",
                        subdivision,
                        &(0..self.width()).map(|_| String::from("\u{2500}\u{2500}\u{2500}"))
                                          .collect::<Vec<_>>()
                    ));
                }
            }
        }
        // bottom board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{255A}",
            "\u{255D}",
            "\u{2567}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        return result;
    }

    fn _fmt_line(prefix: &str,
                 left_delim: &str,
                 right_delim: &str,
                 column_separator: &str,
                 subdivision: Option<usize>,
                 content_parts: &[String])
        -> String
    {
        let mut result = format!("{} {}", prefix, left_delim);
        for (idx, s) in content_parts.iter().enumerate() {
            result.push_str(s);
            if let Some(subdiv) = subdivision {
                if ((idx+1) % subdiv == 0) && (idx < content_parts.len()-1) {
                    result.push_str(column_separator);
                }
            }
        }
        result.push_str(&format!("{}\n", right_delim));
        return result;
    }

    fn _fmt_header(&self, line_idx: usize,
                          prefix_len: usize,
                          subdivision: Option<usize>,
                          emit_color: bool)
        -> String
    {
        // column clues are drawn bottom-aligned above the board
        let mut content_parts = Vec::<String>::new();
        for col in &self.grid.cols {
            let part: String;
            if line_idx < col.clues.len() {
                let colored = col.clues[col.clues.len()-1-line_idx].to_colored_string();
                part = format!(" {}", lalign_colored(&colored, 2, emit_color));
            } else {
                part = format!(" {:-2}", " ");
            }

            content_parts.push(part);
        }

        Self::_fmt_line(
            &ralign("", prefix_len),
            " ",
            " ",
            " ",
            subdivision,
            &content_parts
        )
    }
}
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(false, Some(5)))
    }
}
