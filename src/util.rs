// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::os::unix::io::AsRawFd;
use ansi_term::ANSIString;

pub fn maybe_color(s: &ANSIString, emit_color: bool) -> String {
    if emit_color {
        s.to_string()
    } else {
        String::from(&**s) // double deref drops the styling, keeping only the text
    }
}
pub fn ralign(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}
pub fn lalign_colored(s: &ANSIString, width: usize, emit_color: bool)
    -> String
{
    let pad = width.saturating_sub(s.len()); // ANSIString.len() excludes the escape sequences
    let mut out = maybe_color(s, emit_color);
    for _ in 0..pad {
        out.push(' ');
    }
    out
}
pub fn ralign_joined_coloreds(strs: &[ANSIString], width: usize, emit_color: bool)
    -> String
{
    // each entry costs its visual length plus one joining space, except the last
    let visual_len = strs.iter()
                         .map(|ansi_str| ansi_str.len() + 1)
                         .sum::<usize>()
                         .saturating_sub(1);
    let mut out = String::new();
    for _ in visual_len..width {
        out.push(' ');
    }
    for (k, ansi_str) in strs.iter().enumerate() {
        if k > 0 {
            out.push(' ');
        }
        out.push_str(&maybe_color(ansi_str, emit_color));
    }
    out
}

pub fn fmt_location(row: usize, col: usize) -> String {
    format!("(col={:-2}, row={:-2})", col, row)
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
}
impl fmt::Display for Direction {
    fn fmt(&self,
           f: &mut fmt::Formatter) -> fmt::Result
    {
        match self {
            Direction::Horizontal => write!(f, "Horizontal"),
            Direction::Vertical   => write!(f, "Vertical"),
        }
    }
}

pub fn is_a_tty<T: AsRawFd>(handle: T) -> bool {
    unsafe { libc::isatty(handle.as_raw_fd()) != 0 }
}
