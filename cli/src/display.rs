use std::fmt;

use sweeper_core::Board;

/// The board with column indices on top and row indices down the left side.
pub struct Framed<'a>(pub &'a Board);

impl fmt::Display for Framed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0.view();
        let size = view.nrows();
        let width = size.saturating_sub(1).to_string().len();

        write!(f, "{:width$}  ", "")?;
        for col in 0..size {
            write!(f, " {col:>width$}")?;
        }
        writeln!(f)?;

        for (row, cells) in view.rows().into_iter().enumerate() {
            write!(f, "{row:>width$} |")?;
            for cell in cells {
                write!(f, " {:>width$}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
