use std::io::BufRead;

use rolling_common::games::rolling::CELL_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Cell(usize),
    Quit,
}

pub trait HumanInput {
    /// `Ok(None)` once the input is exhausted.
    fn read_line(&mut self) -> Result<Option<String>, String>;
}

pub struct LineInput<R: BufRead> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> HumanInput for LineInput<R> {
    fn read_line(&mut self) -> Result<Option<String>, String> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| format!("Failed to read input: {}", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Cells are typed 1-based, the way they are drawn on the board.
pub fn parse_command(line: &str) -> Result<InputCommand, String> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Ok(InputCommand::Quit);
    }

    let number: usize = trimmed
        .parse()
        .map_err(|_| format!("'{}' is not a cell number", trimmed))?;
    if number == 0 || number > CELL_COUNT {
        return Err(format!("Cell must be between 1 and {}", CELL_COUNT));
    }
    Ok(InputCommand::Cell(number - 1))
}
