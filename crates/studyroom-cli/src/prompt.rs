use std::io::{BufRead, Write};
use studyroom_core::error::Result;
use studyroom_core::{parse_total_minutes, ConfigError};

const PROMPT: &str = "Enter total study time (minutes): ";

/// Ask for the session's total study budget.
pub fn ask_total_minutes<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<u64> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ConfigError::ParseFailed("no input received".into()).into());
    }
    Ok(parse_total_minutes(&line)?)
}
