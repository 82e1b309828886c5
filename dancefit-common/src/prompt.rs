//! Validated line-oriented input
//!
//! Prompts re-ask until the answer is valid. Invalid answers are reported
//! on the output stream and never surface as errors; the only failures are
//! I/O errors and the input stream ending before a valid answer arrives.
//!
//! Generic over `BufRead`/`Write` so sessions can be driven from a terminal
//! or from an in-memory script.

use crate::{Error, Result};
use std::io::{BufRead, Write};
use tracing::debug;

/// Read one trimmed line, failing on end of input
fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(Error::InvalidInput(
            "input ended before a valid answer was given".to_string(),
        ));
    }
    Ok(line.trim().to_string())
}

/// Ask for an integer within `min..=max`, re-prompting until one is given
pub fn prompt_int<R, W>(input: &mut R, output: &mut W, message: &str, min: i64, max: i64) -> Result<i64>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", message)?;
        output.flush()?;

        let answer = read_answer(input)?;
        match answer.parse::<i64>() {
            Ok(value) if (min..=max).contains(&value) => return Ok(value),
            Ok(value) => {
                debug!("Rejected out-of-range answer {}", value);
                writeln!(output, "Please enter a number between {} and {}.", min, max)?;
            }
            Err(_) => {
                debug!("Rejected non-numeric answer {:?}", answer);
                writeln!(output, "Invalid input. Please enter a whole number.")?;
            }
        }
    }
}

/// Present a 1-based menu and return the zero-based index of the choice
///
/// Fails with [`Error::InvalidInput`] when `options` is empty, since no
/// answer could ever be accepted.
pub fn prompt_choice<R, W, S>(input: &mut R, output: &mut W, title: &str, options: &[S]) -> Result<usize>
where
    R: BufRead,
    W: Write,
    S: AsRef<str>,
{
    if options.is_empty() {
        return Err(Error::InvalidInput(format!("no options available for '{}'", title)));
    }

    writeln!(output, "{}", title)?;
    for (i, option) in options.iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, option.as_ref())?;
    }

    let choice = prompt_int(
        input,
        output,
        &format!("Enter a number (1-{}): ", options.len()),
        1,
        options.len() as i64,
    )?;
    Ok((choice - 1) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_int_accepts_valid_answer() {
        let mut input = Cursor::new("42\n");
        let mut output = Vec::new();
        let value = prompt_int(&mut input, &mut output, "Duration: ", 5, 120).unwrap();
        assert_eq!(value, 42);
        assert_eq!(String::from_utf8(output).unwrap(), "Duration: ");
    }

    #[test]
    fn test_prompt_int_retries_until_valid() {
        let mut input = Cursor::new("abc\n3\n500\n  60 \n");
        let mut output = Vec::new();
        let value = prompt_int(&mut input, &mut output, "Duration: ", 5, 120).unwrap();
        assert_eq!(value, 60);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Duration: ").count(), 4);
        assert_eq!(text.matches("between 5 and 120").count(), 2);
        assert!(text.contains("whole number"));
    }

    #[test]
    fn test_prompt_int_end_of_input() {
        let mut input = Cursor::new("nope\n");
        let mut output = Vec::new();
        let result = prompt_int(&mut input, &mut output, "> ", 1, 3);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_prompt_choice_returns_zero_based_index() {
        let mut input = Cursor::new("0\n2\n");
        let mut output = Vec::new();
        let index = prompt_choice(&mut input, &mut output, "Intensity:", &["Low", "Medium", "High"]).unwrap();
        assert_eq!(index, 1);

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Intensity:\n1. Low\n2. Medium\n3. High\n"));
    }

    #[test]
    fn test_prompt_choice_without_options() {
        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();
        let options: [&str; 0] = [];
        let result = prompt_choice(&mut input, &mut output, "Country:", &options);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
