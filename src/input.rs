//! Validation of interactive input.

use std::{
    fmt::Display,
    io::{self, BufRead, Write},
    time::Duration,
};

use crate::error::InputError;

/// Parses a positive number of seconds.
pub fn parse_seconds(input: &str) -> Result<Duration, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputError::Empty);
    }

    let seconds: f64 = input
        .parse()
        .map_err(|_| InputError::NotANumber(input.to_string()))?;
    if seconds.is_nan() || seconds <= 0.0 {
        return Err(InputError::NotPositive(seconds));
    }

    Duration::try_from_secs_f64(seconds).map_err(|_| InputError::OutOfRange(seconds))
}

/// Writes `prompt` and reads lines from `input` until `parse` accepts one.
///
/// Every rejected line is answered with the parse error before prompting
/// again. Running out of input is reported as `UnexpectedEof`.
pub fn prompt_until_valid<R, W, T, E, P>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    mut parse: P,
) -> io::Result<T>
where
    R: BufRead,
    W: Write,
    E: Display,
    P: FnMut(&str) -> Result<T, E>,
{
    let mut line = String::new();
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before a valid value was entered",
            ));
        }

        match parse(line.trim_end_matches(['\r', '\n'])) {
            Ok(value) => return Ok(value),
            Err(err) => writeln!(output, "Please enter a valid value: {err}")?,
        }
    }
}
