use std::io::BufRead;

use crate::error::{Error, Result};

/// How a numeric selection outside the result set is treated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum,
)]
pub enum OutOfRange {
    /// Do nothing and return normally
    #[default]
    Ignore,
    /// Fail with an invalid-selection error
    Reject,
}

/// Interpret `input` as an index into a result set of `len` entries.
///
/// Input that is not a base-10 integer always yields `Ok(None)`. Integers
/// outside `0..len` yield `Ok(None)` or an error depending on `policy`.
pub fn parse_selection(
    input: &str,
    len: usize,
    policy: OutOfRange,
) -> Result<Option<usize>> {
    let Ok(value) = input.trim().parse::<i64>() else {
        return Ok(None);
    };

    match usize::try_from(value) {
        Ok(index) if index < len => Ok(Some(index)),
        _ => match policy {
            OutOfRange::Ignore => Ok(None),
            OutOfRange::Reject => {
                Err(Error::InvalidSelection { input: value, len })
            }
        },
    }
}

/// Read one line from `input` and parse it with [`parse_selection`].
///
/// End of input counts as a non-numeric answer.
pub fn read_selection(
    input: &mut impl BufRead,
    len: usize,
    policy: OutOfRange,
) -> Result<Option<usize>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    parse_selection(&line, len, policy)
}
