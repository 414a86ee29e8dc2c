//! Command handlers.
//!
//! Each handler validates its input, dispatches at most one mutation to the
//! store and writes a human-readable result to `out`. A mutation that hits an
//! unknown shop or product is reported, not treated as a failure.

use std::io::{self, BufRead, Write};

use shop_inventory_core::validation::FormErrors;
use shop_inventory_core::{IdsExhausted, Outcome, ShopId};
use thiserror::Error;

pub mod product;
pub mod shop;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Input failed validation.
    #[error("Invalid input: {0}")]
    Validation(#[from] FormErrors),

    /// The requested shop does not exist.
    #[error("Shop {0} not found")]
    ShopNotFound(ShopId),

    /// No ID is left above the current maximum.
    #[error("Cannot assign an ID: {0}")]
    IdsExhausted(#[from] IdsExhausted),

    /// An update was requested without any field to change.
    #[error("Nothing to update: pass at least one field")]
    NothingToUpdate,

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Write the result of a dispatched mutation.
fn report(out: &mut impl Write, outcome: Outcome, done: &str) -> io::Result<()> {
    match outcome {
        Outcome::Applied => writeln!(out, "{done}"),
        Outcome::NotFound(missing) => {
            tracing::warn!(%missing, "Nothing changed");
            writeln!(out, "Nothing changed: {missing}")
        }
    }
}

/// Ask a yes/no question; anything but `y`/`yes` is a no.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `out` fails.
pub fn confirm(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_answers() {
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false), ("", false)] {
            let mut out = Vec::new();
            let confirmed = confirm(&mut answer.as_bytes(), &mut out, "Delete?").unwrap();
            assert_eq!(confirmed, expected, "answer {answer:?}");
            assert_eq!(String::from_utf8(out).unwrap(), "Delete? [y/N] ");
        }
    }
}
