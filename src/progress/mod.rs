//! Progress bars around iteration, shown only at informational verbosity.
//!
//! [`progressbar`] wraps an iterable. When the verbosity passed in is
//! [`Level::INFO`], a bar is drawn on stderr and advanced as items are pulled;
//! at any other verbosity the items pass through untouched. The bar is a scoped
//! resource: it is released when the [`Progressbar`] is dropped, whether the
//! loop finished, returned early, or unwound from a panic.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use clx_log::{Level, progress::progressbar};
//!
//! # fn main() -> clx_log::Result<()> {
//! let files = vec!["a.txt", "b.txt", "c.txt"];
//! for file in progressbar(files, Level::INFO, None)? {
//!     // process file
//! #   let _ = file;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Iterators without an exact size need an explicit length:
//!
//! ```rust,no_run
//! use clx_log::{Level, progress::with_progressbar};
//!
//! # fn main() -> clx_log::Result<()> {
//! let lines = std::io::stdin().lines();
//! let count = with_progressbar(lines, Level::INFO, Some(1000), |bar| bar.count())?;
//! # let _ = count;
//! # Ok(())
//! # }
//! ```
//!
//! # Interaction with logging
//!
//! Records written by [`StyledHandler::stderr`](crate::StyledHandler::stderr)
//! go through [`suspend`], which clears the bar, writes the record and redraws
//! the bar underneath it.
//!
//! # Environment Variables
//!
//! - `CLX_NO_PROGRESS=1` - Never draw bars. Wrapped iterators still count items.
//!
//! Bars are also never drawn when stderr is not a terminal.

use std::sync::Arc;

use crate::{Error, Level, Result};

mod bar;
mod format;
mod state;

pub use bar::ProgressBarChars;
pub use state::{is_active, is_disabled, suspend};

/// An iterator that advances a progress bar as it yields items.
///
/// Created by [`progressbar`]. When no bar is shown it is a plain passthrough.
#[must_use = "the progress bar is released as soon as this is dropped"]
pub struct Progressbar<I> {
    iter: I,
    bar: Option<Arc<state::Bar>>,
}

impl<I> Progressbar<I> {
    /// Returns `true` if this wrapper owns a progress bar.
    pub fn is_shown(&self) -> bool {
        self.bar.is_some()
    }

    /// Total number of items the bar expects, if shown.
    pub fn length(&self) -> Option<usize> {
        self.bar.as_ref().map(|bar| bar.length())
    }

    /// Number of items yielded so far, if shown.
    pub fn position(&self) -> Option<usize> {
        self.bar.as_ref().map(|bar| bar.position())
    }

    /// Label drawn in front of the bar, if shown and set.
    pub fn label(&self) -> Option<String> {
        self.bar.as_ref().and_then(|bar| bar.label())
    }

    /// Sets a label drawn in front of the bar.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        if let Some(bar) = &self.bar {
            bar.set_label(label.into());
        }
        self
    }

    /// Sets the characters used to draw the bar.
    pub fn with_chars(self, chars: ProgressBarChars) -> Self {
        if let Some(bar) = &self.bar {
            bar.set_chars(chars);
        }
        self
    }
}

impl<I: Iterator> Iterator for Progressbar<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        if let Some(bar) = &self.bar {
            state::advance(bar, 1);
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I> Drop for Progressbar<I> {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            state::release(&bar);
        }
    }
}

/// Wraps `iterable` in a progress bar if `verbosity` is [`Level::INFO`].
///
/// `length` defaults to the iterator's exact size. At any other verbosity the
/// iterable is passed through and `length` is ignored.
///
/// # Errors
///
/// Returns [`Error::UnknownLength`] if a bar is needed, no `length` was given,
/// and the iterator does not report an exact size.
pub fn progressbar<I>(
    iterable: I,
    verbosity: Level,
    length: Option<usize>,
) -> Result<Progressbar<I::IntoIter>>
where
    I: IntoIterator,
{
    let iter = iterable.into_iter();
    if verbosity != Level::INFO {
        return Ok(Progressbar { iter, bar: None });
    }
    let total = match (length, iter.size_hint()) {
        (Some(length), _) => length,
        (None, (lower, Some(upper))) if lower == upper => lower,
        (None, _) => return Err(Error::UnknownLength),
    };
    Ok(Progressbar {
        iter,
        bar: Some(state::acquire(total)),
    })
}

/// Runs `f` with a [`Progressbar`] over `iterable`, releasing the bar afterward.
///
/// # Errors
///
/// Same as [`progressbar`].
pub fn with_progressbar<I, F, R>(
    iterable: I,
    verbosity: Level,
    length: Option<usize>,
    f: F,
) -> Result<R>
where
    I: IntoIterator,
    F: FnOnce(&mut Progressbar<I::IntoIter>) -> R,
{
    let mut bar = progressbar(iterable, verbosity, length)?;
    Ok(f(&mut bar))
}
