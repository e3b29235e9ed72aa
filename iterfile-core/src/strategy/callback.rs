//! Push-based callback strategy

use crate::config::ReaderConfig;
use crate::error::{BoxError, Error, Result};
use crate::source::{open_source, Source};
use std::io::Read;
use std::path::Path;

/// Invoke `callback` for every line of `path`, in file order
///
/// The first error returned by `callback` stops iteration; it is handed
/// back as [`Error::Callback`] wrapping the exact value returned, and the
/// remaining lines are never visited.
///
/// ```no_run
/// let mut count = 0;
/// iterfile_core::for_each_line("notes.txt", |_line| {
///     count += 1;
///     Ok::<_, std::io::Error>(())
/// })?;
/// # Ok::<(), iterfile_core::Error>(())
/// ```
pub fn for_each_line<P, F, E>(path: P, callback: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(&str) -> std::result::Result<(), E>,
    E: Into<BoxError>,
{
    for_each_line_with(path, &ReaderConfig::default(), callback)
}

/// Same as [`for_each_line`] with an explicit reader configuration
pub fn for_each_line_with<P, F, E>(path: P, config: &ReaderConfig, callback: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(&str) -> std::result::Result<(), E>,
    E: Into<BoxError>,
{
    for_each_line_in(open_source(path, config)?, callback)
}

/// Drive `callback` over an already bound source
///
/// The source is consumed and released on every exit path.
pub fn for_each_line_in<R, F, E>(mut source: Source<R>, mut callback: F) -> Result<()>
where
    R: Read,
    F: FnMut(&str) -> std::result::Result<(), E>,
    E: Into<BoxError>,
{
    let outcome = loop {
        match source.read_line() {
            Ok(Some(line)) => {
                if let Err(e) = callback(&line) {
                    break Err(Error::Callback(e.into()));
                }
            }
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    source.close();
    outcome
}
