use std::io::Write;

use log::warn;

use crate::error::Error;

/// Sink for lexical and syntax errors. The scanner and parser only decide
/// when an error fires; what happens to it is up to the reporter.
pub trait Reporter {
    fn report(&mut self, error: Error);
}

impl Reporter for Vec<Error> {
    fn report(&mut self, error: Error) {
        self.push(error);
    }
}

impl <R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, error: Error) {
        (**self).report(error)
    }
}

/// Writes each error on its own line and remembers whether any were seen.
pub struct WriteReporter<W> {
    out: W,
    errors: usize,
}

impl <W: Write> WriteReporter<W> {
    pub fn new(out: W) -> Self {
        WriteReporter { out, errors: 0 }
    }

    pub fn had_error(&self) -> bool {
        self.errors > 0
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn reset(&mut self) {
        self.errors = 0;
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl <W: Write> Reporter for WriteReporter<W> {
    fn report(&mut self, error: Error) {
        self.errors += 1;
        if let Err(e) = writeln!(self.out, "{}", error) {
            warn!("could not write diagnostic '{}': {}", error, e);
        }
    }
}
