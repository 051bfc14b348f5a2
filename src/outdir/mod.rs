//! Output directory preparation.
//!
//! The [`Chunker`](crate::Chunker) expects an existing, empty output
//! directory. [`prepare_output_dir`] provides one: a missing directory is
//! created; an existing one is removed and recreated if the [`Confirm`]
//! policy agrees, otherwise the run is [`SplitError::Aborted`].

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::info;

use crate::error::SplitError;

/// Decides whether an existing output directory may be replaced.
pub trait Confirm {
    /// Returns true if `dir` and everything in it may be deleted.
    fn confirm_overwrite(&mut self, dir: &Path) -> Result<bool, SplitError>;
}

/// Replaces existing directories without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOverwrite;

impl Confirm for AlwaysOverwrite {
    fn confirm_overwrite(&mut self, _dir: &Path) -> Result<bool, SplitError> {
        Ok(true)
    }
}

/// Never replaces an existing directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverOverwrite;

impl Confirm for NeverOverwrite {
    fn confirm_overwrite(&mut self, _dir: &Path) -> Result<bool, SplitError> {
        Ok(false)
    }
}

/// Asks on `output` and reads the answer from `input`.
///
/// The question is repeated until the answer is `y` or `n` (case-insensitive,
/// surrounding whitespace ignored). End of input counts as `n`.
#[derive(Debug)]
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Creates a prompt over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    /// A prompt on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<R, W> {
    fn confirm_overwrite(&mut self, dir: &Path) -> Result<bool, SplitError> {
        let mut line = String::new();
        loop {
            write!(
                self.output,
                "Folder \"{}\" already exists. Continue? [Y/n]: ",
                dir.display()
            )?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }

            match line.trim().to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => continue,
            }
        }
    }
}

/// Makes sure `dir` exists and is empty.
///
/// An existing `dir` is removed with everything in it. Run
/// [`SplitConfig::validate`](crate::SplitConfig::validate) first; it refuses an
/// output directory that holds the source file.
///
/// # Errors
///
/// [`SplitError::Aborted`] if `dir` exists and `confirm` declines;
/// [`SplitError::OutputDir`] if removing or creating it fails (including when
/// `dir` is an existing regular file).
pub fn prepare_output_dir<C>(dir: &Path, confirm: &mut C) -> Result<(), SplitError>
where
    C: Confirm + ?Sized,
{
    let dir_err = |source| SplitError::OutputDir {
        path: dir.to_path_buf(),
        source,
    };

    if dir.is_dir() {
        if !confirm.confirm_overwrite(dir)? {
            return Err(SplitError::Aborted {
                path: dir.to_path_buf(),
            });
        }
        fs::remove_dir_all(dir).map_err(dir_err)?;
        info!(dir = %dir.display(), "removed existing output folder");
    }

    fs::create_dir_all(dir).map_err(dir_err)
}
