//! Version command implementation.

use std::io::Write;

use crate::error::CliError;
use crate::output::{OutputFormat, VersionInfo};

/// Version command executor.
#[derive(Debug, Default)]
pub struct VersionCommand;

impl VersionCommand {
    /// Create a new version command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Execute the version command.
    ///
    /// # Errors
    ///
    /// Returns an error if output fails.
    pub fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        format.write(writer, &VersionInfo::current())
    }
}
