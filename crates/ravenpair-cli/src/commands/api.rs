//! REST API command implementation.
//!
//! Sends one request per invocation and prints the status code followed
//! by the response body:
//! - `api status` - server health
//! - `api pair` - create a pair session
//! - `api list` - list active pairs

use std::io::Write;

use tracing::{debug, warn};

use crate::cli::ApiCommands;
use crate::client::ApiClient;
use crate::error::CliError;
use crate::output::{OutputFormat, ResponseDocument};

/// API command executor.
#[derive(Debug)]
pub struct ApiCommand<'a, C> {
    client: &'a C,
}

impl<'a, C: ApiClient> ApiCommand<'a, C> {
    /// Create a new API command using `client`.
    #[must_use]
    pub const fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Execute the API subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be sent or output fails.
    /// Non-2xx responses are printed, not returned as errors.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &ApiCommands,
    ) -> Result<(), CliError> {
        let response = match command {
            ApiCommands::Status => self.client.get_status().await?,
            ApiCommands::List => self.client.list_pairs().await?,
            ApiCommands::Pair { name } => self.client.create_pair(name).await?,
        };

        if response.is_success() {
            debug!(status = response.status, "API request finished");
        } else {
            warn!(status = response.status, "API request returned an error status");
        }
        format.write(writer, &ResponseDocument::from(&response))
    }
}
