pub mod alias;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod resolve;
pub mod resolver;
pub mod scope;
pub mod synthesize;
pub mod types;
pub mod union;

use cli::Cli;
use error::CliError;

/// Orchestrates the pipeline (section 2's data flow): resolve project options, synthesize the
/// declaration, splice and resolve it, return the one line that goes to stdout.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    if cli.source.is_none() && cli.eval.is_none() {
        return Err(CliError::Argument("Error: No source file provided.".to_string()));
    }

    let options = config::resolve_options(cli.project.as_deref())?;
    tracing::debug!(compiler_options = %options.compiler_options, "resolved project configuration");

    let declaration = synthesize::synthesize(cli.eval.as_deref(), &cli.args);
    tracing::debug!(%declaration, "synthesized declaration");

    resolver::resolve(cli.source.as_deref(), &declaration)
}
