//! Schema command: JSON Schema of `evaluate --json` output.

use clap::Args;
use tracing::{debug, instrument};

use super::evaluate::EvaluateOutput;

/// Arguments for the `schema` subcommand.
#[derive(Args, Debug, Default)]
pub struct SchemaArgs {}

/// Print the schema for `evaluate --json`: a file report, or an array of
/// them when several files are evaluated.
#[instrument(name = "cmd_schema", skip_all)]
pub fn cmd_schema(_args: SchemaArgs) -> anyhow::Result<()> {
    debug!("executing schema command");
    let schema = schemars::schema_for!(EvaluateOutput);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
