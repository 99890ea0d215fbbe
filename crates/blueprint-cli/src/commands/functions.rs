//! Implementation of the `blueprint functions` command.

use blueprint::functions::CATALOG;
use clap::Args;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::output::table::format_functions_table;

/// Arguments for the functions command.
#[derive(Debug, Args)]
pub struct FunctionsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one catalog entry.
#[derive(Serialize)]
struct FunctionJson {
    name: &'static str,
    namespace: &'static str,
    signature: &'static str,
    min_args: usize,
    max_args: Option<usize>,
    summary: &'static str,
}

/// Run the functions command.
pub fn run_functions(args: FunctionsArgs) -> Result<i32> {
    if args.json {
        let output: Vec<FunctionJson> = CATALOG
            .iter()
            .map(|spec| FunctionJson {
                name: spec.name,
                namespace: spec.namespace.as_str(),
                signature: spec.signature,
                min_args: spec.arity.min,
                max_args: spec.arity.max,
                summary: spec.summary,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", format_functions_table(&CATALOG));
    }
    Ok(exitcode::OK)
}
