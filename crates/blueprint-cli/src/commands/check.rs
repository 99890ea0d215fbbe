//! Implementation of the `blueprint check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use blueprint::functions::lookup;
use blueprint::{extract_functions, extract_variables, validate_syntax};
use clap::Args;
use miette::{miette, IntoDiagnostic, Report, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::output::table::{format_check_table, FileReport};
use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Serialize)]
struct CheckJson {
    file: String,
    valid: bool,
    errors: Vec<ErrorJson>,
    variables: Vec<String>,
    functions: Vec<String>,
    unknown_functions: Vec<String>,
}

#[derive(Serialize)]
struct ErrorJson {
    line: usize,
    column: usize,
    message: String,
}

/// Run the check command.
///
/// A file fails when its blocks are unbalanced or it calls a function that
/// does not exist.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut results = Vec::new();
    let mut reports = Vec::new();

    for path in &args.files {
        let name = path.display().to_string();
        let content = read_to_string(path)
            .map_err(|e| miette!("Cannot read template {}: {}", name, e))?;

        let errors = validate_syntax(&content).err().unwrap_or_default();
        let variables = extract_variables(&content);
        let functions: Vec<String> = extract_functions(&content)
            .into_iter()
            .map(|call| call.name)
            .collect();
        let mut unknown_functions: Vec<String> = Vec::new();
        for function in &functions {
            if lookup(function).is_none() && !unknown_functions.contains(function) {
                unknown_functions.push(function.clone());
            }
        }

        if !args.json {
            for error in &errors {
                let diagnostic = TemplateDiagnostic::from_syntax_error(&name, &content, error);
                eprintln!("{:?}", Report::new(diagnostic));
            }
            for function in &unknown_functions {
                eprintln!(
                    "{}: unknown function '{}'",
                    name.if_supports_color(Stream::Stderr, |t| t.yellow()),
                    function
                );
            }
        }

        reports.push(FileReport {
            file: name.clone(),
            errors: errors.len(),
            variables: variables.len(),
            functions: functions.len(),
            unknown_functions: unknown_functions.len(),
        });
        results.push(CheckJson {
            file: name,
            valid: errors.is_empty() && unknown_functions.is_empty(),
            errors: errors
                .iter()
                .map(|e| ErrorJson {
                    line: e.line,
                    column: e.column,
                    message: e.to_string(),
                })
                .collect(),
            variables,
            functions,
            unknown_functions,
        });
    }

    let all_valid = results.iter().all(|r| r.valid);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results).into_diagnostic()?);
    } else {
        println!("{}", format_check_table(&reports));
        let summary = if all_valid { "all templates valid" } else { "some templates have problems" };
        if all_valid {
            println!("{}", summary.if_supports_color(Stream::Stdout, |t| t.green()));
        } else {
            println!("{}", summary.if_supports_color(Stream::Stdout, |t| t.red()));
        }
    }

    if all_valid {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
