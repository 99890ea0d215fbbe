//! Implementation of the `blueprint render` command.

use std::fs::{read_to_string, write};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use blueprint::{Context, RenderError, Renderer, Value};
use clap::Args;
use miette::{miette, IntoDiagnostic, Report, Result};
use serde::Serialize;
use tracing::debug;

use crate::output::TemplateDiagnostic;

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template file, or `-` to read standard input
    pub template: PathBuf,

    /// JSON object with default values for the template
    #[arg(short, long, env = "BLUEPRINT_CONTEXT")]
    pub context: Option<PathBuf>,

    /// Parameters in name=value format (repeatable); override the context file
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Write the rendered text (or JSON with --json) to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for render results.
#[derive(Serialize)]
struct RenderJson {
    output: String,
}

/// JSON output for a single syntax error.
#[derive(Serialize)]
struct SyntaxErrorJson {
    line: usize,
    column: usize,
    message: String,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Interpret a command-line parameter: integer, float, boolean, else string.
fn parse_param_value(raw: String) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    match (raw.parse::<f64>(), raw.parse::<bool>()) {
        (Ok(f), _) if f.is_finite() => Value::from(f),
        (_, Ok(b)) => Value::from(b),
        _ => Value::from(raw),
    }
}

fn read_template(path: &Path) -> Result<(String, String)> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content).into_diagnostic()?;
        return Ok(("<stdin>".to_string(), content));
    }
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read template {}: {}", path.display(), e))?;
    Ok((path.display().to_string(), content))
}

fn read_context(path: &Path) -> Result<Context> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read context file {}: {}", path.display(), e))?;
    let context: Context = serde_json::from_str(&content)
        .map_err(|e| miette!("Context file {} is not a JSON object of values: {}", path.display(), e))?;
    debug!(path = %path.display(), values = context.len(), "loaded context file");
    Ok(context)
}

/// The text to emit for a successful render.
fn format_output(rendered: String, json: bool) -> Result<String> {
    if json {
        let output = RenderJson { output: rendered };
        let mut text = serde_json::to_string_pretty(&output).into_diagnostic()?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(rendered)
    }
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> Result<i32> {
    let (name, template) = read_template(&args.template)?;
    let defaults = match &args.context {
        Some(path) => read_context(path)?,
        None => Context::new(),
    };
    let params: Context = args
        .params
        .into_iter()
        .map(|(k, v)| (k, parse_param_value(v)))
        .collect();

    debug!(template = %name, params = params.len(), "rendering");
    let renderer = Renderer::builder().defaults(defaults).build();
    match renderer.render(&template, &params) {
        Ok(rendered) => {
            let text = format_output(rendered, args.json)?;
            if let Some(path) = &args.output {
                write(path, &text)
                    .map_err(|e| miette!("Cannot write {}: {}", path.display(), e))?;
                debug!(path = %path.display(), bytes = text.len(), "wrote output");
            } else {
                print!("{}", text);
            }
            Ok(exitcode::OK)
        }
        Err(RenderError::Syntax(errors)) => {
            if args.json {
                let output: Vec<SyntaxErrorJson> = errors
                    .iter()
                    .map(|e| SyntaxErrorJson {
                        line: e.line,
                        column: e.column,
                        message: e.to_string(),
                    })
                    .collect();
                let output = serde_json::json!({ "errors": output });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                for error in &errors {
                    let diagnostic = TemplateDiagnostic::from_syntax_error(&name, &template, error);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
            }
            Ok(exitcode::DATAERR)
        }
        Err(RenderError::Eval(e)) => {
            if args.json {
                let output = serde_json::json!({ "error": e.to_string() });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Render error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}
