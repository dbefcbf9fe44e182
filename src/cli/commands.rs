use crate::cli::{OutputFormat, RunArgs, ValidateArgs, Verbosity};
use crate::replay::{load_script, validate_script, ScriptRunner};
use crate::Result;
use tracing::info;

/// Execute the run command.
pub fn run(args: RunArgs, verbosity: Verbosity) -> Result<()> {
    let script = load_script(&args.script)?;
    let report = ScriptRunner::new().run(&script)?;

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => print!("{}", report),
    }

    if verbosity != Verbosity::Quiet {
        info!(
            steps = report.outcomes.len(),
            executions = report.log.len(),
            "Run complete"
        );
    }
    Ok(())
}

/// Execute the validate command.
pub fn validate(args: ValidateArgs, verbosity: Verbosity) -> Result<()> {
    let script = load_script(&args.script)?;
    let steps = validate_script(&script)?;

    if verbosity != Verbosity::Quiet {
        println!("{}: {} step(s) OK", args.script.display(), steps);
    }
    Ok(())
}
