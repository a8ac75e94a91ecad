use crate::cli::args::CliArgs;
use crate::output::OutputFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.output_format.as_deref() {
        OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid --format '{raw}', expected text, json or html"))?;
    }
    if let Some(data) = args.data.as_deref() {
        if data.trim().is_empty() {
            return Err("invalid --data, expected a path or URL".to_string());
        }
    }
    if args.interactive && args.output.is_some() {
        return Err("--interactive cannot be combined with --output".to_string());
    }
    if args.interactive && args.list_categories {
        return Err("--interactive cannot be combined with --list-categories".to_string());
    }
    Ok(())
}
