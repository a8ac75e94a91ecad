use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::controller::{ControlEvent, Controller};
use crate::loader::{DataSource, LoadError};
use crate::output::{self, OutputFormat};

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn format_opt_value<'a>(v: &'a str, default: &'a str) -> &'a str {
    if v.trim().is_empty() {
        default
    } else {
        v
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Mode {
    Render,
    ListCategories,
    Interactive,
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: DataSource,
    category: String,
    search: String,
    output: Option<String>,
    output_format: OutputFormat,
    mode: Mode,
    no_color: bool,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let interactive = args.interactive || cfg.interactive.unwrap_or(false);

    let data = args
        .data
        .or(cfg.data)
        .map(|d| {
            if d.contains("://") {
                d
            } else {
                config::expand_tilde_string(&d)
            }
        });
    let source = match data {
        Some(raw) => DataSource::parse(&raw).map_err(|e| e.to_string())?,
        None => DataSource::default(),
    };

    let category = args.category.or(cfg.category).unwrap_or_default();
    let search = args.search.or(cfg.search).unwrap_or_default();

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text, json or html"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    let mode = if args.list_categories {
        Mode::ListCategories
    } else if interactive && output.is_none() {
        Mode::Interactive
    } else {
        Mode::Render
    };

    Ok(RunConfig {
        source,
        category,
        search,
        output,
        output_format,
        mode,
        no_color,
        verbose: args.verbose,
    })
}

fn init_logging(verbose: u8, interactive: bool) {
    let default_level = match verbose {
        0 => "poistovne=warn",
        1 => "poistovne=info",
        _ => "poistovne=debug",
    };
    let writer = if interactive {
        BoxMakeWriter::new(std::io::sink)
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .try_init();
}

async fn load_with_spinner(source: &DataSource) -> Result<Controller, LoadError> {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    if let Ok(style) = ProgressStyle::with_template(":: Loading  : {spinner} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(source.to_string());

    let result = Controller::init(source).await;
    pb.finish_and_clear();
    result
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    debug!(?run, "run config");

    if run.mode == Mode::Interactive {
        let mut controller = Controller::init(&run.source)
            .await
            .map_err(|e| e.to_string())?;
        apply_filters(&mut controller, &run);
        return crate::tui::run(controller).map_err(|e| format!("terminal viewer failed: {e}"));
    }

    let mut controller = load_with_spinner(&run.source)
        .await
        .map_err(|e| e.to_string())?;

    if run.mode == Mode::ListCategories {
        for option in controller.categories().options() {
            println!("{}", option.label);
        }
        return Ok(());
    }

    apply_filters(&mut controller, &run);
    let rendered = output::render(run.output_format, &controller);

    match run.output.as_deref() {
        Some(path) => {
            let mut outfile = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .await
                .map_err(|e| format!("failed to open output file: {e}"))?;
            outfile
                .write_all(&rendered)
                .await
                .map_err(|e| format!("failed to write output file: {e}"))?;
            info!(path, rows = controller.table().len(), "table written");
            format_kv_line("Data", &run.source.to_string());
            format_kv_line("Category", format_opt_value(controller.category(), "all"));
            format_kv_line("Search", format_opt_value(controller.search(), "-"));
            format_kv_line("Rows", &controller.table().len().to_string());
            format_kv_line("Output", &path.green().to_string());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(&rendered)
                .await
                .map_err(|e| format!("failed to write output: {e}"))?;
            stdout
                .flush()
                .await
                .map_err(|e| format!("failed to write output: {e}"))?;
        }
    }

    Ok(())
}

fn apply_filters(controller: &mut Controller, run: &RunConfig) {
    if !run.category.is_empty() {
        controller.handle(ControlEvent::CategoryChanged(run.category.clone()));
    }
    if !run.search.is_empty() {
        controller.handle(ControlEvent::SearchInput(run.search.clone()));
    }
}

fn init_default_config() -> Result<(), String> {
    let path = config::default_config_path()
        .ok_or_else(|| "could not determine home directory".to_string())?;
    if config::ensure_default_config_file(&path)? {
        println!(":: Config    : wrote {}", path.display());
    } else {
        println!(":: Config    : {} already exists", path.display());
    }
    Ok(())
}

fn resolve_config(args: &CliArgs) -> Result<ConfigFile, String> {
    match args.config.as_deref() {
        Some(raw) => config::load_config(&config::expand_tilde(raw), false),
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true),
            None => Ok(ConfigFile::default()),
        },
    }
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return Ok(());
        }
        Err(e) => return Err(e.to_string()),
    };

    if args.init_config {
        return init_default_config();
    }

    let cfg = resolve_config(&args)?;
    let run = build_run_config(args, cfg)?;
    init_logging(run.verbose, run.mode == Mode::Interactive);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> CliArgs {
        let mut full = vec!["poistovne"];
        full.extend_from_slice(argv);
        CliArgs::parse_from(full)
    }

    #[test]
    fn defaults_render_text_from_relative_file() {
        let run = build_run_config(parse(&[]), ConfigFile::default()).unwrap();
        assert_eq!(run.source, DataSource::default());
        assert_eq!(run.output_format, OutputFormat::Text);
        assert_eq!(run.mode, Mode::Render);
        assert_eq!(run.category, "");
        assert_eq!(run.search, "");
    }

    #[test]
    fn cli_values_win_over_config() {
        let cfg = ConfigFile {
            data: Some("https://example.com/poistovne.json".to_string()),
            category: Some("Senior".to_string()),
            search: Some("zľava".to_string()),
            ..ConfigFile::default()
        };
        let run = build_run_config(parse(&["-c", "Rodina"]), cfg).unwrap();
        assert_eq!(run.category, "Rodina");
        assert_eq!(run.search, "zľava");
        assert!(matches!(run.source, DataSource::Url(_)));
    }

    #[test]
    fn output_extension_selects_format() {
        let run = build_run_config(parse(&["-o", "porovnanie.html"]), ConfigFile::default())
            .unwrap();
        assert_eq!(run.output_format, OutputFormat::Html);

        let run = build_run_config(
            parse(&["-o", "porovnanie.html", "-f", "json"]),
            ConfigFile::default(),
        )
        .unwrap();
        assert_eq!(run.output_format, OutputFormat::Json);
    }

    #[test]
    fn invalid_format_is_rejected() {
        assert!(build_run_config(parse(&["-f", "xml"]), ConfigFile::default()).is_err());
        let cfg = ConfigFile {
            output_format: Some("pdf".to_string()),
            ..ConfigFile::default()
        };
        assert!(build_run_config(parse(&[]), cfg).is_err());
    }

    #[test]
    fn interactive_from_config_yields_to_output_file() {
        let cfg = ConfigFile {
            interactive: Some(true),
            output: Some("out.json".to_string()),
            ..ConfigFile::default()
        };
        let run = build_run_config(parse(&[]), cfg).unwrap();
        assert_eq!(run.mode, Mode::Render);
        assert!(build_run_config(parse(&["-i", "-o", "x.html"]), ConfigFile::default()).is_err());
    }

    #[test]
    fn list_categories_mode() {
        let run = build_run_config(parse(&["--list-categories"]), ConfigFile::default()).unwrap();
        assert_eq!(run.mode, Mode::ListCategories);
    }
}
