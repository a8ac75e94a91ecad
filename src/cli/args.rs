use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "poistovne",
    version,
    about = "compare health-insurance benefits across insurers",
    long_about = "Poistovne loads a JSON dataset of insurance benefits and shows them grouped by category and insurer (Dôvera, VšZP, UNION), with category filtering and case-insensitive search.\n\nExamples:\n  poistovne\n  poistovne -d ./poistovne.json -c Rodina -s zľava\n  poistovne -d https://example.com/poistovne.json -o porovnanie.html\n  poistovne -i\n\nTip: Use --config to persist the data location and default filters."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the table to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format: text, json or html (inferred from --output when omitted)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'd',
        long = "data",
        value_name = "PATH|URL",
        help_heading = "Input",
        help = "Dataset location (defaults to ./poistovne.json)."
    )]
    pub data: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.poistovne/config.yml when present)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a commented default config to ~/.poistovne/config.yml and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'c',
        long = "category",
        value_name = "CATEGORY",
        help_heading = "Filters",
        help = "Show only rows whose label starts with CATEGORY (case-sensitive)."
    )]
    pub category: Option<String>,

    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help_heading = "Filters",
        help = "Show only benefits containing TEXT (case-insensitive)."
    )]
    pub search: Option<String>,

    #[arg(
        long = "list-categories",
        help_heading = "Filters",
        help = "Print the detected categories in display order and exit."
    )]
    pub list_categories: bool,

    #[arg(
        short = 'i',
        long = "interactive",
        help_heading = "Viewer",
        help = "Open the interactive terminal viewer."
    )]
    pub interactive: bool,
}
