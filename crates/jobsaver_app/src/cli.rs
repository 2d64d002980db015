use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use jobsaver_core::RecordField;

pub const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Scrape,
    Shortcut,
    Popup,
    Options,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageArgs {
    pub page_url: Option<String>,
    pub html: Option<PathBuf>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionsArgs {
    pub sheet_url: Option<String>,
    pub json_key: Option<PathBuf>,
    pub validate: bool,
    pub clear: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub command: Command,
    pub page: PageArgs,
    /// Popup edits, applied in the order given.
    pub edits: Vec<(RecordField, String)>,
    pub options: OptionsArgs,
    pub config_dir: PathBuf,
    pub api_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

/// Parsed command line, or a request for help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Params),
    Help,
}

pub fn parse_args<I>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = match args.next().as_deref() {
        None | Some("-h") | Some("--help") | Some("help") => return Ok(Invocation::Help),
        Some("scrape") => Command::Scrape,
        Some("shortcut") => Command::Shortcut,
        Some("popup") => Command::Popup,
        Some("options") => Command::Options,
        Some(other) => bail!("Unknown command: {other}"),
    };

    let mut params = Params {
        command,
        page: PageArgs::default(),
        edits: Vec::new(),
        options: OptionsArgs::default(),
        config_dir: PathBuf::from("."),
        api_url: None,
        log_file: None,
        verbose: false,
    };

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| anyhow!("Missing value for {name}"))
        };
        match arg.as_str() {
            "--page-url" => params.page.page_url = Some(value("--page-url")?),
            "--html" => params.page.html = Some(PathBuf::from(value("--html")?)),
            "--content-type" => params.page.content_type = Some(value("--content-type")?),
            "--role" => params.edits.push((RecordField::Role, value("--role")?)),
            "--company" => params.edits.push((RecordField::Company, value("--company")?)),
            "--url" => params.edits.push((RecordField::Url, value("--url")?)),
            "--sheet-url" => params.options.sheet_url = Some(value("--sheet-url")?),
            "--json-key" => params.options.json_key = Some(PathBuf::from(value("--json-key")?)),
            "--validate" => params.options.validate = true,
            "--clear" => params.options.clear = true,
            "--config-dir" => params.config_dir = PathBuf::from(value("--config-dir")?),
            "--api-url" => params.api_url = Some(value("--api-url")?),
            "--log-file" => params.log_file = Some(PathBuf::from(value("--log-file")?)),
            "-v" | "--verbose" => params.verbose = true,
            "-h" | "--help" => return Ok(Invocation::Help),
            _ => bail!("Unknown arg: {arg}"),
        }
    }

    validate(&params)?;
    Ok(Invocation::Run(params))
}

fn validate(params: &Params) -> Result<()> {
    let needs_page = matches!(
        params.command,
        Command::Scrape | Command::Shortcut | Command::Popup
    );
    if needs_page && (params.page.page_url.is_none() || params.page.html.is_none()) {
        bail!("--page-url and --html are required for this command");
    }
    if !params.edits.is_empty() && params.command != Command::Popup {
        bail!("--role, --company and --url only apply to the popup command");
    }
    Ok(())
}
