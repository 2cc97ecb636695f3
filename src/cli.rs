//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_report_adapter::HtmlReportAdapter;
use crate::adapters::text_report::TextReport;
use crate::domain::error::SectorcapError;
use crate::domain::record::MarketData;
use crate::domain::settings::Settings;
use crate::domain::view::{build_view, Selection, View};
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "sectorcap",
    about = "Sector market-cap aggregation and volatility reports"
)]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Html,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one page for a period unit and date range
    Render {
        /// Market-cap CSV, overrides [data] path
        #[arg(long)]
        data: Option<PathBuf>,
        /// Period unit: year, month, week or day
        #[arg(short, long)]
        period: Option<String>,
        /// First date of the range (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Last date of the range (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Page: raw, volatility or top
        #[arg(long)]
        page: Option<String>,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Describe the loaded dataset
    Info {
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Start the web dashboard
    Serve {
        #[arg(long)]
        data: Option<PathBuf>,
        /// Listen address, overrides [web] listen
        #[arg(long)]
        listen: Option<String>,
    },
}

/// Selection flags of the `render` command, as typed.
#[derive(Debug, Default, Clone)]
pub struct RenderArgs {
    pub period: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub page: Option<String>,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when run is called repeatedly.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(&cli.log_level);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Dispatch a parsed command line.
pub fn execute(cli: Cli) -> Result<(), SectorcapError> {
    match cli.command {
        Command::Render {
            data,
            period,
            start,
            end,
            page,
            format,
            output,
        } => {
            let args = RenderArgs {
                period,
                start,
                end,
                page,
            };
            run_render(
                cli.config.as_deref(),
                data,
                &args,
                format,
                output.as_deref(),
            )
        }
        Command::Info { data } => run_info(cli.config.as_deref(), data),
        Command::Serve { data, listen } => run_serve(cli.config.as_deref(), data, listen),
    }
}

/// Resolve settings from the optional config file and the `--data` override.
pub fn load_settings(
    config_path: Option<&Path>,
    data_override: Option<PathBuf>,
) -> Result<Settings, SectorcapError> {
    let mut settings = match config_path {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading config");
            Settings::from_config(&FileConfigAdapter::from_file(path)?)?
        }
        None => Settings::from_config(&FileConfigAdapter::empty())?,
    };
    if let Some(path) = data_override {
        settings.data_path = path;
    }
    Ok(settings)
}

/// The market-cap source named by `settings`.
pub fn data_source(settings: &Settings) -> CsvAdapter {
    CsvAdapter::new(settings.data_path.clone(), settings.columns.clone())
}

pub fn load_data(settings: &Settings) -> Result<MarketData, SectorcapError> {
    data_source(settings).load()
}

/// Parse the selection flags and compute the selected view.
pub fn select_view(
    data: &MarketData,
    settings: &Settings,
    args: &RenderArgs,
) -> Result<(View, Selection), SectorcapError> {
    let selection = Selection::parse(
        data,
        args.period.as_deref(),
        args.start.as_deref(),
        args.end.as_deref(),
        args.page.as_deref(),
    )?;
    let view = build_view(data, &selection, &settings.view);
    Ok((view, selection))
}

/// Compute the selected view and render it in `format`.
pub fn render_report(
    data: &MarketData,
    settings: &Settings,
    args: &RenderArgs,
    format: Format,
) -> Result<(String, Selection), SectorcapError> {
    let (view, selection) = select_view(data, settings, args)?;
    let document = reporter(format).render(&view, &selection)?;
    Ok((document, selection))
}

fn reporter(format: Format) -> Box<dyn ReportPort> {
    match format {
        Format::Text => Box::new(TextReport::new()),
        Format::Html => Box::new(HtmlReportAdapter::new()),
    }
}

fn run_render(
    config_path: Option<&Path>,
    data_override: Option<PathBuf>,
    args: &RenderArgs,
    format: Format,
    output: Option<&Path>,
) -> Result<(), SectorcapError> {
    let settings = load_settings(config_path, data_override)?;
    let data = load_data(&settings)?;

    let (view, selection) = select_view(&data, &settings, args)?;
    tracing::info!(
        unit = %selection.unit,
        page = %selection.page,
        start = %selection.range.start,
        end = %selection.range.end,
        "computed view"
    );

    let report = reporter(format);
    match output {
        Some(path) => {
            report.write(&view, &selection, path)?;
            tracing::info!(output = %path.display(), "report written");
        }
        None => print!("{}", report.render(&view, &selection)?),
    }
    Ok(())
}

/// Summary lines printed by `info`.
pub fn describe_dataset(data: &MarketData, source: &str) -> String {
    let mut out = format!("source: {source}\n");
    out.push_str(&format!("rows: {}\n", data.len()));
    out.push_str(&format!("null-date rows: {}\n", data.null_date_count()));
    out.push_str(&format!("sectors: {}\n", data.sectors().len()));
    match data.date_bounds() {
        Some((first, last)) => out.push_str(&format!("dates: {first} to {last}\n")),
        None => out.push_str("dates: none\n"),
    }
    out
}

fn run_info(config_path: Option<&Path>, data_override: Option<PathBuf>) -> Result<(), SectorcapError> {
    let settings = load_settings(config_path, data_override)?;
    let source = data_source(&settings);
    let data = source.load()?;
    print!("{}", describe_dataset(&data, &source.describe()));
    Ok(())
}

fn run_serve(
    config_path: Option<&Path>,
    data_override: Option<PathBuf>,
    listen: Option<String>,
) -> Result<(), SectorcapError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, AppState};
        use std::net::SocketAddr;
        use std::sync::Arc;

        let settings = load_settings(config_path, data_override)?;
        let listen = listen.unwrap_or_else(|| settings.listen.clone());
        let addr: SocketAddr = listen.parse().map_err(|e| SectorcapError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: format!("'{listen}': {e}"),
        })?;
        let data = load_data(&settings)?;

        let router = build_router(AppState {
            data: Arc::new(data),
            options: settings.view,
        });

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "serving dashboard");
            axum::serve(listener, router).await?;
            Ok::<(), SectorcapError>(())
        })
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = (config_path, data_override, listen);
        Err(SectorcapError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: "built without the web feature".into(),
        })
    }
}
