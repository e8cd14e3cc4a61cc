use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use throwline::config::{self, Config};
use throwline::layout::{self, ConnectorStyle, LayoutOptions};
use throwline::notation;
use throwline::routes::{self, AppState};
use throwline::{NotationError, RenderError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "throwline", about = "Send/receive notation diagrams")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the classified tokens as JSON.
    Tokens {
        notation: String,
        /// Skip bracket and alphabet validation.
        #[arg(long, default_value_t = false)]
        lenient: bool,
    },
    /// Print sender/receiver lists and resolved links as JSON.
    Links { notation: String },
    /// Render a diagram.
    Render(RenderArgs),
    /// Serve the HTTP renderer.
    Serve {
        #[arg(long, env = "PORT", default_value_t = config::DEFAULT_PORT)]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    notation: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    #[arg(long, env = "THROWLINE_STYLE", value_enum, ignore_case = true, default_value_t = ConnectorStyle::Curve)]
    style: ConnectorStyle,

    #[arg(long, env = "THROWLINE_WIDTH", value_parser = layout::parse_size, default_value_t = config::DEFAULT_WIDTH)]
    width: f64,

    #[arg(long, env = "THROWLINE_HEIGHT", value_parser = layout::parse_size, default_value_t = config::DEFAULT_HEIGHT)]
    height: f64,

    /// Do not draw boxes around grouped tokens.
    #[arg(long, default_value_t = false)]
    no_boxes: bool,

    #[arg(long, short, help = "Output file path; stdout when omitted")]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Tokens { notation, lenient } => run_tokens(&notation, lenient),
        Command::Links { notation } => run_links(&notation),
        Command::Render(args) => run_render(&args),
        Command::Serve { port } => run_serve(port).await,
    }
}

fn run_tokens(input: &str, lenient: bool) -> Result<(), CliError> {
    let tokens = if lenient { notation::tokenize(input) } else { notation::parse(input)? };
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}

fn run_links(input: &str) -> Result<(), CliError> {
    let (_, resolution) = notation::resolve_str(input)?;
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

fn run_render(args: &RenderArgs) -> Result<(), CliError> {
    let options = LayoutOptions {
        width: args.width,
        height: args.height,
        style: args.style,
        group_boxes: !args.no_boxes,
        ..LayoutOptions::default()
    };

    let output = match args.format {
        OutputFormat::Svg => throwline::render(&args.notation, &options)?,
        OutputFormat::Json => {
            let diagram = throwline::build_diagram(&args.notation, &options)?;
            serde_json::to_string_pretty(&diagram)?
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, output)?;
            tracing::info!(path = %path.display(), "diagram written");
        }
        None => println!("{output}"),
    }
    Ok(())
}

async fn run_serve(port: u16) -> Result<(), CliError> {
    let config = Config { port, ..Config::from_env() };
    let app = routes::app(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "throwline listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
