//! md2dita - convert a Markdown document to a DITA topic

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod convert;

#[derive(Parser)]
#[command(name = "md2dita")]
#[command(version)]
#[command(about = "Convert Markdown to a DITA topic", long_about = None)]
struct Cli {
    /// Input file or file URL ('-' or absent for stdin)
    input: Option<String>,

    /// Write output to FILE (default stdout)
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Character encoding label of the input (default UTF-8)
    #[arg(long)]
    encoding: Option<String>,

    /// Use the front-matter `id` key as the topic id
    #[arg(long)]
    id_from_metadata: bool,

    /// TOML file with serializer options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the event stream as JSON lines instead of XML
    #[arg(long)]
    events: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the document.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "md2dita=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    convert::execute(convert::ConvertArgs {
        input: cli.input,
        output: cli.output,
        encoding: cli.encoding,
        id_from_metadata: cli.id_from_metadata,
        config: cli.config,
        events: cli.events,
    })
}
