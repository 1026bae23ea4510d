/*
 * convert.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Convert command implementation
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use dita_markdown::{InputSource, SerializerConfig, acquire, to_events};

/// Arguments for a conversion run
#[derive(Debug)]
pub struct ConvertArgs {
    /// Input path or file URL; `None` or `-` reads stdin
    pub input: Option<String>,
    /// Output path; `None` or `-` writes stdout
    pub output: Option<String>,
    pub encoding: Option<String>,
    pub id_from_metadata: bool,
    pub config: Option<PathBuf>,
    /// Emit JSON lines instead of XML
    pub events: bool,
}

/// Execute the conversion
pub fn execute(args: ConvertArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.id_from_metadata)?;
    debug!(?config, "Serializer configuration");

    let stdin = io::stdin();
    let mut source = match args.input.as_deref() {
        None | Some("-") => InputSource::from_reader(stdin.lock()).with_name("<stdin>"),
        Some(location) => InputSource::from_location(location),
    };
    if let Some(label) = &args.encoding {
        source = source.with_encoding(label.as_str());
    }
    let acquired = acquire(source).context("Failed to acquire input document")?;
    info!(document = %acquired.document, "Converting");

    let document = comrak_to_dita::parse_markdown(&acquired.text, Some(&acquired.document));

    // Nothing is written unless the whole document rendered.
    let rendered = if args.events {
        render_events(&to_events(&document, config)?)?
    } else {
        dita_xml::write_xml(&document, config, Vec::new())?
    };

    match args.output.as_deref() {
        None | Some("-") => {
            let mut out = io::stdout().lock();
            out.write_all(&rendered)?;
            out.flush()?;
        }
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path))?;
            let mut out = BufWriter::new(file);
            out.write_all(&rendered)?;
            out.flush()
                .with_context(|| format!("Failed to write output file {}", path))?;
            info!(output = path, "Wrote topic");
        }
    }
    Ok(())
}

/// Build the serializer configuration. The command-line flag wins over
/// the file.
pub fn load_config(path: Option<&Path>, id_from_metadata: bool) -> Result<SerializerConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str::<SerializerConfig>(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => SerializerConfig::default(),
    };
    if id_from_metadata {
        config = config.with_identifier_from_metadata(true);
    }
    Ok(config)
}

/// One JSON object per line.
fn render_events(events: &[dita_markdown::Event]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for event in events {
        serde_json::to_writer(&mut out, event)?;
        out.push(b'\n');
    }
    Ok(out)
}
