mod logger;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use logger::Logger;
use s7dissect_core::{DecodedPdu, S7Decoder};
use settings::{Format, Settings, DEFAULT_CONFIG_FILE_NAME};
use std::{
    fs,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};
use tracing::{debug, warn};

/// S7comm PDU decoder
///
/// Reads hex-encoded PDUs, one per line, and prints the decoded tree.
/// Everything after `#` on a line is a comment; spaces between bytes are
/// ignored.
#[derive(Parser)]
#[command(name = "s7dissect")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Decode S7comm PDUs", long_about = None)]
struct Cli {
    /// Configuration file; defaults to 's7dissect.toml' in the working directory
    #[arg(short, long, env = "S7DISSECT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format, overrides the configuration file
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// File of hex PDUs; stdin when absent
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE_NAME));
    let settings = Settings::new(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    Logger::from_name(&settings.log.level).initialize()?;
    debug!(?settings, "settings loaded");

    let format = cli.format.unwrap_or(settings.output.format);
    let decoder = S7Decoder::new(settings.decoder);

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (number, line) in reader.lines().enumerate() {
        let number = number + 1;
        let line = line.with_context(|| format!("failed to read line {number}"))?;
        let Some(bytes) = parse_hex_line(&line)
            .with_context(|| format!("line {number}: invalid hex"))?
        else {
            continue;
        };
        match decoder.decode(&bytes) {
            Ok(pdu) => render(&mut out, format, &pdu)?,
            Err(e) => {
                warn!(line = number, error = %e, "not decoded");
                writeln!(out, "line {number}: {e}")?;
            }
        }
    }
    Ok(())
}

/// Hex bytes of one input line, `None` for blank and comment-only lines.
fn parse_hex_line(line: &str) -> Result<Option<Vec<u8>>, hex::FromHexError> {
    let content = line.split('#').next().unwrap_or_default();
    let digits: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return Ok(None);
    }
    hex::decode(digits).map(Some)
}

fn render(out: &mut impl Write, format: Format, pdu: &DecodedPdu) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer(&mut *out, pdu)?;
            writeln!(out)?;
        }
        Format::Pretty => {
            serde_json::to_writer_pretty(&mut *out, pdu)?;
            writeln!(out)?;
        }
        Format::Summary => writeln!(out, "{}", pdu.summary.info_line())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_line() {
        assert_eq!(parse_hex_line("").unwrap(), None);
        assert_eq!(parse_hex_line("   # setup communication").unwrap(), None);
        assert_eq!(
            parse_hex_line("32 01 00 00 # job").unwrap(),
            Some(vec![0x32, 0x01, 0x00, 0x00])
        );
        assert!(parse_hex_line("32 0").is_err());
    }

    #[test]
    fn test_render_summary() {
        let pdu = s7dissect_core::decode(&[
            0x32, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x08, 0x00, 0x00, 0xF0, 0x00, 0x00, 0x01,
            0x00, 0x01, 0x00, 0xF0,
        ])
        .unwrap();
        let mut out = Vec::new();
        render(&mut out, Format::Summary, &pdu).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ROSCTR:[Job] Function:[Setup communication]\n"
        );
    }
}
