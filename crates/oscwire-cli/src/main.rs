use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;

use oscwire_core::{DatagramReport, OscPacket, ToDatagram, describe_datagram};

#[derive(Parser, Debug)]
#[command(name = "oscwire")]
#[command(version)]
#[command(
    about = "Inspector for OSC wire-format datagrams (messages and bundles).",
    long_about = None,
    after_help = "Examples:\n  oscwire dgram decode capture.osc -o report.json\n  oscwire dgram decode --hex 2f737461747573002c000000 --stdout\n  oscwire dgram encode message.json -o message.osc"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on raw OSC datagrams (offline, no networking).
    Dgram {
        #[command(subcommand)]
        command: DgramCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DgramCommands {
    /// Decode a datagram and generate a versioned JSON report.
    #[command(
        after_help = "Examples:\n  oscwire dgram decode capture.osc -o report.json\n  oscwire dgram decode capture.osc --stdout --pretty"
    )]
    Decode {
        /// Path to a datagram file, or hexadecimal text with --hex
        input: String,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Treat INPUT as hexadecimal text instead of a file path
        #[arg(long)]
        hex: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Encode a JSON message/bundle description into a datagram.
    #[command(
        after_help = "Examples:\n  oscwire dgram encode message.json -o message.osc\n  oscwire dgram encode bundle.json --hex"
    )]
    Encode {
        /// Path to a JSON packet description
        input: PathBuf,

        /// Output datagram path
        #[arg(short = 'o', long, required_unless_present = "hex")]
        out: Option<PathBuf>,

        /// Print the datagram as hexadecimal text on stdout
        #[arg(long, conflicts_with = "out")]
        hex: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dgram { command } => match command {
            DgramCommands::Decode {
                input,
                report,
                stdout,
                pretty,
                compact,
                hex,
                quiet,
            } => cmd_dgram_decode(input, report, stdout, pretty, compact, hex, quiet),
            DgramCommands::Encode {
                input,
                out,
                hex,
                quiet,
            } => cmd_dgram_encode(input, out, hex, quiet),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_dgram_decode(
    input: String,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    hex: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let datagram = if hex {
        parse_hex(&input)?
    } else {
        let resolved = resolve_input_path(&PathBuf::from(&input))?;
        validate_input_file(&resolved)?;
        fs::read(&resolved)
            .with_context(|| format!("Failed to read input file: {}", resolved.display()))?
    };

    let rep = describe_datagram(&datagram).map_err(|err| {
        CliError::new(
            format!("datagram decode failed: {err}"),
            Some("the input is not a decodable OSC message or bundle".to_string()),
        )
    })?;
    let json = serialize_report(&rep, pretty, compact)?;

    if stdout {
        print!("{}", json);
        return Ok(());
    }

    let report = report.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--report or --stdout".to_string()),
        )
    })?;
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    Ok(())
}

fn cmd_dgram_encode(
    input: PathBuf,
    out: Option<PathBuf>,
    hex: bool,
    quiet: bool,
) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a JSON packet description".to_string()),
        ));
    }
    let text = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let packet: OscPacket = serde_json::from_str(&text).map_err(|err| {
        CliError::new(
            format!("invalid packet description: {err}"),
            Some(
                r#"expected JSON like {"message":{"address":"/s_new","contents":[{"int32":1000}]}}"#
                    .to_string(),
            ),
        )
    })?;
    let datagram = packet.to_datagram().map_err(|err| {
        CliError::new(format!("datagram encode failed: {err}"), None)
    })?;

    if hex {
        println!("{}", to_hex(&datagram));
        return Ok(());
    }

    let out = out.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--out or --hex".to_string()),
        )
    })?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&out, &datagram)
        .with_context(|| format!("Failed to write datagram: {}", out.display()))?;

    if !quiet {
        eprintln!(
            "OK: datagram written -> {} ({} bytes)",
            out.display(),
            datagram.len()
        );
    }
    Ok(())
}

fn serialize_report(
    rep: &DatagramReport,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn parse_hex(text: &str) -> Result<Vec<u8>, CliError> {
    let cleaned: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if let Some(bad) = cleaned.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(CliError::new(
            format!("invalid hex digit '{bad}' in input"),
            Some("expected only 0-9 and a-f".to_string()),
        ));
    }
    if cleaned.len() % 2 != 0 {
        return Err(CliError::new(
            "hex input has an odd number of digits",
            Some("datagrams are whole bytes; check for a missing digit".to_string()),
        ));
    }
    cleaned
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let digits = std::str::from_utf8(pair).map_err(|_| {
                CliError::new("invalid hex input".to_string(), None)
            })?;
            u8::from_str_radix(digits, 16)
                .map_err(|_| CliError::new("invalid hex input".to_string(), None))
        })
        .collect()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a datagram file, or hexadecimal text with --hex".to_string()),
        ));
    }
    let meta = fs::metadata(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a datagram file, or hexadecimal text with --hex".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let suffix = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches; matches: {}{})",
                pattern,
                matches.len(),
                listed,
                suffix
            ),
            Some("pass a single datagram file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
