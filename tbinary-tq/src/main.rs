use anyhow::{anyhow, Context, Result};
use std::io::{self, Read, Write};
use std::str::FromStr;
use structopt::StructOpt;
use tbinary::*;
use tbinary_serde::Loose;
use tracing::{debug, Level};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Format {
    Hex,
    Base64,
    Raw,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hex"    => Ok(Format::Hex),
            "base64" => Ok(Format::Base64),
            "raw"    => Ok(Format::Raw),
            other    => Err(anyhow!("Unknown format {}, expected one of hex, base64, raw", other)),
        }
    }
}

/// Encode JSON descriptions of thrift messages into the binary protocol
#[derive(StructOpt)]
#[structopt(name = "tq", author = "Liv Fischer")]
struct Opt {
    /// encode a single value of this type instead of a message, e.g. STRUCT or I64
    #[structopt(short, long = "type")]
    tag: Option<TypeTag>,
    /// write the non-strict message envelope regardless of the `strict` key
    #[structopt(short, long, conflicts_with = "tag")]
    legacy: bool,
    /// compute the size first and allocate the output buffer once
    #[structopt(short, long)]
    presized: bool,
    /// output format: hex, base64 or raw
    #[structopt(short, long, default_value = "hex")]
    format: Format,
    /// log to stderr, repeat for more detail
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    init_logging(opt.verbose);
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
    let Loose(raw) = serde_json::from_str(&buffer).context("Input is no valid JSON")?;
    let strategy = if opt.presized { Strategy::Presized } else { Strategy::Growable };
    let bytes = match opt.tag {
        Some(tag) => Value::from_raw(tag, &raw).context("Invalid value")?.to_bytes_with(strategy)?,
        None => {
            let mut message = Message::from_raw(&raw).context("Invalid message")?;
            if opt.legacy {
                message = message.legacy();
            }
            message.to_bytes_with(strategy)?
        },
    };
    debug!(bytes = bytes.len(), strategy = strategy.name(), "encoded");
    print(&bytes, opt.format)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn print(bytes: &[u8], format: Format) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        Format::Hex    => writeln!(out, "{}", hex(bytes)),
        Format::Base64 => writeln!(out, "{}", base64::encode(bytes)),
        Format::Raw    => out.write_all(bytes),
    };
    written.context("Failed to write stdout")?;
    out.flush().context("Failed to write stdout")
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ")
}
