use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sds_tools::capture::{self, ScriptFilter};
use sds_tools::logging;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Inspect USBPcap captures of SDS 200A traffic.
#[derive(Parser, Debug)]
#[command(name = "sds-capture", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One usbmon-style line per packet, for every capture given
    Mon {
        #[arg(required = true)]
        captures: Vec<PathBuf>,
    },
    /// Describe every packet, or only the one numbered `packet`
    Dump {
        capture: PathBuf,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        packet: Option<u32>,
    },
    /// Emit the control transfers as a JSON replay script for sds-ctrl
    Script {
        capture: PathBuf,
        #[arg(long)]
        bus: Option<u16>,
        #[arg(long)]
        device: Option<u16>,
        /// Keep standard and class requests as well
        #[arg(long)]
        all: bool,
    },
}

fn load(path: &Path) -> Result<Vec<capture::UsbPacket>> {
    let records =
        capture::read_pcap(path).with_context(|| format!("reading {}", path.display()))?;
    capture::parse_packets(&records).with_context(|| format!("decoding {}", path.display()))
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Mon { captures } => {
            for path in &captures {
                let records =
                    capture::read_pcap(path).with_context(|| format!("reading {}", path.display()))?;
                for (index, record) in records.iter().enumerate() {
                    let packet = capture::parse_packet(index, &record.data)
                        .with_context(|| format!("decoding {}", path.display()))?;
                    let line = capture::mon_line(index, &packet, record.timestamp_micros());
                    writeln!(out, "{}", line)?;
                }
            }
        }
        Command::Dump { capture: path, packet } => {
            let records =
                capture::read_pcap(&path).with_context(|| format!("reading {}", path.display()))?;
            let wanted = packet.map(|n| n as usize);
            if let Some(n) = wanted {
                if n >= records.len() {
                    bail!("{} has only {} packets", path.display(), records.len());
                }
            }

            let mut start = None;
            for (index, record) in records.iter().enumerate() {
                if wanted.is_some_and(|n| n != index) {
                    continue;
                }
                let packet = capture::parse_packet(index, &record.data)
                    .with_context(|| format!("decoding {}", path.display()))?;
                let now = record.timestamp_micros();
                let offset = now.saturating_sub(*start.get_or_insert(now));
                write!(out, "{}", capture::dump_block(index, &packet, offset))?;
            }
        }
        Command::Script {
            capture: path,
            bus,
            device,
            all,
        } => {
            let packets = load(&path)?;
            let filter = ScriptFilter {
                bus,
                device,
                all_requests: all,
            };
            let steps = capture::control_script(&packets, filter);
            serde_json::to_writer_pretty(&mut out, &steps)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
