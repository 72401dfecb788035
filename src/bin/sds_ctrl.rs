use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sds_tools::logging;
use sds_tools::usb::{self, ControlSetup};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Send vendor control transfers to an SDS 200A.
#[derive(Parser, Debug)]
#[command(name = "sds-ctrl", version)]
struct Cli {
    /// USB vendor id
    #[arg(long, global = true, default_value = "0x0da8", value_parser = usb::parse_u16)]
    vid: u16,

    /// USB product id
    #[arg(long, global = true, default_value = "0x0001", value_parser = usb::parse_u16)]
    pid: u16,

    /// Per-transfer timeout in milliseconds
    #[arg(long, global = true, default_value_t = 250)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Host-to-device transfer
    Out {
        #[command(flatten)]
        setup: SetupArgs,
        /// Payload as hex, e.g. "0e010000"
        #[arg(long)]
        data: Option<String>,
    },
    /// Device-to-host transfer; prints the received bytes as hex
    In {
        #[command(flatten)]
        setup: SetupArgs,
        #[arg(long, value_parser = usb::parse_u16)]
        length: u16,
        /// Fail unless exactly `length` bytes arrive
        #[arg(long)]
        exact: bool,
    },
    /// Replay a JSON transfer script
    Replay { script: PathBuf },
}

#[derive(Args, Debug)]
struct SetupArgs {
    #[arg(long, value_parser = usb::parse_u8)]
    request_type: u8,
    #[arg(long, value_parser = usb::parse_u8)]
    request: u8,
    #[arg(long, default_value = "0", value_parser = usb::parse_u16)]
    value: u16,
    #[arg(long, default_value = "0", value_parser = usb::parse_u16)]
    index: u16,
}

impl From<&SetupArgs> for ControlSetup {
    fn from(args: &SetupArgs) -> Self {
        ControlSetup::new(args.request_type, args.request, args.value, args.index)
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let timeout = Duration::from_millis(cli.timeout_ms);

    // Parse the script before touching the device.
    let steps = match &cli.command {
        Command::Replay { script } => Some(
            usb::load_script(script).with_context(|| format!("loading {}", script.display()))?,
        ),
        _ => None,
    };

    let handle = usb::open_device(cli.vid, cli.pid)?;
    info!(vid = cli.vid, pid = cli.pid, "device opened");

    match &cli.command {
        Command::Out { setup, data } => {
            usb::control_out(&handle, setup.into(), data.as_deref(), timeout)
                .context("control out")?;
        }
        Command::In {
            setup,
            length,
            exact,
        } => {
            let bytes = if *exact {
                usb::control_in_exact(&handle, setup.into(), *length, timeout)
            } else {
                usb::control_in(&handle, setup.into(), *length, timeout)
            }
            .context("control in")?;
            println!("{}", usb::encode_hex(&bytes));
        }
        Command::Replay { script } => {
            let steps = steps.unwrap_or_default();
            usb::replay(&handle, &steps, timeout, |index, bytes| {
                println!("{}: {}", index, usb::encode_hex(bytes));
            })
            .with_context(|| format!("replaying {}", script.display()))?;
            info!(steps = steps.len(), "replay finished");
        }
    }

    Ok(())
}
