use crate::highlight::{format_set, ChangedColumns};
use signal_hook::consts::SIGUSR1;
use signal_hook::iterator::Signals;
use std::io;
use std::thread::JoinHandle;
use tracing::info;

/// Clear `columns` whenever SIGUSR1 arrives and report the cleared set on
/// stderr. The listener thread lives until the process exits.
pub fn spawn_reset_listener(columns: ChangedColumns) -> io::Result<JoinHandle<()>> {
    let mut signals = Signals::new([SIGUSR1])?;

    std::thread::Builder::new()
        .name("reset-listener".to_string())
        .spawn(move || {
            for _ in signals.forever() {
                let cleared = columns.reset();
                info!("changed columns reset");
                eprintln!("{}", format_set(&cleared));
            }
        })
}
