use sds_tools::config::Config;
use sds_tools::highlight::Highlighter;
use sds_tools::{logging, stream};
use std::io;

fn main() -> io::Result<()> {
    logging::init();

    let config = Config::from_env();
    let mut highlighter = Highlighter::new(config.marker);

    #[cfg(unix)]
    sds_tools::signal::spawn_reset_listener(highlighter.columns())?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    stream::run_highlighter(&mut highlighter, stdin.lock(), stdout.lock())
}
