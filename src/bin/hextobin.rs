use sds_tools::{hextobin, logging};
use std::io;

fn main() -> io::Result<()> {
    logging::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    hextobin::run_hextobin(stdin.lock(), stdout.lock())
}
