use crate::highlight::Highlighter;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Copy lines from `input` to `output` through the highlighter until the
/// input is exhausted. Each line is flushed as soon as it is written.
pub fn run_highlighter<R, W>(
    highlighter: &mut Highlighter,
    mut input: R,
    mut output: W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    let mut line_count = 0u64;

    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        line_count += 1;

        let rendered = highlighter.render(&line);
        output.write_all(rendered.as_bytes())?;
        output.flush()?;
    }

    debug!(lines = line_count, "end of input");
    Ok(())
}
