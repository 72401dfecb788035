use std::io::{self, BufRead, Write};

/// Expands hex digits between single quotes into 4-bit binary groups, one
/// space after every full byte: `'0e'` becomes `'00001110 '`. Anything else,
/// uppercase digits included, passes through and breaks the byte pairing.
#[derive(Debug, Default)]
pub struct HexToBin {
    quoted: bool,
    half_byte: bool,
}

impl HexToBin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, byte: u8, out: &mut Vec<u8>) {
        if !self.quoted {
            if byte == b'\'' {
                self.quoted = true;
            }
            out.push(byte);
            return;
        }

        match nibble(byte) {
            Some(value) => {
                out.extend_from_slice(format!("{:04b}", value).as_bytes());
                if self.half_byte {
                    out.push(b' ');
                }
                self.half_byte = !self.half_byte;
            }
            None => {
                if byte == b'\'' {
                    self.quoted = false;
                }
                self.half_byte = false;
                out.push(byte);
            }
        }
    }

    pub fn convert(&mut self, bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(bytes.len() * 4);
        for &b in bytes {
            self.feed(b, &mut out);
        }
        out
    }
}

fn nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// Filter `input` to `output` line by line until end of input. Quote state
/// carries over line breaks.
pub fn run_hextobin<R, W>(mut input: R, mut output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut converter = HexToBin::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        output.write_all(&converter.convert(&line))?;
        output.flush()?;
    }
    Ok(())
}
