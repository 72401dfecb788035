#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub start: String,
    pub end: String,
}

pub const DEFAULT_SGR: &str = "35"; // magenta foreground
const RESET: &str = "\x1b[0m";

impl Marker {
    /// Build a marker from an SGR parameter list such as `35` or `1;31`.
    pub fn from_sgr(params: &str) -> Option<Self> {
        if !is_sgr_params(params) {
            return None;
        }
        Some(Self {
            start: format!("\x1b[{}m", params),
            end: RESET.to_string(),
        })
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            start: format!("\x1b[{}m", DEFAULT_SGR),
            end: RESET.to_string(),
        }
    }
}

fn is_sgr_params(params: &str) -> bool {
    !params.is_empty()
        && params.split(';').all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
