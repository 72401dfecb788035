use crate::highlight::{Marker, DEFAULT_SGR};
use tracing::warn;

pub const COLOR_VAR: &str = "LINEDIFF_COLOR";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub marker: Marker,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_color(std::env::var(COLOR_VAR).ok().as_deref())
    }

    pub fn from_color(color: Option<&str>) -> Self {
        let marker = match color.map(str::trim) {
            None | Some("") => Marker::default(),
            Some(params) => Marker::from_sgr(params).unwrap_or_else(|| {
                warn!(
                    value = params,
                    "ignoring {}, expected SGR parameters like {}", COLOR_VAR, DEFAULT_SGR
                );
                Marker::default()
            }),
        };
        Self { marker }
    }
}
