//! Debugging tools for the SDS 200A USB oscilloscope.
//!
//! - [`highlight`] and [`stream`] back the `linediff` binary, which marks the
//!   columns that changed between successive lines of piped text.
//! - [`usb`] wraps vendor control transfers for poking at the device, used by
//!   the `sds-ctrl` binary.
//! - [`capture`] reads USBPcap captures for `sds-capture`; [`hextobin`]
//!   expands quoted hex into bits for `hextobin`.

pub mod capture;
pub mod config;
pub mod hextobin;
pub mod highlight;
pub mod logging;
#[cfg(unix)]
pub mod signal;
pub mod stream;
pub mod usb;
