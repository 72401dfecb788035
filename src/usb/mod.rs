//! Vendor control transfers against the SDS 200A.
//!
//! Both helpers sleep for [`SETTLE_DELAY`] after a successful transfer; the
//! device drops requests that follow each other too closely.

mod device;
mod error;
mod hex;
mod script;
mod transfer;

pub use device::{
    open_device, DEFAULT_TIMEOUT, REQUEST_TYPE_IN, REQUEST_TYPE_OUT, SDS_PRODUCT_ID, SDS_VENDOR_ID,
};
pub use error::{Error, Result};
pub use hex::{decode_hex, encode_hex, parse_number, parse_u16, parse_u8};
pub use script::{load_script, parse_script, replay, Step};
pub use transfer::{
    control_in, control_in_exact, control_out, ControlSetup, ControlTransfer, SETTLE_DELAY,
};
