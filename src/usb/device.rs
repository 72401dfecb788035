use super::error::{Error, Result};
use rusb::{DeviceHandle, GlobalContext};
use std::time::Duration;

pub const SDS_VENDOR_ID: u16 = 0x0da8;
pub const SDS_PRODUCT_ID: u16 = 0x0001;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(250);

pub const REQUEST_TYPE_OUT: u8 = 0x40; // vendor, host to device
pub const REQUEST_TYPE_IN: u8 = 0xc0; // vendor, device to host

pub fn open_device(vid: u16, pid: u16) -> Result<DeviceHandle<GlobalContext>> {
    rusb::open_device_with_vid_pid(vid, pid).ok_or(Error::DeviceNotFound { vid, pid })
}
