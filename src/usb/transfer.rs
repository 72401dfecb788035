use super::error::{Error, Result};
use super::hex::decode_hex;
use rusb::{DeviceHandle, UsbContext};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use tracing::debug;

// The device drops requests that follow each other closer than this.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSetup {
    pub request_type: u8,
    pub request: u8,
    #[serde(default)]
    pub value: u16,
    #[serde(default)]
    pub index: u16,
}

impl ControlSetup {
    pub fn new(request_type: u8, request: u8, value: u16, index: u16) -> Self {
        Self {
            request_type,
            request,
            value,
            index,
        }
    }
}

pub trait ControlTransfer {
    fn write_control(
        &self,
        setup: ControlSetup,
        data: &[u8],
        timeout: Duration,
    ) -> rusb::Result<usize>;

    fn read_control(
        &self,
        setup: ControlSetup,
        buf: &mut [u8],
        timeout: Duration,
    ) -> rusb::Result<usize>;
}

impl<T: UsbContext> ControlTransfer for DeviceHandle<T> {
    fn write_control(
        &self,
        setup: ControlSetup,
        data: &[u8],
        timeout: Duration,
    ) -> rusb::Result<usize> {
        DeviceHandle::write_control(
            self,
            setup.request_type,
            setup.request,
            setup.value,
            setup.index,
            data,
            timeout,
        )
    }

    fn read_control(
        &self,
        setup: ControlSetup,
        buf: &mut [u8],
        timeout: Duration,
    ) -> rusb::Result<usize> {
        DeviceHandle::read_control(
            self,
            setup.request_type,
            setup.request,
            setup.value,
            setup.index,
            buf,
            timeout,
        )
    }
}

/// Host-to-device transfer with an optional hex payload. Every byte of the
/// payload must be accepted, then the settle delay is observed.
pub fn control_out<D: ControlTransfer + ?Sized>(
    dev: &D,
    setup: ControlSetup,
    data: Option<&str>,
    timeout: Duration,
) -> Result<()> {
    let payload = match data {
        Some(hex) => decode_hex(hex)?,
        None => Vec::new(),
    };
    if payload.len() > usize::from(u16::MAX) {
        return Err(Error::PayloadTooLarge(payload.len()));
    }

    let written = dev.write_control(setup, &payload, timeout)?;
    debug!(
        request_type = setup.request_type,
        request = setup.request,
        value = setup.value,
        index = setup.index,
        written,
        "control out"
    );
    if written != payload.len() {
        return Err(Error::ShortTransfer {
            expected: payload.len(),
            actual: written,
        });
    }

    thread::sleep(SETTLE_DELAY);
    Ok(())
}

/// Returns what the device actually sent; short reads are not an error.
pub fn control_in<D: ControlTransfer + ?Sized>(
    dev: &D,
    setup: ControlSetup,
    length: u16,
    timeout: Duration,
) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; usize::from(length)];
    let read = dev.read_control(setup, &mut buf, timeout)?;
    buf.truncate(read);
    debug!(
        request_type = setup.request_type,
        request = setup.request,
        value = setup.value,
        index = setup.index,
        read,
        "control in"
    );

    thread::sleep(SETTLE_DELAY);
    Ok(buf)
}

/// Like [`control_in`], but anything shorter than `length` is a
/// [`Error::ShortTransfer`].
pub fn control_in_exact<D: ControlTransfer + ?Sized>(
    dev: &D,
    setup: ControlSetup,
    length: u16,
    timeout: Duration,
) -> Result<Vec<u8>> {
    let bytes = control_in(dev, setup, length, timeout)?;
    if bytes.len() != usize::from(length) {
        return Err(Error::ShortTransfer {
            expected: usize::from(length),
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}
