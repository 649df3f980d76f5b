//! The controller's event-device node: exclusive open, blocking
//! fixed-size record reads, field decoding.

use std::fs::File;
use std::io::Read;
use std::mem;
use std::os::fd::AsRawFd;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::bridge::EventSource;
use crate::events::{Category, RawEvent};

// One record is a kernel `struct input_event`: a timeval timestamp
// followed by type/code/value, all native-endian at fixed offsets.
const TIME_LEN: usize = mem::size_of::<libc::timeval>();
pub const RECORD_LEN: usize = TIME_LEN + 8;

const EV_KEY: u16 = 0x01;
const EV_ABS: u16 = 0x03;

// EVIOCGRAB = _IOW('E', 0x90, int)
const EVIOCGRAB: libc::c_ulong = 0x4004_4590;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot grab {path} for exclusive access: {source}")]
    Grab {
        path: String,
        source: std::io::Error,
    },
}

/// Exclusively grabbed event device. The grab keeps the footswitches
/// from also typing into whatever has keyboard focus; it is released
/// again on drop, before the handle closes.
pub struct InputDevice {
    file: File,
    grabbed: bool,
}

impl InputDevice {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DeviceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DeviceError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let rc = unsafe { libc::ioctl(file.as_raw_fd(), EVIOCGRAB, 1 as libc::c_int) };
        if rc != 0 {
            return Err(DeviceError::Grab {
                path: path.display().to_string(),
                source: std::io::Error::last_os_error(),
            });
        }
        Ok(InputDevice {
            file,
            grabbed: true,
        })
    }

    /// Blocking read of the next record. `None` means the stream is
    /// over: end-of-file, a partial record, or a failed read.
    pub fn next_record(&mut self) -> Option<RawEvent> {
        let mut buf = [0u8; RECORD_LEN];
        match self.file.read(&mut buf) {
            Ok(n) if n == RECORD_LEN => Some(decode(&buf)),
            Ok(n) => {
                debug!(bytes = n, "short read, treating as end of stream");
                None
            }
            Err(e) => {
                warn!("read failed: {e}");
                None
            }
        }
    }
}

impl EventSource for InputDevice {
    fn next_event(&mut self) -> Option<RawEvent> {
        self.next_record()
    }
}

impl Drop for InputDevice {
    fn drop(&mut self) {
        if self.grabbed {
            unsafe {
                libc::ioctl(self.file.as_raw_fd(), EVIOCGRAB, 0 as libc::c_int);
            }
        }
    }
}

/// Decode one full record. Every bit pattern yields some triple;
/// unrecognized types land in `Category::Other`.
pub fn decode(buf: &[u8; RECORD_LEN]) -> RawEvent {
    let ty = u16::from_ne_bytes([buf[TIME_LEN], buf[TIME_LEN + 1]]);
    let code = u16::from_ne_bytes([buf[TIME_LEN + 2], buf[TIME_LEN + 3]]);
    let value = i32::from_ne_bytes([
        buf[TIME_LEN + 4],
        buf[TIME_LEN + 5],
        buf[TIME_LEN + 6],
        buf[TIME_LEN + 7],
    ]);
    let category = match ty {
        EV_KEY => Category::Key,
        EV_ABS => Category::Axis,
        _ => Category::Other,
    };
    RawEvent {
        category,
        code,
        value,
    }
}
