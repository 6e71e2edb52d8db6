//! uinput synthesized key device
//!
//! The device node is opened first and registered separately, so the daemon
//! can detach between the two steps. A registered device is torn down again
//! when the handle is dropped.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::mem::size_of;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::slice;

use libc::{c_int, c_ulong};
use picoups_hal::input::{EV_KEY, EV_SYN, SYN_REPORT};
use picoups_hal::{DeviceIdentity, InputError, InputSink, KeyAction, KeyCode};
use tracing::{debug, info};

use self::ioctl::{
    ui_dev_create, ui_dev_destroy, ui_set_evbit, ui_set_keybit, InputEvent, InputId, Timeval,
    UserDev, ABS_CNT, UINPUT_MAX_NAME_SIZE,
};

/// Default uinput control node
pub const DEFAULT_UINPUT: &str = "/dev/uinput";

/// Kernel ABI of `linux/uinput.h` and `linux/input.h`
mod ioctl {
    pub const UINPUT_MAX_NAME_SIZE: usize = 80;
    pub const ABS_CNT: usize = 64;

    #[repr(C)]
    pub struct Timeval {
        pub tv_sec: libc::time_t,
        pub tv_usec: libc::suseconds_t,
    }

    /// `struct input_event`
    #[repr(C)]
    pub struct InputEvent {
        pub time: Timeval,
        pub kind: u16,
        pub code: u16,
        pub value: i32,
    }

    /// `struct input_id`
    #[repr(C)]
    pub struct InputId {
        pub bustype: u16,
        pub vendor: u16,
        pub product: u16,
        pub version: u16,
    }

    /// `struct uinput_user_dev`
    #[repr(C)]
    pub struct UserDev {
        pub name: [u8; UINPUT_MAX_NAME_SIZE],
        pub id: InputId,
        pub ff_effects_max: u32,
        pub absmax: [i32; ABS_CNT],
        pub absmin: [i32; ABS_CNT],
        pub absfuzz: [i32; ABS_CNT],
        pub absflat: [i32; ABS_CNT],
    }

    nix::ioctl_none!(ui_dev_create, b'U', 1);
    nix::ioctl_none!(ui_dev_destroy, b'U', 2);
    nix::ioctl_write_int!(ui_set_evbit, b'U', 100);
    nix::ioctl_write_int!(ui_set_keybit, b'U', 101);
}

/// View a kernel record as the bytes written to the device
fn record_bytes<T>(record: &T) -> &[u8] {
    // SAFETY: only used with the `repr(C)` records above, which are built
    // from integers and laid out without padding.
    unsafe { slice::from_raw_parts((record as *const T).cast::<u8>(), size_of::<T>()) }
}

/// Map the result of one registration ioctl
fn step(step: &'static str, result: nix::Result<c_int>) -> Result<(), InputError> {
    result.map(drop).map_err(|errno| InputError::Register {
        step,
        source: errno.into(),
    })
}

/// Handle on the uinput control node
#[derive(Debug)]
pub struct UinputDevice {
    file: File,
    created: bool,
}

impl UinputDevice {
    /// Open the control node for non-blocking writes
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(|source| InputError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(uinput = %path.display(), "uinput opened");
        Ok(Self {
            file,
            created: false,
        })
    }

    /// Declare key and barrier events, describe the device and create it
    pub fn register(
        &mut self,
        identity: &DeviceIdentity,
        keys: &[KeyCode],
    ) -> Result<(), InputError> {
        let name = identity.name.as_bytes();
        // Room for the terminating NUL
        if name.len() >= UINPUT_MAX_NAME_SIZE {
            return Err(InputError::NameTooLong(name.len()));
        }

        let fd = self.file.as_raw_fd();

        // SAFETY: UI_SET_EVBIT and UI_SET_KEYBIT take the bit number by value.
        step("enable key events", unsafe {
            ui_set_evbit(fd, c_ulong::from(EV_KEY))
        })?;
        step("enable barrier events", unsafe {
            ui_set_evbit(fd, c_ulong::from(EV_SYN))
        })?;
        for key in keys {
            step("enable key", unsafe { ui_set_keybit(fd, c_ulong::from(key.0)) })?;
        }

        let mut record = UserDev {
            name: [0; UINPUT_MAX_NAME_SIZE],
            id: InputId {
                bustype: identity.bustype,
                vendor: identity.vendor,
                product: identity.product,
                version: identity.version,
            },
            ff_effects_max: 0,
            absmax: [0; ABS_CNT],
            absmin: [0; ABS_CNT],
            absfuzz: [0; ABS_CNT],
            absflat: [0; ABS_CNT],
        };
        record.name[..name.len()].copy_from_slice(name);

        let bytes = record_bytes(&record);
        match self.file.write(bytes) {
            Ok(written) if written == bytes.len() => {}
            Ok(_) => {
                return Err(InputError::Register {
                    step: "describe device",
                    source: io::ErrorKind::WriteZero.into(),
                })
            }
            Err(source) => {
                return Err(InputError::Register {
                    step: "describe device",
                    source,
                })
            }
        }

        // SAFETY: UI_DEV_CREATE takes no argument.
        step("create device", unsafe { ui_dev_create(fd) })?;
        self.created = true;

        info!(name = identity.name, keys = keys.len(), "input device registered");
        Ok(())
    }

    fn emit(&mut self, kind: u16, code: u16, value: i32) -> Result<(), InputError> {
        // The kernel stamps the event
        let event = InputEvent {
            time: Timeval {
                tv_sec: 0,
                tv_usec: 0,
            },
            kind,
            code,
            value,
        };

        let bytes = record_bytes(&event);
        let written = self.file.write(bytes).map_err(InputError::Write)?;
        if written < bytes.len() {
            return Err(InputError::ShortWrite {
                written,
                expected: bytes.len(),
            });
        }
        Ok(())
    }
}

impl InputSink for UinputDevice {
    fn key(&mut self, code: KeyCode, action: KeyAction) -> Result<(), InputError> {
        self.emit(EV_KEY, code.0, action.value())
    }

    fn sync(&mut self) -> Result<(), InputError> {
        self.emit(EV_SYN, SYN_REPORT, 0)
    }
}

impl Drop for UinputDevice {
    fn drop(&mut self) {
        if self.created {
            // SAFETY: UI_DEV_DESTROY takes no argument. Failure only leaves
            // the device to be removed when the node is closed.
            let _ = unsafe { ui_dev_destroy(self.file.as_raw_fd()) };
            debug!("input device destroyed");
        }
    }
}
