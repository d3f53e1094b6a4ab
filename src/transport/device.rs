//! # Device Transport
//!
//! A duplex byte stream to a printer exposed as a character device:
//!
//! - `/dev/usb/lp0` for USB (Linux `usblp` driver)
//! - `/dev/rfcomm0` for Bluetooth SPP bound with `rfcomm bind`
//!
//! ## TTY Configuration
//!
//! When the device is a tty (RFCOMM, USB serial adapters) it is switched to
//! raw mode so binary data passes unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR, ICRNL
//! - **No flow control**: IXON, IXOFF, IXANY (0x11/0x13 occur in raster data)
//! - **No output processing**: OPOST
//! - **8-bit characters**: CS8, no parity
//! - **Non-canonical, no echo**: ICANON, ECHO, ECHONL, ISIG, IEXTEN off

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;
use std::path::Path;

use crate::error::{PtrasterError, Result};

/// Printer connection over a character device.
///
/// ## Example
///
/// ```no_run
/// use ptraster::protocol::query_status_information;
/// use ptraster::transport::DeviceTransport;
///
/// let mut transport = DeviceTransport::open("/dev/usb/lp0")?;
/// let status = query_status_information(&mut transport)?;
/// println!("{}", status);
/// # Ok::<(), ptraster::PtrasterError>(())
/// ```
#[derive(Debug)]
pub struct DeviceTransport {
    file: File,
}

impl DeviceTransport {
    /// Open `device` for reading and writing.
    ///
    /// ## Errors
    ///
    /// Returns [`PtrasterError::Transport`] if the device doesn't exist,
    /// permission is denied (the user may need the `lp` or `dialout` group),
    /// or TTY configuration fails.
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self> {
        let path = device.as_ref();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| {
                PtrasterError::Transport(format!("Failed to open {}: {}", path.display(), e))
            })?;

        let fd = file.as_raw_fd();
        // SAFETY: fd is owned by `file` and open for the duration of the call.
        if unsafe { libc::isatty(fd) } == 1 {
            configure_tty_raw(fd)?;
        }

        tracing::info!(device = %path.display(), "Opened printer device");
        Ok(Self { file })
    }
}

impl Read for DeviceTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for DeviceTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Configure a file descriptor for raw TTY mode.
fn configure_tty_raw(fd: i32) -> Result<()> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    // SAFETY: tcgetattr fully initializes the struct on success.
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(PtrasterError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    // SAFETY: tcgetattr returned 0 above.
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    // Block until at least one byte arrives so read_exact gets the full reply.
    termios.c_cc[libc::VMIN] = 1;
    termios.c_cc[libc::VTIME] = 0;

    // SAFETY: fd is a valid tty and termios is initialized.
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(PtrasterError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device() {
        let err = DeviceTransport::open("/nonexistent/ptraster-device").unwrap_err();
        match err {
            PtrasterError::Transport(msg) => assert!(msg.contains("/nonexistent/ptraster-device")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_regular_file_round_trip() {
        let path = std::env::temp_dir().join(format!("ptraster-transport-{}", std::process::id()));
        std::fs::write(&path, b"").unwrap();
        {
            let mut transport = DeviceTransport::open(&path).unwrap();
            transport.write_all(&[0x1B, 0x40]).unwrap();
            transport.flush().unwrap();
        }
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x1B, 0x40]);
        std::fs::remove_file(&path).unwrap();
    }
}
