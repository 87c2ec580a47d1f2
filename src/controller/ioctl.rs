// src/controller/ioctl.rs

//! [`ControlChannel`] over the driver's control device node.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::common::{ControlBuffer, ControlChannel, OpCode};

/// An opened `/dev/<driver>.ctrl` node. Closed on drop.
#[derive(Debug)]
pub struct IoctlChannel {
    file: File,
    path: PathBuf,
}

impl IoctlChannel {
    /// Opens the node read-only, the way the driver expects it.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        info!("opening device {}", path.display());
        let file = OpenOptions::new().read(true).open(path)?;
        Ok(IoctlChannel { file, path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ControlChannel for IoctlChannel {
    type Error = io::Error;

    fn exchange(&mut self, op: OpCode, buffer: &mut ControlBuffer) -> Result<i32, Self::Error> {
        let fd = self.file.as_raw_fd();
        debug!("ioctl({}, {}) on {}", fd, op, self.path.display());
        // SAFETY: the request carries no size; the driver accesses at most
        // the shared buffer, which is CONTROL_BUFFER_LEN bytes and lives
        // for the duration of the call.
        let ret = unsafe { libc::ioctl(fd, op.request_code() as _, buffer.as_mut_ptr()) };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(ret)
    }
}
