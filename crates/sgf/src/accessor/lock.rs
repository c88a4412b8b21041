use std::{fs::File, io::Result};

/// Exclusive advisory lock on an open file, released on drop.
#[derive(Debug)]
pub(super) struct ExclusiveLock<'file> {
	#[cfg_attr(not(unix), allow(dead_code))]
	file: &'file File,
}

#[cfg(unix)]
impl<'file> ExclusiveLock<'file> {
	pub fn acquire(file: &'file File) -> Result<Self> {
		use nix::fcntl::{flock, FlockArg};
		use std::os::fd::AsRawFd;

		flock(file.as_raw_fd(), FlockArg::LockExclusive)?;
		tracing::trace!("acquired exclusive lock");
		Ok(Self { file })
	}
}

#[cfg(unix)]
impl Drop for ExclusiveLock<'_> {
	fn drop(&mut self) {
		use nix::fcntl::{flock, FlockArg};
		use std::os::fd::AsRawFd;

		if let Err(err) = flock(self.file.as_raw_fd(), FlockArg::Unlock) {
			tracing::warn!(%err, "failed to release lock");
		} else {
			tracing::trace!("released exclusive lock");
		}
	}
}

// no advisory locking outside unix
#[cfg(not(unix))]
impl<'file> ExclusiveLock<'file> {
	pub fn acquire(file: &'file File) -> Result<Self> {
		Ok(Self { file })
	}
}
