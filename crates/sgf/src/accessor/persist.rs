use std::{
	fmt,
	fs::{self, OpenOptions},
	io::{ErrorKind as IoErrorKind, Write},
	path::Path,
};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, instrument, trace, warn};

use crate::{error::Error as SgfError, layout::png_length};

use super::{lock::ExclusiveLock, Accessor};

/// Step of [`Accessor::persist()`] that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PersistStage {
	/// Building the new trailer.
	Encode,
	/// Copying the asset to its backup path.
	Backup,
	/// Opening the backup for appending.
	Open,
	/// Locking the backup.
	Lock,
	/// Cutting the old trailer off the backup.
	Truncate,
	/// Appending the new trailer.
	Write,
	/// Flushing the backup to storage.
	Sync,
	/// Moving the backup over the asset.
	Rename,
}

impl fmt::Display for PersistStage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Encode => "encode",
			Self::Backup => "backup",
			Self::Open => "open",
			Self::Lock => "lock",
			Self::Truncate => "truncate",
			Self::Write => "write",
			Self::Sync => "sync",
			Self::Rename => "rename",
		})
	}
}

impl PersistStage {
	fn failed<E: Into<SgfError>>(self) -> impl FnOnce(E) -> PersistError {
		move |err| PersistError {
			stage: self,
			source: err.into(),
		}
	}
}

/// Rewriting an asset failed.
///
/// The asset itself is left as it was and the backup copy has been removed.
#[derive(Error, Diagnostic, Debug)]
#[error("sgf persist: {stage} step failed")]
#[diagnostic(help("the original file was not modified"))]
pub struct PersistError {
	/// Which step failed.
	pub stage: PersistStage,

	/// Why.
	#[source]
	pub source: SgfError,
}

impl Accessor {
	/// Write the current fields back to the asset.
	///
	/// The asset is copied to [`backup_path()`][Self::backup_path], the old trailer is cut off
	/// the copy, the new one appended, and the copy renamed over the asset. On failure the backup
	/// is removed and the asset is untouched.
	///
	/// On success the data length and file size are updated to what is now on disk.
	#[instrument(level = "debug", skip(self), fields(path = ?self.path))]
	pub fn persist(&mut self) -> Result<(), PersistError> {
		let backup = self.backup_path();
		match self.replace_through(&backup) {
			Ok((data_length, file_size)) => {
				debug!(%data_length, %file_size, "rewrote asset");
				self.snapshot.data_length = data_length;
				self.snapshot.file_size = file_size;
				Ok(())
			}
			Err(err) => {
				warn!(stage=%err.stage, error=%err.source, "rewriting asset failed, removing backup");
				remove_backup(&backup);
				Err(err)
			}
		}
	}

	/// Write the current fields back to the asset, reporting only success.
	///
	/// See [`persist()`][Self::persist] for a version that says what went wrong.
	pub fn write_back(&mut self) -> bool {
		self.persist().is_ok()
	}

	fn replace_through(&self, backup: &Path) -> Result<(u32, u64), PersistError> {
		let (trailer, data_length) = self
			.snapshot
			.to_trailer_bytes()
			.map_err(PersistStage::Encode.failed())?;
		let keep = png_length(self.snapshot.file_size, self.snapshot.data_length)
			.map_err(PersistStage::Truncate.failed())?;

		trace!(?backup, "copy asset to backup");
		fs::copy(&self.path, backup).map_err(PersistStage::Backup.failed())?;

		{
			let file = OpenOptions::new()
				.append(true)
				.open(backup)
				.map_err(PersistStage::Open.failed())?;
			let _lock = ExclusiveLock::acquire(&file).map_err(PersistStage::Lock.failed())?;

			trace!(%keep, "truncate backup to png data");
			file.set_len(keep).map_err(PersistStage::Truncate.failed())?;

			// appending now writes from where the width field goes
			trace!(bytes=%trailer.len(), "append new trailer");
			(&file)
				.write_all(&trailer)
				.map_err(PersistStage::Write.failed())?;
			(&file).flush().map_err(PersistStage::Write.failed())?;
			file.sync_all().map_err(PersistStage::Sync.failed())?;
		}

		trace!("move backup over asset");
		fs::rename(backup, &self.path).map_err(PersistStage::Rename.failed())?;

		Ok((data_length, keep + trailer.len() as u64))
	}
}

fn remove_backup(backup: &Path) {
	let removed = match fs::symlink_metadata(backup) {
		Ok(meta) if meta.is_dir() => fs::remove_dir_all(backup),
		Ok(_) => fs::remove_file(backup),
		Err(err) if err.kind() == IoErrorKind::NotFound => return,
		Err(err) => Err(err),
	};

	if let Err(err) = removed {
		warn!(?backup, %err, "failed to remove backup");
	}
}
