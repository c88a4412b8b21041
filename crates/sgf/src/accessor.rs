//! The trailer accessor: open an asset, read and edit its fields, write them back.

use std::{
	ffi::OsString,
	fs::File,
	path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use crate::{error::Result, format::FrameRect, snapshot::Snapshot};

#[doc(inline)]
pub use self::persist::{PersistError, PersistStage};

mod lock;
mod persist;

/// Suffix of the backup copy made while rewriting.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Accessor for one SGF asset on disk.
///
/// All fields are read when the accessor is opened; setters only change the in-memory copy until
/// [`persist()`][Self::persist] is called.
#[derive(Clone, Debug)]
pub struct Accessor {
	path: PathBuf,
	snapshot: Snapshot,
}

impl Accessor {
	/// Open an asset and read its trailer.
	///
	/// Fails with an unauthorized error if the file doesn't end with the SGF signature, and with a
	/// malformed error if the trailer's offsets don't fit the file.
	#[instrument(level = "debug", skip(path), fields(path = ?path.as_ref()))]
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref().to_owned();
		let mut file = File::open(&path)?;
		let snapshot = Snapshot::read(&mut file)?;
		debug!(data_length=%snapshot.data_length, file_size=%snapshot.file_size, "opened asset");

		Ok(Self { path, snapshot })
	}

	/// Path to the asset.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Path of the backup copy made while rewriting: the asset's path with `.bak` appended.
	pub fn backup_path(&self) -> PathBuf {
		let mut name = OsString::from(self.path.as_os_str());
		name.push(BACKUP_SUFFIX);
		PathBuf::from(name)
	}

	/// All fields as currently held.
	pub fn snapshot(&self) -> &Snapshot {
		&self.snapshot
	}

	/// Image width.
	pub fn width(&self) -> u16 {
		self.snapshot.placement.width
	}

	/// Image height.
	pub fn height(&self) -> u16 {
		self.snapshot.placement.height
	}

	/// Registration point, X axis.
	pub fn reg_axis_x(&self) -> u16 {
		self.snapshot.placement.reg_axis_x
	}

	/// Registration point, Y axis.
	pub fn reg_axis_y(&self) -> u16 {
		self.snapshot.placement.reg_axis_y
	}

	/// Number of frames.
	pub fn frames_count(&self) -> u16 {
		self.snapshot.frames_count()
	}

	/// Frame rectangles, in playback order.
	pub fn frame_rects(&self) -> &[FrameRect] {
		&self.snapshot.frame_rects
	}

	/// Raw frames block, count included.
	pub fn frames_data(&self) -> &[u8] {
		&self.snapshot.frames_data
	}

	/// Script bytes.
	pub fn scripts(&self) -> &[u8] {
		self.snapshot.scripts()
	}

	/// Script length in bytes.
	pub fn scripts_count(&self) -> u16 {
		self.snapshot.scripts_count()
	}

	/// Length of the trailer payload, as last read or written.
	pub fn data_length(&self) -> u32 {
		self.snapshot.data_length
	}

	/// Size of the file, as last read or written.
	pub fn file_size(&self) -> u64 {
		self.snapshot.file_size
	}

	/// Set the image width.
	pub fn set_width(&mut self, width: u16) {
		self.snapshot.placement.width = width;
	}

	/// Set the image height.
	pub fn set_height(&mut self, height: u16) {
		self.snapshot.placement.height = height;
	}

	/// Set the registration point's X axis.
	pub fn set_reg_axis_x(&mut self, x: u16) {
		self.snapshot.placement.reg_axis_x = x;
	}

	/// Set the registration point's Y axis.
	pub fn set_reg_axis_y(&mut self, y: u16) {
		self.snapshot.placement.reg_axis_y = y;
	}

	/// Set both axes of the registration point.
	pub fn set_registration(&mut self, x: u16, y: u16) {
		self.set_reg_axis_x(x);
		self.set_reg_axis_y(y);
	}

	/// Replace the script, which also updates [`scripts_count()`][Self::scripts_count].
	///
	/// Scripts longer than `u16::MAX` bytes are refused.
	pub fn set_scripts(&mut self, scripts: impl Into<Vec<u8>>) -> Result<()> {
		self.snapshot.set_scripts(scripts)
	}
}
