//! In-memory copy of an asset's trailer.
//!
//! A [`Snapshot`] is read once, field by field, and never re-reads the file: later changes to the
//! file on disk are not observed. Edits happen on the snapshot and are written out in one go.

use std::io::{Read, Seek, SeekFrom};

use deku::prelude::*;
use tracing::{debug, instrument, trace};

use crate::{
	error::{ErrorKind, Result, SimpleError},
	format::{Epilogue, FrameRect, FramesBlock, Placement, SIGNATURE, WIDTHS},
	layout::{read_from_end, read_u16_from_end, Displacements},
};

/// Every field of an asset's trailer, as read from the file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
	/// Size of the file in bytes.
	pub file_size: u64,

	/// Length of the trailer payload, as stored in the file.
	pub data_length: u32,

	/// Image size and registration point.
	pub placement: Placement,

	/// Frame rectangles, in playback order.
	pub frame_rects: Vec<FrameRect>,

	/// The frames block exactly as read, count included.
	///
	/// This is what gets written back; frames are not editable.
	pub frames_data: Vec<u8>,

	scripts: Vec<u8>,
}

impl Snapshot {
	/// Read every field of the trailer.
	///
	/// The signature is checked first and nothing else is read if it doesn't match. The data
	/// length is then cross-checked against the frame and script counts.
	#[instrument(level = "debug", skip(reader))]
	pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
		let file_size = reader.seek(SeekFrom::End(0))?;
		debug!(%file_size, "found end of file");

		Self::check_signature(reader, file_size)?;
		let data_length = Self::read_data_length(reader, file_size)?;
		let disp = Displacements::new(data_length);

		let bytes = read_from_end(reader, file_size, disp.width(), WIDTHS.placement())?;
		let (_, placement) = Placement::from_bytes((&bytes, 0)).map_err(SimpleError::from_deku)?;
		debug!(?placement, "read placement");

		let frames_count = read_u16_from_end(reader, file_size, disp.frames_count())?;
		let needed = WIDTHS.data_length_for(frames_count, 0);
		if needed > u64::from(data_length) {
			return Err(ErrorKind::LengthMismatch {
				stored: data_length,
				computed: needed,
			}
			.into());
		}

		let disp = disp.with_frames_count(frames_count);
		let frames_data = read_from_end(
			reader,
			file_size,
			disp.frames_count(),
			WIDTHS.frames_block(frames_count),
		)?;
		let (_, frames) =
			FramesBlock::from_bytes((&frames_data, 0)).map_err(SimpleError::from_deku)?;
		debug!(count=%frames.count, rects=?frames.rects, "read frames");

		let scripts_count = read_u16_from_end(reader, file_size, disp.scripts_count())?;
		let computed = WIDTHS.data_length_for(frames_count, scripts_count);
		if computed != u64::from(data_length) {
			return Err(ErrorKind::LengthMismatch {
				stored: data_length,
				computed,
			}
			.into());
		}

		let scripts = read_from_end(reader, file_size, disp.scripts(), scripts_count.into())?;
		debug!(%scripts_count, "read scripts");

		Ok(Self {
			file_size,
			data_length,
			placement,
			frame_rects: frames.rects,
			frames_data,
			scripts,
		})
	}

	fn check_signature<R: Read + Seek>(reader: &mut R, file_size: u64) -> Result<()> {
		if file_size < WIDTHS.signature as u64 {
			debug!(%file_size, "file too small to hold a signature");
			return Err(ErrorKind::Unauthorized.into());
		}

		let signature = read_from_end(reader, file_size, Displacements::SIGNATURE, WIDTHS.signature)?;
		if signature != SIGNATURE {
			debug!(?signature, "signature mismatch");
			return Err(ErrorKind::Unauthorized.into());
		}

		Ok(())
	}

	fn read_data_length<R: Read + Seek>(reader: &mut R, file_size: u64) -> Result<u32> {
		let bytes = read_from_end(
			reader,
			file_size,
			Displacements::DATA_LENGTH,
			WIDTHS.epilogue(),
		)?;
		let (_, epilogue) = Epilogue::from_bytes((&bytes, 0)).map_err(SimpleError::from_deku)?;
		trace!(?epilogue, "read epilogue");

		let stored = epilogue.data_length;
		if u64::from(stored) < WIDTHS.minimum_data_length() {
			return Err(ErrorKind::TooShort { stored }.into());
		}

		Ok(stored)
	}

	/// Script bytes. Opaque to this crate.
	pub fn scripts(&self) -> &[u8] {
		&self.scripts
	}

	/// Length of the script in bytes.
	///
	/// Always the length of [`scripts()`][Self::scripts].
	pub fn scripts_count(&self) -> u16 {
		// UNWRAP: set_scripts and read both cap the length at u16::MAX
		#[allow(clippy::unwrap_used)]
		u16::try_from(self.scripts.len()).unwrap()
	}

	/// Replace the script.
	///
	/// Fails and leaves the current script in place if it's longer than `u16::MAX` bytes.
	pub fn set_scripts(&mut self, scripts: impl Into<Vec<u8>>) -> Result<()> {
		let scripts = scripts.into();
		if scripts.len() > usize::from(u16::MAX) {
			return Err(ErrorKind::ScriptTooLong(scripts.len()).into());
		}

		self.scripts = scripts;
		Ok(())
	}

	/// Number of frames.
	pub fn frames_count(&self) -> u16 {
		// UNWRAP: frames came out of a block with a u16 count
		#[allow(clippy::unwrap_used)]
		u16::try_from(self.frame_rects.len()).unwrap()
	}

	/// Build the trailer payload from the current values.
	///
	/// This is everything the data length covers, from the width field to the end of the script.
	pub fn payload(&self) -> Result<Vec<u8>> {
		let placement = self.placement.to_bytes().map_err(SimpleError::from_deku)?;
		let scripts_count = self.scripts_count();

		let mut bytes = Vec::with_capacity(
			placement.len() + self.frames_data.len() + WIDTHS.scripts_count + self.scripts.len(),
		);
		bytes.extend(placement);
		bytes.extend(&self.frames_data);
		bytes.extend(scripts_count.to_be_bytes());
		bytes.extend(&self.scripts);
		Ok(bytes)
	}

	/// Build the whole tail of the file: payload, data length, signature.
	///
	/// Returns the bytes and the new data length.
	pub fn to_trailer_bytes(&self) -> Result<(Vec<u8>, u32)> {
		let mut bytes = self.payload()?;
		let data_length = u32::try_from(bytes.len()).map_err(std::io::Error::other)?;

		let epilogue = Epilogue::new(data_length)
			.to_bytes()
			.map_err(SimpleError::from_deku)?;
		bytes.extend(epilogue);
		Ok((bytes, data_length))
	}
}
