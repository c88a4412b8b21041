//! Backward offset algebra.
//!
//! Every field of the trailer is found by seeking from the end of the file. The epilogue is at a
//! fixed displacement; it holds the data length, and from that the width field is located, and
//! each following field is the previous one plus its width. Only the script's position depends
//! on anything else: the number of frames in between.
//!
//! Displacements are negative, as in [`SeekFrom::End`].

use std::io::{Read, Seek, SeekFrom};

use tracing::trace;

use crate::{
	error::{ErrorKind, Result},
	format::WIDTHS,
};

/// Field positions as negative displacements from the end of the file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Displacements {
	/// Length of the trailer payload.
	pub data_length: u32,

	/// Number of frames, once known.
	///
	/// Only affects [`scripts_count()`][Self::scripts_count] and [`scripts()`][Self::scripts].
	pub frames_count: u16,
}

impl Displacements {
	/// The signature.
	pub const SIGNATURE: i64 = -(WIDTHS.signature as i64);

	/// The data length, and the epilogue which starts with it.
	pub const DATA_LENGTH: i64 = -(WIDTHS.epilogue() as i64);

	/// Displacements for a trailer of this data length, with frames not yet known.
	pub const fn new(data_length: u32) -> Self {
		Self {
			data_length,
			frames_count: 0,
		}
	}

	/// Set the frame count, which places the script fields.
	pub const fn with_frames_count(self, frames_count: u16) -> Self {
		Self {
			frames_count,
			..self
		}
	}

	/// The width field, which is the start of the trailer.
	pub const fn width(&self) -> i64 {
		Self::DATA_LENGTH - self.data_length as i64
	}

	/// The height field.
	pub const fn height(&self) -> i64 {
		self.width() + WIDTHS.width as i64
	}

	/// The registration point's X field.
	pub const fn reg_axis_x(&self) -> i64 {
		self.height() + WIDTHS.height as i64
	}

	/// The registration point's Y field.
	pub const fn reg_axis_y(&self) -> i64 {
		self.reg_axis_x() + WIDTHS.reg_axis_x as i64
	}

	/// The frame count field, which is also the start of the frames block.
	pub const fn frames_count(&self) -> i64 {
		self.reg_axis_y() + WIDTHS.reg_axis_y as i64
	}

	/// The first frame rectangle.
	pub const fn frame_rects(&self) -> i64 {
		self.frames_count() + WIDTHS.frames_count as i64
	}

	/// The script length field.
	pub const fn scripts_count(&self) -> i64 {
		self.frame_rects() + self.frames_count as i64 * WIDTHS.frame_rect as i64
	}

	/// The script bytes.
	pub const fn scripts(&self) -> i64 {
		self.scripts_count() + WIDTHS.scripts_count as i64
	}
}

/// Turn a displacement into an absolute position, checking `length` bytes fit in the file.
pub fn resolve(file_size: u64, displacement: i64, length: u64) -> Result<u64> {
	let out_of_bounds = || ErrorKind::OutOfBounds {
		displacement,
		length,
		file_size,
	};

	let back = displacement.unsigned_abs();
	if displacement > 0 || back > file_size || length > back {
		return Err(out_of_bounds().into());
	}

	Ok(file_size - back)
}

/// Length of everything before the trailer: the PNG data.
///
/// This is where the file gets truncated when the trailer is rewritten.
pub fn png_length(file_size: u64, data_length: u32) -> Result<u64> {
	let displacement = Displacements::new(data_length).width();
	resolve(file_size, displacement, 0)
}

/// Read `length` bytes at `displacement` from the end.
///
/// The range is bounds-checked against `file_size` before seeking.
#[cfg_attr(feature = "expose-internals", visibility::make(pub))]
pub(crate) fn read_from_end<R: Read + Seek>(
	reader: &mut R,
	file_size: u64,
	displacement: i64,
	length: usize,
) -> Result<Vec<u8>> {
	let position = resolve(file_size, displacement, length as u64)?;
	reader.seek(SeekFrom::End(displacement))?;

	let mut bytes = vec![0; length];
	reader.read_exact(&mut bytes)?;
	trace!(%displacement, %position, ?bytes, "read from end");
	Ok(bytes)
}

/// Read a big-endian `u16` at `displacement` from the end.
#[cfg_attr(feature = "expose-internals", visibility::make(pub))]
pub(crate) fn read_u16_from_end<R: Read + Seek>(
	reader: &mut R,
	file_size: u64,
	displacement: i64,
) -> Result<u16> {
	let bytes = read_from_end(reader, file_size, displacement, 2)?;
	Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}
