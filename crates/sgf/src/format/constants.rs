/// Signature marking a file as an SGF asset.
///
/// These are the last bytes of every valid asset.
pub const SIGNATURE: [u8; 9] = *b"SGF-asset";

/// Byte widths of every field in the trailer.
///
/// This is the one place field sizes are written down: the reader, the offset algebra in
/// [`layout`][crate::layout] and the writer all go through [`WIDTHS`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldWidths {
	/// Signature.
	pub signature: usize,
	/// Data (trailer) length.
	pub data_length: usize,
	/// Image width.
	pub width: usize,
	/// Image height.
	pub height: usize,
	/// Registration point, X axis.
	pub reg_axis_x: usize,
	/// Registration point, Y axis.
	pub reg_axis_y: usize,
	/// Number of frames.
	pub frames_count: usize,
	/// One frame rectangle.
	pub frame_rect: usize,
	/// Length of the script.
	pub scripts_count: usize,
}

/// The field widths of the SGF trailer.
pub const WIDTHS: FieldWidths = FieldWidths {
	signature: SIGNATURE.len(),
	data_length: 4,
	width: 2,
	height: 2,
	reg_axis_x: 2,
	reg_axis_y: 2,
	frames_count: 2,
	frame_rect: 8,
	scripts_count: 2,
};

impl FieldWidths {
	/// Fixed tail of the file: data length and signature.
	pub const fn epilogue(&self) -> usize {
		self.data_length + self.signature
	}

	/// Fixed head of the trailer: dimensions and registration point.
	pub const fn placement(&self) -> usize {
		self.width + self.height + self.reg_axis_x + self.reg_axis_y
	}

	/// The frames block: its count followed by that many rectangles.
	pub const fn frames_block(&self, frames_count: u16) -> usize {
		self.frames_count + frames_count as usize * self.frame_rect
	}

	/// What the data length must be for a trailer with these counts.
	pub const fn data_length_for(&self, frames_count: u16, scripts_count: u16) -> u64 {
		(self.placement() + self.frames_block(frames_count) + self.scripts_count) as u64
			+ scripts_count as u64
	}

	/// The smallest possible data length: no frames, no script.
	pub const fn minimum_data_length(&self) -> u64 {
		self.data_length_for(0, 0)
	}
}
