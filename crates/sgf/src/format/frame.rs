use deku::prelude::*;

/// Source rectangle of one animation frame within the image.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub struct FrameRect {
	/// Left edge.
	pub x: u16,
	/// Top edge.
	pub y: u16,
	/// Width.
	pub w: u16,
	/// Height.
	pub h: u16,
}

impl FrameRect {
	/// Wire length of one rectangle.
	pub const LENGTH: usize = super::WIDTHS.frame_rect;
}

/// The frames block: a count, then that many rectangles in playback order.
#[derive(Clone, Debug, Default, Eq, PartialEq, DekuRead, DekuWrite)]
pub struct FramesBlock {
	/// Number of frames.
	#[deku(endian = "big", update = "self.rects.len()")]
	pub count: u16,

	/// Frame rectangles, in order.
	#[deku(count = "count")]
	pub rects: Vec<FrameRect>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn frames_keep_their_order() {
		let bytes = [
			0, 2, // count
			0, 0, 0, 0, 0, 10, 0, 10, // first
			0, 10, 0, 0, 0, 10, 0, 10, // second
		];
		let (_, block) = FramesBlock::from_bytes((&bytes, 0)).expect("frames parse");
		assert_eq!(block.count, 2);
		assert_eq!(
			block.rects,
			vec![
				FrameRect { x: 0, y: 0, w: 10, h: 10 },
				FrameRect { x: 10, y: 0, w: 10, h: 10 },
			]
		);
	}

	#[test]
	fn empty_block_is_just_the_count() {
		let block = FramesBlock::default();
		assert_eq!(block.to_bytes().expect("frames serialise"), vec![0, 0]);
	}
}
