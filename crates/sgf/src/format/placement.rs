use deku::prelude::*;

/// The first fields of the trailer: image size and registration point.
///
/// The registration point is an anchor used by renderers to position the sprite; it is not
/// interpreted here.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub struct Placement {
	/// Image width.
	pub width: u16,
	/// Image height.
	pub height: u16,
	/// Registration point, X axis.
	pub reg_axis_x: u16,
	/// Registration point, Y axis.
	pub reg_axis_y: u16,
}
