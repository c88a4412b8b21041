use deku::prelude::*;

use super::constants::SIGNATURE;

/// The last two fields of the file, both fixed-size.
///
/// This is always [`FieldWidths::epilogue()`][super::FieldWidths::epilogue] bytes from the end.
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub struct Epilogue {
	/// Length in bytes of the trailer, from the width field to the end of the script.
	pub data_length: u32,

	/// Signature.
	///
	/// Should match [`SIGNATURE`].
	pub signature: [u8; 9],
}

impl Epilogue {
	/// Epilogue for a trailer payload of this length.
	pub const fn new(data_length: u32) -> Self {
		Self {
			data_length,
			signature: SIGNATURE,
		}
	}

	/// Whether the signature is the SGF one.
	pub fn is_authorized(&self) -> bool {
		self.signature == SIGNATURE
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn writes_length_then_signature() {
		let bytes = Epilogue::new(34).to_bytes().expect("epilogue serialises");
		assert_eq!(&bytes[..4], &[0, 0, 0, 34]);
		assert_eq!(&bytes[4..], b"SGF-asset");
	}

	#[test]
	fn reads_foreign_signature() {
		let mut bytes = vec![0, 0, 1, 0];
		bytes.extend(b"PNG-asset");
		let (_, epilogue) = Epilogue::from_bytes((&bytes, 0)).expect("epilogue parses");
		assert_eq!(epilogue.data_length, 256);
		assert!(!epilogue.is_authorized());
	}
}
