//! Error types for opening and reading SGF assets.
use std::borrow::Cow;

use deku::DekuError;
use miette::Diagnostic;
use thiserror::Error;

/// Convenience return type.
pub type Result<T> = std::result::Result<T, Error>;

/// Combined return error type.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
	/// I/O error.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// SGF error that's just a message.
	#[error(transparent)]
	Simple(#[from] SimpleError),
}

impl Error {
	/// The kind of SGF error, if this isn't an I/O error.
	pub fn kind(&self) -> Option<ErrorKind> {
		match self {
			Self::Io(_) => None,
			Self::Simple(err) => Some(err.kind),
		}
	}

	/// Whether the file was rejected for not carrying the SGF signature.
	pub fn is_unauthorized(&self) -> bool {
		self.kind() == Some(ErrorKind::Unauthorized)
	}

	/// Whether the file carries the signature but its trailer can't be read.
	pub fn is_malformed(&self) -> bool {
		self.kind().map_or(false, ErrorKind::is_malformed)
	}
}

/// SGF error.
#[derive(Error, Diagnostic, Debug)]
#[error("sgf: {message}")]
pub struct SimpleError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,
}

impl SimpleError {
	/// New error with the default message for its kind.
	pub fn new(kind: ErrorKind) -> Self {
		Self {
			kind,
			message: kind.default_message(),
		}
	}

	/// New simple error from deku.
	pub fn from_deku(orig: DekuError) -> Self {
		Self::new(ErrorKind::Parse).with_message(orig.to_string())
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

/// SGF error kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The file doesn't end with the SGF signature.
	///
	/// Nothing is read from such a file.
	Unauthorized,

	/// The stored data length is smaller than the fixed fields of a trailer.
	TooShort {
		/// Data length read from the file.
		stored: u32,
	},

	/// A field's computed position falls outside the file.
	OutOfBounds {
		/// Displacement from the end of the file.
		displacement: i64,
		/// Bytes wanted at that displacement.
		length: u64,
		/// Size of the file.
		file_size: u64,
	},

	/// The stored data length disagrees with the sizes of the fields it covers.
	LengthMismatch {
		/// Data length read from the file.
		stored: u32,
		/// Data length needed by the frame and script counts.
		computed: u64,
	},

	/// A script is too long for its two-byte length field.
	ScriptTooLong(usize),

	/// Parse error.
	Parse,
}

impl ErrorKind {
	/// Get the default error message for this error kind.
	pub fn default_message(self) -> Cow<'static, str> {
		match self {
			ErrorKind::Unauthorized => Cow::Borrowed("unauthorized file!"),
			ErrorKind::TooShort { stored } => Cow::Owned(format!(
				"malformed trailer: data length {stored} is below the {} byte minimum",
				crate::format::WIDTHS.minimum_data_length()
			)),
			ErrorKind::OutOfBounds {
				displacement,
				length,
				file_size,
			} => Cow::Owned(format!(
				"malformed trailer: {length} bytes at {displacement} from the end are outside the file ({file_size} bytes)"
			)),
			ErrorKind::LengthMismatch { stored, computed } => Cow::Owned(format!(
				"malformed trailer: data length is {stored} but its fields need {computed} bytes"
			)),
			ErrorKind::ScriptTooLong(len) => Cow::Owned(format!(
				"script is {len} bytes, at most {} fit in an asset",
				u16::MAX
			)),
			ErrorKind::Parse => Cow::Borrowed("parse error"),
		}
	}

	/// Whether this kind describes a trailer that can't be read.
	pub fn is_malformed(self) -> bool {
		matches!(
			self,
			ErrorKind::TooShort { .. }
				| ErrorKind::OutOfBounds { .. }
				| ErrorKind::LengthMismatch { .. }
				| ErrorKind::Parse
		)
	}
}

impl From<ErrorKind> for SimpleError {
	fn from(ek: ErrorKind) -> Self {
		Self::new(ek)
	}
}

impl From<ErrorKind> for Error {
	fn from(ek: ErrorKind) -> Self {
		Self::Simple(ek.into())
	}
}
