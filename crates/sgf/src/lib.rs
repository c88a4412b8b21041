//! SGF: animation and script metadata carried in a trailer behind PNG data.
//!
//! An SGF asset is a plain PNG file with a binary trailer appended after the image data. The
//! trailer is located by seeking backward from the end of the file, so the PNG payload itself is
//! never parsed. See [`format`] for the wire layout, [`layout`] for how each field is found, and
//! [`Accessor`] for reading and rewriting an asset.

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[doc(inline)]
pub use self::accessor::{Accessor, PersistError, PersistStage};
#[doc(inline)]
pub use self::snapshot::Snapshot;

pub mod accessor;
pub mod error;
pub mod format;
pub mod layout;
pub mod snapshot;
