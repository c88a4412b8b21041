//! Wire structures of the SGF trailer.
//!
//! All integers are big-endian. The trailer sits after the PNG data:
//!
//! ```text
//! [... PNG bytes ...]
//! [width:2][height:2][reg_x:2][reg_y:2]
//! [frames_count:2][frame:{x:2,y:2,w:2,h:2}]*frames_count
//! [scripts_count:2][scripts:scripts_count bytes]
//! [trailer_length:4]
//! [signature:9 bytes = "SGF-asset"]
//! ```
//!
//! `trailer_length` (called the data length throughout this crate) covers everything from
//! `width` to the end of `scripts`.

#[doc(inline)]
pub use self::constants::*;
#[doc(inline)]
pub use self::epilogue::*;
#[doc(inline)]
pub use self::frame::*;
#[doc(inline)]
pub use self::placement::*;

mod constants;
mod epilogue;
mod frame;
mod placement;
