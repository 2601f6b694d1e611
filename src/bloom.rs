//! Fixed-parameter Bloom filters: a 16-bit tiny filter and a 256-bit small
//! filter, both with four probes per index.
pub mod small;
pub mod tiny;
pub mod traits;

pub use small::{SMALL_BITMAP_BYTES, SmallBitmap};
pub use tiny::TinyBitmap;
pub use traits::ProbeFilter;
