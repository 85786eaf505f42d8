// Scannable code images for the back of each card.
// The icon is resolved (async, possibly over the network) before the CPU-bound
// rendering starts; `CodeImageGenerator` itself is synchronous.

pub mod icon;
pub mod qr;

pub use icon::{HttpIconSource, IconCache, IconSource};
pub use qr::{CodeImage, CodeImageGenerator, DEFAULT_SCHEME};
