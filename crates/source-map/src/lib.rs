//! Source position tracking for jsx-pipe.
//!
//! [`Span`] and [`LineIndex`] describe positions in the input document for
//! diagnostics and highlighting. [`SourceMap`] turns the generated-to-original
//! pairs collected by the code generator into a version 3 source map.

mod line_index;
mod map;
mod span;

pub use line_index::{LineCol, LineIndex, Position};
pub use map::{MapError, SourceMap};
pub use span::{ByteOffset, Span};
