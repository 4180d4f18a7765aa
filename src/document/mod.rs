//! The SVG document: arena tree, parsing, serialization and the shared timeline.

/// [`AnimatedDocument`](animated::AnimatedDocument) and the scoped timeline seek.
pub mod animated;
pub(crate) mod parse;
pub(crate) mod serialize;
pub(crate) mod style;
/// Playback clock.
pub mod timeline;
/// Arena XML tree with stable node ids.
pub mod tree;
