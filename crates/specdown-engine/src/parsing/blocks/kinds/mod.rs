pub mod code_fence;
pub mod indented_code;
pub mod list_marker;
pub mod paragraph;

pub use code_fence::{CodeFence, FenceSig};
pub use indented_code::IndentedCode;
pub use list_marker::{ListMarker, ListMarkers};
pub use paragraph::Paragraph;
