//! Paint: finished box tree → flat display list.
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! - [`display_list`] - drawing commands and the ordered command list
//! - [`painter`] - box tree traversal in painting order

pub mod display_list;
pub mod painter;

pub use display_list::{DisplayCommand, DisplayList};
pub use painter::Painter;
