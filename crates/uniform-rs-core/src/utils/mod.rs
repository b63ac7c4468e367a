//! Utility functions for uniform-rs.
//!
//! - [`text`]: caption cleanup, HTML escaping and lenient integer parsing.

pub mod text;
