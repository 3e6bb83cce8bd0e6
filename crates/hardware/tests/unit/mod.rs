//! # Unit Components
//!
//! One module per crate component.




/// Backing store bounds and contents.
pub mod memory;
