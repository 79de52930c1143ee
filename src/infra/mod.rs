//! Low-level infrastructure shared by every decoder.
pub mod codec;
