//! Bit-level access to RTCM payload buffers.
pub mod bits;
