//! RTCM v3 protocol implementation: field codecs, typed records, and the
//! per-message decoders, with the top-level dispatch on the leading
//! 12-bit message number.
pub mod dispatch;
pub mod fields;
pub mod legacy;
pub mod messages;
pub mod msm;
pub mod proprietary;
pub mod station;

#[cfg(test)]
pub(crate) mod testutil;
