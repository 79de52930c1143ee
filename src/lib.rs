//! `korri-rtcm` library: bit-level decoders for the RTCM 10403.3 (version 3)
//! GNSS correction stream in a `no_std` environment. The crate exposes the
//! infrastructure module (MSB-first bit codec) and the protocol logic
//! (legacy observations, station metadata, Multiple Signal Messages, the
//! proprietary envelope, and message dispatch).
//!
//! Framing (preamble, length, CRC-24Q) and transport are left to the
//! caller: every decoder expects exactly one verified payload.
#![no_std]

#[cfg(test)]
extern crate std;
//==================================================================================
/// Physical constants, invalid-value sentinels, and format maxima shared
/// with callers.
pub mod constants;
/// Domain and low-level errors (bit extraction, message decoding).
pub mod error;
/// Low-level infrastructure: the bit codec over payload buffers.
pub mod infra;
/// RTCM protocol implementation: field codecs, typed records, and the
/// per-message decoders.
pub mod protocol;
//==================================================================================
