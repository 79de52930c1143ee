//! Error definitions shared across library modules.
//! Each layer models a specific failure scenario (bit extraction,
//! message decoding).
use thiserror_no_std::Error;

//==================================================================================BITREADER_ERRORS
#[derive(Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised during bitwise buffer reads.
pub enum BitReaderError {
    /// Attempted to read past the end of the buffer.
    #[error("Attempted to read out of bounds -> asked: {asked}, available: {available}")]
    OutOfBounds { asked: usize, available: usize },
    /// Requested more bits than the target type can hold.
    #[error("Cannot read more than {max} bits. Requested: {asked}")]
    TooLongForType { max: u8, asked: u8 },
}

//==================================================================================DECODE_ERROR
#[derive(Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors returned by the message decoders.
pub enum DecodeError {
    /// The leading 12-bit message number is not one this decoder handles.
    #[error("Unexpected message number {found}")]
    MessageTypeMismatch { found: u16 },
    /// The payload violates a structural rule of its message type.
    #[error("Invalid message: {reason}")]
    InvalidMessage { reason: &'static str },
}

impl From<BitReaderError> for DecodeError {
    /// A read past the payload end means the message declares more fields
    /// than the buffer carries.
    fn from(_: BitReaderError) -> Self {
        DecodeError::InvalidMessage {
            reason: "payload ends before the declared fields",
        }
    }
}
