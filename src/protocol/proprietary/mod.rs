//! Decoder for the 4062 proprietary envelope: an inner message type,
//! a sender id, and an opaque counted payload carried through the RTCM
//! stream untouched.
use crate::error::DecodeError;
use crate::infra::codec::bits::BitReader;
use crate::protocol::messages::ProprietaryMessage;

/// Decode message 4062. The four bits after the message number are
/// reserved for future format revisions and must be zero.
pub fn decode_4062(payload: &[u8], msg: &mut ProprietaryMessage) -> Result<(), DecodeError> {
    let mut reader = BitReader::new(payload);
    let msg_num = reader.read_u16(12)?;
    if msg_num != 4062 {
        return Err(DecodeError::MessageTypeMismatch { found: msg_num });
    }
    *msg = ProprietaryMessage::new();
    let reserved = reader.read_u8(4)?;
    if reserved != 0 {
        return Err(DecodeError::InvalidMessage {
            reason: "reserved envelope bits are set",
        });
    }
    msg.msg_type = reader.read_u16(16)?;
    msg.sender_id = reader.read_u16(16)?;
    let count = usize::from(reader.read_u8(8)?);
    let window = msg.data.writable(count).ok_or(DecodeError::InvalidMessage {
        reason: "envelope payload exceeds the record capacity",
    })?;
    reader.read_bytes(window)?;
    Ok(())
}
