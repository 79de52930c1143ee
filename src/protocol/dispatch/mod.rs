//! Top-level dispatch: inspect the leading 12-bit message number and
//! route the payload to the matching decoder. Every per-type decoder
//! re-reads the number itself, so a record coming out of this module is
//! always internally consistent.
use crate::error::DecodeError;
use crate::infra::codec::bits::BitReader;
use crate::protocol::legacy::{
    decode_1001, decode_1002, decode_1003, decode_1004, decode_1010, decode_1012,
};
use crate::protocol::messages::{
    AntennaDescriptorMessage, Constellation, GloBiasMessage, MsmFamily, MsmMessage,
    ObservationMessage, ProprietaryMessage, RefStationMessage, ReceiverInfoMessage, TextMessage,
};
use crate::protocol::msm::{decode_msm4, decode_msm5, decode_msm6, decode_msm7};
use crate::protocol::proprietary::decode_4062;
use crate::protocol::station::{
    decode_1005, decode_1006, decode_1007, decode_1008, decode_1029, decode_1033, decode_1230,
};

/// Decoded RTCM message, tagged by family.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// 1001-1004, 1010, 1012.
    Observation(ObservationMessage),
    /// 1005/1006.
    RefStation(RefStationMessage),
    /// 1007/1008.
    AntennaDescriptor(AntennaDescriptorMessage),
    /// 1033.
    ReceiverInfo(ReceiverInfoMessage),
    /// 1029.
    Text(TextMessage),
    /// 1230.
    GloBias(GloBiasMessage),
    /// MSM4-7, every supported constellation.
    Msm(MsmMessage),
    /// 4062.
    Proprietary(ProprietaryMessage),
}

/// Decode one framed-and-verified RTCM payload into a typed message.
/// Message numbers outside the supported set yield
/// [`DecodeError::MessageTypeMismatch`].
pub fn decode_message(payload: &[u8]) -> Result<Message, DecodeError> {
    let mut reader = BitReader::new(payload);
    let msg_num = reader.read_u16(12)?;

    #[cfg(feature = "defmt")]
    defmt::trace!("dispatching message {}", msg_num);

    match msg_num {
        1001 | 1002 | 1003 | 1004 | 1010 | 1012 => {
            let mut msg = ObservationMessage::new();
            match msg_num {
                1001 => decode_1001(payload, &mut msg)?,
                1002 => decode_1002(payload, &mut msg)?,
                1003 => decode_1003(payload, &mut msg)?,
                1004 => decode_1004(payload, &mut msg)?,
                1010 => decode_1010(payload, &mut msg)?,
                _ => decode_1012(payload, &mut msg)?,
            }
            Ok(Message::Observation(msg))
        }
        1005 | 1006 => {
            let mut msg = RefStationMessage::new();
            if msg_num == 1005 {
                decode_1005(payload, &mut msg)?;
            } else {
                decode_1006(payload, &mut msg)?;
            }
            Ok(Message::RefStation(msg))
        }
        1007 | 1008 => {
            let mut msg = AntennaDescriptorMessage::new();
            if msg_num == 1007 {
                decode_1007(payload, &mut msg)?;
            } else {
                decode_1008(payload, &mut msg)?;
            }
            Ok(Message::AntennaDescriptor(msg))
        }
        1029 => {
            let mut msg = TextMessage::new();
            decode_1029(payload, &mut msg)?;
            Ok(Message::Text(msg))
        }
        1033 => {
            let mut msg = ReceiverInfoMessage::new();
            decode_1033(payload, &mut msg)?;
            Ok(Message::ReceiverInfo(msg))
        }
        1230 => {
            let mut msg = GloBiasMessage::new();
            decode_1230(payload, &mut msg)?;
            Ok(Message::GloBias(msg))
        }
        4062 => {
            let mut msg = ProprietaryMessage::new();
            decode_4062(payload, &mut msg)?;
            Ok(Message::Proprietary(msg))
        }
        _ => {
            let (_, family) = Constellation::from_msm_msg_num(msg_num)
                .ok_or(DecodeError::MessageTypeMismatch { found: msg_num })?;
            let mut msg = MsmMessage::new();
            match family {
                MsmFamily::Msm4 => decode_msm4(payload, &mut msg)?,
                MsmFamily::Msm5 => decode_msm5(payload, &mut msg)?,
                MsmFamily::Msm6 => decode_msm6(payload, &mut msg)?,
                MsmFamily::Msm7 => decode_msm7(payload, &mut msg)?,
            }
            Ok(Message::Msm(msg))
        }
    }
}
