//! Decoders for the station-metadata messages: reference-station position
//! (1005/1006), antenna and receiver descriptors (1007/1008/1033), the
//! Unicode text message (1029), and the GLONASS code-phase biases (1230).
use crate::error::DecodeError;
use crate::infra::codec::bits::BitReader;
use crate::protocol::messages::{
    AntennaDescriptorMessage, GloBiasMessage, RefStationMessage, ReceiverInfoMessage, TextBytes,
    TextMessage,
};

/// ECEF coordinates and the antenna height resolve 0.1 mm.
const ARP_RES_M: f64 = 1e-4;
/// Code-phase biases resolve 0.02 m.
const BIAS_RES_M: f64 = 0.02;

//==================================================================================REFERENCE_STATION

/// Body shared by 1005 and 1006: station flags and the antenna
/// reference point.
fn read_station_body(reader: &mut BitReader, msg: &mut RefStationMessage) -> Result<(), DecodeError> {
    msg.station_id = reader.read_u16(12)?;
    msg.itrf_year = reader.read_u8(6)?;
    msg.gps_indicator = reader.read_bool()?;
    msg.glo_indicator = reader.read_bool()?;
    msg.gal_indicator = reader.read_bool()?;
    msg.ref_station_indicator = reader.read_bool()?;
    msg.arp_x_m = reader.read_i64(38)? as f64 * ARP_RES_M;
    msg.osc_indicator = reader.read_bool()?;
    reader.advance(1)?;
    msg.arp_y_m = reader.read_i64(38)? as f64 * ARP_RES_M;
    msg.quarter_cycle_indicator = reader.read_u8(2)?;
    msg.arp_z_m = reader.read_i64(38)? as f64 * ARP_RES_M;
    Ok(())
}

/// Decode message 1005 (stationary antenna reference point).
pub fn decode_1005(payload: &[u8], msg: &mut RefStationMessage) -> Result<(), DecodeError> {
    let mut reader = BitReader::new(payload);
    let msg_num = reader.read_u16(12)?;
    if msg_num != 1005 {
        return Err(DecodeError::MessageTypeMismatch { found: msg_num });
    }
    *msg = RefStationMessage::new();
    msg.msg_num = msg_num;
    read_station_body(&mut reader, msg)
}

/// Decode message 1006 (antenna reference point with height).
pub fn decode_1006(payload: &[u8], msg: &mut RefStationMessage) -> Result<(), DecodeError> {
    let mut reader = BitReader::new(payload);
    let msg_num = reader.read_u16(12)?;
    if msg_num != 1006 {
        return Err(DecodeError::MessageTypeMismatch { found: msg_num });
    }
    *msg = RefStationMessage::new();
    msg.msg_num = msg_num;
    read_station_body(&mut reader, msg)?;
    msg.ant_height_m = f64::from(reader.read_u16(16)?) * ARP_RES_M;
    Ok(())
}

//==================================================================================DESCRIPTORS

/// Read one counted 8-bit-character string. A counter exceeding the
/// record capacity rejects the whole message without writing past the
/// end.
fn read_counted_text(reader: &mut BitReader, dest: &mut TextBytes) -> Result<(), DecodeError> {
    let count = usize::from(reader.read_u8(8)?);
    let window = dest.writable(count).ok_or(DecodeError::InvalidMessage {
        reason: "counted string exceeds the record capacity",
    })?;
    reader.read_bytes(window)?;
    Ok(())
}

/// Decode message 1007 (antenna descriptor).
pub fn decode_1007(payload: &[u8], msg: &mut AntennaDescriptorMessage) -> Result<(), DecodeError> {
    let mut reader = BitReader::new(payload);
    let msg_num = reader.read_u16(12)?;
    if msg_num != 1007 {
        return Err(DecodeError::MessageTypeMismatch { found: msg_num });
    }
    *msg = AntennaDescriptorMessage::new();
    msg.msg_num = msg_num;
    msg.station_id = reader.read_u16(12)?;
    read_counted_text(&mut reader, &mut msg.descriptor)?;
    msg.setup_id = reader.read_u8(8)?;
    Ok(())
}

/// Decode message 1008 (antenna descriptor and serial number).
pub fn decode_1008(payload: &[u8], msg: &mut AntennaDescriptorMessage) -> Result<(), DecodeError> {
    let mut reader = BitReader::new(payload);
    let msg_num = reader.read_u16(12)?;
    if msg_num != 1008 {
        return Err(DecodeError::MessageTypeMismatch { found: msg_num });
    }
    *msg = AntennaDescriptorMessage::new();
    msg.msg_num = msg_num;
    msg.station_id = reader.read_u16(12)?;
    read_counted_text(&mut reader, &mut msg.descriptor)?;
    msg.setup_id = reader.read_u8(8)?;
    read_counted_text(&mut reader, &mut msg.serial)?;
    Ok(())
}

/// Decode message 1033 (receiver and antenna descriptors). The record is
/// reset first so unread strings stay empty.
pub fn decode_1033(payload: &[u8], msg: &mut ReceiverInfoMessage) -> Result<(), DecodeError> {
    let mut reader = BitReader::new(payload);
    let msg_num = reader.read_u16(12)?;
    if msg_num != 1033 {
        return Err(DecodeError::MessageTypeMismatch { found: msg_num });
    }
    *msg = ReceiverInfoMessage::new();
    msg.station_id = reader.read_u16(12)?;
    read_counted_text(&mut reader, &mut msg.ant_descriptor)?;
    msg.ant_setup_id = reader.read_u8(8)?;
    read_counted_text(&mut reader, &mut msg.ant_serial)?;
    read_counted_text(&mut reader, &mut msg.rcv_descriptor)?;
    read_counted_text(&mut reader, &mut msg.rcv_fw_version)?;
    read_counted_text(&mut reader, &mut msg.rcv_serial)?;
    Ok(())
}

//==================================================================================TEXT

/// Decode message 1029 (Unicode text). The UTF-8 code units are copied
/// verbatim, without validation.
pub fn decode_1029(payload: &[u8], msg: &mut TextMessage) -> Result<(), DecodeError> {
    let mut reader = BitReader::new(payload);
    let msg_num = reader.read_u16(12)?;
    if msg_num != 1029 {
        return Err(DecodeError::MessageTypeMismatch { found: msg_num });
    }
    *msg = TextMessage::new();
    msg.station_id = reader.read_u16(12)?;
    msg.mjd = reader.read_u16(16)?;
    msg.utc_sec_of_day = reader.read_u32(17)?;
    msg.unicode_chars = reader.read_u8(7)?;
    let count = usize::from(reader.read_u8(8)?);
    let window = msg.utf8.writable(count).ok_or(DecodeError::InvalidMessage {
        reason: "text exceeds the record capacity",
    })?;
    reader.read_bytes(window)?;
    Ok(())
}

//==================================================================================CODE_PHASE_BIAS

/// Decode message 1230 (GLONASS code-phase biases). Each bias field is
/// present iff its FDMA mask bit is set; absent biases stay 0.0.
pub fn decode_1230(payload: &[u8], msg: &mut GloBiasMessage) -> Result<(), DecodeError> {
    let mut reader = BitReader::new(payload);
    let msg_num = reader.read_u16(12)?;
    if msg_num != 1230 {
        return Err(DecodeError::MessageTypeMismatch { found: msg_num });
    }
    *msg = GloBiasMessage::new();
    msg.station_id = reader.read_u16(12)?;
    msg.bias_indicator = reader.read_bool()?;
    reader.advance(3)?;
    msg.fdma_signal_mask = reader.read_u8(4)?;
    if msg.fdma_signal_mask & 0x8 != 0 {
        msg.l1_ca_bias_m = f64::from(reader.read_i16(16)?) * BIAS_RES_M;
    }
    if msg.fdma_signal_mask & 0x4 != 0 {
        msg.l1_p_bias_m = f64::from(reader.read_i16(16)?) * BIAS_RES_M;
    }
    if msg.fdma_signal_mask & 0x2 != 0 {
        msg.l2_ca_bias_m = f64::from(reader.read_i16(16)?) * BIAS_RES_M;
    }
    if msg.fdma_signal_mask & 0x1 != 0 {
        msg.l2_p_bias_m = f64::from(reader.read_i16(16)?) * BIAS_RES_M;
    }
    Ok(())
}
