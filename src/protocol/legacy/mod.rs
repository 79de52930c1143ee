//! Decoders for the legacy observation messages: 1001-1004 (GPS) and
//! 1010/1012 (GLONASS). All six share one header shape and the
//! per-frequency block helpers below; the message number only selects
//! which optional fields are present.
use crate::constants::{
    CP_INVALID, GPS_C, GPS_L1_HZ, GPS_L2_HZ, MT1012_GLO_MAX_FCN, PRUNIT_GLO, PRUNIT_GPS,
    PR_L1_INVALID, PR_L2_INVALID, RTCM_GLO_MAX_TOW_MS, RTCM_MAX_TOW_MS,
};
use crate::error::DecodeError;
use crate::infra::codec::bits::BitReader;
use crate::protocol::fields::{glo_l1_hz, glo_l2_hz, lock_time_s};
use crate::protocol::messages::{FrequencyObs, ObsFlags, ObservationMessage, SatelliteObs};

//==================================================================================HEADER

/// Time base of an observation header: GPS messages carry a 30-bit time
/// of week, GLONASS messages a 27-bit time of day.
#[derive(Clone, Copy, PartialEq, Eq)]
enum TimeBase {
    Gps,
    Glonass,
}

fn read_observation_header(
    reader: &mut BitReader,
    expected_msg_num: u16,
    time_base: TimeBase,
    msg: &mut ObservationMessage,
) -> Result<(), DecodeError> {
    let msg_num = reader.read_u16(12)?;
    if msg_num != expected_msg_num {
        return Err(DecodeError::MessageTypeMismatch { found: msg_num });
    }
    msg.msg_num = msg_num;
    msg.station_id = reader.read_u16(12)?;

    let (tow_bits, tow_max) = match time_base {
        TimeBase::Gps => (30, RTCM_MAX_TOW_MS),
        TimeBase::Glonass => (27, RTCM_GLO_MAX_TOW_MS),
    };
    msg.tow_ms = reader.read_u32(tow_bits)?;
    if msg.tow_ms > tow_max {
        return Err(DecodeError::InvalidMessage {
            reason: "epoch time exceeds its week bound",
        });
    }

    msg.sync_gnss = reader.read_bool()?;
    msg.n_sat = reader.read_u8(5)?;
    msg.div_free = reader.read_bool()?;
    msg.smooth_interval = reader.read_u8(3)?;
    Ok(())
}

//==================================================================================FREQUENCY_BLOCKS

/// Raw L1 fields at the encoded scale.
struct L1Block {
    code: u8,
    fcn: u8,
    pr: u32,
    cp_pr_diff: i32,
    lock: u8,
}

/// Read one L1 block. GLONASS blocks interleave the 5-bit frequency
/// channel and widen the pseudorange to 25 bits.
fn read_l1_block(reader: &mut BitReader, time_base: TimeBase) -> Result<L1Block, DecodeError> {
    let code = reader.read_u8(1)?;
    let (fcn, pr_bits) = match time_base {
        TimeBase::Gps => (0, 24),
        TimeBase::Glonass => (reader.read_u8(5)?, 25),
    };
    Ok(L1Block {
        code,
        fcn,
        pr: reader.read_u32(pr_bits)?,
        cp_pr_diff: reader.read_i32(20)?,
        lock: reader.read_u8(7)?,
    })
}

/// Raw L2 fields at the encoded scale.
struct L2Block {
    code: u8,
    pr_diff: i32,
    cp_pr_diff: i32,
    lock: u8,
}

fn read_l2_block(reader: &mut BitReader) -> Result<L2Block, DecodeError> {
    Ok(L2Block {
        code: reader.read_u8(2)?,
        pr_diff: reader.read_i32(14)?,
        cp_pr_diff: reader.read_i32(20)?,
        lock: reader.read_u8(7)?,
    })
}

/// Populate the L1 record from its raw block. `amb` is the integer
/// pseudorange ambiguity (zero for 1001/1003) and `l1_hz` the carrier
/// frequency, absent when the GLONASS channel has no defined frequency.
fn apply_l1(freq: &mut FrequencyObs, block: &L1Block, amb: u32, prunit: f64, l1_hz: Option<f64>) {
    freq.code = block.code;
    freq.lock_time_s = lock_time_s(block.lock);
    if block.pr != PR_L1_INVALID {
        freq.pseudorange_m = 0.02 * f64::from(block.pr) + f64::from(amb) * prunit;
        freq.flags.insert(ObsFlags::PSEUDORANGE);
    }
    if let Some(hz) = l1_hz {
        if freq.flags.valid_pr() && block.cp_pr_diff != CP_INVALID {
            let lambda = GPS_C / hz;
            freq.carrier_phase_cycles =
                (freq.pseudorange_m + 0.0005 * f64::from(block.cp_pr_diff)) / lambda;
            freq.flags.insert(ObsFlags::CARRIER_PHASE | ObsFlags::LOCK_TIME);
        }
    }
}

/// Populate the L2 record. L2 observables are differential against the
/// L1 pseudorange, so nothing survives when L1 is unmeasured.
fn apply_l2(
    freq: &mut FrequencyObs,
    block: &L2Block,
    l1_pseudorange_m: f64,
    l1_valid: bool,
    l2_hz: Option<f64>,
) {
    freq.code = block.code;
    freq.lock_time_s = lock_time_s(block.lock);
    if l1_valid && block.pr_diff != PR_L2_INVALID {
        freq.pseudorange_m = 0.02 * f64::from(block.pr_diff) + l1_pseudorange_m;
        freq.flags.insert(ObsFlags::PSEUDORANGE);
    }
    if let Some(hz) = l2_hz {
        if l1_valid && block.cp_pr_diff != CP_INVALID {
            let lambda = GPS_C / hz;
            freq.carrier_phase_cycles =
                (l1_pseudorange_m + 0.0005 * f64::from(block.cp_pr_diff)) / lambda;
            freq.flags.insert(ObsFlags::CARRIER_PHASE | ObsFlags::LOCK_TIME);
        }
    }
}

/// Carrier-to-noise with zero as the "not computed" marker.
fn apply_cnr(freq: &mut FrequencyObs, cnr: u8) {
    if cnr != 0 {
        freq.cnr_db_hz = 0.25 * f64::from(cnr);
        freq.flags.insert(ObsFlags::CNR);
    }
}

//==================================================================================GPS_DECODERS

fn decode_gps_obs(
    payload: &[u8],
    msg: &mut ObservationMessage,
    msg_num: u16,
    with_amb_cnr: bool,
    with_l2: bool,
) -> Result<(), DecodeError> {
    let mut reader = BitReader::new(payload);
    *msg = ObservationMessage::new();
    read_observation_header(&mut reader, msg_num, TimeBase::Gps, msg)?;

    for idx in 0..usize::from(msg.n_sat) {
        let mut sat = SatelliteObs::new();
        sat.sv_id = reader.read_u8(6)?;

        let l1 = read_l1_block(&mut reader, TimeBase::Gps)?;
        if with_amb_cnr {
            let amb = reader.read_u8(8)?;
            let cnr = reader.read_u8(8)?;
            apply_l1(&mut sat.l1, &l1, u32::from(amb), PRUNIT_GPS, Some(GPS_L1_HZ));
            apply_cnr(&mut sat.l1, cnr);
        } else {
            apply_l1(&mut sat.l1, &l1, 0, PRUNIT_GPS, Some(GPS_L1_HZ));
        }

        if with_l2 {
            let l2 = read_l2_block(&mut reader)?;
            apply_l2(
                &mut sat.l2,
                &l2,
                sat.l1.pseudorange_m,
                sat.l1.flags.valid_pr(),
                Some(GPS_L2_HZ),
            );
            if with_amb_cnr {
                apply_cnr(&mut sat.l2, reader.read_u8(8)?);
            }
        }

        msg.satellites[idx] = sat;
    }
    Ok(())
}

/// Decode message 1001 (GPS L1 observations).
pub fn decode_1001(payload: &[u8], msg: &mut ObservationMessage) -> Result<(), DecodeError> {
    decode_gps_obs(payload, msg, 1001, false, false)
}

/// Decode message 1002 (GPS L1 observations, extended).
pub fn decode_1002(payload: &[u8], msg: &mut ObservationMessage) -> Result<(), DecodeError> {
    decode_gps_obs(payload, msg, 1002, true, false)
}

/// Decode message 1003 (GPS L1/L2 observations).
pub fn decode_1003(payload: &[u8], msg: &mut ObservationMessage) -> Result<(), DecodeError> {
    decode_gps_obs(payload, msg, 1003, false, true)
}

/// Decode message 1004 (GPS L1/L2 observations, extended).
pub fn decode_1004(payload: &[u8], msg: &mut ObservationMessage) -> Result<(), DecodeError> {
    decode_gps_obs(payload, msg, 1004, true, true)
}

//==================================================================================GLO_DECODERS

fn decode_glo_obs(
    payload: &[u8],
    msg: &mut ObservationMessage,
    msg_num: u16,
    with_l2: bool,
) -> Result<(), DecodeError> {
    let mut reader = BitReader::new(payload);
    *msg = ObservationMessage::new();
    read_observation_header(&mut reader, msg_num, TimeBase::Glonass, msg)?;

    for idx in 0..usize::from(msg.n_sat) {
        let mut sat = SatelliteObs::new();
        sat.sv_id = reader.read_u8(6)?;

        let l1 = read_l1_block(&mut reader, TimeBase::Glonass)?;
        sat.fcn = l1.fcn;
        let channel_known = l1.fcn <= MT1012_GLO_MAX_FCN;
        let amb = reader.read_u8(8)?;
        let cnr = reader.read_u8(8)?;
        apply_l1(
            &mut sat.l1,
            &l1,
            u32::from(amb),
            PRUNIT_GLO,
            channel_known.then(|| glo_l1_hz(l1.fcn)),
        );
        apply_cnr(&mut sat.l1, cnr);

        if with_l2 {
            let l2 = read_l2_block(&mut reader)?;
            apply_l2(
                &mut sat.l2,
                &l2,
                sat.l1.pseudorange_m,
                sat.l1.flags.valid_pr(),
                channel_known.then(|| glo_l2_hz(l1.fcn)),
            );
            apply_cnr(&mut sat.l2, reader.read_u8(8)?);
        }

        msg.satellites[idx] = sat;
    }
    Ok(())
}

/// Decode message 1010 (GLONASS L1 observations, extended).
pub fn decode_1010(payload: &[u8], msg: &mut ObservationMessage) -> Result<(), DecodeError> {
    decode_glo_obs(payload, msg, 1010, false)
}

/// Decode message 1012 (GLONASS L1/L2 observations, extended).
pub fn decode_1012(payload: &[u8], msg: &mut ObservationMessage) -> Result<(), DecodeError> {
    decode_glo_obs(payload, msg, 1012, true)
}
