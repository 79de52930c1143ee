//! Multiple Signal Message decoding (MSM4-7): header and masks, the
//! column-ordered satellite and signal blocks, and the cell assembly that
//! merges satellite-level rough values with per-cell fine values.
use crate::constants::{
    MSM_CP_EXT_INVALID, MSM_CP_INVALID, MSM_DOP_INVALID, MSM_GLO_FCN_UNKNOWN, MSM_MAX_CELLS,
    MSM_PR_EXT_INVALID, MSM_PR_INVALID, MSM_ROUGH_RANGE_INVALID, MSM_ROUGH_RATE_INVALID,
    MSM_SATELLITE_MASK_SIZE, MSM_SIGNAL_MASK_SIZE, RTCM_GLO_MAX_TOW_MS, RTCM_MAX_TOW_MS,
};
use crate::error::DecodeError;
use crate::infra::codec::bits::BitReader;
use crate::protocol::fields::{msm_ext_lock_time_s, msm_lock_time_s, normalize_bds_tow_ms};
use crate::protocol::messages::{
    Constellation, MsmFamily, MsmHeader, MsmMessage, MsmSatFlags, ObsFlags,
};

//==================================================================================SCALES

/// Rough range fraction, 1/1024 ms.
const ROUGH_MOD_MS: f64 = 1.0 / 1024.0;
/// Fine pseudorange, 2^-24 ms.
const FINE_PR_MS: f64 = 1.0 / 16_777_216.0;
/// Extended fine pseudorange, 2^-29 ms.
const FINE_PR_EXT_MS: f64 = 1.0 / 536_870_912.0;
/// Fine phase range, 2^-29 ms.
const FINE_CP_MS: f64 = 1.0 / 536_870_912.0;
/// Extended fine phase range, 2^-31 ms.
const FINE_CP_EXT_MS: f64 = 1.0 / 2_147_483_648.0;
/// Extended carrier-to-noise, 2^-4 dB·Hz.
const CNR_EXT_DB_HZ: f64 = 1.0 / 16.0;
/// Fine phase range rate, 0.1 mm/s.
const FINE_RATE_M_S: f64 = 1e-4;

//==================================================================================ENTRY_POINTS

/// Decode an MSM4 message (any supported constellation).
pub fn decode_msm4(payload: &[u8], msg: &mut MsmMessage) -> Result<(), DecodeError> {
    decode_msm(payload, msg, MsmFamily::Msm4)
}

/// Decode an MSM5 message (any supported constellation).
pub fn decode_msm5(payload: &[u8], msg: &mut MsmMessage) -> Result<(), DecodeError> {
    decode_msm(payload, msg, MsmFamily::Msm5)
}

/// Decode an MSM6 message (any supported constellation).
pub fn decode_msm6(payload: &[u8], msg: &mut MsmMessage) -> Result<(), DecodeError> {
    decode_msm(payload, msg, MsmFamily::Msm6)
}

/// Decode an MSM7 message (any supported constellation).
pub fn decode_msm7(payload: &[u8], msg: &mut MsmMessage) -> Result<(), DecodeError> {
    decode_msm(payload, msg, MsmFamily::Msm7)
}

//==================================================================================HEADER

fn read_msm_header(
    reader: &mut BitReader,
    msg_num: u16,
    constellation: Constellation,
    header: &mut MsmHeader,
) -> Result<(), DecodeError> {
    header.msg_num = msg_num;
    header.station_id = reader.read_u16(12)?;

    header.tow_ms = match constellation {
        Constellation::Glonass => {
            // Day of week, then 27-bit time of day.
            reader.advance(3)?;
            let tod = reader.read_u32(27)?;
            if tod > RTCM_GLO_MAX_TOW_MS {
                return Err(DecodeError::InvalidMessage {
                    reason: "epoch time exceeds its day bound",
                });
            }
            tod
        }
        Constellation::Beidou => {
            let tow = normalize_bds_tow_ms(reader.read_u32(30)?);
            if tow > RTCM_MAX_TOW_MS {
                return Err(DecodeError::InvalidMessage {
                    reason: "epoch time exceeds its week bound",
                });
            }
            tow
        }
        _ => {
            let tow = reader.read_u32(30)?;
            if tow > RTCM_MAX_TOW_MS {
                return Err(DecodeError::InvalidMessage {
                    reason: "epoch time exceeds its week bound",
                });
            }
            tow
        }
    };

    header.multiple_message = reader.read_bool()?;
    header.iods = reader.read_u8(3)?;
    header.reserved = reader.read_u8(7)?;
    header.steering = reader.read_u8(2)?;
    header.ext_clock = reader.read_u8(2)?;
    header.div_free = reader.read_bool()?;
    header.smooth_interval = reader.read_u8(3)?;

    for slot in 0..MSM_SATELLITE_MASK_SIZE {
        if reader.read_bool()? {
            header.satellite_mask |= 1 << slot;
            header.n_sat += 1;
        }
    }
    for idx in 0..MSM_SIGNAL_MASK_SIZE {
        if reader.read_bool()? {
            header.signal_mask |= 1 << idx;
            header.n_sig += 1;
        }
    }

    let cells = usize::from(header.n_sat) * usize::from(header.n_sig);
    if cells > MSM_MAX_CELLS {
        return Err(DecodeError::InvalidMessage {
            reason: "cell mask exceeds the cell budget",
        });
    }
    for bit in 0..cells {
        if reader.read_bool()? {
            header.cell_mask |= 1 << bit;
            header.n_cell += 1;
        }
    }
    Ok(())
}

//==================================================================================BODY

fn decode_msm(payload: &[u8], msg: &mut MsmMessage, family: MsmFamily) -> Result<(), DecodeError> {
    let mut reader = BitReader::new(payload);
    *msg = MsmMessage::new();

    let msg_num = reader.read_u16(12)?;
    let (constellation, found_family) = Constellation::from_msm_msg_num(msg_num)
        .ok_or(DecodeError::MessageTypeMismatch { found: msg_num })?;
    if found_family != family {
        return Err(DecodeError::MessageTypeMismatch { found: msg_num });
    }
    msg.constellation = constellation;
    msg.family = family;
    read_msm_header(&mut reader, msg_num, constellation, &mut msg.header)?;

    let n_sat = usize::from(msg.header.n_sat);
    let n_sig = usize::from(msg.header.n_sig);
    let n_cell = usize::from(msg.header.n_cell);

    #[cfg(feature = "defmt")]
    defmt::trace!(
        "msm {}: {} satellites, {} cells",
        msg_num,
        msg.header.n_sat,
        msg.header.n_cell
    );

    // 1-based ids of the masked satellites and signals.
    let mut sv_ids = [0u8; MSM_SATELLITE_MASK_SIZE];
    let mut count = 0;
    for slot in 0..MSM_SATELLITE_MASK_SIZE {
        if msg.header.satellite_present(slot) {
            sv_ids[count] = (slot + 1) as u8;
            count += 1;
        }
    }
    let mut sig_ids = [0u8; MSM_SIGNAL_MASK_SIZE];
    let mut count = 0;
    for idx in 0..MSM_SIGNAL_MASK_SIZE {
        if msg.header.signal_present(idx) {
            sig_ids[count] = (idx + 1) as u8;
            count += 1;
        }
    }

    // Satellite columns.
    let mut range_ms = [0.0f64; MSM_SATELLITE_MASK_SIZE];
    let mut range_valid = [false; MSM_SATELLITE_MASK_SIZE];
    for i in 0..n_sat {
        let int_ms = reader.read_u8(8)?;
        if int_ms != MSM_ROUGH_RANGE_INVALID {
            range_ms[i] = f64::from(int_ms);
            range_valid[i] = true;
        }
    }

    let mut sat_info = [MSM_GLO_FCN_UNKNOWN; MSM_SATELLITE_MASK_SIZE];
    if family.has_range_rate() {
        for info in sat_info.iter_mut().take(n_sat) {
            *info = reader.read_u8(4)?;
        }
    }

    for i in 0..n_sat {
        let mod_ms = reader.read_u16(10)?;
        if range_valid[i] {
            range_ms[i] += f64::from(mod_ms) * ROUGH_MOD_MS;
        }
    }

    let mut rate_m_s = [0.0f64; MSM_SATELLITE_MASK_SIZE];
    let mut rate_valid = [false; MSM_SATELLITE_MASK_SIZE];
    if family.has_range_rate() {
        for i in 0..n_sat {
            let raw = reader.read_i32(14)?;
            if raw != MSM_ROUGH_RATE_INVALID {
                rate_m_s[i] = f64::from(raw);
                rate_valid[i] = true;
            }
        }
    }

    // Signal columns.
    let mut fine_pr_ms = [0.0f64; MSM_MAX_CELLS];
    let mut pr_valid = [false; MSM_MAX_CELLS];
    for c in 0..n_cell {
        if family.extended() {
            let raw = reader.read_i32(20)?;
            if raw != MSM_PR_EXT_INVALID {
                fine_pr_ms[c] = f64::from(raw) * FINE_PR_EXT_MS;
                pr_valid[c] = true;
            }
        } else {
            let raw = reader.read_i32(15)?;
            if raw != MSM_PR_INVALID {
                fine_pr_ms[c] = f64::from(raw) * FINE_PR_MS;
                pr_valid[c] = true;
            }
        }
    }

    let mut fine_cp_ms = [0.0f64; MSM_MAX_CELLS];
    let mut cp_valid = [false; MSM_MAX_CELLS];
    for c in 0..n_cell {
        if family.extended() {
            let raw = reader.read_i32(24)?;
            if raw != MSM_CP_EXT_INVALID {
                fine_cp_ms[c] = f64::from(raw) * FINE_CP_EXT_MS;
                cp_valid[c] = true;
            }
        } else {
            let raw = reader.read_i32(22)?;
            if raw != MSM_CP_INVALID {
                fine_cp_ms[c] = f64::from(raw) * FINE_CP_MS;
                cp_valid[c] = true;
            }
        }
    }

    let mut lock_s = [0.0f64; MSM_MAX_CELLS];
    for slot in lock_s.iter_mut().take(n_cell) {
        *slot = if family.extended() {
            msm_ext_lock_time_s(reader.read_u16(10)?)
        } else {
            msm_lock_time_s(reader.read_u8(4)?)
        };
    }

    let mut hca = [false; MSM_MAX_CELLS];
    for slot in hca.iter_mut().take(n_cell) {
        *slot = reader.read_bool()?;
    }

    let mut cnr_db_hz = [0.0f64; MSM_MAX_CELLS];
    let mut cnr_valid = [false; MSM_MAX_CELLS];
    for c in 0..n_cell {
        if family.extended() {
            let raw = reader.read_u16(10)?;
            if raw != 0 {
                cnr_db_hz[c] = f64::from(raw) * CNR_EXT_DB_HZ;
                cnr_valid[c] = true;
            }
        } else {
            let raw = reader.read_u8(6)?;
            if raw != 0 {
                cnr_db_hz[c] = f64::from(raw);
                cnr_valid[c] = true;
            }
        }
    }

    let mut fine_rate_m_s = [0.0f64; MSM_MAX_CELLS];
    let mut fine_rate_valid = [false; MSM_MAX_CELLS];
    if family.has_range_rate() {
        for c in 0..n_cell {
            let raw = reader.read_i32(15)?;
            if raw != MSM_DOP_INVALID {
                fine_rate_m_s[c] = f64::from(raw) * FINE_RATE_M_S;
                fine_rate_valid[c] = true;
            }
        }
    }

    // Satellite records are written for every masked satellite, whether
    // or not any of its cells is active.
    for i in 0..n_sat {
        let sat = &mut msg.satellites[i];
        sat.sv_id = sv_ids[i];
        sat.rough_range_ms = range_ms[i];
        sat.rough_rate_m_s = rate_m_s[i];
        sat.glo_fcn = sat_info[i];
        if range_valid[i] {
            sat.flags.insert(MsmSatFlags::ROUGH_RANGE);
        }
        if rate_valid[i] {
            sat.flags.insert(MsmSatFlags::ROUGH_RATE);
        }
    }

    // Cell assembly: the cell index advances only on active mask bits,
    // in ascending (satellite, signal) order.
    let mut cell = 0;
    for sat in 0..n_sat {
        for sig in 0..n_sig {
            if !msg.header.cell_active(sat * n_sig + sig) {
                continue;
            }
            let record = &mut msg.signals[cell];
            record.sv_id = sv_ids[sat];
            record.sig_id = sig_ids[sig];
            if range_valid[sat] && pr_valid[cell] {
                record.pseudorange_ms = range_ms[sat] + fine_pr_ms[cell];
                record.flags.insert(ObsFlags::PSEUDORANGE);
            }
            if range_valid[sat] && cp_valid[cell] {
                record.carrier_phase_ms = range_ms[sat] + fine_cp_ms[cell];
                record.flags.insert(ObsFlags::CARRIER_PHASE);
            }
            record.lock_time_s = lock_s[cell];
            record.flags.insert(ObsFlags::LOCK_TIME);
            record.hca = hca[cell];
            if cnr_valid[cell] {
                record.cnr_db_hz = cnr_db_hz[cell];
                record.flags.insert(ObsFlags::CNR);
            }
            if rate_valid[sat] && fine_rate_valid[cell] {
                record.range_rate_m_s = rate_m_s[sat] + fine_rate_m_s[cell];
                record.flags.insert(ObsFlags::DOPPLER);
            }
            cell += 1;
        }
    }

    Ok(())
}
