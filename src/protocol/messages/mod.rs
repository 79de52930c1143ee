//! Typed records produced by the RTCM decoders. Each record is fully
//! initialized by its decoder, mutated only during that single call, and
//! owned by the caller afterwards; none of them borrows from the input
//! payload.
use bitflags::bitflags;

use crate::constants::{
    MSM_GLO_FCN_UNKNOWN, MSM_MAX_CELLS, MSM_SATELLITE_MASK_SIZE, MSM_SIGNAL_MASK_SIZE,
    RTCM_MAX_SATS,
};

//==================================================================================FLAGS
bitflags! {
    /// Per-observable validity flags. A cleared bit always pairs with a
    /// zeroed numeric field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ObsFlags: u8 {
        const PSEUDORANGE = 1 << 0;
        const CARRIER_PHASE = 1 << 1;
        const LOCK_TIME = 1 << 2;
        const CNR = 1 << 3;
        const DOPPLER = 1 << 4;
    }
}

impl ObsFlags {
    /// The pseudorange field holds a measurement.
    #[inline]
    pub fn valid_pr(&self) -> bool {
        self.contains(Self::PSEUDORANGE)
    }

    /// The carrier-phase field holds a measurement.
    #[inline]
    pub fn valid_cp(&self) -> bool {
        self.contains(Self::CARRIER_PHASE)
    }

    /// The lock-time field holds a measurement.
    #[inline]
    pub fn valid_lock(&self) -> bool {
        self.contains(Self::LOCK_TIME)
    }

    /// The carrier-to-noise field holds a measurement.
    #[inline]
    pub fn valid_cnr(&self) -> bool {
        self.contains(Self::CNR)
    }

    /// The range-rate field holds a measurement.
    #[inline]
    pub fn valid_dop(&self) -> bool {
        self.contains(Self::DOPPLER)
    }
}

bitflags! {
    /// Validity of the satellite-level rough values in an MSM.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MsmSatFlags: u8 {
        const ROUGH_RANGE = 1 << 0;
        const ROUGH_RATE = 1 << 1;
    }
}

//==================================================================================TEXT_BUFFERS

/// Capacity of a counted RTCM descriptor string (antenna and receiver
/// metadata). Longer counters are rejected rather than truncated.
pub const MAX_DESCRIPTOR_LEN: usize = 32;

/// Capacity of the raw byte payloads (1029 text, proprietary envelope).
pub const MAX_RAW_LEN: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Counted ASCII text carried by the metadata messages.
pub struct TextBytes {
    len: u8,
    data: [u8; MAX_DESCRIPTOR_LEN],
}

impl TextBytes {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            len: 0,
            data: [0; MAX_DESCRIPTOR_LEN],
        }
    }

    /// Number of valid bytes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Checks whether the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Immutable view over the populated bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }

    /// View as text; descriptor strings are plain ASCII in practice.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    /// Grant the decoder a window of `count` bytes and record the length.
    /// `None` when the counter exceeds the capacity.
    pub(crate) fn writable(&mut self, count: usize) -> Option<&mut [u8]> {
        if count > MAX_DESCRIPTOR_LEN {
            return None;
        }
        self.len = count as u8;
        Some(&mut self.data[..count])
    }
}

impl Default for TextBytes {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Opaque counted bytes, copied verbatim from the payload.
pub struct RawBytes {
    len: u8,
    data: [u8; MAX_RAW_LEN],
}

impl RawBytes {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            len: 0,
            data: [0; MAX_RAW_LEN],
        }
    }

    /// Number of valid bytes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Checks whether the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Immutable view over the populated bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }

    /// Grant the decoder a window of `count` bytes and record the length.
    pub(crate) fn writable(&mut self, count: usize) -> Option<&mut [u8]> {
        if count > MAX_RAW_LEN {
            return None;
        }
        self.len = count as u8;
        Some(&mut self.data[..count])
    }
}

impl Default for RawBytes {
    fn default() -> Self {
        Self::new()
    }
}

//==================================================================================CONSTELLATIONS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// GNSS constellation carried by an MSM, derived from the message-number
/// decade.
pub enum Constellation {
    Gps,
    Glonass,
    Galileo,
    Sbas,
    Qzss,
    Beidou,
    Navic,
}

impl Constellation {
    /// Derive constellation and MSM family from an MSM message number.
    /// Returns `None` outside the supported 107x..113x families 4-7.
    pub fn from_msm_msg_num(msg_num: u16) -> Option<(Constellation, MsmFamily)> {
        let family = MsmFamily::from_digit(msg_num % 10)?;
        let constellation = match msg_num / 10 {
            107 => Constellation::Gps,
            108 => Constellation::Glonass,
            109 => Constellation::Galileo,
            110 => Constellation::Sbas,
            111 => Constellation::Qzss,
            112 => Constellation::Beidou,
            113 => Constellation::Navic,
            _ => return None,
        };
        Some((constellation, family))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Supported MSM families. The family fixes the field widths and which
/// optional columns are present.
pub enum MsmFamily {
    Msm4,
    Msm5,
    Msm6,
    Msm7,
}

impl MsmFamily {
    fn from_digit(digit: u16) -> Option<Self> {
        match digit {
            4 => Some(MsmFamily::Msm4),
            5 => Some(MsmFamily::Msm5),
            6 => Some(MsmFamily::Msm6),
            7 => Some(MsmFamily::Msm7),
            _ => None,
        }
    }

    /// MSM5/7 carry the satellite-info column and the range-rate fields.
    #[inline]
    pub fn has_range_rate(&self) -> bool {
        matches!(self, MsmFamily::Msm5 | MsmFamily::Msm7)
    }

    /// MSM6/7 use the extended-resolution signal fields.
    #[inline]
    pub fn extended(&self) -> bool {
        matches!(self, MsmFamily::Msm6 | MsmFamily::Msm7)
    }
}

//==================================================================================LEGACY_OBSERVATIONS

#[derive(Debug, Clone, Copy, PartialEq)]
/// One decoded frequency (L1 or L2) of a legacy observation.
pub struct FrequencyObs {
    /// Code indicator (1 bit on L1, 2 bits on L2).
    pub code: u8,
    /// Pseudorange (m); zero whenever `flags` clears PSEUDORANGE.
    pub pseudorange_m: f64,
    /// Carrier phase (cycles); zero whenever `flags` clears CARRIER_PHASE.
    pub carrier_phase_cycles: f64,
    /// Lock-time indicator mapped to seconds.
    pub lock_time_s: u32,
    /// Carrier-to-noise density (dB·Hz).
    pub cnr_db_hz: f64,
    pub flags: ObsFlags,
}

impl FrequencyObs {
    pub const fn new() -> Self {
        Self {
            code: 0,
            pseudorange_m: 0.0,
            carrier_phase_cycles: 0.0,
            lock_time_s: 0,
            cnr_db_hz: 0.0,
            flags: ObsFlags::empty(),
        }
    }
}

impl Default for FrequencyObs {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Per-satellite block of a legacy observation message.
pub struct SatelliteObs {
    /// Satellite id (GPS PRN or GLONASS slot number).
    pub sv_id: u8,
    /// Raw frequency-channel field; GLONASS messages only.
    pub fcn: u8,
    pub l1: FrequencyObs,
    pub l2: FrequencyObs,
}

impl SatelliteObs {
    pub const fn new() -> Self {
        Self {
            sv_id: 0,
            fcn: 0,
            l1: FrequencyObs::new(),
            l2: FrequencyObs::new(),
        }
    }
}

impl Default for SatelliteObs {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Decoded 1001-1004 or 1010/1012 observation message.
pub struct ObservationMessage {
    pub msg_num: u16,
    pub station_id: u16,
    /// Time of week (GPS) or time of day (GLONASS), milliseconds.
    pub tow_ms: u32,
    /// Synchronous-GNSS flag.
    pub sync_gnss: bool,
    /// Number of populated entries in `satellites`.
    pub n_sat: u8,
    /// Divergence-free smoothing flag.
    pub div_free: bool,
    /// Smoothing-interval indicator.
    pub smooth_interval: u8,
    pub satellites: [SatelliteObs; RTCM_MAX_SATS],
}

impl ObservationMessage {
    pub const fn new() -> Self {
        Self {
            msg_num: 0,
            station_id: 0,
            tow_ms: 0,
            sync_gnss: false,
            n_sat: 0,
            div_free: false,
            smooth_interval: 0,
            satellites: [SatelliteObs::new(); RTCM_MAX_SATS],
        }
    }

    /// Populated prefix of the satellite array.
    pub fn satellites(&self) -> &[SatelliteObs] {
        &self.satellites[..self.n_sat as usize]
    }
}

impl Default for ObservationMessage {
    fn default() -> Self {
        Self::new()
    }
}

//==================================================================================MSM

#[derive(Debug, Clone, Copy, PartialEq)]
/// Fixed fields and masks of an MSM header.
pub struct MsmHeader {
    pub msg_num: u16,
    pub station_id: u16,
    /// Epoch time (ms): time of week, or time of day for GLONASS.
    pub tow_ms: u32,
    /// More MSM for the same epoch and station follow.
    pub multiple_message: bool,
    /// Issue of data station.
    pub iods: u8,
    pub reserved: u8,
    /// Clock-steering indicator.
    pub steering: u8,
    /// External-clock indicator.
    pub ext_clock: u8,
    /// Divergence-free smoothing flag.
    pub div_free: bool,
    /// Smoothing-interval indicator.
    pub smooth_interval: u8,
    /// Satellite mask; bit `i` set means satellite id `i + 1` is present.
    pub satellite_mask: u64,
    /// Signal mask; bit `i` set means signal id `i + 1` is present.
    pub signal_mask: u32,
    /// Cell mask in (satellite, signal) order; bit `i` is the i-th
    /// transmitted mask bit.
    pub cell_mask: u64,
    /// Number of satellites selected by `satellite_mask`.
    pub n_sat: u8,
    /// Number of signals selected by `signal_mask`.
    pub n_sig: u8,
    /// Number of active cells selected by `cell_mask`.
    pub n_cell: u8,
}

impl MsmHeader {
    pub const fn new() -> Self {
        Self {
            msg_num: 0,
            station_id: 0,
            tow_ms: 0,
            multiple_message: false,
            iods: 0,
            reserved: 0,
            steering: 0,
            ext_clock: 0,
            div_free: false,
            smooth_interval: 0,
            satellite_mask: 0,
            signal_mask: 0,
            cell_mask: 0,
            n_sat: 0,
            n_sig: 0,
            n_cell: 0,
        }
    }

    /// Entry `slot` (0-based) of the satellite mask.
    pub fn satellite_present(&self, slot: usize) -> bool {
        slot < MSM_SATELLITE_MASK_SIZE && (self.satellite_mask >> slot) & 1 == 1
    }

    /// Entry `idx` (0-based) of the signal mask.
    pub fn signal_present(&self, idx: usize) -> bool {
        idx < MSM_SIGNAL_MASK_SIZE && (self.signal_mask >> idx) & 1 == 1
    }

    /// The i-th transmitted cell-mask bit.
    pub fn cell_active(&self, idx: usize) -> bool {
        idx < MSM_MAX_CELLS && (self.cell_mask >> idx) & 1 == 1
    }
}

impl Default for MsmHeader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Satellite-level rough values of an MSM.
pub struct MsmSatellite {
    /// Satellite id, 1-based position in the satellite mask.
    pub sv_id: u8,
    /// Rough range, integer plus fractional milliseconds.
    pub rough_range_ms: f64,
    /// Rough range rate (m/s); MSM5/7 only.
    pub rough_rate_m_s: f64,
    /// GLONASS frequency channel, or `MSM_GLO_FCN_UNKNOWN`. Opaque
    /// satellite info for the other constellations.
    pub glo_fcn: u8,
    pub flags: MsmSatFlags,
}

impl MsmSatellite {
    pub const fn new() -> Self {
        Self {
            sv_id: 0,
            rough_range_ms: 0.0,
            rough_rate_m_s: 0.0,
            glo_fcn: MSM_GLO_FCN_UNKNOWN,
            flags: MsmSatFlags::empty(),
        }
    }
}

impl Default for MsmSatellite {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// One assembled (satellite, signal) cell of an MSM.
pub struct MsmSignal {
    /// Satellite id of the owning satellite.
    pub sv_id: u8,
    /// Signal id, 1-based position in the signal mask.
    pub sig_id: u8,
    /// Pseudorange (ms); zero whenever `flags` clears PSEUDORANGE.
    pub pseudorange_ms: f64,
    /// Carrier phase (ms); zero whenever `flags` clears CARRIER_PHASE.
    pub carrier_phase_ms: f64,
    /// Phase lock time (s).
    pub lock_time_s: f64,
    /// Half-cycle ambiguity indicator.
    pub hca: bool,
    /// Carrier-to-noise density (dB·Hz).
    pub cnr_db_hz: f64,
    /// Range rate (m/s); MSM5/7 only.
    pub range_rate_m_s: f64,
    pub flags: ObsFlags,
}

impl MsmSignal {
    pub const fn new() -> Self {
        Self {
            sv_id: 0,
            sig_id: 0,
            pseudorange_ms: 0.0,
            carrier_phase_ms: 0.0,
            lock_time_s: 0.0,
            hca: false,
            cnr_db_hz: 0.0,
            range_rate_m_s: 0.0,
            flags: ObsFlags::empty(),
        }
    }
}

impl Default for MsmSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Decoded MSM4-7 message.
pub struct MsmMessage {
    pub header: MsmHeader,
    pub constellation: Constellation,
    pub family: MsmFamily,
    pub satellites: [MsmSatellite; MSM_SATELLITE_MASK_SIZE],
    pub signals: [MsmSignal; MSM_MAX_CELLS],
}

impl MsmMessage {
    pub const fn new() -> Self {
        Self {
            header: MsmHeader::new(),
            constellation: Constellation::Gps,
            family: MsmFamily::Msm4,
            satellites: [MsmSatellite::new(); MSM_SATELLITE_MASK_SIZE],
            signals: [MsmSignal::new(); MSM_MAX_CELLS],
        }
    }

    /// Populated prefix of the satellite array, one entry per mask bit.
    pub fn satellites(&self) -> &[MsmSatellite] {
        &self.satellites[..self.header.n_sat as usize]
    }

    /// Populated prefix of the signal array, one entry per active cell.
    pub fn signals(&self) -> &[MsmSignal] {
        &self.signals[..self.header.n_cell as usize]
    }
}

impl Default for MsmMessage {
    fn default() -> Self {
        Self::new()
    }
}

//==================================================================================STATION_METADATA

#[derive(Debug, Clone, Copy, PartialEq)]
/// Decoded 1005/1006 reference-station message.
pub struct RefStationMessage {
    pub msg_num: u16,
    pub station_id: u16,
    /// ITRF realization year indicator.
    pub itrf_year: u8,
    pub gps_indicator: bool,
    pub glo_indicator: bool,
    pub gal_indicator: bool,
    pub ref_station_indicator: bool,
    /// Antenna reference point, ECEF X (m).
    pub arp_x_m: f64,
    /// Antenna reference point, ECEF Y (m).
    pub arp_y_m: f64,
    /// Antenna reference point, ECEF Z (m).
    pub arp_z_m: f64,
    pub osc_indicator: bool,
    pub quarter_cycle_indicator: u8,
    /// Antenna height above the ARP (m); 1006 only.
    pub ant_height_m: f64,
}

impl RefStationMessage {
    pub const fn new() -> Self {
        Self {
            msg_num: 0,
            station_id: 0,
            itrf_year: 0,
            gps_indicator: false,
            glo_indicator: false,
            gal_indicator: false,
            ref_station_indicator: false,
            arp_x_m: 0.0,
            arp_y_m: 0.0,
            arp_z_m: 0.0,
            osc_indicator: false,
            quarter_cycle_indicator: 0,
            ant_height_m: 0.0,
        }
    }
}

impl Default for RefStationMessage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Decoded 1007/1008 antenna-descriptor message.
pub struct AntennaDescriptorMessage {
    pub msg_num: u16,
    pub station_id: u16,
    /// IGS antenna descriptor.
    pub descriptor: TextBytes,
    pub setup_id: u8,
    /// Antenna serial number; 1008 only.
    pub serial: TextBytes,
}

impl AntennaDescriptorMessage {
    pub const fn new() -> Self {
        Self {
            msg_num: 0,
            station_id: 0,
            descriptor: TextBytes::new(),
            setup_id: 0,
            serial: TextBytes::new(),
        }
    }
}

impl Default for AntennaDescriptorMessage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Decoded 1033 receiver and antenna descriptor message.
pub struct ReceiverInfoMessage {
    pub station_id: u16,
    pub ant_descriptor: TextBytes,
    pub ant_setup_id: u8,
    pub ant_serial: TextBytes,
    pub rcv_descriptor: TextBytes,
    pub rcv_fw_version: TextBytes,
    pub rcv_serial: TextBytes,
}

impl ReceiverInfoMessage {
    pub const fn new() -> Self {
        Self {
            station_id: 0,
            ant_descriptor: TextBytes::new(),
            ant_setup_id: 0,
            ant_serial: TextBytes::new(),
            rcv_descriptor: TextBytes::new(),
            rcv_fw_version: TextBytes::new(),
            rcv_serial: TextBytes::new(),
        }
    }
}

impl Default for ReceiverInfoMessage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Decoded 1029 Unicode text message. The byte sequence is copied
/// verbatim and never validated.
pub struct TextMessage {
    pub station_id: u16,
    /// Modified Julian day.
    pub mjd: u16,
    /// UTC second of day.
    pub utc_sec_of_day: u32,
    /// Number of Unicode characters represented.
    pub unicode_chars: u8,
    /// UTF-8 code units, not null-terminated.
    pub utf8: RawBytes,
}

impl TextMessage {
    pub const fn new() -> Self {
        Self {
            station_id: 0,
            mjd: 0,
            utc_sec_of_day: 0,
            unicode_chars: 0,
            utf8: RawBytes::new(),
        }
    }
}

impl Default for TextMessage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Decoded 1230 GLONASS code-phase bias message. Absent biases stay 0.0.
pub struct GloBiasMessage {
    pub station_id: u16,
    /// Code-phase bias indicator.
    pub bias_indicator: bool,
    /// FDMA signal mask gating the four bias fields.
    pub fdma_signal_mask: u8,
    pub l1_ca_bias_m: f64,
    pub l1_p_bias_m: f64,
    pub l2_ca_bias_m: f64,
    pub l2_p_bias_m: f64,
}

impl GloBiasMessage {
    pub const fn new() -> Self {
        Self {
            station_id: 0,
            bias_indicator: false,
            fdma_signal_mask: 0,
            l1_ca_bias_m: 0.0,
            l1_p_bias_m: 0.0,
            l2_ca_bias_m: 0.0,
            l2_p_bias_m: 0.0,
        }
    }
}

impl Default for GloBiasMessage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Decoded 4062 proprietary envelope.
pub struct ProprietaryMessage {
    /// Inner message type.
    pub msg_type: u16,
    pub sender_id: u16,
    /// Opaque inner payload.
    pub data: RawBytes,
}

impl ProprietaryMessage {
    pub const fn new() -> Self {
        Self {
            msg_type: 0,
            sender_id: 0,
            data: RawBytes::new(),
        }
    }
}

impl Default for ProprietaryMessage {
    fn default() -> Self {
        Self::new()
    }
}
