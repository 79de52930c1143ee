//! Physical constants, invalid-value sentinels, and format maxima of the
//! RTCM 10403.3 observation subset. Collaborating layers (RTK engines,
//! ephemeris decoders) share these values.

/// Speed of light (m/s).
pub const GPS_C: f64 = 299_792_458.0;
/// GPS L1 carrier frequency (Hz).
pub const GPS_L1_HZ: f64 = 1.575_42e9;
/// GPS L2 carrier frequency (Hz).
pub const GPS_L2_HZ: f64 = 1.227_60e9;
/// GLONASS G1 FDMA base frequency (Hz).
pub const GLO_L1_HZ: f64 = 1.602e9;
/// GLONASS G2 FDMA base frequency (Hz).
pub const GLO_L2_HZ: f64 = 1.246e9;
/// GLONASS G1 per-channel frequency step (Hz).
pub const GLO_L1_DELTA_HZ: f64 = 0.562_5e6;
/// GLONASS G2 per-channel frequency step (Hz).
pub const GLO_L2_DELTA_HZ: f64 = 0.437_5e6;

/// One light-millisecond, the GPS pseudorange ambiguity unit (m).
pub const PRUNIT_GPS: f64 = 299_792.458;
/// Two light-milliseconds, the GLONASS pseudorange ambiguity unit (m).
pub const PRUNIT_GLO: f64 = 599_584.916;

/// Offset subtracted from a raw frequency-channel field to obtain the
/// signed GLONASS channel number.
pub const MT1012_GLO_FCN_OFFSET: u8 = 7;
/// Highest raw frequency-channel value with a defined carrier frequency.
pub const MT1012_GLO_MAX_FCN: u8 = 13;
/// Sentinel stored when an MSM satellite carries no frequency channel.
pub const MSM_GLO_FCN_UNKNOWN: u8 = 255;

/// Upper bound of the GPS time of week (ms).
pub const RTCM_MAX_TOW_MS: u32 = 604_799_999;
/// Upper bound of the GLONASS time of day (ms).
pub const RTCM_GLO_MAX_TOW_MS: u32 = 86_400_999;

/// Maximum number of active (satellite, signal) cells in one MSM.
pub const MSM_MAX_CELLS: usize = 64;
/// Number of entries in the MSM satellite mask.
pub const MSM_SATELLITE_MASK_SIZE: usize = 64;
/// Number of entries in the MSM signal mask.
pub const MSM_SIGNAL_MASK_SIZE: usize = 32;
/// Maximum satellite count in a legacy observation message (5-bit field).
pub const RTCM_MAX_SATS: usize = 32;

//==================================================================================SENTINELS
/// Raw 24/25-bit L1 pseudorange marking an unmeasured observable.
pub const PR_L1_INVALID: u32 = 0x80000;
/// 14-bit signed L2 pseudorange difference marking an unmeasured observable.
pub const PR_L2_INVALID: i32 = -8_192;
/// 20-bit signed carrier-minus-code residual marking an unusable phase.
pub const CP_INVALID: i32 = -524_288;
/// 8-bit rough-range integer milliseconds sentinel.
pub const MSM_ROUGH_RANGE_INVALID: u8 = 0xFF;
/// 14-bit signed rough range-rate sentinel.
pub const MSM_ROUGH_RATE_INVALID: i32 = -8_192;
/// 15-bit signed fine pseudorange sentinel.
pub const MSM_PR_INVALID: i32 = -16_384;
/// 20-bit signed extended fine pseudorange sentinel.
pub const MSM_PR_EXT_INVALID: i32 = -524_288;
/// 22-bit signed fine phase-range sentinel.
pub const MSM_CP_INVALID: i32 = -2_097_152;
/// 24-bit signed extended fine phase-range sentinel.
pub const MSM_CP_EXT_INVALID: i32 = -8_388_608;
/// 15-bit signed fine phase-range-rate sentinel.
pub const MSM_DOP_INVALID: i32 = -16_384;
