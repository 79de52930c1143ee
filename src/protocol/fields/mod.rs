//! Field-level codecs shared by the message decoders: the nonlinear
//! lock-time tables, the BeiDou epoch wrap, and the GLONASS FDMA
//! channel-to-frequency mapping.
use crate::constants::{
    GLO_L1_DELTA_HZ, GLO_L1_HZ, GLO_L2_DELTA_HZ, GLO_L2_HZ, MT1012_GLO_FCN_OFFSET,
    RTCM_MAX_TOW_MS,
};

//==================================================================================LOCK_TIME

/// Map the legacy 7-bit lock-time indicator to seconds.
///
/// Piecewise-linear with doubling step widths; 127 saturates at 937 s.
pub fn lock_time_s(lock: u8) -> u32 {
    let l = u32::from(lock & 0x7F);
    match l {
        0..=23 => l,
        24..=47 => 2 * l - 24,
        48..=71 => 4 * l - 120,
        72..=95 => 8 * l - 408,
        96..=119 => 16 * l - 1176,
        120..=126 => 32 * l - 3096,
        _ => 937,
    }
}

/// Map the MSM 4-bit lock-time indicator to seconds.
pub fn msm_lock_time_s(lock: u8) -> f64 {
    let n = u32::from(lock & 0x0F);
    if n == 0 {
        0.0
    } else {
        f64::from(32u32 << (n - 1)) / 1000.0
    }
}

/// Map the MSM extended 10-bit lock-time indicator to milliseconds.
///
/// 32-value strata with doubling steps; inputs at or above 672 saturate
/// at 67 108 864 ms.
pub fn msm_ext_lock_time_ms(lock: u16) -> u32 {
    let i = u32::from(lock & 0x3FF);
    match i {
        0..=63 => i,
        64..=95 => 2 * i - 64,
        96..=127 => 4 * i - 256,
        128..=159 => 8 * i - 768,
        160..=191 => 16 * i - 2048,
        192..=223 => 32 * i - 5120,
        224..=255 => 64 * i - 12288,
        256..=287 => 128 * i - 28672,
        288..=319 => 256 * i - 65536,
        320..=351 => 512 * i - 147456,
        352..=383 => 1024 * i - 327680,
        384..=415 => 2048 * i - 720896,
        416..=447 => 4096 * i - 1572864,
        448..=479 => 8192 * i - 3407872,
        480..=511 => 16384 * i - 7340032,
        512..=543 => 32768 * i - 15728640,
        544..=575 => 65536 * i - 33554432,
        576..=607 => 131072 * i - 71303168,
        608..=639 => 262144 * i - 150994944,
        640..=671 => 524288 * i - 318767104,
        _ => 67_108_864,
    }
}

/// Same table expressed in seconds.
pub fn msm_ext_lock_time_s(lock: u16) -> f64 {
    f64::from(msm_ext_lock_time_ms(lock)) / 1000.0
}

//==================================================================================EPOCH

/// Undo the BeiDou epoch wrap. Small negative offsets from GPS time are
/// transmitted as 30-bit values just below 2^30; anything closer than
/// 14 s to the wrap point folds into the top of the week.
pub fn normalize_bds_tow_ms(raw: u32) -> u32 {
    const WRAP: u32 = 1 << 30;
    const FOLD_MS: u32 = 14_000;
    if raw >= WRAP - FOLD_MS {
        RTCM_MAX_TOW_MS + 1 - (WRAP - raw)
    } else {
        raw
    }
}

//==================================================================================GLO_FDMA

/// GLONASS L1 carrier frequency for a raw frequency-channel value.
pub fn glo_l1_hz(fcn: u8) -> f64 {
    GLO_L1_HZ + f64::from(i32::from(fcn) - i32::from(MT1012_GLO_FCN_OFFSET)) * GLO_L1_DELTA_HZ
}

/// GLONASS L2 carrier frequency for a raw frequency-channel value.
pub fn glo_l2_hz(fcn: u8) -> f64 {
    GLO_L2_HZ + f64::from(i32::from(fcn) - i32::from(MT1012_GLO_FCN_OFFSET)) * GLO_L2_DELTA_HZ
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
