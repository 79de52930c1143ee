//! Unit tests for the lock-time tables, epoch wrap, and FDMA mapping.
use super::*;
use crate::constants::{GPS_C, RTCM_MAX_TOW_MS};

#[test]
/// Boundary values of every stratum of the legacy 7-bit table.
fn test_lock_time_strata() {
    assert_eq!(lock_time_s(0), 0);
    assert_eq!(lock_time_s(23), 23);
    assert_eq!(lock_time_s(24), 24);
    assert_eq!(lock_time_s(47), 70);
    assert_eq!(lock_time_s(48), 72);
    assert_eq!(lock_time_s(71), 164);
    assert_eq!(lock_time_s(72), 168);
    assert_eq!(lock_time_s(95), 352);
    assert_eq!(lock_time_s(96), 360);
    assert_eq!(lock_time_s(119), 728);
    assert_eq!(lock_time_s(120), 744);
    assert_eq!(lock_time_s(126), 936);
    assert_eq!(lock_time_s(127), 937);
}

#[test]
/// The legacy table never decreases and saturates at 937 s.
fn test_lock_time_monotone() {
    let mut previous = 0;
    for lock in 0..=127u8 {
        let current = lock_time_s(lock);
        assert!(current >= previous, "decrease at indicator {lock}");
        previous = current;
    }
    assert_eq!(previous, 937);
}

#[test]
/// The MSM 4-bit indicator doubles from 32 ms.
fn test_msm_lock_time() {
    assert_eq!(msm_lock_time_s(0), 0.0);
    assert_eq!(msm_lock_time_s(1), 0.032);
    assert_eq!(msm_lock_time_s(2), 0.064);
    assert_eq!(msm_lock_time_s(10), 16.384);
    assert_eq!(msm_lock_time_s(15), 524.288);
    // Only the low nibble participates.
    assert_eq!(msm_lock_time_s(0xF3), msm_lock_time_s(3));
}

#[test]
/// Boundary values of the extended 10-bit table.
fn test_msm_ext_lock_time_strata() {
    assert_eq!(msm_ext_lock_time_ms(0), 0);
    assert_eq!(msm_ext_lock_time_ms(63), 63);
    assert_eq!(msm_ext_lock_time_ms(64), 64);
    assert_eq!(msm_ext_lock_time_ms(95), 126);
    assert_eq!(msm_ext_lock_time_ms(96), 128);
    assert_eq!(msm_ext_lock_time_ms(351), 32_256);
    assert_eq!(msm_ext_lock_time_ms(352), 32_768);
    assert_eq!(msm_ext_lock_time_ms(671), 33_030_144);
    assert_eq!(msm_ext_lock_time_ms(672), 67_108_864);
    assert_eq!(msm_ext_lock_time_ms(1023), 67_108_864);
    assert_eq!(msm_ext_lock_time_s(1), 0.001);
}

#[test]
/// The extended table never decreases over its full input range.
fn test_msm_ext_lock_time_monotone() {
    let mut previous = 0;
    for lock in 0..=1023u16 {
        let current = msm_ext_lock_time_ms(lock);
        assert!(current >= previous, "decrease at indicator {lock}");
        previous = current;
    }
    assert_eq!(previous, 67_108_864);
}

#[test]
/// In-week values pass through the BeiDou wrap untouched.
fn test_bds_tow_passthrough() {
    assert_eq!(normalize_bds_tow_ms(0), 0);
    assert_eq!(normalize_bds_tow_ms(123_456), 123_456);
    assert_eq!(normalize_bds_tow_ms(RTCM_MAX_TOW_MS), RTCM_MAX_TOW_MS);
}

#[test]
/// The wrap range folds into the top of the week.
fn test_bds_tow_wrap() {
    const WRAP: u32 = 1 << 30;
    assert_eq!(normalize_bds_tow_ms(WRAP - 1), RTCM_MAX_TOW_MS);
    assert_eq!(normalize_bds_tow_ms(WRAP - 14_000), RTCM_MAX_TOW_MS + 1 - 14_000);
    // One below the fold threshold is carried through unchanged.
    assert_eq!(normalize_bds_tow_ms(WRAP - 14_001), WRAP - 14_001);
}

#[test]
/// Channel 7 is the FDMA center frequency; neighbors step by the delta.
fn test_glo_frequencies() {
    assert_eq!(glo_l1_hz(7), 1.602e9);
    assert_eq!(glo_l2_hz(7), 1.246e9);
    assert_eq!(glo_l1_hz(8), 1.602e9 + 0.562_5e6);
    assert_eq!(glo_l1_hz(0), 1.602e9 - 7.0 * 0.562_5e6);
    assert_eq!(glo_l2_hz(13), 1.246e9 + 6.0 * 0.437_5e6);
    // The L1 wavelength at the center channel stays close to 18.7 cm.
    let lambda = GPS_C / glo_l1_hz(7);
    assert!((lambda - 0.1871).abs() < 1e-3);
}
