#![no_main]

use libfuzzer_sys::fuzz_target;

use gridrace_core::motion::MotionProfile;

fuzz_target!(|data: &[u8]| {
    let Some(bytes) = data.get(..8) else {
        return;
    };
    // Any bit pattern, NaN and infinities included.
    let p = f64::from_le_bytes(bytes.try_into().unwrap());

    for profile in MotionProfile::ALL {
        let y = profile.apply(p);
        assert!(!y.is_nan(), "{profile} returned NaN for {p}");
        assert!(y <= 1.0, "{profile} overshot to {y} at {p}");
        assert!(y >= -0.2, "{profile} dipped to {y} at {p}");
        if p <= 0.0 {
            assert_eq!(y, 0.0, "{profile} at {p}");
        }
        if p >= 1.0 {
            assert_eq!(y, 1.0, "{profile} at {p}");
        }
    }
});
