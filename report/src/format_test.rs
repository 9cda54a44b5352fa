use crate::format::{duration, speedup, thousands};

#[test]
pub fn thousands_groups_digits() {
    assert_eq!(thousands(0.0), "0");
    assert_eq!(thousands(999.0), "999");
    assert_eq!(thousands(1000.0), "1,000");
    assert_eq!(thousands(1234567.0), "1,234,567");
    assert_eq!(thousands(-1234.0), "-1,234");
}

#[test]
pub fn thousands_rounds_first() {
    assert_eq!(thousands(999.6), "1,000");
    assert_eq!(thousands(10000.4), "10,000");
}

#[test]
pub fn duration_switches_to_seconds() {
    assert_eq!(duration(50.0), "50.0ms");
    assert_eq!(duration(999.94), "999.9ms");
    assert_eq!(duration(1000.0), "1.0s");
    assert_eq!(duration(12345.0), "12.3s");
}

#[test]
pub fn speedup_has_two_decimals() {
    assert_eq!(speedup(1.0), "1.00x");
    assert_eq!(speedup(2.0), "2.00x");
    assert_eq!(speedup(0.3333), "0.33x");
}
