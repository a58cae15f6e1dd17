//! Floor-to-intensity scaling.

/// Base of the X-value before floor growth.
pub const X_BASE: u32 = 6;

/// Floor-dependent intensity substituted for zero-magnitude pattern fields.
///
/// ```text
/// x = max(1, 6 + floor / 2)     (integer division)
/// ```
///
/// Call once per enemy turn and reuse the value for every field resolved that
/// turn.
pub const fn resolve_x(floor: u32) -> u32 {
    let x = X_BASE.saturating_add(floor / 2);
    if x < 1 { 1 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_formula_for_small_floors() {
        for floor in 0..500u32 {
            assert_eq!(resolve_x(floor), (6 + floor / 2).max(1));
        }
    }

    #[test]
    fn is_monotonic() {
        let mut previous = resolve_x(0);
        for floor in 1..2_000u32 {
            let x = resolve_x(floor);
            assert!(x >= previous, "x dropped at floor {floor}");
            previous = x;
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(resolve_x(0), 6);
        assert_eq!(resolve_x(1), 6);
        assert_eq!(resolve_x(10), 11);
        assert_eq!(resolve_x(u32::MAX), 6 + u32::MAX / 2);
    }
}
