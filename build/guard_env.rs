// Shared by build.rs and tests/build_guard_tests.rs through include!.

pub const GUARD_ENV: &str = "STACK_CHK_GUARD";

/// Parse a `STACK_CHK_GUARD` override: hex, optional `0x` prefix and `_`
/// separators, nonzero, and no wider than the target pointer.
pub fn parse_guard(raw: &str, pointer_width: u32) -> Result<u64, String> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .replace('_', "");

    let value = u64::from_str_radix(&digits, 16)
        .map_err(|e| format!("{}={:?} is not a hex value: {}", GUARD_ENV, raw, e))?;

    if value == 0 {
        return Err(format!("{} must be nonzero", GUARD_ENV));
    }
    if pointer_width < 64 && value >> pointer_width != 0 {
        return Err(format!(
            "{}={:#x} does not fit a {}-bit target",
            GUARD_ENV, value, pointer_width
        ));
    }
    Ok(value)
}
