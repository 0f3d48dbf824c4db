include!("../build/guard_env.rs");

use hisi_platform::stack::{guard, BUILD_GUARD, DEFAULT_GUARD};

#[test]
fn accepts_hex_with_or_without_prefix() {
    assert_eq!(parse_guard("0xdeadbeef", 32), Ok(0xdead_beef));
    assert_eq!(parse_guard("0XDEADBEEF", 32), Ok(0xdead_beef));
    assert_eq!(parse_guard("dead_beef", 32), Ok(0xdead_beef));
    assert_eq!(parse_guard("  0x1234\n", 64), Ok(0x1234));
    assert_eq!(parse_guard("0x595e_9fbd_94fd_a766", 64), Ok(0x595e_9fbd_94fd_a766));
}

#[test]
fn rejects_zero() {
    let err = parse_guard("0x0", 64).unwrap_err();
    assert!(err.contains("nonzero"), "{}", err);
    assert!(parse_guard("0000", 32).is_err());
}

#[test]
fn rejects_values_wider_than_the_target() {
    let err = parse_guard("0x1_0000_0000", 32).unwrap_err();
    assert!(err.contains("32-bit"), "{}", err);
    assert_eq!(parse_guard("0xffff_ffff", 32), Ok(0xffff_ffff));
    assert_eq!(parse_guard("0x1_0000_0000", 64), Ok(0x1_0000_0000));
}

#[test]
fn rejects_non_hex_input() {
    let err = parse_guard("canary", 64).unwrap_err();
    assert!(err.starts_with(GUARD_ENV), "{}", err);
    assert!(parse_guard("0x", 64).is_err());
    assert!(parse_guard("0x1_0000_0000_0000_0000", 64).is_err());
}

#[test]
fn linked_guard_matches_build_environment() {
    let expected = match option_env!("STACK_CHK_GUARD") {
        Some(raw) if !raw.trim().is_empty() => parse_guard(raw, usize::BITS).unwrap() as usize,
        _ => DEFAULT_GUARD,
    };
    assert_eq!(BUILD_GUARD, expected);
    assert_eq!(guard::value(), BUILD_GUARD);
}
