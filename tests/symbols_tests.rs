#![cfg(feature = "symbols")]

mod common;

use core::ptr::addr_of;

use common::{is_child, run_child};
use hisi_platform::stack::guard;

const RESEED_SEEN_EXIT: i32 = 45;

extern "C" {
    static __stack_chk_guard: usize;
    fn __stack_chk_fail() -> !;
}

fn exported_guard() -> usize {
    // SAFETY: the symbol is the crate's pointer-sized guard word.
    unsafe { addr_of!(__stack_chk_guard).read_volatile() }
}

#[test]
fn exported_guard_is_the_runtime_guard() {
    assert_eq!(exported_guard(), guard::value());
}

#[test]
fn child_exported_guard_follows_reseed() {
    if !is_child("child_exported_guard_follows_reseed") {
        return;
    }
    guard::install(0x5a5a_a5a5).expect("reseed");
    if exported_guard() != 0x5a5a_a5a5 {
        std::process::exit(1);
    }
    std::process::exit(RESEED_SEEN_EXIT);
}

#[test]
fn exported_guard_follows_reseed() {
    let status = run_child("child_exported_guard_follows_reseed");
    assert_eq!(status.code(), Some(RESEED_SEEN_EXIT));
}

#[test]
fn child_c_entry_point() {
    if !is_child("child_c_entry_point") {
        return;
    }
    // SAFETY: exported by hisi_platform with this exact signature.
    unsafe { __stack_chk_fail() }
}

#[cfg(all(unix, feature = "hosted"))]
#[test]
fn c_entry_point_aborts_with_sigabrt() {
    use std::os::unix::process::ExitStatusExt;

    let status = run_child("child_c_entry_point");
    assert_eq!(status.code(), None);
    assert_eq!(status.signal(), Some(libc::SIGABRT));
}
