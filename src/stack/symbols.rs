//! C ABI entry point for compiler-generated stack protector checks.
//!
//! `__stack_chk_guard` is exported from [`super::guard`]. Builds that get
//! these symbols from libc or from the kernel proper leave the `symbols`
//! feature off.

#[no_mangle]
pub extern "C" fn __stack_chk_fail() -> ! {
    super::fail::stack_check_failed()
}
