mod common;

use common::{is_child, run_child};
use hisi_platform::stack::guard;
use hisi_platform::stack::{BUILD_GUARD, DEFAULT_GUARD};
use hisi_platform::{GuardError, GuardSource, PlatformConfig, RuntimeEnvironment};

#[test]
fn default_guard_is_the_fixed_constant_for_this_width() {
    assert_ne!(DEFAULT_GUARD, 0);
    assert_ne!(BUILD_GUARD, 0);
    if cfg!(target_pointer_width = "64") {
        assert_eq!(DEFAULT_GUARD as u64, 0x595e_9fbd_94fd_a766);
    } else {
        assert_eq!(DEFAULT_GUARD as u64, 0xe2de_e396);
    }
    assert_eq!(std::mem::size_of_val(&DEFAULT_GUARD), std::mem::size_of::<*const ()>());
}

#[test]
fn child_install_then_seal() {
    if !is_child("child_install_then_seal") {
        return;
    }
    assert_eq!(guard::value(), BUILD_GUARD);
    assert!(!guard::is_sealed());
    assert_ne!(guard::source(), GuardSource::Runtime);

    assert_eq!(guard::install(0), Err(GuardError::Zero));
    assert!(!guard::is_sealed());

    guard::install(0x1234_5678).expect("first install");
    assert_eq!(guard::value(), 0x1234_5678);
    assert!(guard::is_sealed());
    assert_eq!(guard::source(), GuardSource::Runtime);

    assert_eq!(guard::install(0x0bad_cafe), Err(GuardError::Sealed));
    assert_eq!(guard::value(), 0x1234_5678);

    let config = PlatformConfig::current();
    assert_eq!(config.guard_source, GuardSource::Runtime);
    assert!(config.guard_sealed);
}

#[test]
fn guard_installs_once_and_seals() {
    assert!(run_child("child_install_then_seal").success());
}

#[test]
fn child_seal_without_install() {
    if !is_child("child_seal_without_install") {
        return;
    }
    guard::seal();
    guard::seal();
    assert!(guard::is_sealed());
    assert_eq!(guard::install(0x55aa_55aa), Err(GuardError::Sealed));
    assert_eq!(guard::value(), BUILD_GUARD);
    assert_ne!(guard::source(), GuardSource::Runtime);
}

#[test]
fn sealed_guard_refuses_reseed() {
    assert!(run_child("child_seal_without_install").success());
}

#[test]
fn platform_config_reports_build_options() {
    let config = PlatformConfig::current();
    assert_eq!(config.pointer_width as usize, usize::BITS as usize);
    if cfg!(feature = "hosted") {
        assert_eq!(config.environment, RuntimeEnvironment::Hosted);
    } else {
        assert_eq!(config.environment, RuntimeEnvironment::Freestanding);
    }
    assert_eq!(config.symbols_exported, cfg!(feature = "symbols"));
}
