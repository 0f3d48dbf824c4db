use std::env;
use std::fs;
use std::path::PathBuf;

include!("build/guard_env.rs");

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=build/guard_env.rs");
    println!("cargo:rerun-if-env-changed={}", GUARD_ENV);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let out_path = PathBuf::from(&out_dir).join("guard_config.rs");

    let pointer_width: u32 = env::var("CARGO_CFG_TARGET_POINTER_WIDTH")
        .ok()
        .and_then(|w| w.parse().ok())
        .unwrap_or(64);

    let generated = match env::var(GUARD_ENV) {
        Ok(raw) if !raw.trim().is_empty() => match parse_guard(&raw, pointer_width) {
            Ok(value) => {
                eprintln!("hisi_platform/build.rs: stack guard overridden from {}", GUARD_ENV);
                format!("pub const BUILD_GUARD: Option<usize> = Some({:#x});\n", value)
            }
            Err(msg) => panic!("{}", msg),
        },
        _ => String::from("pub const BUILD_GUARD: Option<usize> = None;\n"),
    };

    fs::write(&out_path, generated).expect("write guard_config.rs");
}
