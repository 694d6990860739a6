//! Build script for matrix-envoy: selects the linker memory layout for the target.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rustc-check-cfg=cfg(rust_analyzer)");

    let Ok(target) = env::var("TARGET") else {
        return;
    };
    let memory_file = if target.starts_with("thumbv8m") {
        // Pico 2 ARM
        "memory-pico2.x"
    } else if target.starts_with("riscv32imac") {
        // Pico 2 RISC-V
        "memory-pico2-riscv.x"
    } else if target.starts_with("thumbv6m") {
        // Pico 1 / Pico 1W
        "memory-pico1w.x"
    } else {
        // Host builds (tests, PNG previews) need no memory layout
        return;
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    let memory_x = fs::read_to_string(memory_file)
        .unwrap_or_else(|err| panic!("Failed to read {memory_file}: {err}"));
    fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={memory_file}");
    println!("cargo:rerun-if-changed=build.rs");
}
