//! Build script for keypanel-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml and turns it into Rust constants

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use keypanel_core::config::PanelConfig;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    generate_panel_config(&out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse panel.toml with the same loader the library tests use, then emit
/// `panel_config.rs` for `include!`
fn generate_panel_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=panel.toml");

    let content = match fs::read_to_string("panel.toml") {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config = match PanelConfig::from_toml(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid panel.toml                                       ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format!("{:?}", e)
            );
        }
    };

    let mut out = String::new();
    writeln!(out, "// Generated from panel.toml by build.rs").unwrap();
    writeln!(out, "pub const ADDRESS: Option<u8> = {:?};", config.address).unwrap();
    writeln!(out, "pub const DEBOUNCE_MS: u16 = {};", config.debounce_ms).unwrap();
    writeln!(out, "pub const BUTTONS: &[(&str, u8, Option<u16>)] = &[").unwrap();
    for button in &config.buttons {
        writeln!(
            out,
            "    ({:?}, {}, {:?}),",
            button.name.as_str(),
            button.channel().unwrap(),
            button.debounce_ms
        )
        .unwrap();
    }
    writeln!(out, "];").unwrap();

    fs::write(out_dir.join("panel_config.rs"), out).unwrap();

    println!(
        "cargo:warning=panel.toml validated successfully ({} buttons)",
        config.buttons.len()
    );
}
