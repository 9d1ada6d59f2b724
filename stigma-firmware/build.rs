//! Build script for stigma-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml and turns it into Rust constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use stigma_core::DeviceConfig;
use stigma_hal::spi::MAX_FREQUENCY_HZ;

/// Layout of display.toml
#[derive(Deserialize)]
struct DisplayToml {
    display: DeviceConfig,
    #[serde(default)]
    spi: SpiToml,
}

#[derive(Deserialize)]
struct SpiToml {
    frequency_hz: u32,
}

impl Default for SpiToml {
    fn default() -> Self {
        Self {
            frequency_hz: MAX_FREQUENCY_HZ,
        }
    }
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    setup_linker(&out_dir);
    let config = load_config();
    generate_config(&out_dir, &config);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and validate display.toml
fn load_config() -> DisplayToml {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read display.toml", &e.to_string()),
    };

    let config: DisplayToml = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail("Invalid display.toml", &e.to_string()),
    };

    if let Err(e) = config.display.validate() {
        fail("Unsupported panel in display.toml", &e.to_string());
    }

    if let Some(contrast) = config.display.contrast {
        if contrast > 127 {
            fail(
                "Invalid contrast in display.toml",
                &format!("contrast {} is above 127", contrast),
            );
        }
    }

    let frequency = config.spi.frequency_hz;
    if frequency == 0 || frequency > MAX_FREQUENCY_HZ {
        fail(
            "Invalid SPI frequency in display.toml",
            &format!(
                "frequency_hz {} must be between 1 and {}",
                frequency, MAX_FREQUENCY_HZ
            ),
        );
    }

    println!(
        "cargo:warning=display.toml validated: {} {}x{}",
        config.display.variant, config.display.width, config.display.height
    );

    config
}

/// Write display_config.rs into OUT_DIR
fn generate_config(out_dir: &Path, config: &DisplayToml) {
    let display = &config.display;
    let source = format!(
        "/// Panel configuration from display.toml\n\
         pub const DISPLAY: DeviceConfig = DeviceConfig {{\n    \
             variant: ChipVariant::{:?},\n    \
             width: {},\n    \
             height: {},\n    \
             contrast: {:?},\n\
         }};\n\n\
         /// SPI clock from display.toml\n\
         pub const SPI_FREQUENCY_HZ: u32 = {};\n",
        display.variant, display.width, display.height, display.contrast, config.spi.frequency_hz
    );

    let path = out_dir.join("display_config.rs");
    if let Err(e) = fs::write(&path, source) {
        fail("Failed to write display_config.rs", &e.to_string());
    }
}

/// Abort the build with a boxed message
fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
