//! Check camera, detector, and pointer setup.

use std::process::Command;

use handmouse_common::config::{config_file_path, AppConfig};
use handmouse_engine::OPENCV_ENABLED;
use handmouse_pointer::{EnigoBackend, PointerBackend};

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Handmouse System Check");
    println!("{}", "=".repeat(50));

    let mut ready = true;

    let config_path = config_file_path();
    if config_path.exists() {
        println!("[OK] Config file: {}", config_path.display());
    } else {
        println!("[INFO] No config file at {}; using defaults", config_path.display());
    }
    match config.validate() {
        Ok(()) => println!("[OK] Configuration is valid"),
        Err(e) => {
            println!("[FAIL] Configuration: {e}");
            ready = false;
        }
    }

    if OPENCV_ENABLED {
        println!(
            "[OK] OpenCV support compiled in (camera {}, {}x{})",
            config.camera.device_index, config.camera.width, config.camera.height
        );
    } else {
        println!("[FAIL] OpenCV support not compiled in; rebuild with --features opencv");
        ready = false;
    }

    if config.detector.script.exists() {
        println!("[OK] Detector script: {}", config.detector.script.display());
    } else {
        println!(
            "[FAIL] Detector script not found: {}",
            config.detector.script.display()
        );
        ready = false;
    }

    match Command::new(&config.detector.program).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!(
                "[OK] Detector program: {} {}",
                config.detector.program,
                version.trim()
            );
        }
        Ok(output) => {
            println!(
                "[WARN] Detector program {} exited with {}",
                config.detector.program, output.status
            );
        }
        Err(e) => {
            println!(
                "[FAIL] Detector program {} not runnable: {e}",
                config.detector.program
            );
            ready = false;
        }
    }

    match EnigoBackend::new() {
        Ok(backend) => match backend.screen_size() {
            Ok((w, h)) => println!("[OK] Pointer backend: {} (screen {w}x{h})", backend.name()),
            Err(e) => println!("[WARN] Pointer backend: {} ({e})", backend.name()),
        },
        Err(e) => {
            println!("[FAIL] Pointer backend unavailable: {e}");
            ready = false;
        }
    }

    println!();
    if ready {
        println!("Everything needed for gesture control is available.");
    } else {
        println!("Some requirements are missing. See above for details.");
    }

    Ok(())
}
