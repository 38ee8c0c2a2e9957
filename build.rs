//! Build script checking the native libraries and model assets the detector needs.
//!
//! Nothing here fails the build; missing pieces are reported as cargo warnings
//! with installation hints.

use std::env;
use std::path::Path;
use std::process::Command;

/// `OpenCV` modules the detector links against
const REQUIRED_OPENCV_MODULES: [&str; 5] = ["highgui", "imgproc", "objdetect", "videoio", "core"];

/// Files loaded at runtime with the default configuration
const RUNTIME_ASSETS: [&str; 2] = ["assets/emotion_model.onnx", "assets/haarcascade_frontalface_default.xml"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if check_pkg_config() {
        check_opencv();
    }
    check_onnx_runtime();
    check_assets();

    println!(
        "cargo:rustc-env=BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );
}

fn pkg_config(args: &[&str]) -> Option<String> {
    let output = Command::new("pkg-config").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn check_pkg_config() -> bool {
    if let Some(version) = pkg_config(&["--version"]) {
        println!("cargo:warning=Found pkg-config version: {version}");
        true
    } else {
        println!("cargo:warning=pkg-config not found. This is required to find OpenCV.");
        println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
        println!("cargo:warning=On macOS: brew install pkg-config");
        false
    }
}

fn check_opencv() {
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    let Some((package, version)) = ["opencv4", "opencv"]
        .iter()
        .find_map(|pkg| pkg_config(&["--modversion", pkg]).map(|v| (*pkg, v)))
    else {
        println!("cargo:warning=OpenCV not found via pkg-config. Make sure OpenCV is installed.");
        println!("cargo:warning=On Ubuntu: sudo apt-get install libopencv-dev");
        println!("cargo:warning=On macOS: brew install opencv");
        return;
    };
    println!("cargo:warning=Found OpenCV version: {version}");

    let libs = pkg_config(&["--libs", package]).unwrap_or_default();
    for module in REQUIRED_OPENCV_MODULES {
        if !libs.contains(&format!("opencv_{module}")) {
            println!("cargo:warning=OpenCV module '{module}' not listed by pkg-config; linking may fail");
        }
    }
}

fn check_onnx_runtime() {
    println!("cargo:rerun-if-env-changed=ORT_STRATEGY");
    println!("cargo:rerun-if-env-changed=ORT_LIB_LOCATION");

    match env::var("ORT_STRATEGY").as_deref() {
        Ok("system") if env::var("ORT_LIB_LOCATION").is_err() => {
            println!("cargo:warning=ORT_STRATEGY=system but ORT_LIB_LOCATION is not set");
        }
        Ok(strategy) => println!("cargo:warning=ONNX Runtime strategy: {strategy}"),
        Err(_) => {}
    }
}

fn check_assets() {
    let root = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    for asset in RUNTIME_ASSETS {
        println!("cargo:rerun-if-changed={asset}");
        if !Path::new(&root).join(asset).exists() {
            println!("cargo:warning=Runtime asset missing: {asset} (pass --config to point elsewhere)");
        }
    }
}
