//! Build script for the WhizzyVerse CLI.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory so it sits next to the `.env` file the application reads:
//! - Linux: `~/.local/share/whizzyverse/.env.example`
//! - macOS: `~/Library/Application Support/whizzyverse/.env.example`
//! - Windows: `%LOCALAPPDATA%/whizzyverse/.env.example`

use std::{env, fs, path::PathBuf};

/// Failing to install the template only produces a cargo warning, since
/// read-only home directories are common on build machines.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("whizzyverse");

    if env_example_path.is_file() {
        let copied = fs::create_dir_all(&out_dir)
            .and_then(|()| fs::copy(&env_example_path, out_dir.join(".env.example")));
        if let Err(e) = copied {
            println!(
                "cargo:warning=cannot install .env.example into {}: {}",
                out_dir.display(),
                e
            );
        }
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
