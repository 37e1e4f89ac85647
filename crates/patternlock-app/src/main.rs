//! Headless replay entry point (native).
//!
//! Usage: `patternlock <script.json>`. Prints every emitted pattern code on
//! its own line.

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: patternlock <script.json>");
        return ExitCode::FAILURE;
    };

    match patternlock_app::ReplayScript::load(std::path::Path::new(&path)) {
        Ok(script) => {
            for code in script.run() {
                println!("{}", code);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to replay {}: {}", path, e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
