#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    if let Err(err) = powergate_ui::run() {
        eprintln!("Powergate failed: {err}");
        std::process::exit(1);
    }
}
