//! Play the baked cat animation centered in the terminal.

use std::io;
use std::time::Duration;

use meow_core::FrameStore;
use meow_terminal::{cat, PlayerApp, FRAME_INTERVAL};

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let interval = match args.get(1).map(String::as_str) {
        None => FRAME_INTERVAL,
        Some("-h") | Some("--help") => {
            println!("Usage: {} [frame-ms]", args[0]);
            println!();
            println!("Play the cat animation centered in the terminal until Ctrl-C.");
            println!();
            println!("Arguments:");
            println!(
                "  frame-ms  Pause between frames in milliseconds (default: {})",
                FRAME_INTERVAL.as_millis()
            );
            return Ok(());
        }
        Some(raw) => {
            let ms: u64 = raw.parse().unwrap_or_else(|_| {
                eprintln!("Invalid frame interval: {}", raw);
                std::process::exit(1);
            });
            Duration::from_millis(ms)
        }
    };

    let store = FrameStore::new(cat::layout(), cat::FRAMES)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut app = PlayerApp::new(store, interval)?;
    app.run()
}
