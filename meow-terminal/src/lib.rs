/// Terminal playback loop for the baked frame animation
use crossterm::{
    cursor, execute, queue,
    style::ResetColor,
    terminal::{self, Clear, ClearType},
};
use log::debug;
use std::io::{self, stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use meow_core::{FrameStore, Viewport};

pub mod cat;

/// Default pause between frames
pub const FRAME_INTERVAL: Duration = Duration::from_millis(20);

/// Main application struct for terminal playback
pub struct PlayerApp {
    store: FrameStore,
    viewport: Viewport,
    interval: Duration,
    interrupted: Arc<AtomicBool>,
}

impl PlayerApp {
    pub fn new(store: FrameStore, interval: Duration) -> io::Result<Self> {
        let interrupted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&interrupted);
        // The handler only flips the flag; terminal cleanup happens in
        // run() from normal control flow
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        Ok(Self {
            store,
            viewport: Viewport::new(),
            interval,
            interrupted,
        })
    }

    /// Play until interrupted, restoring the terminal before returning.
    pub fn run(&mut self) -> io::Result<()> {
        let result = self.main_loop();

        // Cleanup runs exactly once, on interrupt and write errors alike
        let restored = execute!(stdout(), ResetColor, cursor::Show);
        result.and(restored)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let mut out = stdout();

        while !self.interrupted.load(Ordering::SeqCst) {
            self.poll_resize(&mut out)?;

            for i in 0..self.store.frame_count() {
                if self.interrupted.load(Ordering::SeqCst) {
                    return Ok(());
                }

                let frame_start = Instant::now();
                out.write_all(self.store.frame(i))?;
                out.flush()?;

                // Saturates at zero when the write overran the interval
                thread::sleep(self.interval.saturating_sub(frame_start.elapsed()));
            }
        }

        Ok(())
    }

    /// Query the terminal size and recenter the frames when it changed.
    ///
    /// A failed query leaves the previous size standing, so playback
    /// continues with stale offsets rather than aborting.
    fn poll_resize(&mut self, out: &mut impl Write) -> io::Result<()> {
        let (width, height) = match terminal::size() {
            Ok(size) => size,
            Err(_) => return Ok(()),
        };

        if self.viewport.update(width, height) {
            debug!("terminal now {}x{}", width, height);
            queue!(out, Clear(ClearType::All), cursor::Hide)?;
            self.store.recenter(width, height);
        }
        Ok(())
    }
}
