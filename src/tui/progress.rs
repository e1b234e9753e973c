//! Spinner primitives for the in-flight request indicator.
//!
//! The spinner runs on its own thread and repaints one stderr line until a
//! shared stop flag is set, then erases itself. The flag is the only state
//! shared across threads in this crate.

use crate::tui::settings;
use crossterm::style::Stylize;
use std::io::{self, IsTerminal, Write};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::{Duration, Instant};

/// RAII handle for an active spinner.
///
/// Dropping the handle stops the spinner and joins its thread, so the caller
/// never races the indicator for the terminal.
pub struct ProgressHandle {
    /// Stop signal shared with the spinner thread.
    stop: Arc<AtomicBool>,
    /// Background writer thread, present only when the spinner is active.
    thread: Option<thread::JoinHandle<()>>,
}

impl ProgressHandle {
    /// Construct a no-op handle used when progress output is disabled.
    fn disabled() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(true)),
            thread: None,
        }
    }

    /// Stop the spinner and wait for its line to be erased.
    pub fn finish(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Start a spinner on stderr.
///
/// Returns a no-op handle when stderr is not a terminal, so piped output
/// never contains animation frames.
pub fn start_progress(label: impl Into<String>, color: bool) -> ProgressHandle {
    if !io::stderr().is_terminal() {
        return ProgressHandle::disabled();
    }

    let label = label.into();
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);

    let thread = thread::spawn(move || {
        spin(&stop_flag, &mut io::stderr(), &label, color);
    });

    ProgressHandle {
        stop,
        thread: Some(thread),
    }
}

/// Spinner loop body; repaints until `stop` reads true, then clears the line.
fn spin<W: Write>(stop: &AtomicBool, out: &mut W, label: &str, color: bool) {
    let start = Instant::now();
    let mut idx = 0usize;

    while !stop.load(Ordering::Relaxed) {
        let frame = settings::PROGRESS_FRAMES[idx % settings::PROGRESS_FRAMES.len()];
        let line = progress_line(frame, label, start.elapsed(), color);
        let _ = write!(out, "{line}");
        let _ = out.flush();
        idx += 1;
        thread::sleep(Duration::from_millis(settings::PROGRESS_TICK_MS));
    }

    let _ = write!(out, "{}", settings::PROGRESS_CLEAR_LINE);
    let _ = out.flush();
}

fn progress_line(frame: char, label: &str, elapsed: Duration, color: bool) -> String {
    // Keep elapsed formatting stable so tests can assert deterministic text.
    let elapsed_s = elapsed.as_millis() as f64 / 1000.0;
    if color {
        format!(
            "{}{} {label} ({elapsed_s:.1}s)",
            settings::PROGRESS_CLEAR_LINE,
            format!("[{frame}]").with(settings::COLOR_PROGRESS_FRAME),
        )
    } else {
        format!(
            "{}[{frame}] {label} ({elapsed_s:.1}s)",
            settings::PROGRESS_CLEAR_LINE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Writer that appends to a shared buffer so a test can inspect what the
    /// spinner thread produced.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn progress_line_plain_contains_frame_and_label() {
        let out = progress_line('|', "thinking", Duration::from_millis(1500), false);
        assert!(out.contains("[|] thinking (1.5s)"), "got: {out}");
    }

    #[test]
    fn spinner_stops_within_one_tick_and_clears_its_line() {
        let stop = Arc::new(AtomicBool::new(false));
        let buf = SharedBuf::default();

        let thread = {
            let stop = Arc::clone(&stop);
            let mut out = buf.clone();
            thread::spawn(move || spin(&stop, &mut out, "thinking", false))
        };

        // Let a few frames render, then signal and wait for exit.
        thread::sleep(Duration::from_millis(settings::PROGRESS_TICK_MS * 3));
        stop.store(true, Ordering::Relaxed);
        thread.join().expect("spinner thread should exit after stop");

        let raw = buf.0.lock().unwrap().clone();
        let text = String::from_utf8_lossy(&raw);
        assert!(text.contains("thinking"), "no frames rendered: {text}");
        assert!(
            text.ends_with(settings::PROGRESS_CLEAR_LINE),
            "spinner left residue on screen: {text:?}"
        );
    }

    #[test]
    fn already_set_flag_produces_only_a_clear() {
        let stop = AtomicBool::new(true);
        let mut out = Vec::new();
        spin(&stop, &mut out, "thinking", false);
        assert_eq!(String::from_utf8_lossy(&out), settings::PROGRESS_CLEAR_LINE);
    }

    #[test]
    fn disabled_handle_finish_is_a_no_op() {
        let mut handle = ProgressHandle::disabled();
        handle.finish();
        handle.finish();
    }
}
