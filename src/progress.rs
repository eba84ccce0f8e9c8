use crate::output::{GREEN, RED, RESET};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use terminal_size::{terminal_size, Width};

const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const DEFAULT_TERMINAL_WIDTH: u16 = 80;

/// Get the current terminal width, falling back to a default if unavailable
fn get_terminal_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

/// Format a duration the way completion lines show it
pub fn format_elapsed(elapsed: Duration) -> String {
    let mins = elapsed.as_secs() / 60;
    let secs = elapsed.as_secs() % 60;
    format!("{}m {}s", mins, secs)
}

// ============================================================================
// StageSpinner: single-line spinner shown while a stage call is in flight
// ============================================================================

/// Spinner for one pipeline stage. A completion call blocks for tens of
/// seconds, so an independent timer thread keeps the elapsed clock moving.
pub struct StageSpinner {
    spinner: Arc<ProgressBar>,
    stage: String,
    stop_flag: Arc<AtomicBool>,
    timer_thread: Option<JoinHandle<()>>,
    start_time: Instant,
}

impl StageSpinner {
    pub fn new(stage: &str) -> Self {
        let spinner = Arc::new(ProgressBar::new_spinner());
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars(SPINNER_CHARS)
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        spinner.set_message(format!("{} | calling model [00:00]", stage));
        spinner.enable_steady_tick(Duration::from_millis(80));

        let stop_flag = Arc::new(AtomicBool::new(false));
        let start_time = Instant::now();

        // Clone for timer thread
        let spinner_clone = Arc::clone(&spinner);
        let stop_flag_clone = Arc::clone(&stop_flag);
        let stage_owned = stage.to_string();

        // Spawn independent timer thread that updates every second
        let timer_thread = thread::spawn(move || {
            while !stop_flag_clone.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_secs(1));

                // Check again after sleep in case we should stop
                if stop_flag_clone.load(Ordering::Relaxed) {
                    break;
                }

                let elapsed = start_time.elapsed();
                let mins = elapsed.as_secs() / 60;
                let secs = elapsed.as_secs() % 60;
                spinner_clone.set_message(format!(
                    "{} | calling model [{:02}:{:02}]",
                    stage_owned, mins, secs
                ));
            }
        });

        Self {
            spinner,
            stage: stage.to_string(),
            stop_flag,
            timer_thread: Some(timer_thread),
            start_time,
        }
    }

    fn stop_timer(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.timer_thread.take() {
            // Wait for thread to finish (it should exit quickly)
            let _ = handle.join();
        }
    }

    pub fn finish_success(&mut self) {
        self.stop_timer();
        let elapsed = self.start_time.elapsed();
        // Clear the line first, then print completion message to ensure clean output
        self.spinner.finish_and_clear();
        println!(
            "{GREEN}\u{2714} {} completed in {}{RESET}",
            self.stage,
            format_elapsed(elapsed)
        );
    }

    pub fn finish_error(&mut self, error: &str) {
        self.stop_timer();
        // Account for "✘ ", " failed: " and the stage name
        let available = get_terminal_width().saturating_sub(self.stage.chars().count() + 12);
        let truncated = truncate_message(error, available.max(20));
        // Clear the line first, then print error message to ensure clean output
        self.spinner.finish_and_clear();
        println!("{RED}\u{2718} {} failed: {}{RESET}", self.stage, truncated);
    }
}

impl Drop for StageSpinner {
    fn drop(&mut self) {
        // Ensure timer thread is stopped and spinner is cleared when dropped
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.timer_thread.take() {
            let _ = handle.join();
        }
        // Clear the spinner line if it hasn't been finished yet
        // This prevents partial lines from remaining on screen
        self.spinner.finish_and_clear();
    }
}

fn truncate_message(message: &str, max_len: usize) -> String {
    // Take first line only and clean it up
    let first_line = message.lines().next().unwrap_or(message);
    let cleaned = first_line.trim();

    // Count characters (not bytes) to handle UTF-8 properly
    let char_count = cleaned.chars().count();
    if char_count <= max_len {
        cleaned.to_string()
    } else {
        // Need at least 4 chars for "X..." where X is at least one character
        if max_len < 4 {
            "...".to_string()
        } else {
            let truncated: String = cleaned.chars().take(max_len - 3).collect();
            format!("{}...", truncated)
        }
    }
}
