//! Progress display utilities for long-running operations

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

// Constants for display configuration
const SPINNER_UPDATE_INTERVAL_MS: u64 = 100;
const CLEAR_LINE_WIDTH: usize = 100;

/// Simple spinner to show progress of asynchronous operations
pub struct ProgressSpinner {
    message: String,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ProgressSpinner {
    /// Create new progress spinner with message
    pub fn new(message: String) -> Self {
        let running = Arc::new(AtomicBool::new(false));
        Self {
            message,
            running,
            handle: None,
        }
    }

    /// Start spinner
    pub fn start(&mut self) {
        self.running.store(true, Ordering::Relaxed);
        let running = Arc::clone(&self.running);
        let message = self.message.clone();

        let handle = thread::spawn(move || {
            let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut index = 0;

            while running.load(Ordering::Relaxed) {
                print!("\r{} {}", spinner_chars[index], message);
                let _ = io::stdout().flush(); // Ignore flush errors to continue operation

                index = (index + 1) % spinner_chars.len();
                thread::sleep(Duration::from_millis(SPINNER_UPDATE_INTERVAL_MS));
            }

            // Clear line properly for emoji support
            print!("\r{:<width$}\r", "", width = CLEAR_LINE_WIDTH);
            let _ = io::stdout().flush(); // Ignore flush errors to continue operation
        });

        self.handle = Some(handle);
    }

    /// Stop spinner and display completion message
    pub fn stop(&mut self, completion_message: Option<&str>) {
        self.running.store(false, Ordering::Relaxed);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join(); // Ignore thread join errors
        }

        if let Some(msg) = completion_message {
            // Add space before emoji to prevent terminal clipping
            println!(" {}", msg);
            let _ = io::stdout().flush(); // Ignore flush errors
        }
    }

    /// Update running spinner message
    pub fn update_message(&mut self, message: String) {
        self.message = message;
    }
}

impl Drop for ProgressSpinner {
    fn drop(&mut self) {
        self.stop(None);
    }
}

/// Display operation status with color output
pub fn display_status(operation: &str, status: OperationStatus) {
    let (symbol, message) = match status {
        OperationStatus::InProgress => ("⏳", format!("In progress: {}", operation)),
        OperationStatus::Success => ("✅", format!("Completed: {}", operation)),
        OperationStatus::Warning => ("⚠️", format!("Warning: {}", operation)),
        OperationStatus::Error => ("❌", format!("Error: {}", operation)),
    };

    // Add space before emoji to prevent terminal clipping
    println!(" {} {}", symbol, message);
}

/// Types of operation status
#[derive(Debug, Clone)]
pub enum OperationStatus {
    InProgress,
    Success,
    Warning,
    Error,
}
