//! Destination for the `print` primitive.
//!
//! - `Interpret` mode writes to stdout.
//! - `TestRun` mode and embedders capture output in a buffer.
//!
//! Enum dispatch keeps the `print` call path free of vtable lookups.

use std::sync::Arc;

use parking_lot::Mutex;

/// Writes to stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }
}

/// Captures printed lines in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Everything printed so far.
    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Print sink selected per interpreter session.
pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
}

impl PrintHandlerImpl {
    /// Write one line.
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
        }
    }

    /// Captured output; empty for stdout.
    pub fn get_output(&self) -> String {
        match self {
            Self::Stdout(_) => String::new(),
            Self::Buffer(h) => h.get_output(),
        }
    }

    /// Discard captured output; no-op for stdout.
    pub fn clear(&self) {
        match self {
            Self::Stdout(_) => {}
            Self::Buffer(h) => h.clear(),
        }
    }
}

/// Handle shared between the interpreter and whoever reads the output.
///
/// `Interpreter` is `!Send` (values hold `Rc`), but this handle is `Send +
/// Sync`, so a host can hand it to another thread that drains the buffer
/// while the session keeps running on its own thread.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}
