//! Console reporter for pipeline progress.

use hos_core::Reporter;

/// Reporter that writes plain lines to stdout/stderr.
///
/// CI logs are line-oriented, so there is no live progress rendering;
/// downloads report once at the start with the expected size.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    /// Create a reporter; `quiet` suppresses section and info lines.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, title: &str) {
        if !self.quiet {
            println!("==> {title}");
        }
    }

    fn downloading(&self, what: &str, current: u64, total: Option<u64>) {
        if self.quiet || current != 0 {
            return;
        }
        match total {
            Some(total) => println!("    downloading {what} ({total} bytes)"),
            None => println!("    downloading {what}"),
        }
    }

    fn done(&self, what: &str, detail: &str) {
        if !self.quiet {
            println!("    {what}: {detail}");
        }
    }

    fn info(&self, msg: &str) {
        if !self.quiet {
            println!("    {msg}");
        }
    }

    fn warning(&self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn error(&self, msg: &str) {
        eprintln!("error: {msg}");
    }
}
