use std::{
    io::{self, Write},
    sync::Mutex,
};

use client_core::{CheckboxState, NotificationsView, StatusMessage};

/// Prints the checkbox group and status banner as plain text lines.
pub struct TerminalView<W> {
    out: Mutex<W>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write_lines(&self, lines: &[String]) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        for line in lines {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }
}

impl<W: Write + Send + 'static> NotificationsView for TerminalView<W> {
    fn render_checkboxes(&self, checkboxes: &[CheckboxState]) {
        let lines: Vec<String> = checkboxes
            .iter()
            .map(|c| format!("[{}] {}", if c.checked { "x" } else { " " }, c.key))
            .collect();
        self.write_lines(&lines);
    }

    fn render_status(&self, status: &StatusMessage) {
        if status.is_empty() {
            return;
        }
        self.write_lines(&[format!("{}: {}", status.class, status.text)]);
    }
}
