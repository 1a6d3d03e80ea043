use std::time::{Duration, Instant};

use quotes_core::{EMPTY_PLACEHOLDER, Quote, QuoteView, Status, format_quote};

/// A status message that stops being visible once its TTL has elapsed.
pub struct StatusLine {
    ttl: Duration,
    current: Option<(Status, Instant)>,
}

impl StatusLine {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn set(&mut self, status: Status, now: Instant) {
        self.current = Some((status, now));
    }

    /// The status if it is still within its TTL at `now`; clears it otherwise.
    pub fn visible(&mut self, now: Instant) -> Option<&Status> {
        let expired = matches!(
            &self.current,
            Some((_, shown_at)) if now.saturating_duration_since(*shown_at) >= self.ttl
        );
        if expired {
            self.current = None;
        }
        self.current.as_ref().map(|(status, _)| status)
    }
}

/// Writes quotes to stdout. Status messages are echoed once and then shown
/// under later quotes only while they are still fresh.
pub struct TerminalView {
    status: StatusLine,
    show_filter: bool,
}

impl TerminalView {
    pub fn new(status_ttl: Duration) -> Self {
        Self {
            status: StatusLine::new(status_ttl),
            show_filter: false,
        }
    }

    /// Also print the active category filter above each quote.
    pub fn with_filter_header(mut self) -> Self {
        self.show_filter = true;
        self
    }
}

impl QuoteView for TerminalView {
    fn show_quote(&mut self, quote: &Quote) {
        println!("{}", format_quote(quote));
        if let Some(status) = self.status.visible(Instant::now()) {
            println!("  ({})", status.message);
        }
    }

    fn show_empty(&mut self) {
        println!("{EMPTY_PLACEHOLDER}");
    }

    fn show_categories(&mut self, _categories: &[String], selected: &str) {
        if self.show_filter {
            println!("[{selected}]");
        }
    }

    fn show_status(&mut self, status: &Status) {
        if status.is_success() {
            println!("{}", status.message);
        } else {
            eprintln!("{}", status.message);
        }
        self.status.set(status.clone(), Instant::now());
    }
}
