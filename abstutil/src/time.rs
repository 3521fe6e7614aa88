use std::time::Instant;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

pub fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}

struct TimerSpan {
    name: String,
    started_at: Instant,
}

/// Hierarchial timing of named phases, reported through the `log` crate. Spans must be stopped in
/// the reverse order they were started.
pub struct Timer {
    outermost_name: String,
    started_at: Instant,
    stack: Vec<TimerSpan>,
    results: Vec<String>,
    notes: Vec<String>,
}

impl Timer {
    pub fn new(name: &str) -> Timer {
        info!("{}...", name);
        Timer {
            outermost_name: name.to_string(),
            started_at: Instant::now(),
            stack: Vec::new(),
            results: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Don't log anything. Useful for tests and for callers that just want the API.
    pub fn throwaway() -> Timer {
        Timer {
            outermost_name: "throwaway".to_string(),
            started_at: Instant::now(),
            stack: Vec::new(),
            results: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn start(&mut self, name: &str) {
        debug!("{}{}...", "  ".repeat(self.stack.len()), name);
        self.stack.push(TimerSpan {
            name: name.to_string(),
            started_at: Instant::now(),
        });
    }

    pub fn stop(&mut self, name: &str) {
        let span = match self.stack.pop() {
            Some(span) => span,
            None => {
                warn!("Timer {} stopped {}, but nothing was started", self.outermost_name, name);
                return;
            }
        };
        if span.name != name {
            warn!(
                "Timer {} stopped {}, but the innermost span is {}",
                self.outermost_name, name, span.name
            );
        }
        let line = format!(
            "{}- {} took {}",
            "  ".repeat(self.stack.len()),
            span.name,
            prettyprint_time(elapsed_seconds(span.started_at))
        );
        debug!("{}", line);
        self.results.push(line);
    }

    pub fn note(&mut self, line: String) {
        debug!("{}", line);
        self.notes.push(line);
    }

    /// Used to end the scope of a timer early. Logs a summary of every phase, then any notes.
    pub fn done(self) {
        if self.outermost_name == "throwaway" {
            return;
        }
        info!(
            "{} took {}",
            self.outermost_name,
            prettyprint_time(elapsed_seconds(self.started_at))
        );
        for line in &self.results {
            info!("{}", line);
        }
        for line in &self.notes {
            info!("{}", line);
        }
    }
}
