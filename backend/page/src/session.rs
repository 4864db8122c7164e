use std::time::Duration;

use crate::clock::Instant;

/// Typing reveal of a single payload, one character per step.
#[derive(Debug, Clone)]
pub struct RevealSession {
    chars: Vec<char>,
    cursor: usize,
    revealed: String,
    delay: Duration,
    next_due: Instant,
}

impl RevealSession {
    /// Starts with nothing revealed. The first character is due one `delay` after `now`.
    pub fn new(payload: &str, delay: Duration, now: Instant) -> Self {
        Self {
            chars: payload.chars().collect(),
            cursor: 0,
            revealed: String::with_capacity(payload.len()),
            delay,
            next_due: now + delay,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn revealed(&self) -> &str {
        &self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == self.chars.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        (!self.is_complete()).then_some(self.next_due)
    }

    /// Reveals the next character if it is due at `now`.
    pub fn step(&mut self, now: Instant) -> Option<&str> {
        if self.is_complete() || self.next_due > now {
            return None;
        }

        self.revealed.push(self.chars[self.cursor]);
        self.cursor += 1;
        // Scheduled from the previous due time so late ticks catch up one step at a time.
        self.next_due += self.delay;

        Some(&self.revealed)
    }

    pub fn into_revealed(self) -> String {
        self.revealed
    }
}
