use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Reads whitespace-separated tokens, pulling new lines as needed, so several
/// answers may be typed on one line.
pub struct Input<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Input<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            // Undecodable bytes become U+FFFD and fail later as ordinary bad answers
            let line = String::from_utf8_lossy(&line);
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    /// Drop whatever is left of the current line.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }
}
