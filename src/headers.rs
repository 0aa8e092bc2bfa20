//! Status line and an ordered list of headers
//!
//! The list is not a map: order is preserved and duplicate names are kept
//! (think of multiple `Set-Cookie`). Headers that were parsed from the
//! network have lowercase names, headers added by user are kept as is.
//! Lookups are always case-insensitive.
use std::io::Write;


/// Status (or request) line with the list of headers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderBlock {
    status: String,
    headers: Vec<(String, String)>,
}

/// Result of scanning the (possibly incomplete) header block
#[derive(Debug)]
pub enum Scan {
    /// Header block is complete, the second field is number of bytes
    /// including the final empty line
    Complete(HeaderBlock, usize),
    /// More data is needed
    Partial,
    /// The data can't be a valid header block whatever comes next
    Invalid,
}

fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(2).position(|w| w == b"\r\n")
}

impl HeaderBlock {
    /// Creates an empty block with the status (or request) line
    pub fn new<S: Into<String>>(status: S) -> HeaderBlock {
        HeaderBlock {
            status: status.into(),
            headers: Vec::new(),
        }
    }
    /// Append a header
    ///
    /// No checks are done here, duplicates are appended too
    pub fn add<K, V>(&mut self, key: K, value: V) -> &mut Self
        where K: Into<String>, V: Into<String>,
    {
        self.headers.push((key.into(), value.into()));
        self
    }
    /// The status (or request) line as is
    pub fn status(&self) -> &str {
        &self.status
    }
    /// Numeric status code from the status line
    ///
    /// Returns zero if status line doesn't look like
    /// `HTTP/1.1 <code> <reason>`.
    pub fn status_code(&self) -> u16 {
        let parts = self.status.split(' ').collect::<Vec<_>>();
        if parts.len() < 3 {
            return 0;
        }
        parts[1].parse().unwrap_or(0)
    }
    /// Reason phrase (everything after the status code)
    ///
    /// You shouldn't rely on this, use `status_code()`
    pub fn reason(&self) -> &str {
        self.status.splitn(3, ' ').nth(2).unwrap_or("")
    }
    /// All headers in the order of insertion
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
    /// Value of the first header with the matching name, or empty string
    pub fn get(&self, key: &str) -> &str {
        self.headers.iter()
            .find(|&&(ref k, _)| k.eq_ignore_ascii_case(key))
            .map(|&(_, ref v)| &v[..])
            .unwrap_or("")
    }
    /// All values for a header name (case-insensitive), in order
    pub fn get_all<'x>(&'x self, key: &'x str)
        -> impl Iterator<Item=&'x str> + 'x
    {
        self.headers.iter()
            .filter(move |&&(ref k, _)| k.eq_ignore_ascii_case(key))
            .map(|&(_, ref v)| &v[..])
    }
    /// Serialize into wire format, including the final empty line
    pub fn bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.status.len() + 4 +
            self.headers.iter().map(|&(ref k, ref v)| k.len() + v.len() + 4)
            .sum::<usize>());
        self.write_to(&mut buf);
        buf
    }
    /// Append wire representation to the buffer
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        // writing to a vector never fails
        write!(buf, "{}\r\n", self.status).ok();
        for &(ref key, ref value) in &self.headers {
            write!(buf, "{}: {}\r\n", key, value).ok();
        }
        buf.extend_from_slice(b"\r\n");
    }
    /// Parse a complete header block, header names are lowercased
    ///
    /// Returns `None` if block is malformed or if the final empty line
    /// is not reached. Bytes after the empty line are ignored.
    pub fn parse(data: &[u8]) -> Option<HeaderBlock> {
        match HeaderBlock::scan(data) {
            Scan::Complete(block, _) => Some(block),
            Scan::Partial | Scan::Invalid => None,
        }
    }
    /// Incremental version of `parse`
    ///
    /// Distinguishes input that needs more bytes from the input that is
    /// already broken.
    pub fn scan(data: &[u8]) -> Scan {
        let status_end = match find_crlf(data) {
            Some(x) => x,
            None => return Scan::Partial,
        };
        let mut block = HeaderBlock::new(
            String::from_utf8_lossy(&data[..status_end]).into_owned());
        let mut pos = status_end + 2;
        loop {
            let rest = &data[pos..];
            if rest.starts_with(b"\r\n") {
                return Scan::Complete(block, pos + 2);
            }
            let line_end = match find_crlf(rest) {
                Some(x) => x,
                // a lone CR may be the start of the final CRLF
                None => return Scan::Partial,
            };
            let line = &rest[..line_end];
            let colon = match line.iter().position(|&x| x == b':') {
                Some(0) | None => return Scan::Invalid,
                Some(x) => x,
            };
            let key = String::from_utf8_lossy(&line[..colon])
                .to_ascii_lowercase();
            let value_start = line[colon+1..].iter()
                .position(|&x| x != b' ')
                .map(|x| colon + 1 + x)
                .unwrap_or(line.len());
            let value = String::from_utf8_lossy(&line[value_start..])
                .into_owned();
            block.add(key, value);
            pos += line_end + 2;
        }
    }
}

/// Checks whether `Transfer-Encoding` value mentions chunked encoding
pub fn has_chunked(val: &str) -> bool {
    val.as_bytes().windows(b"chunked".len())
        .any(|w| w.eq_ignore_ascii_case(b"chunked"))
}
