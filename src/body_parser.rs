use std::cmp::min;

use netbuf::Buf;

use chunked;
use errors::Error;
use headers::{HeaderBlock, has_chunked};


/// Determines where the response body ends
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Framing {
    /// Exactly this number of bytes
    ContentLength(u64),
    /// Chunked transfer encoding, up to the zero-sized chunk
    Chunked,
    /// Everything until the connection is closed by peer
    UntilClose,
}

impl Framing {
    /// Implements the body length algorithm for responses
    ///
    /// 1. For HEAD, 1xx, 204, 304 -- no body
    /// 2. If Content-Length -> Fixed
    /// 3. If transfer encoding mentions chunked -> Chunked
    /// 4. Else read until connection is closed
    pub fn scan(head: &HeaderBlock, is_head: bool) -> Result<Framing, Error>
    {
        let code = head.status_code();
        if is_head || (code >= 100 && code < 200) || code == 204 || code == 304
        {
            return Ok(Framing::ContentLength(0));
        }
        let length = head.get("content-length");
        if !length.is_empty() {
            return length.trim().parse()
                .map(Framing::ContentLength)
                .map_err(|_| Error::BadContentLength);
        }
        if has_chunked(head.get("transfer-encoding")) {
            return Ok(Framing::Chunked);
        }
        Ok(Framing::UntilClose)
    }
    /// Body size if known in advance
    pub fn content_length(&self) -> Option<u64> {
        match *self {
            Framing::ContentLength(x) => Some(x),
            Framing::Chunked | Framing::UntilClose => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum BodyProgress {
    Fixed { total: u64, left: u64 },
    Chunked,
    Eof,
}

impl BodyProgress {
    pub fn new(framing: Framing) -> BodyProgress {
        match framing {
            Framing::ContentLength(x) => BodyProgress::Fixed {
                total: x,
                left: x,
            },
            Framing::Chunked => BodyProgress::Chunked,
            Framing::UntilClose => BodyProgress::Eof,
        }
    }
    /// Passes all the body bytes in the buffer to the sink
    ///
    /// Delivered bytes are consumed from the buffer. Returns `true` when
    /// the whole body has been delivered. The `eof` flag means that
    /// nothing more will be appended to the buffer.
    pub fn feed<F>(&mut self, buf: &mut Buf, eof: bool, sink: &mut F)
        -> Result<bool, Error>
        where F: FnMut(&[u8])
    {
        use self::BodyProgress::*;
        match *self {
            Fixed { total, ref mut left } => {
                let useful = min(*left, buf.len() as u64) as usize;
                if useful > 0 {
                    sink(&buf[..useful]);
                    *left -= useful as u64;
                }
                if buf.len() > useful {
                    warn!("Dropping {} bytes past the end of {} byte body",
                        buf.len() - useful, total);
                }
                let len = buf.len();
                buf.consume(len);
                if *left == 0 {
                    Ok(true)
                } else if eof {
                    Err(Error::ResetOnResponseBody)
                } else {
                    Ok(false)
                }
            }
            Chunked => loop {
                let chunk = match chunked::next_chunk(&buf[..], eof)? {
                    Some(chunk) => chunk,
                    None if eof => return Err(Error::ResetOnResponseBody),
                    None => return Ok(false),
                };
                if !chunk.is_consistent() {
                    warn!("Chunk size mismatch: declared {}, got {}",
                        chunk.declared, chunk.payload);
                }
                if chunk.payload > 0 {
                    let start = chunk.payload_start();
                    sink(&buf[start..start+chunk.payload]);
                }
                buf.consume(chunk.consumed());
                if chunk.is_last() {
                    return Ok(true);
                }
            },
            Eof => {
                if buf.len() > 0 {
                    sink(&buf[..]);
                    let len = buf.len();
                    buf.consume(len);
                }
                Ok(eof)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use netbuf::Buf;

    use errors::Error;
    use headers::HeaderBlock;
    use super::{Framing, BodyProgress};

    fn head(status: &str, headers: &[(&str, &str)]) -> HeaderBlock {
        let mut head = HeaderBlock::new(status);
        for &(k, v) in headers {
            head.add(k, v);
        }
        head
    }

    fn feed(progress: &mut BodyProgress, buf: &mut Buf, eof: bool,
        out: &mut Vec<u8>)
        -> Result<bool, Error>
    {
        progress.feed(buf, eof, &mut |data: &[u8]| out.extend_from_slice(data))
    }

    #[test]
    fn framing() {
        let ok = "HTTP/1.1 200 OK";
        assert_eq!(Framing::scan(&head(ok, &[("content-length", "12")]),
            false).unwrap(), Framing::ContentLength(12));
        assert_eq!(Framing::scan(&head(ok, &[("transfer-encoding", "chunked")]),
            false).unwrap(), Framing::Chunked);
        assert_eq!(Framing::scan(&head(ok, &[]), false).unwrap(),
            Framing::UntilClose);
        // Content-Length is looked at first
        assert_eq!(Framing::scan(&head(ok, &[
                ("transfer-encoding", "chunked"),
                ("content-length", "3"),
            ]), false).unwrap(), Framing::ContentLength(3));
        assert_eq!(Framing::scan(&head(ok, &[("content-length", "12")]),
            true).unwrap(), Framing::ContentLength(0));
        assert_eq!(Framing::scan(&head("HTTP/1.1 304 Not Modified", &[]),
            false).unwrap(), Framing::ContentLength(0));
        assert_eq!(Framing::scan(&head("HTTP/1.1 204 No Content", &[]),
            false).unwrap(), Framing::ContentLength(0));
        assert!(matches!(
            Framing::scan(&head(ok, &[("content-length", "x")]), false),
            Err(Error::BadContentLength)));
    }

    #[test]
    fn fixed() {
        let mut progress = BodyProgress::new(Framing::ContentLength(5));
        let mut buf = Buf::new();
        let mut out = Vec::new();
        buf.extend(b"he");
        assert!(!feed(&mut progress, &mut buf, false, &mut out).unwrap());
        assert_eq!(buf.len(), 0);
        buf.extend(b"llo!!");
        assert!(feed(&mut progress, &mut buf, false, &mut out).unwrap());
        assert_eq!(out, b"hello");
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn fixed_eof() {
        let mut progress = BodyProgress::new(Framing::ContentLength(5));
        let mut buf = Buf::new();
        let mut out = Vec::new();
        buf.extend(b"hel");
        assert!(matches!(feed(&mut progress, &mut buf, true, &mut out),
            Err(Error::ResetOnResponseBody)));
        assert_eq!(out, b"hel");
    }

    #[test]
    fn chunked() {
        let mut progress = BodyProgress::new(Framing::Chunked);
        let mut buf = Buf::new();
        let mut out = Vec::new();
        buf.extend(b"4\r\nWi");
        assert!(!feed(&mut progress, &mut buf, false, &mut out).unwrap());
        assert_eq!(out, b"");
        buf.extend(b"ki\r\n5\r\npedia\r\n0\r\n\r\n");
        assert!(feed(&mut progress, &mut buf, false, &mut out).unwrap());
        assert_eq!(out, b"Wikipedia");
    }

    #[test]
    fn chunked_mismatch() {
        let mut progress = BodyProgress::new(Framing::Chunked);
        let mut buf = Buf::new();
        let mut out = Vec::new();
        buf.extend(b"2\r\nabcd\r\n0\r\n\r\n");
        assert!(feed(&mut progress, &mut buf, false, &mut out).unwrap());
        assert_eq!(out, b"abcd");
    }

    #[test]
    fn chunked_eof() {
        let mut progress = BodyProgress::new(Framing::Chunked);
        let mut buf = Buf::new();
        let mut out = Vec::new();
        buf.extend(b"3\r\nabc\r\n");
        assert!(!feed(&mut progress, &mut buf, false, &mut out).unwrap());
        assert!(matches!(feed(&mut progress, &mut buf, true, &mut out),
            Err(Error::ResetOnResponseBody)));
        assert_eq!(out, b"abc");
    }

    #[test]
    fn until_close() {
        let mut progress = BodyProgress::new(Framing::UntilClose);
        let mut buf = Buf::new();
        let mut out = Vec::new();
        buf.extend(b"some");
        assert!(!feed(&mut progress, &mut buf, false, &mut out).unwrap());
        assert!(!feed(&mut progress, &mut buf, false, &mut out).unwrap());
        buf.extend(b" data");
        assert!(feed(&mut progress, &mut buf, true, &mut out).unwrap());
        assert_eq!(out, b"some data");
    }
}
