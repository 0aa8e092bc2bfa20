//! Response decoder
//!
//! Reads the response from the transport piece by piece: first the status
//! line with headers, then the body under the framing announced by those
//! headers. Body bytes are never accumulated here, each piece is passed
//! to the sink as soon as it's decoded.
use std::sync::Arc;
use std::time::Duration;

use netbuf::Buf;

use body_parser::{BodyProgress, Framing};
use config::Config;
use errors::Error;
use headers::{HeaderBlock, Scan};
use transport::{Transport, Received};


/// Decodes a single response from a transport
///
/// Decoder is consumed by `decode`: after either success or failure it
/// can't be reused.
pub struct ResponseDecoder {
    config: Arc<Config>,
    is_head: bool,
    header_buf: Buf,
    body_buf: Buf,
}

/// Reads until something is appended to the buffer
///
/// Returns `true` if connection is closed by peer. Timeouts are not
/// treated as end of stream, we just read again.
fn read_some<T>(transport: &mut T, buf: &mut Buf, timeout: Option<Duration>)
    -> Result<bool, Error>
    where T: Transport + ?Sized
{
    loop {
        match transport.receive(buf, timeout)? {
            Received::Data(bytes) => {
                trace!("Received {} bytes", bytes);
                return Ok(false);
            }
            Received::Timeout => {
                debug!("Read timed out, waiting more");
            }
            Received::Closed => {
                trace!("Connection closed by peer");
                return Ok(true);
            }
        }
    }
}

impl ResponseDecoder {
    /// Create a decoder
    ///
    /// `is_head` should be set for responses to `HEAD` requests, they never
    /// have a body.
    pub fn new(config: &Arc<Config>, is_head: bool) -> ResponseDecoder {
        ResponseDecoder {
            config: config.clone(),
            is_head: is_head,
            header_buf: Buf::new(),
            body_buf: Buf::new(),
        }
    }

    /// Read the whole response, passing body to the `sink`
    ///
    /// Sink receives every decoded fragment of the body and the
    /// `Content-Length` if it was specified in the response. Fragments
    /// delivered before an error are not taken back.
    pub fn decode<T, F>(mut self, transport: &mut T,
        timeout: Option<Duration>, mut sink: F)
        -> Result<HeaderBlock, Error>
        where T: Transport + ?Sized,
              F: FnMut(&[u8], Option<u64>),
    {
        let head = self.read_headers(transport, timeout)?;
        let framing = Framing::scan(&head, self.is_head)?;
        debug!("Received {:?}, body framing {:?}", head.status(), framing);

        let total = framing.content_length();
        let mut deliver = |data: &[u8]| sink(data, total);
        let mut progress = BodyProgress::new(framing);
        let mut eof = false;
        while !progress.feed(&mut self.body_buf, eof, &mut deliver)? {
            eof = read_some(transport, &mut self.body_buf, timeout)?;
        }
        Ok(head)
    }

    fn read_headers<T>(&mut self, transport: &mut T,
        timeout: Option<Duration>)
        -> Result<HeaderBlock, Error>
        where T: Transport + ?Sized
    {
        loop {
            match HeaderBlock::scan(&self.header_buf[..]) {
                Scan::Complete(head, bytes) => {
                    // the rest is the beginning of the body
                    self.body_buf.extend(&self.header_buf[bytes..]);
                    let len = self.header_buf.len();
                    self.header_buf.consume(len);
                    return Ok(head);
                }
                Scan::Invalid => return Err(Error::Header),
                Scan::Partial => {}
            }
            if self.header_buf.len() > self.config.max_header_size {
                return Err(Error::HeadersTooLong);
            }
            if read_some(transport, &mut self.header_buf, timeout)? {
                if self.header_buf.len() == 0 {
                    return Err(Error::ResetOnResponseHeaders);
                }
                return Err(Error::Header);
            }
        }
    }
}
