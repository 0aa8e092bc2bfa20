use httparse::{InvalidChunkSize, parse_chunk_size};


/// A single chunk found at the start of the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Size of the `HEX[;ext]\r\n` line
    pub header: usize,
    /// Size declared in the chunk header
    pub declared: u64,
    /// Size of the payload actually found
    pub payload: usize,
}

impl Chunk {
    /// Offset of the payload in the buffer
    pub fn payload_start(&self) -> usize {
        self.header
    }
    /// Number of bytes to drop from the buffer after this chunk
    pub fn consumed(&self) -> usize {
        if self.is_last() {
            self.header
        } else {
            self.header + self.payload + 2
        }
    }
    /// Zero-sized chunk terminates the body
    pub fn is_last(&self) -> bool {
        self.declared == 0
    }
    pub fn is_consistent(&self) -> bool {
        self.declared == self.payload as u64
    }
}

fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(2).position(|w| w == b"\r\n")
}

/// Finds the next chunk at the start of `buf`
///
/// Returns `None` when more data is needed. The payload normally has the
/// declared size. If there is no `\r\n` right after the declared size,
/// the payload spans up to the first `\r\n` instead (such a chunk is not
/// `is_consistent`). When `eof` is set, a payload shorter than declared
/// is accepted too, because no more data is going to arrive.
///
/// The trailer after the last chunk is not looked at.
pub fn next_chunk(buf: &[u8], eof: bool)
    -> Result<Option<Chunk>, InvalidChunkSize>
{
    use httparse::Status::*;
    let (header, declared) = match parse_chunk_size(buf)? {
        Complete(pair) => pair,
        Partial => return Ok(None),
    };
    if declared == 0 {
        return Ok(Some(Chunk { header: header, declared: 0, payload: 0 }));
    }
    let body = &buf[header..];
    let expected_end = declared.saturating_add(2);
    if body.len() as u64 >= expected_end {
        let size = declared as usize;
        if &body[size..size+2] == b"\r\n" {
            return Ok(Some(Chunk {
                header: header,
                declared: declared,
                payload: size,
            }));
        }
    } else if !eof {
        // a short read is not a short chunk
        return Ok(None);
    }
    Ok(find_crlf(body).map(|end| Chunk {
        header: header,
        declared: declared,
        payload: end,
    }))
}
