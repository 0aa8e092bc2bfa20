//! Byte-stream transport used by the client
//!
//! The client is written against the `Transport` and `Connector` traits,
//! so tests and embedders can plug in their own streams. `TcpConnector` is
//! the default implementation on top of `std::net`, with optional TLS
//! (the `tls` feature).
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use netbuf::Buf;
#[cfg(feature="tls")] use native_tls::{TlsConnector, TlsStream};

use errors::Error;
use url::Url;


/// Outcome of a single `Transport::receive` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received {
    /// This number of bytes were appended to the buffer
    Data(usize),
    /// Nothing arrived within the timeout, connection is still open
    Timeout,
    /// Peer closed the connection
    Closed,
}

/// A connected byte stream
pub trait Transport {
    /// Write some bytes, returns number of bytes written
    fn send(&mut self, data: &[u8]) -> io::Result<usize>;
    /// Read some bytes and append them to the buffer
    ///
    /// Blocks at most `timeout`, or for the transport's default time if
    /// it's `None`.
    fn receive(&mut self, buf: &mut Buf, timeout: Option<Duration>)
        -> io::Result<Received>;
    /// Close the connection, errors are ignored
    fn disconnect(&mut self);
}

/// Opens transports for urls
pub trait Connector {
    type Transport: Transport;
    /// Connect to the host and port of the url
    ///
    /// Should enable TLS for `https` urls.
    fn connect(&mut self, url: &Url, timeout: Option<Duration>)
        -> Result<Self::Transport, Error>;
}

/// Writes the whole data into transport
pub fn send_all<T: Transport + ?Sized>(transport: &mut T, mut data: &[u8])
    -> io::Result<()>
{
    while data.len() > 0 {
        match transport.send(data)? {
            0 => return Err(io::Error::new(io::ErrorKind::WriteZero,
                                           "connection refused to accept data")),
            n => data = &data[n..],
        }
    }
    Ok(())
}

enum Stream {
    Plain(TcpStream),
    #[cfg(feature="tls")]
    Tls(TlsStream<TcpStream>),
}

impl Stream {
    fn tcp(&self) -> &TcpStream {
        match *self {
            Stream::Plain(ref sock) => sock,
            #[cfg(feature="tls")]
            Stream::Tls(ref tls) => tls.get_ref(),
        }
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match *self {
            Stream::Plain(ref mut sock) => sock.read(buf),
            #[cfg(feature="tls")]
            Stream::Tls(ref mut tls) => tls.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match *self {
            Stream::Plain(ref mut sock) => sock.write(buf),
            #[cfg(feature="tls")]
            Stream::Tls(ref mut tls) => tls.write(buf),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match *self {
            Stream::Plain(ref mut sock) => sock.flush(),
            #[cfg(feature="tls")]
            Stream::Tls(ref mut tls) => tls.flush(),
        }
    }
}

/// A TCP (or TLS over TCP) connection
pub struct TcpTransport {
    stream: Stream,
    timeout: Option<Duration>,
}

/// Connects with `std::net`, resolving names with the system resolver
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    _private: (),
}

impl TcpConnector {
    pub fn new() -> TcpConnector {
        TcpConnector { _private: () }
    }
}

fn connect_tcp(url: &Url, timeout: Option<Duration>)
    -> io::Result<TcpStream>
{
    let mut last_err = None;
    for addr in (url.hostname(), url.port()).to_socket_addrs()? {
        let result = match timeout {
            Some(dur) => TcpStream::connect_timeout(&addr, dur),
            None => TcpStream::connect(addr),
        };
        match result {
            Ok(sock) => {
                debug!("Connected to {} ({})", url, addr);
                return Ok(sock);
            }
            Err(e) => {
                debug!("Error connecting to {}: {}", addr, e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound,
            format!("no addresses found for {:?}", url.hostname()))
    }))
}

#[cfg(feature="tls")]
fn wrap_tls(url: &Url, sock: TcpStream) -> Result<Stream, Error> {
    let cx = TlsConnector::new().map_err(|e| {
        Error::Connect(io::Error::new(io::ErrorKind::Other, e.to_string()))
    })?;
    cx.connect(url.hostname(), sock)
        .map(Stream::Tls)
        .map_err(|e| {
            Error::Connect(io::Error::new(io::ErrorKind::Other,
                                          e.to_string()))
        })
}

#[cfg(not(feature="tls"))]
fn wrap_tls(url: &Url, _sock: TcpStream) -> Result<Stream, Error> {
    Err(Error::UnsupportedScheme(url.protocol().to_string()))
}

impl Connector for TcpConnector {
    type Transport = TcpTransport;
    fn connect(&mut self, url: &Url, timeout: Option<Duration>)
        -> Result<TcpTransport, Error>
    {
        let sock = connect_tcp(url, timeout).map_err(Error::Connect)?;
        sock.set_read_timeout(timeout).map_err(Error::Connect)?;
        sock.set_write_timeout(timeout).map_err(Error::Connect)?;
        let stream = if url.protocol() == "https" {
            wrap_tls(url, sock)?
        } else {
            Stream::Plain(sock)
        };
        Ok(TcpTransport {
            stream: stream,
            timeout: timeout,
        })
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, data: &[u8]) -> io::Result<usize> {
        self.stream.write(data)
    }
    fn receive(&mut self, buf: &mut Buf, timeout: Option<Duration>)
        -> io::Result<Received>
    {
        if timeout != self.timeout {
            self.stream.tcp().set_read_timeout(timeout)?;
            self.timeout = timeout;
        }
        match buf.read_from(&mut self.stream) {
            Ok(0) => Ok(Received::Closed),
            Ok(n) => Ok(Received::Data(n)),
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock ||
                          e.kind() == io::ErrorKind::TimedOut ||
                          e.kind() == io::ErrorKind::Interrupted
            => Ok(Received::Timeout),
            Err(e) => Err(e),
        }
    }
    fn disconnect(&mut self) {
        match self.stream {
            #[cfg(feature="tls")]
            Stream::Tls(ref mut tls) => {
                tls.shutdown().ok();
            }
            Stream::Plain(_) => {}
        }
        self.stream.tcp().shutdown(Shutdown::Both).ok();
    }
}
