//! Small embeddable HTTP/1.1 client
//!
//! Connects, sends a request, and decodes the response incrementally,
//! passing body bytes to a callback as soon as they arrive. Responses
//! framed by `Content-Length`, by chunked transfer encoding and by closing
//! the connection are supported. `301` redirects are optionally followed.
//!
//! ```rust,no_run
//! # extern crate minifetch;
//! # fn main() {
//! use minifetch::{Client, Request, Url};
//!
//! let url = Url::parse("http://example.com/").unwrap();
//! let mut req = Request::new(url);
//! req.follow_redirects(true);
//! let response = Client::new().get(&req).unwrap();
//! println!("{} {} bytes", response.code(), response.body().len());
//! # }
//! ```
//!
//! Networking is blocking and goes through the `Transport` and `Connector`
//! traits. The default `TcpConnector` uses `std::net`, `https` requires
//! the `tls` feature.

extern crate httparse;
extern crate netbuf;
#[macro_use(quick_error)] extern crate quick_error;
#[macro_use] extern crate log;
#[cfg(feature="tls")] extern crate native_tls;
#[cfg(test)] #[macro_use(assert_matches)] extern crate matches;

mod body_parser;
mod chunked;
mod client;
mod config;
mod decoder;
mod encoder;
mod errors;
mod headers;
mod request;
mod transport;
mod url;
#[cfg(test)] mod mock;

pub use body_parser::Framing;
pub use client::{Client, Response};
pub use config::Config;
pub use decoder::ResponseDecoder;
pub use encoder::{assemble, urlencode};
pub use errors::Error;
pub use headers::{HeaderBlock, Scan};
pub use request::Request;
pub use transport::{Transport, Connector, Received, send_all};
pub use transport::{TcpConnector, TcpTransport};
pub use url::{Url, UrlError, default_port};
