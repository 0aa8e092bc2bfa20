//! Blocking client with redirect handling
//!
//! Two styles of interface are provided:
//!
//! * `Client::fetch` streams the body to a callback as it arrives
//! * `Client::fetch_buffered` (and `get`, `put`, `post`, `patch`)
//!   collect the whole response in memory
//!
//! Each request opens a new connection, there is no keep-alive.
use std::sync::Arc;

use config::Config;
use decoder::ResponseDecoder;
use encoder::assemble;
use errors::Error;
use headers::HeaderBlock;
use request::Request;
use transport::{Connector, Transport, TcpConnector, send_all};
use url::Url;


/// HTTP client parameterized by the way it opens connections
pub struct Client<C = TcpConnector> {
    connector: C,
    config: Arc<Config>,
}

/// A buffered response holds the body as contiguous chunk of data
#[derive(Debug, Clone)]
pub struct Response {
    headers: HeaderBlock,
    body: Vec<u8>,
}

impl Response {
    /// Get response code
    pub fn code(&self) -> u16 {
        self.headers.status_code()
    }
    /// Get response reason (you shouldn't rely on this, use `code()`)
    pub fn reason(&self) -> &str {
        self.headers.reason()
    }
    /// Get response headers
    pub fn headers(&self) -> &HeaderBlock {
        &self.headers
    }
    /// Get response body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
    pub fn into_parts(self) -> (HeaderBlock, Vec<u8>) {
        (self.headers, self.body)
    }
}

impl Client<TcpConnector> {
    /// Client connecting over TCP with default config
    pub fn new() -> Client<TcpConnector> {
        Client::with_connector(TcpConnector::new(), &Config::new().done())
    }
}

impl<C: Connector> Client<C> {
    pub fn with_connector(connector: C, config: &Arc<Config>) -> Client<C> {
        Client {
            connector: connector,
            config: config.clone(),
        }
    }
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Perform a request, streaming response body into `sink`
    ///
    /// Sink is called with the number of redirects followed so far (so
    /// the body of each hop can be told apart), a fragment of the body, and
    /// the content length if it's known in advance. Returns headers of the
    /// last response.
    pub fn fetch<F>(&mut self, method: &str, request: &Request, mut sink: F)
        -> Result<HeaderBlock, Error>
        where F: FnMut(u32, &[u8], Option<u64>)
    {
        let mut request = request.clone();
        loop {
            let head = self.exchange(method, &request, &mut sink)?;
            match redirect_target(&request, &head)? {
                Some(url) => {
                    debug!("Redirect {} -> {} (hop {})",
                        request.url, url, request.redirect_hop + 1);
                    request.url = url;
                    request.redirect_hop += 1;
                }
                None => return Ok(head),
            }
        }
    }

    /// Perform a request, collecting the whole response in memory
    ///
    /// Body of the last response only is returned. Fails with
    /// `ResponseBodyTooLong` if the body exceeds
    /// `Config::max_response_length`.
    pub fn fetch_buffered(&mut self, method: &str, request: &Request)
        -> Result<Response, Error>
    {
        let limit = self.config.max_response_length;
        let mut body = Vec::new();
        let mut current = request.redirect_hop;
        let mut too_long = false;
        let head = self.fetch(method, request, |hop, data, _| {
            if hop != current {
                body.clear();
                too_long = false;
                current = hop;
            }
            if too_long || body.len() + data.len() > limit {
                too_long = true;
            } else {
                body.extend_from_slice(data);
            }
        })?;
        if too_long {
            return Err(Error::ResponseBodyTooLong);
        }
        Ok(Response {
            headers: head,
            body: body,
        })
    }

    /// Fetch data using GET method, fully buffered
    pub fn get(&mut self, request: &Request) -> Result<Response, Error> {
        self.fetch_buffered("GET", request)
    }
    /// Send the body using PUT method, fully buffered
    pub fn put(&mut self, request: &Request) -> Result<Response, Error> {
        self.fetch_buffered("PUT", request)
    }
    /// Send the body using POST method, fully buffered
    pub fn post(&mut self, request: &Request) -> Result<Response, Error> {
        self.fetch_buffered("POST", request)
    }
    /// Send the body using PATCH method, fully buffered
    pub fn patch(&mut self, request: &Request) -> Result<Response, Error> {
        self.fetch_buffered("PATCH", request)
    }

    fn exchange<F>(&mut self, method: &str, request: &Request, sink: &mut F)
        -> Result<HeaderBlock, Error>
        where F: FnMut(u32, &[u8], Option<u64>)
    {
        let mut transport = self.connector.connect(
            &request.url, request.timeout)?;
        let result = self.roundtrip(&mut transport, method, request, sink);
        transport.disconnect();
        result
    }

    fn roundtrip<T, F>(&self, transport: &mut T, method: &str,
        request: &Request, sink: &mut F)
        -> Result<HeaderBlock, Error>
        where T: Transport,
              F: FnMut(u32, &[u8], Option<u64>)
    {
        let (head, payload) = assemble(method, request);
        debug!("Sending {:?} to {}", head.status(), request.url);
        send_all(transport, &payload)?;
        let hop = request.redirect_hop;
        ResponseDecoder::new(&self.config, method == "HEAD")
            .decode(transport, request.timeout,
                    |data, total| sink(hop, data, total))
    }
}

/// Returns the url to follow if response is a redirect we should follow
fn redirect_target(request: &Request, head: &HeaderBlock)
    -> Result<Option<Url>, Error>
{
    if head.status_code() != 301 || !request.follow_redirects {
        return Ok(None);
    }
    if request.redirect_hop >= request.max_redirects {
        warn!("Redirect limit of {} reached at {}",
            request.max_redirects, request.url);
        return Ok(None);
    }
    let location = head.get("location");
    if location.is_empty() {
        warn!("Redirect from {} has no location", request.url);
        return Ok(None);
    }
    Ok(Some(request.url.join(location)?))
}
