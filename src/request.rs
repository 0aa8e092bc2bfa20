use std::time::Duration;

use url::Url;


/// Everything needed to perform a request, except the method
///
/// The same request is reused for every hop of the redirect chain, only
/// the url and the hop number change.
#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) url: Url,
    pub(crate) timeout: Option<Duration>,
    pub(crate) max_redirects: u32,
    pub(crate) follow_redirects: bool,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) params: Vec<(String, String)>,
    pub(crate) content_type: String,
    pub(crate) body: Vec<u8>,
    pub(crate) redirect_hop: u32,
}

impl Request {
    /// Create a request with defaults
    ///
    /// Defaults are: transport's default timeout, redirects are not
    /// followed (but if enabled, up to 8 hops), no body.
    pub fn new(url: Url) -> Request {
        Request {
            url: url,
            timeout: None,
            max_redirects: 8,
            follow_redirects: false,
            headers: Vec::new(),
            params: Vec::new(),
            content_type: String::new(),
            body: Vec::new(),
            redirect_hop: 0,
        }
    }
    /// Timeout for connect and for each individual read or write
    ///
    /// Zero duration means using transport's default (usually blocking
    /// forever). There is no timeout for the whole request.
    pub fn timeout(&mut self, value: Duration) -> &mut Self {
        self.timeout = if value == Duration::new(0, 0) {
            None
        } else {
            Some(value)
        };
        self
    }
    /// Follow `301 Moved Permanently` responses
    pub fn follow_redirects(&mut self, value: bool) -> &mut Self {
        self.follow_redirects = value;
        self
    }
    /// Maximum number of redirects followed for this request
    pub fn max_redirects(&mut self, value: u32) -> &mut Self {
        self.max_redirects = value;
        self
    }
    /// Add a request header
    ///
    /// Headers are sent in the order added, with name casing intact.
    /// `Host`, `Content-Type` and `Content-Length` are added automatically.
    pub fn header<K, V>(&mut self, name: K, value: V) -> &mut Self
        where K: Into<String>, V: Into<String>,
    {
        self.headers.push((name.into(), value.into()));
        self
    }
    /// Add a query parameter, it's percent-encoded when the request is sent
    pub fn param<K, V>(&mut self, name: K, value: V) -> &mut Self
        where K: Into<String>, V: Into<String>,
    {
        self.params.push((name.into(), value.into()));
        self
    }
    /// Content type of the body, `text/plain` if not set
    pub fn content_type<S: Into<String>>(&mut self, value: S) -> &mut Self {
        self.content_type = value.into();
        self
    }
    /// Set the request body
    pub fn body<B: Into<Vec<u8>>>(&mut self, value: B) -> &mut Self {
        self.body = value.into();
        self
    }
    /// Url for the current hop
    pub fn url(&self) -> &Url {
        &self.url
    }
    /// Number of redirects followed so far
    pub fn redirect_hop(&self) -> u32 {
        self.redirect_hop
    }
}
