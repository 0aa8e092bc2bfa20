//! Minimal absolute url parser
//!
//! Only the parts needed to open a connection and write a request line are
//! extracted: protocol, host, port, resource path and raw query string.
//! No percent-decoding or normalization is done.
use std::fmt;
use std::str::FromStr;


quick_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    /// Url parsing error
    pub enum UrlError {
        /// There is no `scheme://` prefix
        NoScheme(url: String) {
            description("url has no scheme")
            display("url {:?} has no scheme", url)
        }
        /// Hostname part is empty
        EmptyHost(url: String) {
            description("url has empty hostname")
            display("url {:?} has empty hostname", url)
        }
        /// Port is not a valid 16-bit decimal number
        BadPort(url: String) {
            description("url has invalid port")
            display("url {:?} has invalid port", url)
        }
    }
}

/// A parsed absolute url
///
/// The `resource` is never empty (it's `/` when url has no path) and never
/// contains the query string. The `parameters` is the raw query string
/// without the leading question mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    protocol: String,
    hostname: String,
    port: u16,
    resource: String,
    parameters: String,
}

/// Returns default port for the protocol if protocol is known
pub fn default_port(protocol: &str) -> Option<u16> {
    match protocol {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}

impl Url {
    /// Parse an absolute url like `https://example.com:8443/path?x=1`
    ///
    /// Port defaults to the well-known port of the protocol, or zero if
    /// protocol is unknown.
    pub fn parse(input: &str) -> Result<Url, UrlError> {
        let scheme_end = match input.find("://") {
            Some(0) | None => return Err(UrlError::NoScheme(input.into())),
            Some(idx) => idx,
        };
        let protocol = &input[..scheme_end];
        let rest = &input[scheme_end+3..];

        let host_end = rest.find(|c: char| c == '?' || c == '/')
            .unwrap_or(rest.len());
        if host_end == 0 {
            return Err(UrlError::EmptyHost(input.into()));
        }
        let (host_port, target) = rest.split_at(host_end);
        let (hostname, port) = match host_port.find(':') {
            Some(0) => return Err(UrlError::EmptyHost(input.into())),
            Some(colon) => {
                let port = host_port[colon+1..].parse()
                    .map_err(|_| UrlError::BadPort(input.into()))?;
                (&host_port[..colon], port)
            }
            None => (host_port, default_port(protocol).unwrap_or(0)),
        };

        let mut url = Url {
            protocol: protocol.to_string(),
            hostname: hostname.to_string(),
            port: port,
            resource: String::new(),
            parameters: String::new(),
        };
        url.set_target(target);
        Ok(url)
    }

    /// Creates `http` url for the specified host and port with `/` path
    pub fn from_host_port(hostname: &str, port: u16) -> Url {
        Url {
            protocol: "http".to_string(),
            hostname: hostname.to_string(),
            port: port,
            resource: "/".to_string(),
            parameters: String::new(),
        }
    }

    /// Resolves a `Location` header value against this url
    ///
    /// Values starting with a single slash keep protocol, host and port of
    /// this url. Anything else must be an absolute url.
    pub fn join(&self, location: &str) -> Result<Url, UrlError> {
        if location.starts_with('/') && !location.starts_with("//") {
            let mut url = Url {
                protocol: self.protocol.clone(),
                hostname: self.hostname.clone(),
                port: self.port,
                resource: String::new(),
                parameters: String::new(),
            };
            url.set_target(location);
            return Ok(url);
        }
        Url::parse(location)
    }

    fn set_target(&mut self, target: &str) {
        let (path, query) = match target.find('?') {
            Some(q) => (&target[..q], &target[q+1..]),
            None => (target, ""),
        };
        self.resource = if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        };
        self.parameters = query.to_string();
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }
    pub fn hostname(&self) -> &str {
        &self.hostname
    }
    pub fn port(&self) -> u16 {
        self.port
    }
    /// Path part of the url, always starts with a slash for parsed urls
    pub fn resource(&self) -> &str {
        &self.resource
    }
    /// Raw query string, without the question mark
    pub fn parameters(&self) -> &str {
        &self.parameters
    }
}

impl FromStr for Url {
    type Err = UrlError;
    fn from_str(s: &str) -> Result<Url, UrlError> {
        Url::parse(s)
    }
}

/// Formats `protocol://hostname:port/resource`, the query is omitted
impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}://{}:{}{}",
            self.protocol, self.hostname, self.port, self.resource)
    }
}
