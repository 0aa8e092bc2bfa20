use std::sync::Arc;


/// Fine-grained configuration of the client
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) max_header_size: usize,
    pub(crate) max_response_length: usize,
}

impl Config {
    /// Create a config with defaults
    pub fn new() -> Config {
        Config {
            max_header_size: 65536,
            max_response_length: 10_485_760,
        }
    }
    /// Maximum size of the response status line and headers
    ///
    /// Response fails with `HeadersTooLong` if no complete header block
    /// found within this number of bytes.
    pub fn max_header_size(&mut self, value: usize) -> &mut Self {
        self.max_header_size = value;
        self
    }
    /// Maximum body size accepted by buffered requests
    ///
    /// Only affects `Client::fetch_buffered` and shortcuts based on it,
    /// streaming with `Client::fetch` has no limit.
    pub fn max_response_length(&mut self, value: usize) -> &mut Self {
        self.max_response_length = value;
        self
    }
    /// Create a Arc'd config clone to pass to the constructor
    ///
    /// This is just a convenience method.
    pub fn done(&mut self) -> Arc<Config> {
        Arc::new(self.clone())
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}
