use std::io;

use httparse::InvalidChunkSize;

use url::UrlError;


quick_error! {
    #[derive(Debug)]
    /// Client request error
    pub enum Error {
        /// Url of the request or of a redirect target can't be parsed
        Url(err: UrlError) {
            description("invalid url")
            display("invalid url: {}", err)
            from()
        }
        /// Can't establish connection (including TLS handshake)
        Connect(err: io::Error) {
            description("connection error")
            display("connection error: {}", err)
        }
        /// Scheme of the url requires TLS, which is not compiled in
        ///
        /// Enable the `tls` feature to fetch `https` urls.
        UnsupportedScheme(scheme: String) {
            description("scheme of this url is not supported")
            display("scheme {:?} is not supported", scheme)
        }
        /// I/O (basically networking) error occured during request
        Io(err: io::Error) {
            description("IO error")
            display("IO error: {}", err)
            from()
        }
        /// Bad response headers received
        Header {
            description("malformed or truncated response headers")
        }
        /// Response headers exceed `Config::max_header_size`
        HeadersTooLong {
            description("response headers are too long")
        }
        /// Bad chunk size received
        ChunkSize(err: InvalidChunkSize) {
            description("invalid chunk size")
            display("invalid chunk size: {}", err)
            from()
        }
        /// Bad `Content-Length` header
        BadContentLength {
            description("bad content length")
        }
        /// Connection reset by peer when reading response headers
        ResetOnResponseHeaders {
            description("connection closed prematurely while reading headers")
        }
        /// Connection reset by peer when response body
        ResetOnResponseBody {
            description("connection closed prematurely while reading body")
        }
        /// Buffered response body exceeds `Config::max_response_length`
        ResponseBodyTooLong {
            description("response body is too long")
        }
    }
}
