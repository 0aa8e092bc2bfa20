use std::fmt::Write;

use headers::HeaderBlock;
use request::Request;


fn is_unreserved(ch: u8) -> bool {
    matches!(ch, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'-' | b'.' | b'_')
}

/// Percent-encode everything except `[A-Za-z0-9._-]`, with lowercase hex
pub fn urlencode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for &ch in s.as_bytes() {
        if is_unreserved(ch) {
            result.push(ch as char);
        } else {
            write!(result, "%{:02x}", ch).ok();
        }
    }
    result
}

/// Request target: the path, url's own query and encoded parameters
fn request_target(request: &Request) -> String {
    let url = &request.url;
    let mut target = String::from(url.resource());
    let mut sep = '?';
    if !url.parameters().is_empty() {
        target.push(sep);
        target.push_str(url.parameters());
        sep = '&';
    }
    for &(ref name, ref value) in &request.params {
        target.push(sep);
        target.push_str(&urlencode(name));
        target.push('=');
        target.push_str(&urlencode(value));
        sep = '&';
    }
    target
}

/// Builds request head and the whole payload to send
///
/// Payload is serialized headers followed by the body. `Content-Length` is
/// always sent (even if it's zero), `Content-Type` only with a body.
pub fn assemble(method: &str, request: &Request) -> (HeaderBlock, Vec<u8>) {
    let mut head = HeaderBlock::new(
        format!("{} {} HTTP/1.1", method, request_target(request)));
    head.add("Host", request.url.hostname());
    for &(ref name, ref value) in &request.headers {
        head.add(&name[..], &value[..]);
    }
    if !request.body.is_empty() {
        if request.content_type.is_empty() {
            head.add("Content-Type", "text/plain");
        } else {
            head.add("Content-Type", &request.content_type[..]);
        }
    }
    head.add("Content-Length", request.body.len().to_string());

    let mut payload = head.bytes();
    payload.extend_from_slice(&request.body);
    (head, payload)
}
