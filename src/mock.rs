//! Scripted in-memory transport for unit tests
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use netbuf::Buf;

use errors::Error;
use transport::{Connector, Transport, Received};
use url::Url;


/// What the next `receive` call returns
#[derive(Debug, Clone)]
pub enum Step {
    Data(Vec<u8>),
    Timeout,
    Close,
    Fail,
}

impl Step {
    pub fn data(text: &str) -> Step {
        Step::Data(text.as_bytes().to_vec())
    }
}

/// Plays back the steps, then behaves as a closed connection
pub struct Script {
    steps: VecDeque<Step>,
    reads: usize,
    sent: Rc<RefCell<Vec<u8>>>,
    closed: Rc<RefCell<bool>>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Script {
        Script {
            steps: steps.into_iter().collect(),
            reads: 0,
            sent: Rc::new(RefCell::new(Vec::new())),
            closed: Rc::new(RefCell::new(false)),
        }
    }
    /// Number of `receive` calls so far
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Transport for Script {
    fn send(&mut self, data: &[u8]) -> io::Result<usize> {
        // a short write, to exercise the send loop
        let n = if data.len() > 16 { data.len() / 2 } else { data.len() };
        self.sent.borrow_mut().extend_from_slice(&data[..n]);
        Ok(n)
    }
    fn receive(&mut self, buf: &mut Buf, _timeout: Option<Duration>)
        -> io::Result<Received>
    {
        self.reads += 1;
        match self.steps.pop_front() {
            Some(Step::Data(data)) => {
                buf.extend(&data);
                Ok(Received::Data(data.len()))
            }
            Some(Step::Timeout) => Ok(Received::Timeout),
            Some(Step::Close) | None => Ok(Received::Closed),
            Some(Step::Fail) => Err(io::Error::new(
                io::ErrorKind::ConnectionReset, "scripted failure")),
        }
    }
    fn disconnect(&mut self) {
        *self.closed.borrow_mut() = true;
    }
}

/// A single connection made by `MockConnector`
pub struct Exchange {
    pub url: Url,
    pub timeout: Option<Duration>,
    pub sent: Rc<RefCell<Vec<u8>>>,
    pub closed: Rc<RefCell<bool>>,
}

impl Exchange {
    pub fn sent_text(&self) -> String {
        String::from_utf8_lossy(&self.sent.borrow()).into_owned()
    }
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}

/// Hands out prepared scripts in order, recording every connection
pub struct MockConnector {
    scripts: VecDeque<Script>,
    pub exchanges: Vec<Exchange>,
}

impl MockConnector {
    pub fn new(scripts: Vec<Script>) -> MockConnector {
        MockConnector {
            scripts: scripts.into_iter().collect(),
            exchanges: Vec::new(),
        }
    }
    /// Urls connected to, in order
    pub fn urls(&self) -> Vec<String> {
        self.exchanges.iter().map(|e| e.url.to_string()).collect()
    }
}

impl Connector for MockConnector {
    type Transport = Script;
    fn connect(&mut self, url: &Url, timeout: Option<Duration>)
        -> Result<Script, Error>
    {
        let script = match self.scripts.pop_front() {
            Some(script) => script,
            None => return Err(Error::Connect(io::Error::new(
                io::ErrorKind::ConnectionRefused, "no more scripts"))),
        };
        self.exchanges.push(Exchange {
            url: url.clone(),
            timeout: timeout,
            sent: script.sent.clone(),
            closed: script.closed.clone(),
        });
        Ok(script)
    }
}
