extern crate minifetch;
extern crate argparse;
extern crate env_logger;
#[macro_use] extern crate log;

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::{PathBuf, Path};
use std::process::exit;
use std::time::Duration;

use argparse::{ArgumentParser, Store, StoreTrue, StoreOption, Collect};
use argparse::ParseOption;
use minifetch::{Client, HeaderBlock, Request, Url};


pub struct Options {
    pub url: String,
    pub method: String,
    pub headers: Vec<String>,
    pub data: Option<String>,
    pub follow: bool,
    pub max_redirects: u32,
    pub timeout: Option<f64>,
    pub dump_header: Option<PathBuf>,
}

fn dump_headers(filename: &Path, head: &HeaderBlock) -> io::Result<()> {
    let mut out: Box<dyn Write> = if filename == Path::new("-") {
        Box::new(io::stdout())
    } else {
        Box::new(File::create(filename)?)
    };
    out.write_all(&head.bytes())
}

fn run(opt: Options) -> Result<(), String> {
    let url = Url::parse(&opt.url).map_err(|e| e.to_string())?;
    let mut req = Request::new(url);
    req.follow_redirects(opt.follow);
    req.max_redirects(opt.max_redirects);
    if let Some(secs) = opt.timeout {
        req.timeout(Duration::from_millis((secs * 1000.0) as u64));
    }
    for line in &opt.headers {
        let mut pair = line.splitn(2, ':');
        match (pair.next(), pair.next()) {
            (Some(name), Some(value)) => {
                req.header(name.trim(), value.trim());
            }
            _ => return Err(format!("bad header {:?}", line)),
        }
    }
    let method = match opt.data {
        Some(data) => {
            req.body(data);
            if opt.method.is_empty() { "POST".to_string() } else { opt.method }
        }
        None if opt.method.is_empty() => "GET".to_string(),
        None => opt.method,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut last_hop = None;
    let mut write_error = None;
    let head = Client::new().fetch(&method, &req, |hop, data, _| {
        if last_hop != Some(hop) {
            if last_hop.is_some() {
                info!("Following redirect, hop {}", hop);
            }
            last_hop = Some(hop);
        }
        if write_error.is_none() {
            if let Err(e) = out.write_all(data) {
                write_error = Some(e);
            }
        }
    }).map_err(|e| e.to_string())?;
    if let Some(e) = write_error {
        return Err(format!("can't write body: {}", e));
    }
    out.flush().map_err(|e| e.to_string())?;
    if let Some(filename) = opt.dump_header {
        dump_headers(&filename, &head)
            .map_err(|e| format!("can't write headers: {}", e))?;
    }
    Ok(())
}

pub fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    let mut opt = Options {
        url: String::new(),
        method: String::new(),
        headers: Vec::new(),
        data: None,
        follow: false,
        max_redirects: 8,
        timeout: None,
        dump_header: None,
    };
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Fetch an url and write the body to stdout");
        ap.refer(&mut opt.url)
            .add_argument("url", Store, "
                Fetch specified url
            ").required();
        ap.refer(&mut opt.method)
            .add_option(&["-X", "--request"], Store,
                "Request method (default GET, or POST with --data)");
        ap.refer(&mut opt.headers)
            .add_option(&["-H", "--header"], Collect,
                "Add a header, in `Name: value` form");
        ap.refer(&mut opt.data)
            .add_option(&["-d", "--data"], StoreOption,
                "Send this request body");
        ap.refer(&mut opt.follow)
            .add_option(&["-L", "--location"], StoreTrue,
                "Follow `301` redirects");
        ap.refer(&mut opt.max_redirects)
            .add_option(&["--max-redirs"], Store,
                "Maximum number of redirects to follow (default 8)");
        ap.refer(&mut opt.timeout)
            .add_option(&["-m", "--max-time"], StoreOption,
                "Connect and read timeout in seconds");
        ap.refer(&mut opt.dump_header)
            .add_option(&["-D", "--dump-header"], ParseOption,
                "Write response headers to this file (`-` is stdout)");
        ap.parse_args_or_exit();
    }

    if let Err(e) = run(opt) {
        error!("{}", e);
        writeln!(&mut io::stderr(), "curl: {}", e).ok();
        exit(1);
    }
}
