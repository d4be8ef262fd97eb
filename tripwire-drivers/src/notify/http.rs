//! HTTP expiry notifier
//!
//! Issues one `GET` over any `embedded-io` byte stream and classifies the
//! status line. Only plain `http` is spoken; TLS and FTP endpoints are
//! reported as unsupported. There is no retry and no fallback endpoint.

use core::fmt::Write as _;

use embedded_io::{Read, Write};
use heapless::String;
use tripwire_core::config::{Endpoint, Scheme, MAX_URL_LEN};
use tripwire_core::traits::{Notifier, NotifyOutcome};

/// Room for the request line and headers around a maximal URL
const REQUEST_CAPACITY: usize = 2 * MAX_URL_LEN + 128;

/// Bytes kept while looking for the end of the status line
const STATUS_LINE_CAPACITY: usize = 64;

/// Opens a byte stream to a host
pub trait Connect {
    type Connection: Read + Write;
    type Error;

    fn connect(&mut self, host: &str, port: u16) -> Result<Self::Connection, Self::Error>;
}

/// Plain HTTP/1.1 notifier
pub struct HttpNotifier<C> {
    connector: C,
}

impl<C: Connect> HttpNotifier<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    fn request(&mut self, endpoint: &Endpoint<'_>) -> Option<u16> {
        let request = build_request(endpoint)?;

        let mut conn = self
            .connector
            .connect(endpoint.host, endpoint.port_or_default())
            .ok()?;
        conn.write_all(request.as_bytes()).ok()?;
        conn.flush().ok()?;

        let mut buf = [0u8; STATUS_LINE_CAPACITY];
        let mut filled = 0;
        while filled < buf.len() {
            let n = conn.read(&mut buf[filled..]).ok()?;
            if n == 0 {
                break;
            }
            filled += n;
            if buf[..filled].windows(2).any(|w| w == b"\r\n") {
                break;
            }
        }
        parse_status_line(&buf[..filled])
    }
}

impl<C: Connect> Notifier for HttpNotifier<C> {
    fn notify(&mut self, url: &str) -> NotifyOutcome {
        let Ok(endpoint) = Endpoint::parse(url) else {
            return NotifyOutcome::Unsupported;
        };
        if endpoint.scheme != Scheme::Http {
            return NotifyOutcome::Unsupported;
        }

        match self.request(&endpoint) {
            Some(status) => NotifyOutcome::from_status(status),
            None => NotifyOutcome::ConnectionFailed,
        }
    }
}

fn build_request(endpoint: &Endpoint<'_>) -> Option<String<REQUEST_CAPACITY>> {
    let mut req = String::new();
    let target_prefix = if endpoint.origin_form().is_some() { "" } else { "/" };
    write!(req, "GET {}{} HTTP/1.1\r\n", target_prefix, endpoint.path).ok()?;
    match endpoint.port {
        Some(port) if port != endpoint.scheme.default_port() => {
            write!(req, "Host: {}:{}\r\n", endpoint.host, port).ok()?
        }
        _ => write!(req, "Host: {}\r\n", endpoint.host).ok()?,
    }
    req.push_str("Connection: close\r\nUser-Agent: tripwire\r\n\r\n")
        .ok()?;
    Some(req)
}

/// Status code from `HTTP/1.x NNN reason`
fn parse_status_line(response: &[u8]) -> Option<u16> {
    let end = response
        .windows(2)
        .position(|w| w == b"\r\n")
        .unwrap_or(response.len());
    let line = core::str::from_utf8(&response[..end]).ok()?;

    let mut parts = line.split(' ');
    if !parts.next()?.starts_with("HTTP/") {
        return None;
    }
    let code = parts.next()?;
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}
