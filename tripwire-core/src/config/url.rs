//! Expiry callback endpoint
//!
//! Accepts `scheme://host[:port][/path]` where the scheme is one of
//! http, https, ftp or ftps (case-insensitive). The host is `localhost`,
//! a dotted quad, or a dotted domain name.

/// Endpoint parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UrlError {
    /// No `://` separator
    MissingScheme,
    /// Scheme other than http, https, ftp, ftps
    UnsupportedScheme,
    /// Host is not localhost, an IPv4 literal or a domain name
    InvalidHost,
    /// Port is empty, non-numeric or out of range
    InvalidPort,
    /// Path contains whitespace or is a bare `?`
    InvalidPath,
}

impl core::fmt::Display for UrlError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            UrlError::MissingScheme => "missing scheme",
            UrlError::UnsupportedScheme => "unsupported scheme",
            UrlError::InvalidHost => "invalid host",
            UrlError::InvalidPort => "invalid port",
            UrlError::InvalidPath => "invalid path",
        };
        f.write_str(text)
    }
}

/// URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scheme {
    Http,
    Https,
    Ftp,
    Ftps,
}

impl Scheme {
    fn parse(s: &str) -> Option<Self> {
        [
            ("http", Scheme::Http),
            ("https", Scheme::Https),
            ("ftp", Scheme::Ftp),
            ("ftps", Scheme::Ftps),
        ]
        .into_iter()
        .find(|(name, _)| s.eq_ignore_ascii_case(name))
        .map(|(_, scheme)| scheme)
    }

    /// Well-known port for the scheme
    pub const fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
            Scheme::Ftp => 21,
            Scheme::Ftps => 990,
        }
    }
}

/// A parsed endpoint borrowing from the source string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub scheme: Scheme,
    pub host: &'a str,
    pub port: Option<u16>,
    /// Everything after the authority, possibly empty
    pub path: &'a str,
}

impl<'a> Endpoint<'a> {
    /// Parse and validate an endpoint URL
    pub fn parse(url: &'a str) -> Result<Self, UrlError> {
        let (scheme, rest) = url.split_once("://").ok_or(UrlError::MissingScheme)?;
        let scheme = Scheme::parse(scheme).ok_or(UrlError::UnsupportedScheme)?;

        let authority_end = rest.find(|c: char| c == '/' || c == '?').unwrap_or(rest.len());
        let (authority, path) = rest.split_at(authority_end);

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => (host, Some(parse_port(port)?)),
            None => (authority, None),
        };

        if !is_valid_host(host) {
            return Err(UrlError::InvalidHost);
        }
        if !is_valid_path(path) {
            return Err(UrlError::InvalidPath);
        }

        Ok(Self {
            scheme,
            host,
            port,
            path,
        })
    }

    /// Explicit port, or the scheme's well-known one
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(self.scheme.default_port())
    }

    /// Request target for an HTTP request line
    ///
    /// Returns `None` when the target has to be built by prefixing `/`
    /// (empty path or bare query); callers then emit `/` first.
    pub fn origin_form(&self) -> Option<&'a str> {
        if self.path.starts_with('/') {
            Some(self.path)
        } else {
            None
        }
    }
}

fn parse_port(port: &str) -> Result<u16, UrlError> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UrlError::InvalidPort);
    }
    port.parse().map_err(|_| UrlError::InvalidPort)
}

fn is_valid_path(path: &str) -> bool {
    match path {
        "" | "/" => true,
        // `[/?]` followed by at least one non-whitespace character
        _ => path.len() >= 2 && !path.chars().any(char::is_whitespace),
    }
}

fn is_valid_host(host: &str) -> bool {
    host.eq_ignore_ascii_case("localhost") || is_dotted_quad(host) || is_domain(host)
}

/// Four groups of one to three digits; values are not range-checked
fn is_dotted_quad(host: &str) -> bool {
    let mut groups = 0;
    for group in host.split('.') {
        if group.is_empty() || group.len() > 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        groups += 1;
    }
    groups == 4
}

fn is_domain(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    let Some((labels, tld)) = host.rsplit_once('.') else {
        return false;
    };
    labels.split('.').all(is_label) && is_tld(tld)
}

fn is_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    match bytes {
        [] => false,
        [only] => only.is_ascii_alphanumeric(),
        [first, middle @ .., last] => {
            bytes.len() <= 63
                && first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && middle.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        }
    }
}

fn is_tld(tld: &str) -> bool {
    let alpha = (2..=6).contains(&tld.len()) && tld.bytes().all(|b| b.is_ascii_alphabetic());
    let mixed = tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');
    alpha || mixed
}
