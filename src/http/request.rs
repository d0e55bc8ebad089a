use crate::http::headers::HeaderLines;

/// HTTP request methods.
///
/// Only GET and POST carry meaning for the file routes; any other token
/// is preserved as `Other` and falls through to Not Found there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// Any other token, kept verbatim
    Other(String),
}

impl Method {
    /// Parses an HTTP method token (case-sensitive).
    ///
    /// ```
    /// # use forge::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(s) => s,
        }
    }
}

/// The three tokens of the first line of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// Raw target including any query string.
    pub target: String,
    /// Version token, or empty when the client omitted it. Not interpreted.
    pub version: String,
}

impl RequestLine {
    /// Target with one leading and one trailing `/` removed.
    pub fn route_path(&self) -> &str {
        route_path(&self.target)
    }
}

/// A request whose header block has been read; the body, if any, is still
/// on the connection.
#[derive(Debug, Clone)]
pub struct Request {
    pub line: RequestLine,
    pub headers: HeaderLines,
}

impl Request {
    pub fn method(&self) -> &Method {
        &self.line.method
    }

    pub fn route_path(&self) -> &str {
        self.line.route_path()
    }

    /// First header value for `name`, `""` when absent.
    pub fn header(&self, name: &str) -> &str {
        self.headers.lookup(name)
    }

    /// Declared body length. `None` if missing or not a non-negative integer.
    pub fn content_length(&self) -> Option<u64> {
        self.header("Content-Length").trim().parse().ok()
    }
}

/// Strips a single leading and a single trailing `/`.
pub fn route_path(target: &str) -> &str {
    let path = target.strip_prefix('/').unwrap_or(target);
    path.strip_suffix('/').unwrap_or(path)
}
