/// Raw header block of one request, in arrival order.
///
/// Index 0 is the request line; the last element is the empty line that
/// terminated the block, if one was seen before end-of-input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLines {
    lines: Vec<String>,
}

impl HeaderLines {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn request_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Value of the first line starting with `"<name>: "`, or `""`.
    ///
    /// The match is case-sensitive and every call is a fresh scan.
    pub fn lookup(&self, name: &str) -> &str {
        lookup(self.iter(), name)
    }
}

impl From<Vec<String>> for HeaderLines {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

pub fn lookup<'a>(lines: impl IntoIterator<Item = &'a str>, name: &str) -> &'a str {
    for line in lines {
        if let Some(value) = line
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix(": "))
        {
            return value;
        }
    }
    ""
}
