/// Handler selected for a route path.
///
/// Classification is case-sensitive and first-match-wins in the order the
/// variants are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Root,
    UserAgent,
    /// Remainder after `echo/`, possibly empty or containing slashes.
    Echo(&'a str),
    /// Remainder after `files/`.
    Files(&'a str),
    NotFound,
}

impl<'a> Route<'a> {
    pub fn classify(path: &'a str) -> Self {
        if path.is_empty() {
            Route::Root
        } else if path == "user-agent" {
            Route::UserAgent
        } else if let Some(word) = path.strip_prefix("echo/") {
            Route::Echo(word)
        } else if let Some(name) = path.strip_prefix("files/") {
            Route::Files(name)
        } else {
            Route::NotFound
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Root => "root",
            Route::UserAgent => "user-agent",
            Route::Echo(_) => "echo",
            Route::Files(_) => "files",
            Route::NotFound => "not-found",
        }
    }
}
