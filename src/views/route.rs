use crate::domain::ScopeId;

const LIST_PATH: &str = "admin/scope";

/// Client-side location inside the scope admin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `admin/scope`
    List,
    /// `admin/scope/new`
    New,
    /// `admin/scope/{id}`
    Edit(ScopeId),
}

impl Route {
    /// Parse a route path; leading `#`/`/` and a trailing `/` are accepted
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_start_matches('#').trim_matches('/');
        let rest = path.strip_prefix(LIST_PATH)?;
        if rest.is_empty() {
            return Some(Route::List);
        }
        match rest.strip_prefix('/')? {
            "new" => Some(Route::New),
            id => id.parse().ok().map(Route::Edit),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::List => f.write_str(LIST_PATH),
            Route::New => write!(f, "{}/new", LIST_PATH),
            Route::Edit(id) => write!(f, "{}/{}", LIST_PATH, id),
        }
    }
}
