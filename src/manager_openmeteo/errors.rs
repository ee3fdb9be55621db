use std::fmt;

pub enum FetchError {
    Upstream(String),
    Document(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchError::Upstream(e) => write!(f, "FetchError::Upstream: {}", e),
            FetchError::Document(e) => write!(f, "FetchError::Document: {}", e),
        }
    }
}
impl From<ureq::Error> for FetchError {
    fn from(e: ureq::Error) -> Self {
        FetchError::Upstream(e.to_string())
    }
}
impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Document(e.to_string())
    }
}
