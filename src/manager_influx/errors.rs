use std::fmt;

pub enum InfluxError {
    Store(String),
    Document(String),
}

impl fmt::Display for InfluxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InfluxError::Store(e) => write!(f, "InfluxError::Store: {}", e),
            InfluxError::Document(e) => write!(f, "InfluxError::Document: {}", e),
        }
    }
}
impl From<ureq::Error> for InfluxError {
    fn from(e: ureq::Error) -> Self {
        InfluxError::Store(e.to_string())
    }
}
impl From<serde_json::Error> for InfluxError {
    fn from(e: serde_json::Error) -> Self {
        InfluxError::Document(e.to_string())
    }
}
