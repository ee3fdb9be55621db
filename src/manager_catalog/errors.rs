use std::fmt;

pub enum CatalogError {
    Connection(String),
    Query(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CatalogError::Connection(e) => write!(f, "CatalogError::Connection: {}", e),
            CatalogError::Query(e) => write!(f, "CatalogError::Query: {}", e),
        }
    }
}
impl From<diesel::ConnectionError> for CatalogError {
    fn from(e: diesel::ConnectionError) -> Self {
        CatalogError::Connection(e.to_string())
    }
}
impl From<diesel::result::Error> for CatalogError {
    fn from(e: diesel::result::Error) -> Self {
        CatalogError::Query(e.to_string())
    }
}
