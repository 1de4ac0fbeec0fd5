use std::fmt;

/// Which registry partition a push connection lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConnectionScope {
    Global,
    Document(String),
}

impl ConnectionScope {
    pub fn resource_key(&self) -> Option<&str> {
        match self {
            Self::Global => None,
            Self::Document(key) => Some(key),
        }
    }

    /// Metric label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Document(_) => "scoped",
        }
    }
}

impl fmt::Display for ConnectionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Document(key) => write!(f, "document {key}"),
        }
    }
}
