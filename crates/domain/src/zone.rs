use std::fmt;

/// Where a query is answered from. Computed per query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneClassification {
    /// The name is the network's own domain or below it.
    Authoritative,
    /// Outside the own domain, under an ICANN public suffix.
    RecursivePublic,
    /// Everything else, including names that fail to parse.
    RecursivePrivate,
}

impl ZoneClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneClassification::Authoritative => "authoritative",
            ZoneClassification::RecursivePublic => "public",
            ZoneClassification::RecursivePrivate => "private",
        }
    }
}

impl fmt::Display for ZoneClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
