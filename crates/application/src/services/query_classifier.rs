use meshdns_domain::{canonical_name, validate_name, ZoneClassification};
use psl::{List, Psl};
use std::sync::Arc;

/// The handler a zone is served by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneHandler {
    Authoritative,
    Recursive,
}

/// Zones in match order. Built once per service start; the root zone
/// catches everything the own domain does not.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    zones: Vec<(Arc<str>, ZoneHandler)>,
}

impl ZoneTable {
    pub const ROOT: &'static str = ".";

    pub fn new(own_domain: &str) -> Self {
        Self {
            zones: vec![
                (canonical_name(own_domain).into(), ZoneHandler::Authoritative),
                (Self::ROOT.into(), ZoneHandler::Recursive),
            ],
        }
    }

    /// Finds the first zone containing `name`. `name` must be canonical.
    pub fn lookup(&self, name: &str) -> (&str, ZoneHandler) {
        self.zones
            .iter()
            .find(|(zone, _)| in_zone(name, zone))
            .map(|(zone, handler)| (zone.as_ref(), *handler))
            .unwrap_or((Self::ROOT, ZoneHandler::Recursive))
    }

    pub fn own_domain(&self) -> &str {
        self.zones
            .iter()
            .find(|(_, handler)| *handler == ZoneHandler::Authoritative)
            .map(|(zone, _)| zone.as_ref())
            .unwrap_or(Self::ROOT)
    }
}

fn in_zone(name: &str, zone: &str) -> bool {
    if zone == ZoneTable::ROOT {
        return true;
    }
    name == zone
        || (name.len() > zone.len()
            && name.ends_with(zone)
            && name.as_bytes()[name.len() - zone.len() - 1] == b'.')
}

/// Splits queries into the own zone and the two recursive upstream classes.
#[derive(Debug, Clone)]
pub struct QueryClassifier {
    zones: ZoneTable,
}

impl QueryClassifier {
    pub fn new(own_domain: &str) -> Self {
        Self {
            zones: ZoneTable::new(own_domain),
        }
    }

    pub fn zones(&self) -> &ZoneTable {
        &self.zones
    }

    pub fn classify(&self, name: &str) -> ZoneClassification {
        let name = canonical_name(name);

        // Unparseable names never reach the authoritative handler.
        if validate_name(&name).is_err() {
            return ZoneClassification::RecursivePrivate;
        }

        match self.zones.lookup(&name).1 {
            ZoneHandler::Authoritative => ZoneClassification::Authoritative,
            ZoneHandler::Recursive if is_icann_suffixed(&name) => {
                ZoneClassification::RecursivePublic
            }
            ZoneHandler::Recursive => ZoneClassification::RecursivePrivate,
        }
    }
}

fn is_icann_suffixed(name: &str) -> bool {
    if name == ZoneTable::ROOT {
        return false;
    }
    List.suffix(name.as_bytes())
        .map(|suffix| suffix.typ() == Some(psl::Type::Icann))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_zone_requires_label_boundary() {
        assert!(in_zone("corp.internal", "corp.internal"));
        assert!(in_zone("a.b.corp.internal", "corp.internal"));
        assert!(!in_zone("evilcorp.internal", "corp.internal"));
        assert!(!in_zone("internal", "corp.internal"));
        assert!(in_zone("anything", "."));
    }

    #[test]
    fn test_zone_table_order() {
        let table = ZoneTable::new("Corp.Internal.");
        assert_eq!(table.own_domain(), "corp.internal");
        assert_eq!(
            table.lookup("host1.corp.internal"),
            ("corp.internal", ZoneHandler::Authoritative)
        );
        assert_eq!(table.lookup("example.com"), (".", ZoneHandler::Recursive));
    }
}
