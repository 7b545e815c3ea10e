use meshdns_application::services::QueryClassifier;
use meshdns_domain::ZoneClassification;

fn classifier() -> QueryClassifier {
    QueryClassifier::new("corp.internal")
}

#[test]
fn test_own_domain_and_subdomains_are_authoritative() {
    let classifier = classifier();
    for name in [
        "corp.internal",
        "corp.internal.",
        "host1.corp.internal.",
        "a.b.c.corp.internal",
        "HOST1.Corp.Internal.",
    ] {
        assert_eq!(
            classifier.classify(name),
            ZoneClassification::Authoritative,
            "{}",
            name
        );
    }
}

#[test]
fn test_icann_names_are_public() {
    let classifier = classifier();
    for name in ["example.com.", "www.example.co.uk", "com", "WWW.EXAMPLE.ORG."] {
        assert_eq!(
            classifier.classify(name),
            ZoneClassification::RecursivePublic,
            "{}",
            name
        );
    }
}

#[test]
fn test_other_names_are_private() {
    let classifier = classifier();
    for name in ["foo.internal.", "printer.lan", "localhost", "nas.home.arpa.x-unknown"] {
        assert_eq!(
            classifier.classify(name),
            ZoneClassification::RecursivePrivate,
            "{}",
            name
        );
    }
}

#[test]
fn test_suffix_match_respects_label_boundary() {
    assert_eq!(
        classifier().classify("evilcorp.internal."),
        ZoneClassification::RecursivePrivate
    );
}

#[test]
fn test_root_is_private() {
    assert_eq!(classifier().classify("."), ZoneClassification::RecursivePrivate);
}

#[test]
fn test_malformed_names_are_never_authoritative() {
    let classifier = classifier();
    let long_label = format!("{}.corp.internal", "a".repeat(64));

    for name in ["host..corp.internal", long_label.as_str(), ".corp.internal"] {
        assert_eq!(
            classifier.classify(name),
            ZoneClassification::RecursivePrivate,
            "{}",
            name
        );
    }
}
