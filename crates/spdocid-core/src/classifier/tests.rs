use super::*;

#[test]
fn canonical_library_path() {
    let c = classify(
        "https://contoso.sharepoint.com/sites/Finance/Shared%20Documents/Budget.xlsx",
    )
    .unwrap();
    assert_eq!(c.site.base_url, "https://contoso.sharepoint.com/sites/Finance");
    assert_eq!(c.candidate.path, "/sites/Finance/Shared Documents/Budget.xlsx");
    assert!(c.candidate.reliable);
}

#[test]
fn site_collection_paths_are_reliable() {
    for (url, site) in [
        (
            "https://contoso.sharepoint.com/sites/HR/Policies/Leave.docx",
            "https://contoso.sharepoint.com/sites/HR",
        ),
        (
            "https://fabrikam.sharepoint.com/sites/a-b_c/Lib/x.pptx",
            "https://fabrikam.sharepoint.com/sites/a-b_c",
        ),
        (
            "https://contoso.sharepoint.com/teams/Ops/Shared%20Documents/Plan.docx",
            "https://contoso.sharepoint.com/teams/Ops",
        ),
    ] {
        let c = classify(url).unwrap();
        assert_eq!(c.site.base_url, site, "{url}");
        assert!(c.candidate.reliable, "{url}");
    }
}

#[test]
fn modern_sharing_links_are_unreliable() {
    for doctype in ["x", "w", "p"] {
        let url = format!("https://contoso.sharepoint.com/:{doctype}:/s/Finance/EabcXYZ123?e=Qw3rTy");
        let c = classify(&url).unwrap();
        assert_eq!(c.site.base_url, "https://contoso.sharepoint.com/s/Finance");
        assert_eq!(c.candidate.path, format!("/:{doctype}:/s/Finance/EabcXYZ123"));
        assert!(!c.candidate.reliable);
    }
}

#[test]
fn query_never_participates() {
    let c = classify("https://contoso.sharepoint.com/sites/Finance/Docs/a.xlsx?web=1&e=abc").unwrap();
    assert_eq!(c.candidate.path, "/sites/Finance/Docs/a.xlsx");
    let c = classify("https://contoso.sharepoint.com/?id=/sites/Other/x.docx").unwrap();
    assert_eq!(c.site.base_url, "https://contoso.sharepoint.com");
}

#[test]
fn redirect_sharing_link_reclassified_as_canonical() {
    let c = classify(
        "https://contoso.sharepoint.com/:x:/r/sites/Finance/Shared%20Documents/Budget.xlsx?d=w123",
    )
    .unwrap();
    assert_eq!(c.site.base_url, "https://contoso.sharepoint.com/sites/Finance");
    assert_eq!(c.candidate.path, "/sites/Finance/Shared Documents/Budget.xlsx");
    assert!(c.candidate.reliable);
}

#[test]
fn root_library_defaults_to_tenant_root() {
    let c = classify("https://contoso.sharepoint.com/Shared%20Documents/Handbook.pdf").unwrap();
    assert_eq!(c.shape, UrlShape::LibraryRootPath);
    assert_eq!(c.site.base_url, "https://contoso.sharepoint.com");
    assert_eq!(c.candidate.path, "/Shared Documents/Handbook.pdf");
    assert!(c.candidate.reliable);
}

#[test]
fn structureless_sharing_link_is_flagged() {
    let c = classify("https://contoso-my.sharepoint.com/:x:/g/personal/jdoe_contoso_com/EabcXYZ").unwrap();
    assert_eq!(c.shape, UrlShape::LibraryRootPath);
    assert_eq!(c.site.base_url, "https://contoso-my.sharepoint.com");
    assert!(!c.candidate.reliable);
}

#[test]
fn classification_is_idempotent() {
    for url in [
        "https://contoso.sharepoint.com/sites/Finance/Shared%20Documents/Budget.xlsx",
        "https://contoso.sharepoint.com/:x:/s/Finance/EabcXYZ",
        "https://contoso.sharepoint.com/:w:/r/teams/Ops/Docs/Plan.docx",
        "https://contoso.sharepoint.com/Shared%20Documents/a.docx",
        "https://contoso.sharepoint.com/sites/A%2520B/Docs/x.docx",
        "https://contoso.sharepoint.com/sites/A%2FB/Docs/x.docx",
        "https://contoso.sharepoint.com/sites/A/Docs/100%25%20done.docx",
        "https://contoso.sharepoint.com/sites/A/Docs/x.docx%3Fweb%3D1",
    ] {
        let first = classify(url).unwrap();
        let again = classify(&first.canonical_url()).unwrap();
        assert_eq!(again.site, first.site, "{url}");
        assert_eq!(again.candidate, first.candidate, "{url}");
    }
}

#[test]
fn canonical_url_keeps_path_encoded() {
    let c = classify("https://contoso.sharepoint.com/sites/A%2520B/Shared%20Documents/x.docx?web=1")
        .unwrap();
    assert_eq!(c.site.base_url, "https://contoso.sharepoint.com/sites/A%2520B");
    assert_eq!(c.candidate.path, "/sites/A%20B/Shared Documents/x.docx");
    assert_eq!(
        c.canonical_url(),
        "https://contoso.sharepoint.com/sites/A%2520B/Shared%20Documents/x.docx"
    );

    let r = classify("https://contoso.sharepoint.com/:w:/r/teams/Ops/Docs/Plan.docx?d=1").unwrap();
    assert_eq!(r.canonical_url(), "https://contoso.sharepoint.com/teams/Ops/Docs/Plan.docx");
}

#[test]
fn tenant_override_replaces_host() {
    let c = classify_with_tenant(
        "https://contoso.sharepoint.com/sites/Finance/Docs/a.xlsx",
        Some("http://127.0.0.1:9000/"),
    )
    .unwrap();
    assert_eq!(c.tenant_root, "http://127.0.0.1:9000");
    assert_eq!(c.site.base_url, "http://127.0.0.1:9000/sites/Finance");
}

#[test]
fn malformed_input_rejected() {
    assert!(matches!(
        classify("not a url"),
        Err(ClassificationError::MalformedUrl { .. })
    ));
    assert!(matches!(
        classify(""),
        Err(ClassificationError::MalformedUrl { .. })
    ));
    assert!(matches!(
        classify("https://contoso.sharepoint.com/x").and(classify_with_tenant(
            "https://contoso.sharepoint.com/x",
            Some("contoso")
        )),
        Err(ClassificationError::MalformedUrl { .. })
    ));
}

#[test]
fn non_domain_host_rejected() {
    match classify("http://intranet/sites/A/x.docx") {
        Err(ClassificationError::NotASharePointUrl { host, .. }) => assert_eq!(host, "intranet"),
        other => panic!("expected NotASharePointUrl, got {other:?}"),
    }
}

#[test]
fn site_reference_match_ignores_case_and_slash() {
    let site = SiteReference {
        base_url: "https://contoso.sharepoint.com/sites/Finance".to_string(),
    };
    assert!(site.matches("https://contoso.sharepoint.com/sites/finance/"));
    assert!(!site.matches("https://contoso.sharepoint.com/sites/HR"));
    assert!(!site.matches("https://contoso.sharepoint.com"));
}
