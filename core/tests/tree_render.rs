use ffdir_core::render::render_tree;
use serde_json::json;

#[test]
fn nested_object_mirrors_structure() {
    assert_eq!(
        render_tree(&json!({"a": {"b": 1}})),
        "<dl><dt>A</dt><dd><dl><dt>B</dt><dd>1</dd></dl></dd></dl>"
    );
}

#[test]
fn empty_object_is_an_empty_list() {
    assert_eq!(render_tree(&json!({})), "<dl></dl>");
    assert_eq!(
        render_tree(&json!({"nodes": {}, "feeds": []})),
        "<dl><dt>Nodes</dt><dd><dl></dl></dd><dt>Feeds</dt></dl>"
    );
}

#[test]
fn every_key_appears_once_in_order() {
    let html = render_tree(&json!({
        "zeta": "z",
        "metacommunity": "Freifunk",
        "techDetails": {"routing": ["batman-adv", "babel"], "vpn": null},
        "alpha": true
    }));
    assert_eq!(html.matches("<dt>").count(), 6);
    for term in ["Zeta", "Metacommunity", "TechDetails", "Routing", "Vpn", "Alpha"] {
        assert_eq!(html.matches(&format!("<dt>{}</dt>", term)).count(), 1, "{}", term);
    }
    assert!(html.find("<dt>Zeta</dt>").unwrap() < html.find("<dt>Alpha</dt>").unwrap());
    assert!(html.contains("<dt>Routing</dt><dd>batman-adv</dd><dd>babel</dd>"));
    assert!(html.contains("<dt>Vpn</dt><dd>null</dd>"));
    assert!(html.contains("<dt>Alpha</dt><dd>true</dd>"));
}

#[test]
fn arrays_of_objects_recurse() {
    assert_eq!(
        render_tree(&json!({"feeds": [{"name": "blog"}, "plain", [1]]})),
        "<dl><dt>Feeds</dt><dd><dl><dt>Name</dt><dd>blog</dd></dl></dd><dd>plain</dd><dd><dl><dd>1</dd></dl></dd></dl>"
    );
}

#[test]
fn nesting_depth_matches_input() {
    let html = render_tree(&json!({"a": {"b": {"c": {"d": "deep"}}}}));
    assert_eq!(html.matches("<dl>").count(), 4);
    assert_eq!(html.matches("<dd><dl>").count(), 3);
    assert!(html.contains("<dt>D</dt><dd>deep</dd></dl></dd></dl></dd></dl></dd></dl>"));
}

#[test]
fn untrusted_markup_is_escaped() {
    let html = render_tree(&json!({
        "name<img>": "<script>alert(1)</script>",
        "note": "see http://example.org"
    }));
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<img>"));
    assert!(html.contains("<dt>Name&lt;img&gt;</dt>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains(
        r#"<dd>see <a href="http://example.org" rel="noopener">http://example.org</a></dd>"#
    ));
}

#[test]
fn numbers_render_in_json_form() {
    assert_eq!(
        render_tree(&json!({"lat": 52.5, "nodes": 120, "neg": -3})),
        "<dl><dt>Lat</dt><dd>52.5</dd><dt>Nodes</dt><dd>120</dd><dt>Neg</dt><dd>-3</dd></dl>"
    );
}
