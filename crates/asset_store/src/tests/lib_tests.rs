use super::*;

use collection_engine::default_categories;
use tempfile::TempDir;

fn store_with(files: &[(&str, &str)]) -> (TempDir, AssetStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("write asset");
    }
    let store = AssetStore::new(dir.path());
    (dir, store)
}

#[test]
fn reads_plain_id_list() {
    let (_dir, store) = store_with(&[("fish_sorting.json", r#"["128", "129", "130"]"#)]);
    let ids = store.read_id_list("fish_sorting.json").expect("ids");
    assert_eq!(ids, ["128", "129", "130"]);
}

#[test]
fn tolerates_comments_in_id_list() {
    let raw = r#"
        // spring fish
        ["128", /* pufferfish */ "129",
         "http://not-a-comment" // trailing
        ]
    "#;
    let (_dir, store) = store_with(&[("fish_sorting.json", raw)]);
    let ids = store.read_id_list("fish_sorting.json").expect("ids");
    assert_eq!(ids, ["128", "129", "http://not-a-comment"]);
}

#[test]
fn missing_file_is_reported_as_missing() {
    let (_dir, store) = store_with(&[]);
    let err = store.read_id_list("item_sorting.json").expect_err("missing");
    assert!(matches!(err, OrderSourceError::Missing { .. }));
}

#[test]
fn blank_and_empty_lists_are_reported_as_empty() {
    let (_dir, store) = store_with(&[("a.json", "  // nothing here\n"), ("b.json", "[]")]);
    assert!(matches!(
        store.read_id_list("a.json"),
        Err(OrderSourceError::Empty { .. })
    ));
    assert!(matches!(
        store.read_id_list("b.json"),
        Err(OrderSourceError::Empty { .. })
    ));
}

#[test]
fn non_list_json_is_malformed() {
    let (_dir, store) = store_with(&[("c.json", r#"{"ids": ["1"]}"#), ("d.json", "[1, 2")]);
    for name in ["c.json", "d.json"] {
        let err = store.read_id_list(name).expect_err("malformed");
        assert!(matches!(err, OrderSourceError::Malformed { .. }), "{name}: {err}");
    }
}

#[test]
fn order_source_reads_category_and_color_files() {
    let (_dir, store) = store_with(&[
        ("mineral_sorting.json", r#"["80", "86"]"#),
        (COLOR_ORDER_FILE, r#"["color_red", "color_blue"]"#),
    ]);
    let minerals = default_categories()
        .into_iter()
        .find(|def| def.simple_name == "minerals")
        .expect("minerals");
    assert_eq!(
        store.canonical_order(&minerals).expect("order"),
        ["80", "86"]
    );
    assert_eq!(
        store.color_patterns().expect("colors"),
        ["color_red", "color_blue"]
    );
}

#[test]
fn order_source_error_names_the_file() {
    let (_dir, store) = store_with(&[]);
    let err = store.color_patterns().expect_err("missing");
    assert!(err.to_string().contains(COLOR_ORDER_FILE));
}

#[test]
fn translations_load_from_object() {
    let (_dir, store) = store_with(&[(
        TRANSLATIONS_FILE,
        r#"{ "sort-price": "Preis", /* keep */ "sort-color": "Farbe" }"#,
    )]);
    let table = store.load_translations();
    assert_eq!(table.len(), 2);
    assert_eq!(table.translate("sort-price").as_deref(), Some("Preis"));
    assert_eq!(table.translate("sort-alpha"), None);
}

#[test]
fn missing_or_broken_translations_yield_empty_table() {
    let (_dir, store) = store_with(&[]);
    assert!(store.load_translations().is_empty());

    let (_dir, store) = store_with(&[(TRANSLATIONS_FILE, "[\"not\", \"a map\"]")]);
    assert!(store.load_translations().is_empty());
}

#[test]
fn strip_keeps_escaped_quotes_inside_strings() {
    let raw = r#"["a\"//b", "c"] // tail"#;
    assert_eq!(strip_json_comments(raw), r#"["a\"//b", "c"] "#);
}
