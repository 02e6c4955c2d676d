/// Structural tests for the menu tree: load walks, invariants, and the
/// serialized wire form.
use treemenu_core::{MenuNodeData, MenuTree};

fn sample_data() -> MenuNodeData {
    MenuNodeData::folder(
        "Root",
        vec![
            MenuNodeData::folder(
                "Docs",
                vec![
                    MenuNodeData::link("Intro", "/intro"),
                    MenuNodeData::folder("Guides", vec![MenuNodeData::link("Install", "/install")]),
                ],
            ),
            MenuNodeData::link("About", "/about"),
        ],
    )
}

// ============================================================================
// Parent back-reference invariant
// ============================================================================

#[test]
fn test_loaded_tree_has_exact_parent_backrefs() {
    let tree = MenuTree::from_data(sample_data());
    assert!(tree.verify_parents());

    let mut checked = 0;
    tree.walk(|id, _| {
        for child in tree.children(id) {
            assert_eq!(tree.parent_of(*child), Some(id));
            checked += 1;
        }
    });
    assert_eq!(checked, tree.node_count() - 1);
    assert_eq!(tree.parent_of(tree.root()), None);
}

#[test]
fn test_invariant_survives_mutations() {
    let mut tree = MenuTree::from_data(sample_data());
    let docs = tree.find_by_name_path(&["Docs"]).unwrap();
    let about = tree.find_by_name_path(&["About"]).unwrap();
    let guides = tree.find_by_name_path(&["Docs", "Guides"]).unwrap();

    tree.detach(about);
    tree.attach(guides, about, Some(0)).unwrap();
    assert!(tree.verify_parents());

    let extra = tree.alloc_link("Changelog", "/changelog", None);
    tree.attach(docs, extra, None).unwrap();
    assert!(tree.verify_parents());

    assert!(tree.remove_subtree(guides));
    assert!(tree.verify_parents());
    // The nested "About" went down with the Guides subtree.
    assert!(!tree.contains(about));
}

// ============================================================================
// Wire-form round trip
// ============================================================================

#[test]
fn test_round_trip_is_isomorphic() {
    let tree = MenuTree::from_data(sample_data());
    let data = tree.to_data();
    let reloaded = MenuTree::from_data(data.clone());

    assert!(reloaded.verify_parents());
    assert_eq!(reloaded.node_count(), tree.node_count());
    assert_eq!(reloaded.to_data(), data);
}

#[test]
fn test_serialized_form_has_no_runtime_fields() {
    let tree = MenuTree::from_data(sample_data());
    let json = serde_json::to_string(&tree.to_data()).unwrap();
    assert!(!json.contains("parent"));
    assert!(!json.contains("current_page"));
    assert!(!json.contains("currentPage"));
}

#[test]
fn test_expanded_survives_round_trip() {
    let mut tree = MenuTree::from_data(sample_data());
    let guides = tree.find_by_name_path(&["Docs", "Guides"]).unwrap();
    tree.get_mut(guides).unwrap().set_expanded(true);

    let reloaded = MenuTree::from_data(tree.to_data());
    let guides = reloaded.find_by_name_path(&["Docs", "Guides"]).unwrap();
    assert!(reloaded.get(guides).unwrap().expanded());
}

// ============================================================================
// Lookup helpers
// ============================================================================

#[test]
fn test_find_by_name_path() {
    let tree = MenuTree::from_data(sample_data());
    assert!(tree.find_by_name_path(&[]).is_some());
    assert!(tree.find_by_name_path(&["Docs", "Guides", "Install"]).is_some());
    assert!(tree.find_by_name_path(&["Docs", "Missing"]).is_none());
    assert!(tree.find_by_name_path(&["Intro"]).is_none());
}

#[test]
fn test_walk_order_is_preorder() {
    let tree = MenuTree::from_data(sample_data());
    let mut names = Vec::new();
    tree.walk(|id, depth| {
        names.push((tree.get(id).unwrap().name.clone(), depth));
    });
    assert_eq!(
        names,
        vec![
            ("Root".to_string(), 0),
            ("Docs".to_string(), 1),
            ("Intro".to_string(), 2),
            ("Guides".to_string(), 2),
            ("Install".to_string(), 3),
            ("About".to_string(), 1),
        ]
    );
}
