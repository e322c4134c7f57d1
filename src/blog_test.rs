use std::collections::HashSet;

use super::*;

fn entry(uid: &str, approved: bool, author_id: &str) -> BlogEntry {
    BlogEntry {
        uid: uid.into(),
        date: 1_700_000_000_000,
        title: format!("post {uid}"),
        text: Vec::new(),
        approved,
        author: "Tamer".into(),
        author_id: author_id.into(),
        category: DEFAULT_ENTRY_CATEGORY.into(),
    }
}

fn uids(entries: &[BlogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.uid.as_str()).collect()
}

fn mixed() -> Vec<BlogEntry> {
    vec![
        entry("a", true, "u1"),
        entry("b", false, "u2"),
        entry("c", true, "u2"),
        entry("d", false, "u3"),
        entry("e", false, "u1"),
    ]
}

// =============================================================
// partition
// =============================================================

#[test]
fn partition_splits_on_approved_flag() {
    let lists = BlogLists::partition(mixed());
    assert_eq!(uids(lists.published()), vec!["a", "c"]);
    assert_eq!(uids(lists.hidden()), vec!["b", "d", "e"]);
    assert_eq!(lists.all().len(), 5);
}

#[test]
fn partition_is_total_and_disjoint() {
    let lists = BlogLists::partition(mixed());
    let published: HashSet<_> = uids(lists.published()).into_iter().collect();
    let hidden: HashSet<_> = uids(lists.hidden()).into_iter().collect();
    let all: HashSet<_> = uids(lists.all()).into_iter().collect();

    assert!(published.is_disjoint(&hidden));
    assert_eq!(published.union(&hidden).copied().collect::<HashSet<_>>(), all);
    assert!(lists.published().iter().all(|e| e.approved));
    assert!(lists.hidden().iter().all(|e| !e.approved));
}

#[test]
fn partition_of_empty_is_empty() {
    let lists = BlogLists::partition(Vec::new());
    assert!(lists.all().is_empty());
    assert!(lists.published().is_empty());
    assert!(lists.hidden().is_empty());
}

// =============================================================
// approve / hide
// =============================================================

#[test]
fn approve_moves_entry_to_end_of_published() {
    let mut lists = BlogLists::partition(mixed());
    let target = lists.hidden()[0].clone();

    let updated = lists.approve(&target);

    assert!(updated.approved);
    assert_eq!(uids(lists.published()), vec!["a", "c", "b"]);
    assert_eq!(uids(lists.hidden()), vec!["d", "e"]);
    assert!(lists.all().iter().find(|e| e.uid == "b").unwrap().approved);
}

#[test]
fn approve_already_published_entry_keeps_single_copy() {
    let mut lists = BlogLists::partition(mixed());
    let target = lists.published()[0].clone();
    lists.approve(&target);
    assert_eq!(uids(lists.published()), vec!["c", "a"]);
    assert_eq!(lists.hidden().len(), 3);
}

#[test]
fn hide_moves_entry_to_end_of_hidden() {
    let mut lists = BlogLists::partition(mixed());
    let target = lists.published()[1].clone();

    let updated = lists.hide(&target);

    assert!(!updated.approved);
    assert_eq!(uids(lists.published()), vec!["a"]);
    assert_eq!(uids(lists.hidden()), vec!["b", "d", "e", "c"]);
    assert!(!lists.all().iter().find(|e| e.uid == "c").unwrap().approved);
}

// =============================================================
// insert / replace / remove
// =============================================================

#[test]
fn insert_hidden_tracks_author() {
    let mut lists = BlogLists::default();
    assert!(!lists.has_entry_by("u9"));
    lists.insert_hidden(entry("z", false, "u9"));
    assert_eq!(uids(lists.hidden()), vec!["z"]);
    assert!(lists.has_entry_by("u9"));
}

#[test]
fn replace_updates_every_copy() {
    let mut lists = BlogLists::partition(mixed());
    let mut edited = lists.published()[0].clone();
    edited.title = "edited".into();

    lists.replace(&edited);

    assert_eq!(lists.published()[0].title, "edited");
    assert_eq!(lists.all()[0].title, "edited");
}

#[test]
fn remove_drops_entry_everywhere() {
    let mut lists = BlogLists::partition(mixed());
    assert!(lists.remove("c"));
    assert_eq!(uids(lists.published()), vec!["a"]);
    assert!(!uids(lists.all()).contains(&"c"));
    assert!(!lists.remove("c"));
}

#[test]
fn blog_entry_uses_camel_case_wire_names() {
    let json = serde_json::to_value(entry("a", true, "u1")).unwrap();
    assert_eq!(json["authorId"], "u1");
    assert_eq!(json["approved"], true);
}

#[test]
fn now_ms_is_positive() {
    assert!(now_ms() > 0);
}
