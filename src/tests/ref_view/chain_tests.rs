use super::*;

use crate::model::ObjectId;
use crate::ref_view::groups::Group;
use crate::ref_view::row::{GroupId, GroupKind, RowKind};

fn branch(name: &str) -> DisplayRow {
    DisplayRow::entry(
        RowKind::LocalBranch,
        name,
        ObjectId(format!("{name}-oid")),
        GroupId(0),
        1,
    )
}

fn tag(name: &str) -> DisplayRow {
    DisplayRow::entry(RowKind::Tag, name, ObjectId(format!("{name}-oid")), GroupId(1), 1)
}

fn names(chain: &FilterChain) -> Vec<String> {
    chain
        .visible_rows()
        .iter()
        .map(|r| r.name().to_string())
        .collect()
}

fn starts_with(prefix: &'static str) -> Box<dyn RowPredicate> {
    Box::new(move |row: &DisplayRow| row.name().starts_with(prefix))
}

#[test]
fn unfiltered_chain_shows_rows_in_insertion_order() {
    let mut chain = FilterChain::new();
    chain.add(branch("main"));
    chain.add(branch("dev"));
    chain.add(tag("v1"));

    assert_eq!(names(&chain), vec!["main", "dev", "v1"]);
    assert_eq!(chain.filter_depth(), 0);
}

#[test]
fn filter_backfills_from_current_tail() {
    let mut chain = FilterChain::new();
    for name in ["feature/a", "main", "feature/b"] {
        chain.add(branch(name));
    }

    chain.add_filter(starts_with("feature"));
    assert_eq!(names(&chain), vec!["feature/a", "feature/b"]);
    assert_eq!(chain.filter_depth(), 1);
}

#[test]
fn later_rows_pass_through_every_link() {
    let mut chain = FilterChain::new();
    chain.add_filter(starts_with("f"));
    chain.add_filter(Box::new(|row: &DisplayRow| row.name().ends_with('b')));

    for name in ["fa", "fb", "xb", "main"] {
        chain.add(branch(name));
    }

    assert_eq!(names(&chain), vec!["fb"]);
}

#[test]
fn stacked_filters_are_removed_most_recent_first() {
    let mut chain = FilterChain::new();
    for name in ["fa", "fb", "xb"] {
        chain.add(branch(name));
    }
    chain.add_filter(Box::new(|row: &DisplayRow| row.name().ends_with('b')));
    chain.add_filter(starts_with("f"));
    assert_eq!(names(&chain), vec!["fb"]);

    assert!(chain.remove_filter());
    assert_eq!(names(&chain), vec!["fb", "xb"]);

    assert!(chain.remove_filter());
    assert_eq!(names(&chain), vec!["fa", "fb", "xb"]);

    assert!(!chain.remove_filter());
    assert_eq!(chain.filter_depth(), 0);
}

#[test]
fn structural_rows_ignore_filters() {
    let group = Group::new("Branches", GroupKind::LocalBranches, true);
    let mut chain = FilterChain::new();
    chain.add_filter(Box::new(|_: &DisplayRow| false));

    chain.add(DisplayRow::header(&group, GroupId(0)));
    chain.add(DisplayRow::loading(GroupId(0)));
    chain.add(branch("main"));
    chain.add(DisplayRow::spacer());

    let kinds: Vec<RowKind> = chain.visible_rows().iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RowKind::GroupHeader(GroupKind::LocalBranches),
            RowKind::Loading,
            RowKind::Spacer,
        ]
    );
}

#[test]
fn clear_keeps_filters_installed() {
    let mut chain = FilterChain::new();
    chain.add(branch("main"));
    chain.add_filter(starts_with("m"));
    chain.clear();

    assert!(chain.visible_rows().is_empty());
    assert_eq!(chain.filter_depth(), 1);

    chain.add(branch("dev"));
    chain.add(branch("master"));
    assert_eq!(names(&chain), vec!["master"]);
}

#[test]
fn links_share_row_allocations() {
    let mut chain = FilterChain::new();
    chain.add(branch("main"));
    chain.add_filter(starts_with("m"));

    let tail = Arc::clone(&chain.visible_rows()[0]);
    assert!(chain.remove_filter());
    assert!(Arc::ptr_eq(&tail, &chain.visible_rows()[0]));
}
