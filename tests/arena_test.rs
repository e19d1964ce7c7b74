//! Tests for ThreadArena and selection verification

use rstest::{fixture, rstest};

use threadtrim::application::services::self_test::canonical_thread;
use threadtrim::domain::{verify_selection, DomainError, ThreadArena};

#[fixture]
fn arena() -> ThreadArena {
    ThreadArena::from_thread(&canonical_thread()).unwrap()
}

#[rstest]
fn given_thread_when_flattening_then_records_depth_and_parent(arena: ThreadArena) {
    assert_eq!(arena.len(), 6);
    assert_eq!(arena.height(), 2);
    assert_eq!(arena.depth_of(1), Some(0));
    assert_eq!(arena.depth_of(6), Some(2));
    assert_eq!(arena.parent_id(5), Some(2));
    assert_eq!(arena.parent_id(1), None);
    assert_eq!(arena.depth_of(99), None);
}

#[rstest]
fn given_thread_when_iterating_then_yields_document_order(arena: ThreadArena) {
    let ids: Vec<_> = arena.iter().map(|(_, node)| node.data.id).collect();
    assert_eq!(ids, vec![1, 2, 4, 5, 3, 6]);
}

#[rstest]
fn given_thread_when_rendering_then_children_keep_order(arena: ThreadArena) {
    let tree = arena.to_tree(|data| data.id.to_string());
    let rendered = tree.to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "1");
    assert!(lines[1].ends_with('2'));
    assert!(lines[2].ends_with('4'));
    assert!(lines[5].ends_with('6'));
}

#[rstest]
#[case(vec![1, 2, 5, 3, 6], 2)]
#[case(vec![1, 3], 1)]
#[case(vec![1], 0)]
#[case(vec![], 0)]
fn given_valid_selection_when_verifying_then_ok(
    arena: ThreadArena,
    #[case] ids: Vec<i64>,
    #[case] depth_limit: usize,
) {
    assert_eq!(verify_selection(&arena, &ids, depth_limit), Ok(()));
}

#[rstest]
#[case(vec![1, 2, 5], 1, DomainError::DepthExceeded { id: 5, depth: 2, limit: 1 })]
#[case(vec![1, 6], 2, DomainError::MissingAncestor { id: 6, parent: 3 })]
#[case(vec![2], 2, DomainError::MissingAncestor { id: 2, parent: 1 })]
#[case(vec![1, 3, 2], 2, DomainError::OrderViolation { id: 2 })]
#[case(vec![1, 7], 2, DomainError::UnknownId { id: 7 })]
fn given_invalid_selection_when_verifying_then_reports_violation(
    arena: ThreadArena,
    #[case] ids: Vec<i64>,
    #[case] depth_limit: usize,
    #[case] expected: DomainError,
) {
    assert_eq!(verify_selection(&arena, &ids, depth_limit), Err(expected));
}
