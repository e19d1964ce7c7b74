//! Tests for select_optimal_comments

use rstest::{fixture, rstest};

use threadtrim::application::services::self_test::canonical_thread;
use threadtrim::domain::{select, select_optimal_comments, verify_selection, CommentId, CommentNode, ThreadArena};
use threadtrim::util::testing;

//      1 (+10)
//     /       \
//   2 (+5)    3 (-3)
//   /   \        \
// 4(-2) 5(+8)    6(+7)
#[fixture]
fn canonical() -> CommentNode {
    testing::init_test_setup();
    canonical_thread()
}

#[rstest]
fn given_canonical_thread_when_selecting_at_depth_two_then_selects_1_2_5_3_6(canonical: CommentNode) {
    let selection = select(&canonical, 2);

    assert_eq!(selection.ids, vec![1, 2, 5, 3, 6]);
    assert_eq!(selection.score, 27.0);
}

#[rstest]
#[case(0, vec![1], 10.0)]
#[case(1, vec![1, 2], 15.0)]
#[case(2, vec![1, 2, 5, 3, 6], 27.0)]
#[case(9, vec![1, 2, 5, 3, 6], 27.0)]
fn given_canonical_thread_when_varying_depth_then_selects_expected(
    canonical: CommentNode,
    #[case] depth_limit: usize,
    #[case] expected: Vec<CommentId>,
    #[case] score: f64,
) {
    let selection = select(&canonical, depth_limit);

    assert_eq!(selection.ids, expected);
    assert_eq!(selection.score, score);
}

#[rstest]
fn given_same_input_when_selecting_twice_then_output_is_identical(canonical: CommentNode) {
    assert_eq!(
        select_optimal_comments(&canonical, 2),
        select_optimal_comments(&canonical, 2)
    );
}

#[test]
fn given_all_negative_replies_when_selecting_then_only_root_remains() {
    let thread = CommentNode::new(1, 3.0).with_children(vec![
        CommentNode::new(2, -1.0).with_children(vec![CommentNode::new(4, -2.0)]),
        CommentNode::new(3, -5.0),
    ]);

    assert_eq!(select_optimal_comments(&thread, 10), vec![1]);
}

#[rstest]
#[case(5.0, vec![1])]
#[case(0.0, vec![1])]
#[case(-0.5, vec![])]
fn given_lone_root_when_selecting_then_kept_iff_non_negative(
    #[case] score: f64,
    #[case] expected: Vec<CommentId>,
) {
    assert_eq!(select_optimal_comments(&CommentNode::new(1, score), 3), expected);
}

#[test]
fn given_negative_reply_hiding_strong_reply_when_depth_allows_then_both_selected() {
    let thread = CommentNode::new(1, 1.0).with_children(vec![
        CommentNode::new(2, -1.0).with_children(vec![CommentNode::new(3, 5.0)])
    ]);

    assert_eq!(select(&thread, 2).ids, vec![1, 2, 3]);
    assert_eq!(select(&thread, 1).ids, vec![1]);
}

#[test]
fn given_zero_score_reply_when_selecting_then_reply_is_dropped() {
    // Ties below the root go to the excluded regime, ties at the root to the included one
    let thread = CommentNode::new(1, 0.0).with_children(vec![CommentNode::new(2, 0.0)]);

    assert_eq!(select_optimal_comments(&thread, 1), vec![1]);
}

#[rstest]
#[case(10.0, vec![1, 2])]
#[case(3.0, vec![])]
fn given_negative_root_when_selecting_then_root_kept_only_if_replies_pay_for_it(
    #[case] reply_score: f64,
    #[case] expected: Vec<CommentId>,
) {
    let thread = CommentNode::new(1, -5.0).with_children(vec![CommentNode::new(2, reply_score)]);

    assert_eq!(select_optimal_comments(&thread, 1), expected);
}

// ============================================================
// Property checks against exhaustive search
// ============================================================

/// Small deterministic generator so failures are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

struct Flat {
    scores: Vec<f64>,
    parents: Vec<Option<usize>>,
    depths: Vec<usize>,
}

fn random_thread(seed: u64, size: usize) -> (CommentNode, Flat) {
    let mut rng = Lcg(seed);
    let mut flat = Flat {
        scores: Vec::new(),
        parents: Vec::new(),
        depths: Vec::new(),
    };
    for i in 0..size {
        let parent = if i == 0 { None } else { Some(rng.below(i as u64) as usize) };
        let depth = parent.map_or(0, |p| flat.depths[p] + 1);
        flat.scores.push(rng.below(21) as f64 - 10.0);
        flat.depths.push(depth);
        flat.parents.push(parent);
    }

    fn build(i: usize, flat: &Flat) -> CommentNode {
        let children = (0..flat.parents.len())
            .filter(|&c| flat.parents[c] == Some(i))
            .map(|c| build(c, flat))
            .collect();
        CommentNode::new(i as CommentId + 100, flat.scores[i]).with_children(children)
    }

    (build(0, &flat), flat)
}

/// Best score over every ancestor-closed, depth-bounded subset.
fn brute_force_best(flat: &Flat, depth_limit: usize) -> f64 {
    let n = flat.scores.len();
    let mut best = 0.0;
    for mask in 1u32..(1 << n) {
        let chosen = |i: usize| mask & (1 << i) != 0;
        let valid = (0..n).filter(|&i| chosen(i)).all(|i| {
            flat.depths[i] <= depth_limit && flat.parents[i].map_or(true, chosen)
        });
        if valid {
            let total: f64 = (0..n).filter(|&i| chosen(i)).map(|i| flat.scores[i]).sum();
            if total > best {
                best = total;
            }
        }
    }
    best
}

#[rstest]
fn given_random_threads_when_selecting_then_result_is_valid_and_optimal(
    #[values(1, 7, 42, 1234, 99991)] seed: u64,
    #[values(0, 1, 2, 4)] depth_limit: usize,
) {
    let (thread, flat) = random_thread(seed, 10);
    let arena = ThreadArena::from_thread(&thread).unwrap();

    let selection = select(&thread, depth_limit);

    verify_selection(&arena, &selection.ids, depth_limit).unwrap();
    let selected_total: f64 = selection
        .ids
        .iter()
        .map(|&id| flat.scores[(id - 100) as usize])
        .sum();
    assert_eq!(selected_total, selection.score);
    assert_eq!(selection.score, brute_force_best(&flat, depth_limit));

    if depth_limit == 0 {
        assert!(selection.ids.is_empty() || selection.ids == vec![thread.id]);
    }
}
