use optree::prelude::*;

use rand::prelude::*;
use rand::rngs::StdRng;

use std::time::Duration;


/// Exhaustive reference search with no pruning and no cache.
/// Same semantics as the solver:
/// a feature is tested at most once per path,
/// both sides of a split must reach `min_support`,
/// and a leaf predicts the weighted majority class.
fn reference_error(
    data: &[Vec<u8>],
    labels: &[usize],
    weights: &[f64],
    cover: &[usize],
    used: &mut Vec<bool>,
    depth: usize,
    min_support: usize,
) -> f64
{
    let n_class = labels.iter().max().unwrap() + 1;
    let mut supports = vec![0.0; n_class];
    for &t in cover {
        supports[labels[t]] += weights[t];
    }
    let total = supports.iter().sum::<f64>();
    let majority = supports.iter().cloned().fold(0.0, f64::max);
    let leaf_error = total - majority;

    if depth == 0 || cover.len() < 2 * min_support {
        return leaf_error;
    }

    let mut best = leaf_error;
    for f in 0..data[0].len() {
        if used[f] {
            continue;
        }
        let (absent, present): (Vec<usize>, Vec<usize>) = cover.iter()
            .copied()
            .partition(|&t| data[t][f] == 0);
        if absent.len() < min_support || present.len() < min_support {
            continue;
        }

        used[f] = true;
        let error = reference_error(
                data, labels, weights, &absent, used, depth - 1, min_support,
            )
            + reference_error(
                data, labels, weights, &present, used, depth - 1, min_support,
            );
        used[f] = false;

        best = best.min(error);
    }
    best
}


fn reference_optimum(
    data: &[Vec<u8>],
    labels: &[usize],
    depth: usize,
    min_support: usize,
) -> f64
{
    let weights = vec![1.0; data.len()];
    let cover = (0..data.len()).collect::<Vec<_>>();
    let mut used = vec![false; data[0].len()];
    reference_error(
        data, labels, &weights, &cover, &mut used, depth, min_support,
    )
}


fn random_dataset(rng: &mut StdRng, n_sample: usize, n_feature: usize)
    -> (Vec<Vec<u8>>, Vec<usize>)
{
    let data = (0..n_sample)
        .map(|_| {
            (0..n_feature).map(|_| rng.gen_range(0..=1)).collect()
        })
        .collect::<Vec<Vec<u8>>>();
    let labels = (0..n_sample)
        .map(|_| rng.gen_range(0..=1usize))
        .collect::<Vec<_>>();
    (data, labels)
}


#[test]
fn perfectly_separable_feature_yields_zero_error() {
    let data = vec![vec![0], vec![0], vec![1], vec![1]];
    let labels = vec![0, 0, 1, 1];

    let tree = solve(&data, &labels, &SearchConfig::new(1, 1)).unwrap();

    assert_eq!(tree.error(), 0.0);
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.n_leaf(), 2);

    let Node::Branch(root) = tree.root() else {
        panic!("expected a split at the root");
    };
    assert_eq!(root.feature(), 0);
    assert_eq!(tree.predict_all(&data), labels);
}


#[test]
fn constant_features_collapse_to_minority_leaf() {
    let data = vec![vec![0, 0]; 5];
    let labels = vec![0, 0, 0, 1, 1];

    let tree = solve(&data, &labels, &SearchConfig::new(3, 1)).unwrap();

    assert_eq!(tree.depth(), 0);
    assert_eq!(tree.n_leaf(), 1);
    // The minority class count.
    assert_eq!(tree.error(), 2.0);
    assert_eq!(tree.predict(&[0, 0]), 0);
}


#[test]
fn min_support_above_half_forces_root_leaf() {
    let data = vec![
        vec![0], vec![0], vec![0], vec![1], vec![1], vec![1],
    ];
    let labels = vec![0, 0, 0, 1, 1, 1];

    // No split can give both children 4 transactions,
    // whatever the depth budget says.
    let tree = solve(&data, &labels, &SearchConfig::new(5, 4)).unwrap();

    assert_eq!(tree.depth(), 0);
    assert_eq!(tree.error(), 3.0);
}


#[test]
fn tie_between_leaf_and_split_prefers_leaf() {
    // The only feature is independent of the labels:
    // splitting gives 1 + 1 errors, the same as the leaf's 2.
    let data = vec![vec![0], vec![1], vec![0], vec![1]];
    let labels = vec![0, 0, 1, 1];

    let tree = solve(&data, &labels, &SearchConfig::new(1, 1)).unwrap();

    assert_eq!(tree.depth(), 0);
    assert_eq!(tree.error(), 2.0);
}


#[test]
fn matches_exhaustive_reference_on_random_datasets() {
    let mut rng = StdRng::seed_from_u64(7);

    for trial in 0..20 {
        let (data, labels) = random_dataset(&mut rng, 12, 4);

        for (depth, min_support) in [(1, 1), (2, 1), (2, 2), (3, 1)] {
            let config = SearchConfig::new(depth, min_support);
            let tree = solve(&data, &labels, &config).unwrap();
            let expected =
                reference_optimum(&data, &labels, depth, min_support);

            assert_eq!(
                tree.error(), expected,
                "trial {trial}, depth {depth}, min_support {min_support}",
            );
            assert!(tree.depth() <= depth);
        }
    }
}


#[test]
fn error_is_monotone_in_depth_and_support() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..10 {
        let (data, labels) = random_dataset(&mut rng, 16, 4);

        let errors = (1..=4)
            .map(|depth| {
                solve(&data, &labels, &SearchConfig::new(depth, 1))
                    .unwrap()
                    .error()
            })
            .collect::<Vec<_>>();
        assert!(errors.windows(2).all(|w| w[1] <= w[0]));

        let loose = solve(&data, &labels, &SearchConfig::new(2, 1))
            .unwrap()
            .error();
        let tight = solve(&data, &labels, &SearchConfig::new(2, 3))
            .unwrap()
            .error();
        assert!(loose <= tight);
    }
}


#[test]
fn rerunning_the_same_search_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(11);
    let (data, labels) = random_dataset(&mut rng, 14, 5);
    let config = SearchConfig::new(3, 2);

    let first = solve(&data, &labels, &config).unwrap();
    let second = solve(&data, &labels, &config).unwrap();

    assert_eq!(first, second);
}


#[test]
fn infeasible_error_budget_finds_no_solution() {
    let data = vec![vec![0], vec![1], vec![0], vec![1]];
    let labels = vec![0, 0, 1, 1];

    // The optimum is 2; prove that nothing beats 1.
    let config = SearchConfig::new(1, 1).error_upper_bound(1.0);
    let result = solve(&data, &labels, &config);

    assert_eq!(result, Err(SearchError::NoSolutionFound));
}


#[test]
fn feasible_error_budget_returns_the_optimum() {
    let data = vec![vec![0], vec![1], vec![0], vec![1]];
    let labels = vec![0, 0, 1, 1];

    let config = SearchConfig::new(1, 1).error_upper_bound(3.0);
    let tree = solve(&data, &labels, &config).unwrap();

    assert_eq!(tree.error(), 2.0);
}


#[test]
fn expired_time_limit_aborts_with_no_solution() {
    let data = vec![vec![0], vec![0], vec![1], vec![1]];
    let labels = vec![0, 0, 1, 1];

    let config = SearchConfig::new(1, 1).time_limit(Duration::ZERO);
    let result = solve(&data, &labels, &config);

    assert_eq!(result, Err(SearchError::NoSolutionFound));
}


#[test]
fn tiny_cache_capacity_exhausts() {
    // Parity labels: the root must expand, which already needs
    // more than two distinct subproblems.
    let data = vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]];
    let labels = vec![0, 1, 1, 0];

    let config = SearchConfig::new(2, 1).max_cache_entries(2);
    let result = solve(&data, &labels, &config);

    assert_eq!(result, Err(SearchError::ResourceExhausted));
}


#[test]
fn dataset_shape_errors_surface_before_searching() {
    let config = SearchConfig::new(2, 1);

    let empty: Vec<Vec<u8>> = Vec::new();
    assert!(matches!(
        solve(&empty, &[], &config),
        Err(SearchError::InvalidDataset(_)),
    ));

    let ragged = vec![vec![0, 1], vec![0]];
    assert!(matches!(
        solve(&ragged, &[0, 1], &config),
        Err(SearchError::InvalidDataset(_)),
    ));

    let non_binary = vec![vec![0], vec![2]];
    assert!(matches!(
        solve(&non_binary, &[0, 1], &config),
        Err(SearchError::InvalidDataset(_)),
    ));

    let data = vec![vec![0], vec![1]];
    assert!(matches!(
        solve(&data, &[0], &config),
        Err(SearchError::InvalidLabels(_)),
    ));
}


#[test]
fn weights_can_flip_the_majority_leaf() {
    // The single feature is constant, so the tree is a leaf;
    // the heavy minority transaction owns the vote.
    let data = vec![vec![0], vec![0], vec![0]];
    let labels = vec![0, 0, 1];
    let weights = vec![1.0, 1.0, 5.0];

    let tree = solve_weighted(
        &data, &labels, &weights, &SearchConfig::new(1, 1),
    ).unwrap();

    assert_eq!(tree.depth(), 0);
    assert_eq!(tree.predict(&[0]), 1);
    assert_eq!(tree.error(), 2.0);
}


#[test]
fn invalid_weights_are_rejected() {
    let data = vec![vec![0], vec![1]];
    let labels = vec![0, 1];
    let config = SearchConfig::new(1, 1);

    assert!(matches!(
        solve_weighted(&data, &labels, &[1.0], &config),
        Err(SearchError::InvalidLabels(_)),
    ));
    assert!(matches!(
        solve_weighted(&data, &labels, &[1.0, -1.0], &config),
        Err(SearchError::InvalidLabels(_)),
    ));
}
