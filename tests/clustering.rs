use optree::prelude::*;


fn hamming(data: &[Vec<u8>]) -> impl Fn(usize, usize) -> f64 + Sync + '_ {
    |s, t| {
        data[s].iter()
            .zip(&data[t])
            .filter(|(a, b)| a != b)
            .count() as f64
    }
}


#[test]
fn two_tight_blocks_split_into_two_clusters() {
    let data = vec![
        vec![0, 0], vec![0, 0], vec![1, 1], vec![1, 1],
    ];

    let partition = solve_clusters(
        &data, hamming(&data), &SearchConfig::new(1, 1),
    ).unwrap();

    assert_eq!(partition.n_cluster(), 2);
    assert_eq!(partition.dissimilarity(), 0.0);
    assert_eq!(partition.assignments(), &[0, 0, 1, 1]);
    assert_eq!(partition.medoids(), &[0, 2]);

    assert_eq!(partition.assign(&[0, 0]), 0);
    assert_eq!(partition.assign(&[1, 1]), 1);
}


#[test]
fn support_constraint_forces_one_cluster() {
    let data = vec![
        vec![0, 0], vec![0, 0], vec![1, 1], vec![1, 1],
    ];

    // No side of any split can hold 3 of the 4 transactions
    // here, so the root stays a single cluster.
    let partition = solve_clusters(
        &data, hamming(&data), &SearchConfig::new(2, 3),
    ).unwrap();

    assert_eq!(partition.n_cluster(), 1);
    assert_eq!(partition.assignments(), &[0, 0, 0, 0]);
    // Medoid cost ties everywhere; the lowest id wins.
    assert_eq!(partition.medoids(), &[0]);
    assert_eq!(partition.dissimilarity(), 4.0);
}


#[test]
fn deeper_partitions_never_increase_dissimilarity() {
    let data = vec![
        vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1],
        vec![0, 0], vec![1, 1],
    ];

    let shallow = solve_clusters(
        &data, hamming(&data), &SearchConfig::new(1, 1),
    ).unwrap();
    let deep = solve_clusters(
        &data, hamming(&data), &SearchConfig::new(2, 1),
    ).unwrap();

    assert!(deep.dissimilarity() <= shallow.dissimilarity());
    assert!(deep.n_cluster() >= shallow.n_cluster());
}


#[test]
fn every_transaction_lands_in_its_own_assigned_cluster() {
    let data = vec![
        vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1],
    ];

    let partition = solve_clusters(
        &data, hamming(&data), &SearchConfig::new(2, 1),
    ).unwrap();

    for (t, row) in data.iter().enumerate() {
        assert_eq!(partition.assign(row), partition.assignments()[t]);
    }
}
