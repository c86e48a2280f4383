use optree::prelude::*;


fn depth_two_tree() -> Tree {
    // Parity labels force a full depth-2 tree.
    let data = vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]];
    let labels = vec![0, 1, 1, 0];
    solve(&data, &labels, &SearchConfig::new(2, 1)).unwrap()
}


#[test]
fn prediction_walks_every_branch() {
    let tree = depth_two_tree();

    assert_eq!(tree.error(), 0.0);
    assert_eq!(tree.depth(), 2);
    assert_eq!(tree.n_leaf(), 4);

    assert_eq!(tree.predict(&[0, 0]), 0);
    assert_eq!(tree.predict(&[0, 1]), 1);
    assert_eq!(tree.predict(&[1, 0]), 1);
    assert_eq!(tree.predict(&[1, 1]), 0);
}


#[test]
fn free_function_predict_matches_the_method() {
    let tree = depth_two_tree();

    for row in [[0, 0], [0, 1], [1, 0], [1, 1]] {
        assert_eq!(predict(&tree, &row), tree.predict(&row));
    }
}


#[test]
fn trees_survive_a_json_round_trip() {
    let tree = depth_two_tree();

    let json = tree.to_json();
    let restored = Tree::from_json(&json).unwrap();

    assert_eq!(tree, restored);
}


#[test]
fn root_accessor_exposes_the_chosen_split() {
    let data = vec![vec![0, 1], vec![0, 1], vec![1, 0], vec![1, 0]];
    let labels = vec![0, 0, 1, 1];

    // Both features separate perfectly; the tie goes to feature 0.
    let tree = solve(&data, &labels, &SearchConfig::new(1, 1)).unwrap();

    let Node::Branch(root) = tree.root() else {
        panic!("expected a split at the root");
    };
    assert_eq!(root.feature(), 0);

    let Node::Leaf(left) = root.left() else {
        panic!("expected a leaf below the root");
    };
    assert_eq!(left.value(), 0);
    assert_eq!(left.error(), 0.0);
}
