// TextRank over the sentence similarity graph.
use super::graph::{build_graph, WeightMatrix};
use super::tokenize::tokenize;
use std::collections::HashSet;

pub const DAMPING: f64 = 0.85;
pub const ITERATIONS: usize = 20;
const EPSILON: f64 = 1e-9;

/// Runs exactly `ITERATIONS` rounds from an all-ones start; there is no
/// convergence check. Rows that sum to zero contribute nothing.
pub fn rank(weights: &WeightMatrix) -> Vec<f64> {
    rank_rounds(weights, ITERATIONS)
}

fn rank_rounds(weights: &WeightMatrix, rounds: usize) -> Vec<f64> {
    let n = weights.len();
    let row_sums: Vec<f64> = weights.iter().map(|row| row.iter().sum()).collect();

    let mut scores = vec![1.0; n];
    for _ in 0..rounds {
        let next: Vec<f64> = (0..n)
            .map(|i| {
                let incoming: f64 = (0..n)
                    .filter(|&j| j != i && weights[j][i] > 0.0)
                    .map(|j| weights[j][i] / (row_sums[j] + EPSILON) * scores[j])
                    .sum();
                (1.0 - DAMPING) + DAMPING * incoming
            })
            .collect();
        scores = next;
    }
    scores
}

/// Indices of the `k` best-scored entries, returned in ascending index order.
/// Equal scores keep the lower index first.
pub fn top_k_in_order(scores: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // stable sort, so ties stay in index order
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(k);
    order.sort_unstable();
    order
}

/// Builds the graph for one window of sentences, ranks it and joins the
/// top `k` sentences in document order.
pub fn rank_and_select(sentences: &[String], k: usize) -> String {
    if sentences.is_empty() {
        return String::new();
    }

    let token_sets: Vec<HashSet<String>> = sentences.iter().map(|s| tokenize(s)).collect();
    let graph = build_graph(&token_sets);
    let scores = rank(&graph);

    top_k_in_order(&scores, k)
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_isolated_nodes_get_baseline() {
        let weights = vec![vec![0.0; 3]; 3];
        let scores = rank(&weights);
        for s in scores {
            assert!((s - (1.0 - DAMPING)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rank_hub_scores_highest() {
        // node 0 is linked to everyone, 1 and 2 only to node 0
        let weights = vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
        ];
        let scores = rank(&weights);
        assert!(scores[0] > scores[1]);
        assert!((scores[1] - scores[2]).abs() < 1e-12);
    }

    #[test]
    fn test_rank_is_deterministic() {
        let weights = vec![
            vec![0.0, 0.4, 0.2],
            vec![0.4, 0.0, 0.7],
            vec![0.2, 0.7, 0.0],
        ];
        assert_eq!(rank(&weights), rank(&weights));
    }

    #[test]
    fn test_rank_empty_graph() {
        assert!(rank(&Vec::new()).is_empty());
    }

    fn asymmetric_fixture() -> WeightMatrix {
        vec![
            vec![0.0, 0.6, 0.2],
            vec![0.3, 0.0, 0.0],
            vec![0.5, 0.9, 0.0],
        ]
    }

    fn assert_scores(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "got {:?}, expected {:?}", actual, expected);
        }
    }

    #[test]
    fn test_rank_matches_hand_computed_scores() {
        // d = 0.85, eps = 1e-9, 20 rounds from all ones
        let expected = [1.331649706987709, 1.2354127040407255, 0.43293755581192606];
        assert_scores(&rank(&asymmetric_fixture()), &expected);
    }

    #[test]
    fn test_rank_runs_exactly_twenty_rounds() {
        let weights = asymmetric_fixture();
        let twenty = rank(&weights);
        assert_eq!(twenty, rank_rounds(&weights, 20));

        let nineteen = [1.3314708525439904, 1.235535583185726, 0.43299353135101487];
        let twenty_one = [1.331528267140453, 1.235496137114616, 0.43297556238116874];
        assert_scores(&rank_rounds(&weights, 19), &nineteen);
        assert_scores(&rank_rounds(&weights, 21), &twenty_one);
        assert!((twenty[0] - nineteen[0]).abs() > 1e-6);
        assert!((twenty[0] - twenty_one[0]).abs() > 1e-6);
    }

    #[test]
    fn test_top_k_ties_prefer_lower_index() {
        let scores = vec![0.5, 0.9, 0.5, 0.5];
        assert_eq!(top_k_in_order(&scores, 2), vec![0, 1]);
        assert_eq!(top_k_in_order(&scores, 3), vec![0, 1, 2]);
    }

    #[test]
    fn test_top_k_returns_document_order() {
        let scores = vec![0.1, 0.2, 0.9, 0.8];
        assert_eq!(top_k_in_order(&scores, 2), vec![2, 3]);
        assert_eq!(top_k_in_order(&scores, 10), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rank_and_select_keeps_central_sentence() {
        let sentences: Vec<String> = vec![
            "Rust compilers check memory safety at compile time.",
            "The weather outside was sunny and warm yesterday.",
            "Memory safety in Rust comes from the borrow checker.",
            "Rust compilers and the borrow checker enforce memory safety.",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let summary = rank_and_select(&sentences, 1);
        assert_eq!(summary, sentences[3]);
    }

    #[test]
    fn test_rank_and_select_empty_window() {
        assert_eq!(rank_and_select(&[], 3), "");
    }
}
