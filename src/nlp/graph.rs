// Sentence similarity graph.
use std::collections::HashSet;

/// Dense weight matrix, `weights[i][j]` is the edge from sentence i to j.
pub type WeightMatrix = Vec<Vec<f64>>;

/// Token overlap normalized by the log sizes of both sets.
pub fn similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let overlap = a.intersection(b).count() as f64;
    let denominator = (a.len() as f64).ln() + (b.len() as f64).ln();
    if denominator <= 0.0 {
        0.0
    } else {
        overlap / denominator
    }
}

pub fn build_graph(token_sets: &[HashSet<String>]) -> WeightMatrix {
    let n = token_sets.len();
    let mut weights = vec![vec![0.0; n]; n];
    for (i, row) in weights.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            if i != j {
                *cell = similarity(&token_sets[i], &token_sets[j]);
            }
        }
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_similarity_log_normalized() {
        let a = set(&["cats", "mammals", "fur"]);
        let b = set(&["dogs", "mammals", "fur"]);
        let expected = 2.0 / (3.0_f64.ln() * 2.0);
        assert!((similarity(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_empty_set() {
        assert_eq!(similarity(&set(&[]), &set(&["word"])), 0.0);
    }

    #[test]
    fn test_similarity_single_tokens_zero_denominator() {
        // ln(1) + ln(1) == 0
        assert_eq!(similarity(&set(&["same"]), &set(&["same"])), 0.0);
    }

    #[test]
    fn test_build_graph_no_self_loops() {
        let sets = vec![
            set(&["alpha", "beta"]),
            set(&["alpha", "beta"]),
            set(&["gamma", "delta"]),
        ];
        let graph = build_graph(&sets);
        assert_eq!(graph.len(), 3);
        for i in 0..3 {
            assert_eq!(graph[i][i], 0.0);
        }
        assert!(graph[0][1] > 0.0);
        assert_eq!(graph[0][1], graph[1][0]);
        assert_eq!(graph[0][2], 0.0);
    }

    #[test]
    fn test_build_graph_empty() {
        assert!(build_graph(&[]).is_empty());
    }
}
