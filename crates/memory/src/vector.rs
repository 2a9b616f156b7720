//! Vector similarity utilities shared by the memory stores.

use taskforge_core::memory::ContextItem;

/// Cosine similarity of two vectors, in [-1, 1].
///
/// 1 means same direction, 0 orthogonal, -1 opposite. Degenerate inputs
/// (length mismatch, empty, zero magnitude) score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    // Accumulate in f64 so long low-precision vectors do not drift.
    let (dot, norm_a, norm_b) = a.iter().zip(b).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    let magnitude = norm_a.sqrt() * norm_b.sqrt();
    if magnitude < 1e-10 {
        return 0.0;
    }

    (dot / magnitude) as f32
}

/// Sort items by descending score.
///
/// Backends are assumed to return results best-first already; every store
/// still re-sorts before handing items to the caller.
pub fn sort_by_score(items: &mut [ContextItem]) {
    items.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskforge_core::thought::{ThoughtKind, ThoughtMetadata};

    fn item(id: &str, score: f32) -> ContextItem {
        ContextItem {
            id: id.into(),
            score,
            metadata: ThoughtMetadata::new("task", "result", ThoughtKind::InternalThought),
            vector: Vec::new(),
        }
    }

    #[test]
    fn identical_vectors_score_one() {
        let v = [0.3, -1.2, 4.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        assert!(cosine_similarity(&[2.0, 0.0], &[0.0, 3.0]).abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_score_negative_one() {
        let sim = cosine_similarity(&[0.5, -0.5], &[-0.5, 0.5]);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_inputs_score_zero() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[4.0, 4.0]), 0.0);
    }

    #[test]
    fn similarity_ignores_magnitude() {
        // Scaling one vector must not change the angle between them.
        let base = cosine_similarity(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
        let scaled = cosine_similarity(&[10.0, 20.0, 30.0], &[3.0, 2.0, 1.0]);
        assert!((base - scaled).abs() < 1e-6);
    }

    #[test]
    fn known_forty_five_degree_value() {
        // cos(45 deg) = 1/sqrt(2)
        let sim = cosine_similarity(&[1.0, 1.0], &[0.0, 1.0]);
        assert!((sim - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn sort_by_score_is_descending() {
        let mut items = vec![item("low", 0.1), item("high", 0.9), item("mid", 0.5)];
        sort_by_score(&mut items);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
    }

    #[test]
    fn sort_by_score_keeps_equal_scores_in_order() {
        let mut items = vec![item("first", 0.5), item("second", 0.5), item("third", 0.5)];
        sort_by_score(&mut items);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }
}
