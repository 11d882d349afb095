// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Classification metrics for one trained model against one
// held-out label set.
//
// Computed from true labels and predicted probabilities:
//   - per-class precision / recall / F1 / support table
//   - overall accuracy
//   - scalar precision and recall for the positive class
//   - AUC: trapezoid area under the ROC curve built from the
//     raw scores with positive label 1
//
// Class assignment threshold is fixed at 0.5 — nothing here is
// tunable, matching the experiment's fixed evaluation protocol.
//
// Accuracy alone is useless on imbalanced data (predicting
// "no purchase" for everything scores ~97%), which is exactly
// why the positive-class precision/recall and the threshold-free
// AUC are the headline numbers.
//
// The report is returned as a value with a Display impl;
// printing is the orchestrator's job.

use std::fmt;

/// Precision / recall / F1 / support for a single class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
    pub support:   usize,
}

/// Full evaluation of one model's predictions.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    /// Metrics for class 0 (no purchase)
    pub negative: ClassMetrics,
    /// Metrics for class 1 (purchase)
    pub positive: ClassMetrics,
    /// Fraction of samples classified correctly
    pub accuracy: f64,
    /// Area under the ROC curve; None when the labels are
    /// single-class and no curve exists
    pub auc: Option<f64>,
}

/// Evaluate predicted probabilities against ground-truth labels.
/// Probabilities above 0.5 are classified as purchases.
pub fn evaluate(labels: &[u8], probs: &[f32]) -> EvaluationReport {
    debug_assert_eq!(labels.len(), probs.len());

    let predictions: Vec<u8> = probs.iter().map(|&p| (p > 0.5) as u8).collect();

    let negative = class_metrics(labels, &predictions, 0);
    let positive = class_metrics(labels, &predictions, 1);

    let correct = labels
        .iter()
        .zip(&predictions)
        .filter(|(t, p)| t == p)
        .count();
    let accuracy = if labels.is_empty() {
        0.0
    } else {
        correct as f64 / labels.len() as f64
    };

    EvaluationReport {
        negative,
        positive,
        accuracy,
        auc: roc_auc(labels, probs),
    }
}

/// One-vs-rest precision/recall/F1 for the given class.
/// Zero denominators yield 0.0, not NaN.
fn class_metrics(labels: &[u8], predictions: &[u8], class: u8) -> ClassMetrics {
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;

    for (&t, &p) in labels.iter().zip(predictions) {
        match (t == class, p == class) {
            (true, true)   => tp += 1,
            (false, true)  => fp += 1,
            (true, false)  => fn_ += 1,
            (false, false) => {}
        }
    }

    let precision = safe_ratio(tp, tp + fp);
    let recall    = safe_ratio(tp, tp + fn_);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassMetrics { precision, recall, f1, support: tp + fn_ }
}

fn safe_ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

/// Area under the ROC curve via the trapezoid rule.
///
/// Samples are swept in descending score order; tied scores move
/// the operating point in one step so ties contribute the average
/// of their orderings. Positive label is 1.
///
/// Returns None when either class is absent — a one-class label
/// set has no ROC curve.
fn roc_auc(labels: &[u8], scores: &[f32]) -> Option<f64> {
    let pos = labels.iter().filter(|&&l| l == 1).count();
    let neg = labels.len() - pos;
    if pos == 0 || neg == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..labels.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b].partial_cmp(&scores[a]).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut area    = 0.0f64;
    let mut tp      = 0usize;
    let mut fp      = 0usize;
    let mut prev_tp = 0usize;
    let mut prev_fp = 0usize;

    let mut i = 0;
    while i < order.len() {
        // Consume the whole tie group at this score
        let score = scores[order[i]];
        while i < order.len() && scores[order[i]] == score {
            if labels[order[i]] == 1 {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        // Trapezoid between the previous and current operating points
        area += (fp - prev_fp) as f64 * (tp + prev_tp) as f64 / 2.0;
        prev_tp = tp;
        prev_fp = fp;
    }

    Some(area / (pos as f64 * neg as f64))
}

// ─── Report formatting ────────────────────────────────────────────────────────
impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "classification report")?;
        writeln!(f, "{:>14} {:>10} {:>10} {:>10}", "precision", "recall", "f1-score", "support")?;
        for (name, m) in [("0", &self.negative), ("1", &self.positive)] {
            writeln!(
                f,
                "{:>4} {:>9.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f, "accuracy {:>31.2}", self.accuracy)?;
        writeln!(f, "precision score")?;
        writeln!(f, "{:.6}", self.positive.precision)?;
        writeln!(f, "recall score")?;
        writeln!(f, "{:.6}", self.positive.recall)?;
        writeln!(f, "auc")?;
        match self.auc {
            Some(auc) => writeln!(f, "{auc:.6}"),
            None      => writeln!(f, "undefined (single-class labels)"),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let labels = [0, 0, 1, 1];
        let probs  = [0.1, 0.2, 0.9, 0.8];
        let report = evaluate(&labels, &probs);

        assert_eq!(report.positive.precision, 1.0);
        assert_eq!(report.positive.recall,    1.0);
        assert_eq!(report.negative.precision, 1.0);
        assert_eq!(report.accuracy,           1.0);
        assert_eq!(report.auc,                Some(1.0));
    }

    #[test]
    fn test_known_mixed_case() {
        // Hand-computed: positives score 0.35 and 0.8 against
        // negatives 0.1 and 0.4 → 3 of 4 pairs ranked correctly
        let labels = [0, 0, 1, 1];
        let probs  = [0.1, 0.4, 0.35, 0.8];
        let report = evaluate(&labels, &probs);

        assert_eq!(report.auc, Some(0.75));
        // Predictions at 0.5: [0, 0, 0, 1]
        assert_eq!(report.positive.precision, 1.0);
        assert_eq!(report.positive.recall,    0.5);
        assert_eq!(report.accuracy,           0.75);
    }

    #[test]
    fn test_all_predicted_negative() {
        let labels = [0, 0, 0, 1];
        let probs  = [0.1, 0.1, 0.1, 0.2];
        let report = evaluate(&labels, &probs);

        // No positive predictions → precision and recall are 0, not NaN
        assert_eq!(report.positive.precision, 0.0);
        assert_eq!(report.positive.recall,    0.0);
        assert_eq!(report.negative.recall,    1.0);
        // The lone positive still ranks above every negative
        assert_eq!(report.auc, Some(1.0));
    }

    #[test]
    fn test_single_class_has_no_auc() {
        let labels = [0, 0, 0];
        let probs  = [0.1, 0.5, 0.9];
        assert_eq!(evaluate(&labels, &probs).auc, None);
    }

    #[test]
    fn test_tied_scores_average() {
        // All scores identical → AUC is exactly 0.5 by symmetry
        let labels = [0, 1, 0, 1];
        let probs  = [0.5, 0.5, 0.5, 0.5];
        assert_eq!(evaluate(&labels, &probs).auc, Some(0.5));
    }

    #[test]
    fn test_support_counts() {
        let labels = [0, 0, 0, 1, 1];
        let probs  = [0.1, 0.1, 0.9, 0.9, 0.1];
        let report = evaluate(&labels, &probs);
        assert_eq!(report.negative.support, 3);
        assert_eq!(report.positive.support, 2);
    }

    #[test]
    fn test_report_displays() {
        let report = evaluate(&[0, 1], &[0.2, 0.9]);
        let text   = format!("{report}");
        assert!(text.contains("classification report"));
        assert!(text.contains("precision score"));
        assert!(text.contains("auc"));
    }
}
