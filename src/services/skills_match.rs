use std::collections::BTreeSet;

/// Minimum match rate at which an application is considered ready for review.
pub const READY_FOR_REVIEW_THRESHOLD: f64 = 0.5;

/// Counts `(matched, required)` over the two skill sets. Inputs are treated
/// as sets: duplicates and ordering are ignored, membership is exact and
/// case-sensitive.
pub fn match_counts(required: &[String], having: &[String]) -> (usize, usize) {
    let required: BTreeSet<&str> = required.iter().map(String::as_str).collect();
    let having: BTreeSet<&str> = having.iter().map(String::as_str).collect();
    let matched = required.intersection(&having).count();
    (matched, required.len())
}

/// Fraction of the job's required skills present in the applicant's declared
/// skills. A job with no required skills is a full match.
pub fn match_rate(required: &[String], having: &[String]) -> f64 {
    let (matched, total) = match_counts(required, having);
    if total == 0 {
        return 1.0;
    }
    matched as f64 / total as f64
}

pub fn is_ready_for_review(required: &[String], having: &[String]) -> bool {
    match_rate(required, having) >= READY_FOR_REVIEW_THRESHOLD
}
