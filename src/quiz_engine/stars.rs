//! Star rating and pass threshold.

/// Maps a 0..=100 score to 0..=3 stars.
pub fn score_to_stars(score: u32) -> u8 {
    if score >= 95 {
        3
    } else if score >= 80 {
        2
    } else if score >= 60 {
        1
    } else {
        0
    }
}

/// A run passes at two stars or better.
pub fn passed(score: u32) -> bool {
    score_to_stars(score) >= 2
}
