// src/domain/scoring.rs

/// Smart Score: 0–100 quality heuristic for a listing. Higher is better.
///
/// Price per sqft band (<300 → 40, <500 → 30, <700 → 20, else 10)
/// + min(beds × 5, 20) + min(baths × 5, 20) + 20, capped at 100.
///
/// A zero `sqft` gives an infinite or NaN ratio and lands in the lowest band.
pub fn calculate_score(price: f64, sqft: f64, beds: u32, baths: u32) -> u32 {
    let price_per_sqft = price / sqft;
    let price_score = if price_per_sqft < 300.0 {
        40
    } else if price_per_sqft < 500.0 {
        30
    } else if price_per_sqft < 700.0 {
        20
    } else {
        10
    };

    let bed_score = beds.saturating_mul(5).min(20);
    let bath_score = baths.saturating_mul(5).min(20);
    let base_score = 20;

    (price_score + bed_score + bath_score + base_score).min(100)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

pub fn score_band(score: u32) -> ScoreBand {
    if score >= 80 {
        ScoreBand::High
    } else if score >= 60 {
        ScoreBand::Medium
    } else {
        ScoreBand::Low
    }
}
