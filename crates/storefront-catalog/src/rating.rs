//! Review aggregation: average rating and star histogram.

use crate::catalog::Review;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest star rating.
pub const MIN_STARS: u8 = 1;
/// Highest star rating.
pub const MAX_STARS: u8 = 5;

/// Mean rating rounded half-up to one decimal. No reviews yields 0.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: i64 = reviews.iter().map(|r| r.rating).sum();
    let mean = total as f64 / reviews.len() as f64;
    round_tenths(mean)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Clamp a raw rating into the star range.
pub fn clamp_stars(rating: i64) -> u8 {
    rating.clamp(MIN_STARS as i64, MAX_STARS as i64) as u8
}

/// Review counts per star level.
///
/// Out-of-range ratings are clamped into 1..=5, so [`total`](Self::total)
/// always equals the number of reviews counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<u8, u32>", from = "BTreeMap<u8, u32>")]
pub struct RatingDistribution {
    buckets: [u32; MAX_STARS as usize],
}

impl RatingDistribution {
    /// Count each review into its star bucket.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut distribution = Self::default();
        for review in reviews {
            distribution.add(review.rating);
        }
        distribution
    }

    /// Count one rating.
    pub fn add(&mut self, rating: i64) {
        let stars = clamp_stars(rating);
        self.buckets[(stars - MIN_STARS) as usize] += 1;
    }

    /// Reviews with exactly `stars` stars. Levels outside 1..=5 are 0.
    pub fn count(&self, stars: u8) -> u32 {
        if (MIN_STARS..=MAX_STARS).contains(&stars) {
            self.buckets[(stars - MIN_STARS) as usize]
        } else {
            0
        }
    }

    /// Number of reviews counted.
    pub fn total(&self) -> u32 {
        self.buckets.iter().sum()
    }

    /// Share of reviews at a star level, 0 to 100.
    pub fn percentage(&self, stars: u8) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(stars) as f64 / total as f64 * 100.0
    }

    /// `(stars, count)` pairs from 5 stars down to 1.
    pub fn levels(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        (MIN_STARS..=MAX_STARS).rev().map(|stars| (stars, self.count(stars)))
    }
}

impl From<RatingDistribution> for BTreeMap<u8, u32> {
    fn from(distribution: RatingDistribution) -> Self {
        (MIN_STARS..=MAX_STARS)
            .map(|stars| (stars, distribution.count(stars)))
            .collect()
    }
}

impl From<BTreeMap<u8, u32>> for RatingDistribution {
    fn from(map: BTreeMap<u8, u32>) -> Self {
        let mut distribution = Self::default();
        for stars in MIN_STARS..=MAX_STARS {
            distribution.buckets[(stars - MIN_STARS) as usize] =
                map.get(&stars).copied().unwrap_or(0);
        }
        distribution
    }
}

/// Review count, average and histogram for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub product_id: ProductId,
    pub total_reviews: u32,
    pub average_rating: f64,
    pub rating_distribution: RatingDistribution,
}

impl ReviewSummary {
    /// Summarize the reviews of one product.
    pub fn from_reviews(product_id: ProductId, reviews: &[Review]) -> Self {
        let rating_distribution = RatingDistribution::from_reviews(reviews);
        Self {
            product_id,
            total_reviews: rating_distribution.total(),
            average_rating: average_rating(reviews),
            rating_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ReviewId;

    fn reviews(ratings: &[i64]) -> Vec<Review> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, rating)| Review {
                id: ReviewId::new(i as i64 + 1),
                product_id: ProductId::new(1),
                rating: *rating,
                title: String::new(),
                content: String::new(),
                reviewer_name: String::new(),
                date: "2024-01-01".into(),
                helpful: 0,
            })
            .collect()
    }

    #[test]
    fn test_average_empty() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn test_average_rounding() {
        assert_eq!(average_rating(&reviews(&[4, 5, 5])), 4.7);
        assert_eq!(average_rating(&reviews(&[4, 4, 4, 5])), 4.3);
        assert_eq!(average_rating(&reviews(&[3])), 3.0);
        assert_eq!(average_rating(&reviews(&[1, 2])), 1.5);
    }

    #[test]
    fn test_distribution() {
        let d = RatingDistribution::from_reviews(&reviews(&[5, 5, 3, 1]));
        assert_eq!(d.count(1), 1);
        assert_eq!(d.count(2), 0);
        assert_eq!(d.count(3), 1);
        assert_eq!(d.count(4), 0);
        assert_eq!(d.count(5), 2);
        assert_eq!(d.total(), 4);
        assert_eq!(d.percentage(5), 50.0);
        assert_eq!(d.count(9), 0);
    }

    #[test]
    fn test_distribution_clamps() {
        let d = RatingDistribution::from_reviews(&reviews(&[0, -2, 7, 3]));
        assert_eq!(d.count(1), 2);
        assert_eq!(d.count(5), 1);
        assert_eq!(d.total(), 4);
    }

    #[test]
    fn test_empty_distribution() {
        let d = RatingDistribution::default();
        assert_eq!(d.total(), 0);
        assert_eq!(d.percentage(3), 0.0);
        let levels: Vec<_> = d.levels().collect();
        assert_eq!(levels, vec![(5, 0), (4, 0), (3, 0), (2, 0), (1, 0)]);
    }

    #[test]
    fn test_distribution_serializes_keyed_by_stars() {
        let d = RatingDistribution::from_reviews(&reviews(&[5, 4]));
        let json = serde_json::to_value(d).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"1": 0, "2": 0, "3": 0, "4": 1, "5": 1})
        );
        let back: RatingDistribution = serde_json::from_value(json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_summary() {
        let summary = ReviewSummary::from_reviews(ProductId::new(1), &reviews(&[4, 5, 5]));
        assert_eq!(summary.total_reviews, 3);
        assert_eq!(summary.average_rating, 4.7);
        assert_eq!(summary.rating_distribution.count(5), 2);
    }
}
