use serde::Serialize;

use super::{Section, SectionSource};
use crate::db::models::Review;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialCard {
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub quote: String,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub photos: Vec<String>,
}

impl From<&Review> for TestimonialCard {
    fn from(review: &Review) -> Self {
        Self {
            author: review.author_name.clone(),
            role: None,
            quote: review.review_text.clone(),
            rating: review.rating,
            avatar_url: review.author_image_url.clone(),
            photos: review.photos.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialsView {
    /// Mean rating rounded to one decimal.
    pub average_rating: f64,
    pub count: usize,
    pub items: Vec<TestimonialCard>,
}

fn static_card(quote: &str, author: &str, role: &str) -> TestimonialCard {
    TestimonialCard {
        author: author.to_string(),
        role: Some(role.to_string()),
        quote: quote.to_string(),
        rating: 5,
        avatar_url: None,
        photos: Vec::new(),
    }
}

pub fn static_testimonials() -> Vec<TestimonialCard> {
    vec![
        static_card(
            "Very friendly staff and their work is awesome.",
            "Sneha Reddy",
            "Wedding Client",
        ),
        static_card(
            "They captured every moment beautifully. Highly recommended!",
            "Rahul Sharma",
            "Event Client",
        ),
        static_card(
            "Highly professional and punctual team. Exceptional quality.",
            "Priya Das",
            "Corporate Client",
        ),
    ]
}

pub fn build(items: Vec<TestimonialCard>) -> TestimonialsView {
    let average_rating = if items.is_empty() {
        0.0
    } else {
        let total: i32 = items.iter().map(|c| c.rating).sum();
        (total as f64 / items.len() as f64 * 10.0).round() / 10.0
    };
    TestimonialsView {
        average_rating,
        count: items.len(),
        items,
    }
}

/// Approved reviews only.
pub async fn render(state: &AppState) -> Section<TestimonialsView> {
    match state.cache.approved_reviews(state.reviews.as_ref()).await {
        Ok(reviews) => {
            let cards: Vec<_> = reviews
                .iter()
                .filter(|r| r.is_approved)
                .map(TestimonialCard::from)
                .collect();
            if cards.is_empty() {
                Section::new(SectionSource::FallbackEmpty, build(static_testimonials()))
            } else {
                Section::new(SectionSource::Store, build(cards))
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "reviews unavailable, serving static testimonials");
            Section::new(SectionSource::FallbackError, build(static_testimonials()))
        }
    }
}
