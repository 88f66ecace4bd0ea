//! Reviews, helpful votes and rating aggregates.

use super::{or_fallback, or_sentinel, OnReject, ServiceContext};
use crate::catalog::{Entity, Review, ReviewDraft};
use crate::error::CatalogError;
use crate::ids::{ProductId, ReviewId};
use crate::rating::{average_rating, RatingDistribution, ReviewSummary};
use crate::schema::{self, review as fields};
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use storefront_gateway::{Condition, FetchParams, OrderBy, Record};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ReviewService {
    ctx: ServiceContext,
}

impl ReviewService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    fn newest_first() -> FetchParams {
        FetchParams::new(Review::projection()).with_order(OrderBy::desc(fields::DATE))
    }

    /// All reviews, newest first. A rejected fetch is shown to the user.
    pub async fn get_all(&self) -> Vec<Review> {
        or_sentinel("reviews.get_all", self.try_get_all().await)
    }

    pub async fn try_get_all(&self) -> Result<Vec<Review>, CatalogError> {
        self.ctx.fetch(&Self::newest_first(), OnReject::Notify).await
    }

    pub async fn get_by_id(&self, id: ReviewId) -> Option<Review> {
        or_sentinel("reviews.get_by_id", self.try_get_by_id(id).await)
    }

    pub async fn try_get_by_id(&self, id: ReviewId) -> Result<Option<Review>, CatalogError> {
        self.ctx.find(id.get()).await
    }

    /// Reviews of one product, newest first.
    pub async fn get_by_product_id(&self, product: ProductId) -> Vec<Review> {
        or_sentinel(
            "reviews.get_by_product_id",
            self.try_get_by_product_id(product).await,
        )
    }

    pub async fn try_get_by_product_id(
        &self,
        product: ProductId,
    ) -> Result<Vec<Review>, CatalogError> {
        // The foreign key is matched in its string form.
        let params = Self::newest_first()
            .with_condition(Condition::equal_to(fields::PRODUCT_ID, product.to_string()));
        self.ctx.fetch(&params, OnReject::Quiet).await
    }

    /// Submit a review dated today with no helpful votes.
    pub async fn create(&self, draft: &ReviewDraft) -> Option<Review> {
        or_sentinel("reviews.create", self.try_create(draft).await.map(Some))
    }

    pub async fn try_create(&self, draft: &ReviewDraft) -> Result<Review, CatalogError> {
        self.try_create_on(draft, Utc::now().date_naive()).await
    }

    /// Submit a review with an explicit date.
    pub async fn try_create_on(
        &self,
        draft: &ReviewDraft,
        date: NaiveDate,
    ) -> Result<Review, CatalogError> {
        self.ctx.create(draft.to_record(date)).await
    }

    /// Add one helpful vote. `None` if the review does not exist.
    pub async fn mark_helpful(&self, id: ReviewId) -> Option<Review> {
        or_sentinel("reviews.mark_helpful", self.try_mark_helpful(id).await)
    }

    pub async fn try_mark_helpful(&self, id: ReviewId) -> Result<Option<Review>, CatalogError> {
        let Some(current) = self.try_get_by_id(id).await? else {
            debug!(%id, "helpful vote for missing review");
            return Ok(None);
        };
        let mut record = Record::new();
        record.insert(schema::ID.into(), Value::from(id.get()));
        record.insert(fields::HELPFUL.into(), Value::from(current.helpful + 1));
        self.ctx.update(record).await.map(Some)
    }

    /// Mean rating of a product's reviews, to one decimal. 0 when unreviewed.
    pub async fn get_average_rating(&self, product: ProductId) -> f64 {
        or_sentinel(
            "reviews.get_average_rating",
            self.try_get_average_rating(product).await,
        )
    }

    pub async fn try_get_average_rating(&self, product: ProductId) -> Result<f64, CatalogError> {
        let reviews = self.try_get_by_product_id(product).await?;
        Ok(average_rating(&reviews))
    }

    /// Review counts per star level for a product.
    pub async fn get_rating_distribution(&self, product: ProductId) -> RatingDistribution {
        or_sentinel(
            "reviews.get_rating_distribution",
            self.try_get_rating_distribution(product).await,
        )
    }

    pub async fn try_get_rating_distribution(
        &self,
        product: ProductId,
    ) -> Result<RatingDistribution, CatalogError> {
        let reviews = self.try_get_by_product_id(product).await?;
        Ok(RatingDistribution::from_reviews(&reviews))
    }

    /// Count, average and histogram from a single fetch.
    pub async fn get_summary(&self, product: ProductId) -> ReviewSummary {
        or_fallback(
            "reviews.get_summary",
            self.try_get_summary(product).await,
            || ReviewSummary::from_reviews(product, &[]),
        )
    }

    pub async fn try_get_summary(&self, product: ProductId) -> Result<ReviewSummary, CatalogError> {
        let reviews = self.try_get_by_product_id(product).await?;
        Ok(ReviewSummary::from_reviews(product, &reviews))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;
    use serde_json::json;
    use std::sync::Arc;
    use storefront_gateway::testing::{record, GatewayCall, RecordingGateway};
    use storefront_gateway::{
        FetchResponse, FieldError, MutationResponse, RecordResponse, RecordResult,
    };

    fn setup() -> (Arc<RecordingGateway>, Arc<MemoryNotifier>, ReviewService) {
        let gateway = Arc::new(RecordingGateway::new());
        let notifier = Arc::new(MemoryNotifier::new());
        let ctx = ServiceContext::new(gateway.clone()).with_notifier(notifier.clone());
        (gateway, notifier, ctx.reviews())
    }

    fn review(id: i64, rating: i64, helpful: i64) -> Record {
        record(json!({
            "Id": id,
            "product_id_c": 7,
            "rating_c": rating,
            "date_c": "2024-05-01",
            "helpful_c": helpful
        }))
    }

    fn draft() -> ReviewDraft {
        ReviewDraft {
            product_id: ProductId::new(7),
            rating: 4,
            title: "Nice".into(),
            content: "Soft on skin".into(),
            reviewer_name: "Kai".into(),
        }
    }

    #[tokio::test]
    async fn test_by_product_uses_string_key() {
        let (gateway, _, reviews) = setup();
        reviews.get_by_product_id(ProductId::new(7)).await;

        let params = gateway.last_call().unwrap().fetch_params().cloned().unwrap();
        assert_eq!(params.conditions, vec![Condition::equal_to("product_id_c", "7")]);
        assert_eq!(params.order_by, vec![OrderBy::desc("date_c")]);
    }

    #[tokio::test]
    async fn test_average_and_distribution() {
        let (gateway, _, reviews) = setup();
        let page = vec![review(1, 4, 0), review(2, 5, 0), review(3, 5, 0)];
        gateway.push_fetch(FetchResponse::ok(page.clone()));
        gateway.push_fetch(FetchResponse::ok(page));

        assert_eq!(reviews.get_average_rating(ProductId::new(7)).await, 4.7);
        let distribution = reviews.get_rating_distribution(ProductId::new(7)).await;
        assert_eq!(distribution.count(5), 2);
        assert_eq!(distribution.count(4), 1);
        assert_eq!(distribution.total(), 3);
    }

    #[tokio::test]
    async fn test_average_without_reviews() {
        let (_, _, reviews) = setup();
        assert_eq!(reviews.get_average_rating(ProductId::new(7)).await, 0.0);
    }

    #[tokio::test]
    async fn test_summary_on_failure() {
        let (gateway, _, reviews) = setup();
        gateway.push_fetch(FetchResponse::failed("down"));
        let summary = reviews.get_summary(ProductId::new(7)).await;
        assert_eq!(summary.total_reviews, 0);
        assert_eq!(summary.average_rating, 0.0);
    }

    #[tokio::test]
    async fn test_create_stamps_date_and_votes() {
        let (gateway, _, reviews) = setup();
        gateway.push_mutation(MutationResponse::with_results(vec![RecordResult::succeeded(
            review(9, 4, 0),
        )]));

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let created = reviews.try_create_on(&draft(), date).await.unwrap();
        assert_eq!(created.id, ReviewId::new(9));

        let call = gateway.last_call().unwrap();
        let sent = &call.records().unwrap()[0];
        assert_eq!(sent["date_c"], json!("2024-05-01"));
        assert_eq!(sent["helpful_c"], json!(0));
        assert_eq!(sent["rating_c"], json!(4));
    }

    #[tokio::test]
    async fn test_create_today_format() {
        let (gateway, _, reviews) = setup();
        reviews.create(&draft()).await;
        let call = gateway.last_call().unwrap();
        let date = call.records().unwrap()[0]["date_c"].as_str().unwrap().to_string();
        assert!(NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
    }

    #[tokio::test]
    async fn test_create_field_errors_notify() {
        let (gateway, notifier, reviews) = setup();
        gateway.push_mutation(MutationResponse::with_results(vec![RecordResult::failed(
            vec![
                FieldError::new("Rating", "must be between 1 and 5"),
                FieldError::new("Title", "is required"),
            ],
            None,
        )]));

        assert!(reviews.create(&draft()).await.is_none());
        assert_eq!(
            notifier.messages(),
            vec!["Rating: must be between 1 and 5", "Title: is required"]
        );
    }

    #[tokio::test]
    async fn test_mark_helpful_increments() {
        let (gateway, _, reviews) = setup();
        gateway.push_lookup(RecordResponse::found(review(3, 5, 2)));
        gateway.push_mutation(MutationResponse::with_results(vec![RecordResult::succeeded(
            review(3, 5, 3),
        )]));

        let updated = reviews.mark_helpful(ReviewId::new(3)).await.unwrap();
        assert_eq!(updated.helpful, 3);

        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[1], GatewayCall::Update { .. }));
        let sent = &calls[1].records().unwrap()[0];
        assert_eq!(sent["Id"], json!(3));
        assert_eq!(sent["helpful_c"], json!(3));
        assert_eq!(sent.len(), 2);
    }

    #[tokio::test]
    async fn test_mark_helpful_missing_review() {
        let (gateway, _, reviews) = setup();
        assert!(reviews.mark_helpful(ReviewId::new(404)).await.is_none());
        assert_eq!(gateway.call_count(), 1);
    }
}
