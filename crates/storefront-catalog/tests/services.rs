//! End-to-end service flows against a scripted gateway.

use std::sync::Arc;

use serde_json::json;
use storefront_catalog::prelude::*;
use storefront_gateway::testing::{record, GatewayCall, RecordingGateway};
use storefront_gateway::{
    FetchResponse, FieldError, GatewayError, MutationResponse, RecordResponse, RecordResult,
};

struct Harness {
    gateway: Arc<RecordingGateway>,
    notifier: Arc<MemoryNotifier>,
    ctx: ServiceContext,
}

fn harness() -> Harness {
    let gateway = Arc::new(RecordingGateway::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let ctx = ServiceContext::new(gateway.clone()).with_notifier(notifier.clone());
    Harness {
        gateway,
        notifier,
        ctx,
    }
}

fn product(id: i64, name: &str, category: &str, rating: f64) -> storefront_gateway::Record {
    record(json!({
        "Id": id,
        "name_c": name,
        "brand_c": "Lumen",
        "category_c": category,
        "price_c": 24.0,
        "rating_c": rating,
        "in_stock_c": true,
        "tags_c": "vegan,bestseller",
        "images_c": ""
    }))
}

fn review(id: i64, product: i64, rating: i64) -> storefront_gateway::Record {
    record(json!({
        "Id": id,
        "product_id_c": product.to_string(),
        "rating_c": rating,
        "title_c": "Review",
        "date_c": "2024-06-01",
        "helpful_c": 0
    }))
}

#[tokio::test]
async fn product_page_flow() {
    let h = harness();
    let products = h.ctx.products();
    let reviews = h.ctx.reviews();

    h.gateway
        .push_lookup(RecordResponse::found(product(1, "Glow Serum", "Skincare", 4.8)));
    let page = products.get_by_id(ProductId::new(1)).await.unwrap();
    assert_eq!(page.tags, vec!["vegan", "bestseller"]);
    assert!(page.images.is_empty());

    h.gateway
        .push_lookup(RecordResponse::found(product(1, "Glow Serum", "Skincare", 4.8)));
    h.gateway.push_fetch(FetchResponse::ok(vec![
        product(2, "Night Cream", "Skincare", 4.6),
        product(3, "Toner", "Skincare", 4.1),
    ]));
    let related = products.get_related(page.id, RELATED_LIMIT).await;
    assert_eq!(related.len(), 2);

    h.gateway.push_fetch(FetchResponse::ok(vec![
        review(10, 1, 5),
        review(11, 1, 5),
        review(12, 1, 3),
        review(13, 1, 1),
    ]));
    let summary = reviews.get_summary(page.id).await;
    assert_eq!(summary.total_reviews, 4);
    assert_eq!(summary.average_rating, 3.5);
    let counts: Vec<u32> = (1..=5).map(|s| summary.rating_distribution.count(s)).collect();
    assert_eq!(counts, vec![1, 0, 1, 0, 2]);

    assert_eq!(h.gateway.call_count(), 4);
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn listing_filter_from_page_params() {
    let h = harness();
    let filter: ProductFilter = serde_json::from_value(json!({
        "category": "Skincare",
        "brand": ["Lumen", "Aura"],
        "priceMin": "10",
        "priceMax": "",
        "sortBy": "price-high"
    }))
    .unwrap();

    h.ctx.products().filter_products(&filter).await;

    let call = h.gateway.last_call().unwrap();
    assert_eq!(call.table(), "product_c");
    let wire = serde_json::to_value(call.fetch_params().unwrap()).unwrap();
    assert_eq!(
        wire["where"],
        json!([
            {"FieldName": "category_c", "Operator": "EqualTo", "Values": ["Skincare"]},
            {"FieldName": "brand_c", "Operator": "EqualTo", "Values": ["Lumen", "Aura"], "Include": true},
            {"FieldName": "price_c", "Operator": "GreaterThanOrEqualTo", "Values": [10.0]}
        ])
    );
    assert_eq!(
        wire["orderBy"],
        json!([{"fieldName": "price_c", "sorttype": "DESC"}])
    );
}

#[tokio::test]
async fn search_wire_shape() {
    let h = harness();
    h.ctx.products().search("Hydrating").await;

    let wire = serde_json::to_value(h.gateway.last_call().unwrap().fetch_params().unwrap()).unwrap();
    let group = &wire["whereGroups"][0];
    assert_eq!(group["operator"], json!("OR"));
    assert_eq!(group["subGroups"][0]["operator"], json!("OR"));
    assert_eq!(
        group["subGroups"][0]["conditions"][0],
        json!({"fieldName": "name_c", "operator": "Contains", "values": ["hydrating"]})
    );
}

#[tokio::test]
async fn partial_batch_keeps_first_success() {
    let h = harness();
    h.gateway.push_mutation(MutationResponse::with_results(vec![
        RecordResult::failed(
            vec![FieldError::new("Slug", "already taken")],
            Some("Record 1 failed".into()),
        ),
        RecordResult::succeeded(record(json!({"Id": 8, "name_c": "Lips", "slug_c": "lips"}))),
    ]));

    let created = h
        .ctx
        .categories()
        .create(&CategoryDraft::new("Lips", "lips"))
        .await
        .unwrap();
    assert_eq!(created.id, CategoryId::new(8));
    assert_eq!(
        h.notifier.messages(),
        vec!["Slug: already taken", "Record 1 failed"]
    );
}

#[tokio::test]
async fn mutations_return_saved_entities() {
    let h = harness();
    let saved = |json| MutationResponse::with_results(vec![RecordResult::succeeded(record(json))]);

    h.gateway
        .push_mutation(saved(json!({"Id": 4, "name_c": "Lips", "slug_c": "lips"})))
        .push_mutation(saved(json!({"Id": 4, "name_c": "Lip Care", "slug_c": "lips"})));
    let categories = h.ctx.categories();
    let created = categories
        .create(&CategoryDraft::new("Lips", "lips"))
        .await
        .unwrap();
    assert_eq!(created.id, CategoryId::new(4));
    let updated = categories
        .update(created.id, &CategoryDraft::new("Lip Care", "lips"))
        .await
        .unwrap();
    assert_eq!(updated.name, "Lip Care");

    h.gateway
        .push_mutation(saved(json!({"Id": 6, "name_c": "Minis", "product_ids_c": "1,2"})))
        .push_mutation(saved(json!({"Id": 6, "name_c": "Minis", "featured_c": true})));
    let collections = h.ctx.collections();
    let created = collections
        .create(&CollectionDraft::new("Minis", "minis"))
        .await
        .unwrap();
    assert_eq!(created.product_ids, vec![ProductId::new(1), ProductId::new(2)]);
    let updated = collections
        .update(created.id, &CollectionDraft::new("Minis", "minis"))
        .await
        .unwrap();
    assert!(updated.featured);

    h.gateway.push_mutation(saved(json!({"Id": 30, "product_id_c": "1", "rating_c": 4})));
    let review = h
        .ctx
        .reviews()
        .create(&ReviewDraft {
            product_id: ProductId::new(1),
            rating: 4,
            title: "Lovely".into(),
            content: "Soft finish".into(),
            reviewer_name: "Sam".into(),
        })
        .await
        .unwrap();
    assert_eq!(review.id, ReviewId::new(30));

    assert_eq!(h.gateway.call_count(), 5);
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn rejected_create_yields_none() {
    let h = harness();
    h.gateway.push_mutation(MutationResponse::failed("slug_c is required"));
    assert!(h
        .ctx
        .collections()
        .create(&CollectionDraft::new("Minis", ""))
        .await
        .is_none());
    assert_eq!(h.notifier.messages(), vec!["slug_c is required"]);
}

#[tokio::test]
async fn bracketed_tag_keeps_listing_intact() {
    let h = harness();
    let mut limited = product(2, "Limited Balm", "Skincare", 4.2);
    limited.insert("tags_c".into(), json!("[Limited] edition, vegan"));
    h.gateway.push_fetch(FetchResponse::ok(vec![
        product(1, "Glow Serum", "Skincare", 4.8),
        limited,
    ]));

    let listing = h.ctx.products().get_all().await;
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[1].tags, vec!["[Limited] edition", "vegan"]);
}

#[tokio::test]
async fn delete_requires_exactly_one_success() {
    let h = harness();
    h.gateway.push_mutation(MutationResponse::with_results(vec![
        RecordResult::succeeded(record(json!({"Id": 1}))),
        RecordResult::succeeded(record(json!({"Id": 2}))),
    ]));
    assert!(!h.ctx.collections().delete(CollectionId::new(1)).await);

    let call = h.gateway.last_call().unwrap();
    match call {
        GatewayCall::Delete { table, params } => {
            assert_eq!(table, "collection_c");
            assert_eq!(params.record_ids, vec![1]);
        }
        other => panic!("expected delete, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_errors_degrade_to_sentinels() {
    let h = harness();
    h.gateway.push_fetch_error(GatewayError::Timeout);
    h.gateway.push_mutation_error(GatewayError::HttpError {
        status: 502,
        message: "bad gateway".into(),
    });
    h.gateway.push_lookup_error(GatewayError::RequestError("reset".into()));

    assert!(h.ctx.categories().get_all().await.is_empty());
    assert!(!h.ctx.categories().delete(CategoryId::new(1)).await);
    assert!(h.ctx.reviews().mark_helpful(ReviewId::new(1)).await.is_none());

    // Transport failures are logged, not shown.
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn try_variants_expose_cause() {
    let h = harness();
    h.gateway.push_fetch(FetchResponse::failed("invalid field"));
    let err = h.ctx.collections().try_get_all().await.unwrap_err();
    assert!(matches!(err, CatalogError::Rejected { ref table, .. } if table == "collection_c"));

    h.gateway.push_fetch_error(GatewayError::Timeout);
    let err = h.ctx.reviews().try_get_all().await.unwrap_err();
    assert!(matches!(err, CatalogError::Gateway(GatewayError::Timeout)));
}

#[test]
fn delimiter_bearing_list_is_rejected() {
    let err = storefront_catalog::decode::encode_list("tags_c", &["dry, oily"]).unwrap_err();
    assert!(matches!(err, CatalogError::Delimiter { ref value, .. } if value == "dry, oily"));
}
