//! Review commands.

use anyhow::{bail, Context as _, Result};
use storefront_catalog::prelude::*;

use super::{ReviewsArgs, ReviewsCommand};
use crate::context::Context;
use crate::output::{bar, stars, Output};

/// Run the reviews command.
pub async fn run(args: ReviewsArgs, ctx: &Context) -> Result<()> {
    let reviews = ctx.services()?.reviews();
    let output = &ctx.output;

    match args.command {
        ReviewsCommand::List => {
            let spinner = output.spinner("Fetching reviews...");
            let found = reviews.try_get_all().await;
            spinner.finish_and_clear();
            print_reviews(output, "Reviews", &found.context("Failed to fetch reviews")?);
        }
        ReviewsCommand::Get { id } => {
            let found = reviews
                .try_get_by_id(ReviewId::new(id))
                .await
                .context("Failed to fetch review")?;
            match found {
                Some(review) => print_reviews(output, &format!("Review {id}"), &[review]),
                None => bail!("Review {} not found", id),
            }
        }
        ReviewsCommand::Product { id } => {
            let spinner = output.spinner("Fetching reviews...");
            let found = reviews.try_get_by_product_id(ProductId::new(id)).await;
            spinner.finish_and_clear();
            print_reviews(
                output,
                &format!("Reviews of product {id}"),
                &found.context("Failed to fetch reviews")?,
            );
        }
        ReviewsCommand::Summary { id } => {
            let spinner = output.spinner("Summarizing reviews...");
            let summary = reviews.try_get_summary(ProductId::new(id)).await;
            spinner.finish_and_clear();
            print_summary(output, &summary.context("Failed to summarize reviews")?);
        }
        ReviewsCommand::Create {
            product,
            rating,
            title,
            content,
            name,
        } => {
            let draft = ReviewDraft {
                product_id: ProductId::new(product),
                rating,
                title,
                content,
                reviewer_name: name,
            };
            let created = reviews
                .try_create(&draft)
                .await
                .context("Failed to submit review")?;
            output.success(&format!("Submitted review {}", created.id));
            print_reviews(output, "Review", &[created]);
        }
        ReviewsCommand::Helpful { id } => {
            let updated = reviews
                .try_mark_helpful(ReviewId::new(id))
                .await
                .context("Failed to record helpful vote")?;
            match updated {
                Some(review) => {
                    output.success(&format!("Review {} now has {} helpful votes", id, review.helpful));
                    if output.is_json() {
                        output.json(&review);
                    }
                }
                None => bail!("Review {} not found", id),
            }
        }
    }

    Ok(())
}

fn print_reviews(output: &Output, title: &str, reviews: &[Review]) {
    if output.is_json() {
        output.json(&reviews);
        return;
    }
    output.header(title);
    if reviews.is_empty() {
        output.info("No reviews yet");
        return;
    }
    for review in reviews {
        println!();
        println!(
            "  {} {}  {}",
            stars(review.rating as f64),
            review.title,
            console::style(&review.date).dim()
        );
        output.kv("by", &review.reviewer_name);
        output.kv("product", &review.product_id.to_string());
        if !review.content.is_empty() {
            output.kv("review", &review.content);
        }
        output.kv("helpful", &review.helpful.to_string());
    }
}

fn print_summary(output: &Output, summary: &ReviewSummary) {
    if output.is_json() {
        output.json(summary);
        return;
    }
    output.header(&format!("Product {} reviews", summary.product_id));
    output.kv(
        "average",
        &format!(
            "{} {:.1}",
            stars(summary.average_rating),
            summary.average_rating
        ),
    );
    output.kv("reviews", &summary.total_reviews.to_string());
    for (level, count) in summary.rating_distribution.levels() {
        let percentage = summary.rating_distribution.percentage(level);
        println!("  {} {} {:>4}", level, bar(percentage, 20), count);
    }
}
