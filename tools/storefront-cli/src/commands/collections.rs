//! Collection commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use storefront_catalog::catalog::slugify;
use storefront_catalog::prelude::*;

use super::{CollectionFields, CollectionsArgs, CollectionsCommand};
use crate::context::Context;
use crate::output::Output;

/// Run the collections command.
pub async fn run(args: CollectionsArgs, ctx: &Context) -> Result<()> {
    let collections = ctx.services()?.collections();
    let output = &ctx.output;

    match args.command {
        CollectionsCommand::List => {
            let spinner = output.spinner("Fetching collections...");
            let found = collections.try_get_all().await;
            spinner.finish_and_clear();
            print_collections(output, "Collections", &found.context("Failed to fetch collections")?);
        }
        CollectionsCommand::Featured => {
            let spinner = output.spinner("Fetching featured collections...");
            let found = collections.try_get_featured().await;
            spinner.finish_and_clear();
            print_collections(
                output,
                "Featured collections",
                &found.context("Failed to fetch featured collections")?,
            );
        }
        CollectionsCommand::Get { id } => {
            let found = collections
                .try_get_by_id(CollectionId::new(id))
                .await
                .context("Failed to fetch collection")?;
            match found {
                Some(collection) => print_collection(output, &collection),
                None => bail!("Collection {} not found", id),
            }
        }
        CollectionsCommand::Slug { slug } => {
            let found = collections
                .try_get_by_slug(&slug)
                .await
                .context("Failed to fetch collection")?;
            match found {
                Some(collection) => print_collection(output, &collection),
                None => bail!("No collection with slug '{}'", slug),
            }
        }
        CollectionsCommand::Create(fields) => {
            let created = collections
                .try_create(&to_draft(fields))
                .await
                .context("Failed to create collection")?;
            output.success(&format!("Created collection {} ({})", created.name, created.id));
            print_collection(output, &created);
        }
        CollectionsCommand::Update { id, fields } => {
            let updated = collections
                .try_update(CollectionId::new(id), &to_draft(fields))
                .await
                .context("Failed to update collection")?;
            output.success(&format!("Updated collection {}", updated.id));
            print_collection(output, &updated);
        }
        CollectionsCommand::Delete { id, yes } => {
            if !yes && !output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete collection {id}?"))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    output.warn("Delete cancelled");
                    return Ok(());
                }
            }
            collections
                .try_delete(CollectionId::new(id))
                .await
                .context("Failed to delete collection")?;
            output.success(&format!("Deleted collection {id}"));
        }
    }

    Ok(())
}

/// Build a draft from command line fields, deriving a missing slug from the name.
pub fn to_draft(fields: CollectionFields) -> CollectionDraft {
    let slug = fields.slug.unwrap_or_else(|| slugify(&fields.name));
    let mut draft = CollectionDraft::new(fields.name, slug);
    draft.description = fields.description;
    draft.image = fields.image;
    draft.featured = fields.featured;
    draft.product_ids = fields.products.into_iter().map(ProductId::new).collect();
    draft
}

fn print_collections(output: &Output, title: &str, collections: &[Collection]) {
    if output.is_json() {
        output.json(&collections);
        return;
    }
    output.header(title);
    if collections.is_empty() {
        output.info("No collections found");
        return;
    }
    let widths = [6, 24, 24, 9, 9];
    output.table_header(&["ID", "NAME", "SLUG", "FEATURED", "PRODUCTS"], &widths);
    for collection in collections {
        output.table_row(
            &[
                &collection.id.to_string(),
                &collection.name,
                &collection.slug,
                if collection.featured { "yes" } else { "no" },
                &collection.product_ids.len().to_string(),
            ],
            &widths,
        );
    }
}

fn print_collection(output: &Output, collection: &Collection) {
    if output.is_json() {
        output.json(collection);
        return;
    }
    output.header(&collection.name);
    output.kv("id", &collection.id.to_string());
    output.kv("slug", &collection.slug);
    output.kv("featured", if collection.featured { "yes" } else { "no" });
    if !collection.description.is_empty() {
        output.kv("description", &collection.description);
    }
    let ids: Vec<String> = collection.product_ids.iter().map(ToString::to_string).collect();
    output.kv("products", &ids.join(", "));
}
