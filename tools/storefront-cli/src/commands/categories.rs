//! Category commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use storefront_catalog::catalog::slugify;
use storefront_catalog::prelude::*;

use super::{CategoriesArgs, CategoriesCommand, CategoryFields};
use crate::context::Context;
use crate::output::Output;

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let categories = ctx.services()?.categories();
    let output = &ctx.output;

    match args.command {
        CategoriesCommand::List => {
            let spinner = output.spinner("Fetching categories...");
            let found = categories.try_get_all().await;
            spinner.finish_and_clear();
            let found = found.context("Failed to fetch categories")?;

            if output.is_json() {
                output.json(&found);
                return Ok(());
            }
            output.header("Categories");
            let widths = [6, 24, 24, 8];
            output.table_header(&["ID", "NAME", "SLUG", "SUBCATS"], &widths);
            for category in &found {
                output.table_row(
                    &[
                        &category.id.to_string(),
                        &category.name,
                        &category.slug,
                        &category.subcategories.len().to_string(),
                    ],
                    &widths,
                );
            }
        }
        CategoriesCommand::Get { id } => {
            let found = categories
                .try_get_by_id(CategoryId::new(id))
                .await
                .context("Failed to fetch category")?;
            match found {
                Some(category) => print_category(output, &category),
                None => bail!("Category {} not found", id),
            }
        }
        CategoriesCommand::Slug { slug } => {
            let found = categories
                .try_get_by_slug(&slug)
                .await
                .context("Failed to fetch category")?;
            match found {
                Some(category) => print_category(output, &category),
                None => bail!("No category with slug '{}'", slug),
            }
        }
        CategoriesCommand::Subcategories { slug } => {
            let found = categories
                .try_get_subcategories(&slug)
                .await
                .context("Failed to fetch subcategories")?;
            if output.is_json() {
                output.json(&found);
                return Ok(());
            }
            output.header(&format!("Subcategories of {slug}"));
            if found.is_empty() {
                output.info("None");
            }
            for subcategory in &found {
                output.list_item(&format!("{} ({})", subcategory.name, subcategory.slug));
            }
        }
        CategoriesCommand::Create(fields) => {
            let created = categories
                .try_create(&to_draft(fields))
                .await
                .context("Failed to create category")?;
            output.success(&format!("Created category {} ({})", created.name, created.id));
            print_category(output, &created);
        }
        CategoriesCommand::Update { id, fields } => {
            let updated = categories
                .try_update(CategoryId::new(id), &to_draft(fields))
                .await
                .context("Failed to update category")?;
            output.success(&format!("Updated category {}", updated.id));
            print_category(output, &updated);
        }
        CategoriesCommand::Delete { id, yes } => {
            if !yes && !output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete category {id}?"))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    output.warn("Delete cancelled");
                    return Ok(());
                }
            }
            categories
                .try_delete(CategoryId::new(id))
                .await
                .context("Failed to delete category")?;
            output.success(&format!("Deleted category {id}"));
        }
    }

    Ok(())
}

/// Build a draft from command line fields, deriving missing slugs from names.
pub fn to_draft(fields: CategoryFields) -> CategoryDraft {
    let slug = fields.slug.unwrap_or_else(|| slugify(&fields.name));
    let mut draft = CategoryDraft::new(fields.name, slug);
    draft.description = fields.description;
    draft.image = fields.image;
    draft.subcategories = fields
        .subcategories
        .into_iter()
        .map(Subcategory::named)
        .collect();
    draft
}

fn print_category(output: &Output, category: &Category) {
    if output.is_json() {
        output.json(category);
        return;
    }
    output.header(&category.name);
    output.kv("id", &category.id.to_string());
    output.kv("slug", &category.slug);
    if !category.description.is_empty() {
        output.kv("description", &category.description);
    }
    if !category.image.is_empty() {
        output.kv("image", &category.image);
    }
    for subcategory in &category.subcategories {
        output.list_item(&format!("{} ({})", subcategory.name, subcategory.slug));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_derives_slugs() {
        let draft = to_draft(CategoryFields {
            name: "Skin Care".into(),
            slug: None,
            description: None,
            image: None,
            subcategories: vec!["Face Masks".into()],
        });
        assert_eq!(draft.slug, "skin-care");
        assert_eq!(draft.subcategories[0].slug, "face-masks");
        assert!(draft.description.is_none());
    }

    #[test]
    fn test_explicit_slug_kept() {
        let draft = to_draft(CategoryFields {
            name: "Lips".into(),
            slug: Some("lip-care".into()),
            description: Some("Balms".into()),
            image: None,
            subcategories: vec![],
        });
        assert_eq!(draft.slug, "lip-care");
        assert_eq!(draft.description.as_deref(), Some("Balms"));
    }
}
