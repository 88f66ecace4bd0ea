//! Gateway table and field names.

use storefront_gateway::{project, FieldSelector};

/// Primary key field shared by every table.
pub const ID: &str = "Id";

/// Product table.
pub mod product {
    pub const TABLE: &str = "product_c";

    pub const NAME: &str = "name_c";
    pub const BRAND: &str = "brand_c";
    pub const CATEGORY: &str = "category_c";
    pub const SUBCATEGORY: &str = "subcategory_c";
    pub const PRICE: &str = "price_c";
    pub const SALE_PRICE: &str = "sale_price_c";
    pub const RATING: &str = "rating_c";
    pub const REVIEW_COUNT: &str = "review_count_c";
    pub const DESCRIPTION: &str = "description_c";
    pub const IN_STOCK: &str = "in_stock_c";
    pub const TAGS: &str = "tags_c";
    pub const IMAGES: &str = "images_c";

    pub const FIELDS: &[&str] = &[
        super::ID,
        NAME,
        BRAND,
        CATEGORY,
        SUBCATEGORY,
        PRICE,
        SALE_PRICE,
        RATING,
        REVIEW_COUNT,
        DESCRIPTION,
        IN_STOCK,
        TAGS,
        IMAGES,
    ];
}

/// Category table.
pub mod category {
    pub const TABLE: &str = "category_c";

    pub const NAME: &str = "name_c";
    pub const SLUG: &str = "slug_c";
    pub const DESCRIPTION: &str = "description_c";
    pub const IMAGE: &str = "image_c";
    pub const SUBCATEGORIES: &str = "subcategories_c";

    pub const FIELDS: &[&str] = &[super::ID, NAME, SLUG, DESCRIPTION, IMAGE, SUBCATEGORIES];
}

/// Collection table.
pub mod collection {
    pub const TABLE: &str = "collection_c";

    pub const NAME: &str = "name_c";
    pub const SLUG: &str = "slug_c";
    pub const DESCRIPTION: &str = "description_c";
    pub const FEATURED: &str = "featured_c";
    pub const IMAGE: &str = "image_c";
    pub const PRODUCT_IDS: &str = "product_ids_c";

    pub const FIELDS: &[&str] = &[
        super::ID,
        NAME,
        SLUG,
        DESCRIPTION,
        FEATURED,
        IMAGE,
        PRODUCT_IDS,
    ];
}

/// Review table.
pub mod review {
    pub const TABLE: &str = "review_c";

    pub const PRODUCT_ID: &str = "product_id_c";
    pub const RATING: &str = "rating_c";
    pub const TITLE: &str = "title_c";
    pub const CONTENT: &str = "content_c";
    pub const REVIEWER_NAME: &str = "reviewer_name_c";
    pub const DATE: &str = "date_c";
    pub const HELPFUL: &str = "helpful_c";

    pub const FIELDS: &[&str] = &[
        super::ID,
        PRODUCT_ID,
        RATING,
        TITLE,
        CONTENT,
        REVIEWER_NAME,
        DATE,
        HELPFUL,
    ];
}

/// Projection naming every field of a table.
pub fn projection(fields: &[&str]) -> Vec<FieldSelector> {
    project(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projections_start_with_id() {
        for fields in [product::FIELDS, category::FIELDS, collection::FIELDS, review::FIELDS] {
            assert_eq!(fields[0], ID);
        }
        assert_eq!(product::FIELDS.len(), 13);
        assert_eq!(review::FIELDS.len(), 8);
    }

    #[test]
    fn test_projection_names() {
        let selectors = projection(category::FIELDS);
        let names: Vec<&str> = selectors.iter().map(|s| s.name()).collect();
        assert_eq!(names, category::FIELDS);
    }
}
