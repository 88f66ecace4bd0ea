//! Route table.

use crate::page::Page;
use crate::route::{split_path, RouteError, RoutePattern, RouteParams};
use serde::Serialize;
use tracing::debug;

/// Layout component wrapping every storefront page.
pub const LAYOUT: &str = "Layout";

/// Path and component of a registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    pub path: String,
    pub component_name: &'static str,
}

/// One row of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: RoutePattern,
    pub page: Page,
    /// Rendered at the layout's own path.
    pub index: bool,
}

impl RouteEntry {
    pub fn meta(&self) -> RouteMeta {
        RouteMeta {
            path: self.pattern.to_string(),
            component_name: self.page.component_name(),
        }
    }
}

/// A resolved path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub page: Page,
    pub params: RouteParams,
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

impl RouteMatch {
    pub fn component_name(&self) -> &'static str {
        self.page.component_name()
    }
}

/// Ordered route table nested under one base path.
///
/// Routes are tried in registration order and the first match wins, so a
/// catch-all belongs last.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    base: RoutePattern,
    layout: Option<String>,
    routes: Vec<RouteEntry>,
}

impl RouteRegistry {
    /// Create an empty table rooted at `/`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table nested under `base`.
    pub fn nested(base: &str) -> Result<Self, RouteError> {
        Ok(Self {
            base: RoutePattern::parse(base)?,
            ..Self::default()
        })
    }

    /// Wrap every page in a layout component.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// The storefront's page table under [`LAYOUT`].
    pub fn storefront() -> Self {
        let mut registry = Self::new().with_layout(LAYOUT);
        registry
            .index(Page::Home)
            .route(RoutePattern::root().lit("product").param("productId"), Page::Product)
            .route(RoutePattern::root().lit("category").param("categorySlug"), Page::Category)
            .route(RoutePattern::root().lit("search"), Page::Search)
            .route(RoutePattern::root().lit("checkout"), Page::Checkout)
            .route(RoutePattern::root().lit("login"), Page::Login)
            .route(RoutePattern::root().lit("signup"), Page::Signup)
            .route(RoutePattern::root().lit("callback"), Page::Callback)
            .route(RoutePattern::root().lit("error"), Page::Error)
            .route(
                RoutePattern::root()
                    .lit("prompt-password")
                    .param("appId")
                    .param("emailAddress")
                    .param("provider"),
                Page::PromptPassword,
            )
            .route(
                RoutePattern::root()
                    .lit("reset-password")
                    .param("appId")
                    .param("fields"),
                Page::ResetPassword,
            )
            .route(RoutePattern::root().wildcard(), Page::NotFound);
        registry
    }

    /// Register the page rendered at the base path itself.
    pub fn index(&mut self, page: Page) -> &mut Self {
        self.routes.push(RouteEntry {
            pattern: self.base.clone(),
            page,
            index: true,
        });
        self
    }

    /// Register a pattern relative to the base path.
    pub fn route(&mut self, pattern: RoutePattern, page: Page) -> &mut Self {
        self.routes.push(RouteEntry {
            pattern: pattern.under(&self.base),
            page,
            index: false,
        });
        self
    }

    /// Parse and register a pattern relative to the base path.
    pub fn register(&mut self, path: &str, page: Page) -> Result<&mut Self, RouteError> {
        let pattern = RoutePattern::parse(path)?;
        Ok(self.route(pattern, page))
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    /// Pattern registered for a page, if any.
    pub fn pattern_for(&self, page: Page) -> Option<&RoutePattern> {
        self.routes
            .iter()
            .find(|entry| entry.page == page)
            .map(|entry| &entry.pattern)
    }

    /// Link to a page with the given parameters.
    pub fn href(&self, page: Page, params: &[(&str, &str)]) -> Option<Result<String, RouteError>> {
        self.pattern_for(page).map(|pattern| pattern.href(params))
    }

    /// First route matching `path`, ignoring any query string or fragment.
    pub fn find(&self, path: &str) -> Option<RouteMatch> {
        let path = strip_suffixes(path);
        let segments: Vec<&str> = split_path(path).collect();

        self.routes.iter().find_map(|entry| {
            entry.pattern.matches(&segments).map(|params| RouteMatch {
                page: entry.page,
                params,
                pattern: entry.pattern.to_string(),
                layout: self.layout.clone(),
            })
        })
    }

    /// Resolve `path` to a page. Unmatched paths resolve to [`Page::NotFound`].
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let resolved = self.find(path).unwrap_or_else(|| RouteMatch {
            page: Page::NotFound,
            params: RouteParams::default(),
            pattern: path.to_string(),
            layout: self.layout.clone(),
        });
        debug!(path, page = %resolved.page, "resolved route");
        resolved
    }
}

fn strip_suffixes(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}
