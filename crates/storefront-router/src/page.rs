//! Page identifiers.

use crate::route::RouteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every page the storefront can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    Product,
    Category,
    Search,
    Checkout,
    Login,
    Signup,
    Callback,
    Error,
    PromptPassword,
    ResetPassword,
    NotFound,
}

impl Page {
    /// All pages in route table order.
    pub const ALL: [Page; 12] = [
        Page::Home,
        Page::Product,
        Page::Category,
        Page::Search,
        Page::Checkout,
        Page::Login,
        Page::Signup,
        Page::Callback,
        Page::Error,
        Page::PromptPassword,
        Page::ResetPassword,
        Page::NotFound,
    ];

    /// Position in [`Page::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kebab-case name used on the command line and in serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Product => "product",
            Page::Category => "category",
            Page::Search => "search",
            Page::Checkout => "checkout",
            Page::Login => "login",
            Page::Signup => "signup",
            Page::Callback => "callback",
            Page::Error => "error",
            Page::PromptPassword => "prompt-password",
            Page::ResetPassword => "reset-password",
            Page::NotFound => "not-found",
        }
    }

    /// Component name rendered for this page.
    pub fn component_name(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Product => "ProductPage",
            Page::Category => "CategoryPage",
            Page::Search => "SearchPage",
            Page::Checkout => "CheckoutPage",
            Page::Login => "Login",
            Page::Signup => "Signup",
            Page::Callback => "Callback",
            Page::Error => "ErrorPage",
            Page::PromptPassword => "PromptPassword",
            Page::ResetPassword => "ResetPassword",
            Page::NotFound => "NotFound",
        }
    }

    /// Sign-in, sign-up and password recovery pages.
    pub fn is_auth_flow(self) -> bool {
        matches!(
            self,
            Page::Login
                | Page::Signup
                | Page::Callback
                | Page::PromptPassword
                | Page::ResetPassword
        )
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

impl FromStr for Page {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.name() == s)
            .ok_or_else(|| RouteError::UnknownPage(s.to_string()))
    }
}
