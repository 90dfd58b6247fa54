//! Navigation helper for the auxiliary links of each form page

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::domain::form::FormKind;
use crate::domain::page::FormPage;

/// Known page routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    pub home: String,
    pub login: String,
    pub register: String,
    pub forgot_password: String,
    pub dashboard: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
            login: "/login".to_string(),
            register: "/register".to_string(),
            forgot_password: "/forgot-password".to_string(),
            dashboard: "/dashboard".to_string(),
        }
    }
}

/// Auxiliary links shown next to a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    ForgotPassword,
    SignUp,
    Back,
}

impl FromStr for PageLink {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forgot-password" => Ok(Self::ForgotPassword),
            "sign-up" => Ok(Self::SignUp),
            "back" => Ok(Self::Back),
            other => Err(format!("Unknown link: '{}'", other)),
        }
    }
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ForgotPassword => "forgot-password",
            Self::SignUp => "sign-up",
            Self::Back => "back",
        })
    }
}

/// Where a link points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A fixed, known route
    Route(String),
    /// The value of a data attribute on the triggering control, if set
    Attribute(Option<String>),
    /// No explicit target; go back in history
    Back,
}

/// A resolved navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    To(String),
    Back,
}

impl LinkTarget {
    pub fn resolve(&self) -> Navigation {
        match self {
            Self::Route(path) => Navigation::To(path.clone()),
            Self::Attribute(Some(path)) if !path.is_empty() => Navigation::To(path.clone()),
            Self::Attribute(_) | Self::Back => Navigation::Back,
        }
    }
}

/// Static target of `link` on the page of `form`, `None` when the page has no such link
pub fn link_target(form: FormKind, link: PageLink, routes: &Routes) -> Option<LinkTarget> {
    match (form, link) {
        (FormKind::SignIn, PageLink::ForgotPassword) => {
            Some(LinkTarget::Route(routes.forgot_password.clone()))
        }
        (FormKind::SignIn, PageLink::SignUp) => Some(LinkTarget::Route(routes.register.clone())),
        (FormKind::SignIn, PageLink::Back) => Some(LinkTarget::Route(routes.home.clone())),
        (FormKind::Registration, PageLink::Back) => Some(LinkTarget::Back),
        (FormKind::PasswordReset, PageLink::Back) => Some(LinkTarget::Route(routes.login.clone())),
        _ => None,
    }
}

/// Perform the navigation a link target resolves to
pub fn follow<P: FormPage + ?Sized>(page: &P, target: &LinkTarget) -> Navigation {
    let navigation = target.resolve();

    match &navigation {
        Navigation::To(path) => {
            debug!(path = %path, "Following link");
            page.navigate(path);
        }
        Navigation::Back => {
            debug!("Following link back in history");
            page.history_back();
        }
    }

    navigation
}
