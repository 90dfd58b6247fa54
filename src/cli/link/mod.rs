//! Link command - resolves an auxiliary link on a form page

use std::collections::HashMap;

use clap::{Args, ValueEnum};

use crate::domain::{follow, link_target, FormKind, LinkTarget, PageLink, Routes};
use crate::infrastructure::ConsolePage;

/// Page a link is shown on
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageArg {
    SignIn,
    Register,
    ResetPassword,
}

impl From<PageArg> for FormKind {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::SignIn => FormKind::SignIn,
            PageArg::Register => FormKind::Registration,
            PageArg::ResetPassword => FormKind::PasswordReset,
        }
    }
}

/// Arguments for the link command
#[derive(Args, Clone, Debug)]
pub struct LinkArgs {
    /// Page the link is on
    #[arg(value_enum)]
    pub page: PageArg,

    /// forgot-password, sign-up or back
    pub link: PageLink,

    /// Target carried by the link element itself; empty falls back to history
    #[arg(long)]
    pub url: Option<String>,
}

pub async fn run(args: LinkArgs, base_url: Option<String>) -> anyhow::Result<()> {
    let config = super::prepare(base_url);
    let page = ConsolePage::new(HashMap::new());

    let target = resolve(&args, &config.routes())?;
    follow(&page, &target);

    Ok(())
}

fn resolve(args: &LinkArgs, routes: &Routes) -> anyhow::Result<LinkTarget> {
    if let Some(url) = &args.url {
        return Ok(LinkTarget::Attribute(Some(url.clone())));
    }

    let form = FormKind::from(args.page);
    link_target(form, args.link, routes)
        .ok_or_else(|| anyhow::anyhow!("The {} page has no '{}' link", form, args.link))
}
