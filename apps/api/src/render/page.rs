//! HTML emission: the page document plus the builder snapshot through one template.
//!
//! The template is auto-escaped (`.html` name), so user-entered text always
//! lands in the page as text, never as markup.

use minijinja::{context, Environment};

use crate::builder::session::SessionSnapshot;
use crate::errors::AppError;
use crate::render::slots::PageDocument;

const PAGE_TEMPLATE_NAME: &str = "portfolio.html";
const PAGE_TEMPLATE: &str = include_str!("../../templates/portfolio.html");

pub fn render_html(page: &PageDocument, builder: &SessionSnapshot) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)
        .map_err(template_error)?;
    let template = env.get_template(PAGE_TEMPLATE_NAME).map_err(template_error)?;

    template
        .render(context! {
            slots => page.slots_by_id(),
            theme => page.theme_by_css_name(),
            builder => builder,
        })
        .map_err(template_error)
}

fn template_error(e: minijinja::Error) -> AppError {
    AppError::Internal(anyhow::anyhow!("page template: {e:#}"))
}
