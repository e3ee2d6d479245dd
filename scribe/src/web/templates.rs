//! Bundled HTML templates.

use std::sync::LazyLock;

use chrono::DateTime;
use minijinja::{Environment, Value};

use crate::errors::{Error, Result};

const TEMPLATES: [(&str, &str); 7] = [
    ("base.html", include_str!("templates/base.html")),
    ("index.html", include_str!("templates/index.html")),
    ("login.html", include_str!("templates/login.html")),
    ("register.html", include_str!("templates/register.html")),
    ("post.html", include_str!("templates/post.html")),
    ("post_form.html", include_str!("templates/post_form.html")),
    ("error.html", include_str!("templates/error.html")),
];

// Syntax errors in bundled templates are caught by `test_all_templates_compile`.
static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.add_filter("datetime", format_datetime);
    for (name, source) in TEMPLATES {
        env.add_template(name, source).expect("bundled template should compile");
    }
    env
});

/// Render an RFC 3339 timestamp as `YYYY-MM-DD HH:MM UTC`; anything else passes through.
fn format_datetime(value: String) -> String {
    match DateTime::parse_from_rfc3339(&value) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        Err(_) => value,
    }
}

pub fn render(name: &str, ctx: Value) -> Result<String> {
    let template = ENV.get_template(name).map_err(|e| Error::Internal {
        operation: format!("load template {name}: {e}"),
    })?;
    template.render(ctx).map_err(|e| Error::Internal {
        operation: format!("render template {name}: {e:#}"),
    })
}
