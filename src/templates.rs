//! HTML rendering with Handlebars.
//!
//! Templates are compiled into the binary and registered once at startup;
//! `header`, `footer` and `pager` are shared partials.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use handlebars::{
    Context as HbsContext, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError,
};
use serde::Serialize;

pub const TASK_LIST: &str = "task_list";
pub const TASK_PREVIOUS_LIST: &str = "task_previous_list";
pub const TASK_FORM: &str = "task_form";
pub const TASK_DETAIL: &str = "task_detail";
pub const TASK_CONFIRM_DELETE: &str = "task_confirm_delete";
pub const CHECKLIST_FORM: &str = "checklist_form";
pub const CHECKLIST_CONFIRM_TOGGLE: &str = "checklist_confirm_toggle";
pub const CHECKLIST_CONFIRM_DELETE: &str = "checklist_confirm_delete";
pub const ERROR_PAGE: &str = "error";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../templates/partials/header.hbs")),
    ("footer", include_str!("../templates/partials/footer.hbs")),
    ("pager", include_str!("../templates/partials/pager.hbs")),
];

const PAGES: &[(&str, &str)] = &[
    (TASK_LIST, include_str!("../templates/task_list.hbs")),
    (
        TASK_PREVIOUS_LIST,
        include_str!("../templates/task_previous_list.hbs"),
    ),
    (TASK_FORM, include_str!("../templates/task_form.hbs")),
    (TASK_DETAIL, include_str!("../templates/task_detail.hbs")),
    (
        TASK_CONFIRM_DELETE,
        include_str!("../templates/task_confirm_delete.hbs"),
    ),
    (CHECKLIST_FORM, include_str!("../templates/checklist_form.hbs")),
    (
        CHECKLIST_CONFIRM_TOGGLE,
        include_str!("../templates/checklist_confirm_toggle.hbs"),
    ),
    (
        CHECKLIST_CONFIRM_DELETE,
        include_str!("../templates/checklist_confirm_delete.hbs"),
    ),
    (ERROR_PAGE, include_str!("../templates/error.hbs")),
];

/// Formats an RFC 3339 timestamp for display.
/// Usage: `{{datetime task.due}}`
fn datetime_helper(
    h: &Helper,
    _: &Handlebars,
    _: &HbsContext,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let raw = h
        .param(0)
        .and_then(|param| param.value().as_str())
        .unwrap_or_default();

    let rendered = match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&Utc).format(DISPLAY_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    };
    out.write(&rendered)?;
    Ok(())
}

pub struct Templates {
    handlebars: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Missing error lists and optional page links render as empty.
        handlebars.set_strict_mode(false);
        handlebars.register_helper("datetime", Box::new(datetime_helper));

        for (name, source) in PARTIALS {
            handlebars
                .register_partial(name, *source)
                .with_context(|| format!("Failed to register partial: {name}"))?;
        }
        for (name, source) in PAGES {
            handlebars
                .register_template_string(name, *source)
                .with_context(|| format!("Failed to register template: {name}"))?;
        }

        Ok(Self { handlebars })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        self.handlebars.render(name, data)
    }
}
