//! Page templates. Sources live under `templates/`.

use askama::Template;
use axum::response::Html;

use crate::error::Result;
use crate::models::{Harvest, Plant};

#[derive(Template)]
#[template(path = "plants_list.html")]
pub struct PlantsListTemplate {
    pub plants: Vec<Plant>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

#[derive(Template)]
#[template(path = "create.html")]
pub struct CreateTemplate;

/// `plant` is `None` when the id matched nothing; the page still renders.
#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub plant: Option<Plant>,
    pub harvests: Vec<Harvest>,
    pub plant_id: String,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate {
    pub plant: Option<Plant>,
    pub plant_id: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub reason: &'static str,
}

pub fn render<T: Template>(page: &T) -> Result<Html<String>> {
    Ok(Html(page.render()?))
}
