//! Route handlers. Each one makes its store calls, then renders a page or redirects.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use mongodb::bson::oid::ObjectId;

use crate::error::{parse_id, Error, OptionalExt, Result};
use crate::models::{FormFields, Harvest, HarvestForm, Plant, PlantForm};
use crate::server::AppState;
use crate::views::{
    render, AboutTemplate, CreateTemplate, DetailTemplate, EditTemplate, PlantsListTemplate,
};

/// The `:plant_id` path segment, parsed before any request body is read.
pub struct PlantId(pub ObjectId);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PlantId {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::internal(e.body_text()))?;
        parse_id(&raw).map(PlantId)
    }
}

fn detail_url(plant_id: ObjectId) -> String {
    format!("/plant/{}", plant_id.to_hex())
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn plants_list(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let plants = state.store.list_plants().await?;
    tracing::debug!(count = plants.len(), "Listing plants");
    render(&PlantsListTemplate { plants })
}

pub async fn about() -> Result<Html<String>> {
    render(&AboutTemplate)
}

pub async fn create_form() -> Result<Html<String>> {
    render(&CreateTemplate)
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<FormFields>,
) -> Result<Redirect> {
    let id = state
        .store
        .insert_plant(Plant::from(PlantForm::from(fields)))
        .await?;
    tracing::info!(plant_id = %id, "Plant created");
    Ok(Redirect::to(&detail_url(id)))
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    PlantId(id): PlantId,
) -> Result<Response> {
    let plant = state.store.find_plant(id).await.optional()?;
    let harvests = state.store.harvests_for(id).await?;

    let status = if plant.is_some() {
        StatusCode::OK
    } else {
        tracing::debug!(plant_id = %id, "Detail requested for missing plant");
        StatusCode::NOT_FOUND
    };
    let page = render(&DetailTemplate {
        plant,
        harvests,
        plant_id: id.to_hex(),
    })?;
    Ok((status, page).into_response())
}

pub async fn record_harvest(
    State(state): State<Arc<AppState>>,
    PlantId(id): PlantId,
    Form(fields): Form<FormFields>,
) -> Result<Redirect> {
    let harvest = Harvest::new(id, HarvestForm::from(fields));
    let harvest_id = state.store.insert_harvest(harvest).await?;
    tracing::info!(plant_id = %id, harvest_id = %harvest_id, "Harvest recorded");
    Ok(Redirect::to(&detail_url(id)))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    PlantId(id): PlantId,
) -> Result<Response> {
    let plant = state.store.find_plant(id).await.optional()?;
    let status = if plant.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    let page = render(&EditTemplate {
        plant,
        plant_id: id.to_hex(),
    })?;
    Ok((status, page).into_response())
}

/// Overwrites name, variety, photo and date planted; fields left out of the
/// submitted form are stored empty.
pub async fn edit(
    State(state): State<Arc<AppState>>,
    PlantId(id): PlantId,
    Form(fields): Form<FormFields>,
) -> Result<Redirect> {
    state
        .store
        .update_plant(id, Plant::from(PlantForm::from(fields)))
        .await?;
    tracing::info!(plant_id = %id, "Plant updated");
    Ok(Redirect::to(&detail_url(id)))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    PlantId(id): PlantId,
) -> Result<Redirect> {
    let summary = state.store.delete_plant(id).await?;
    tracing::info!(
        plant_id = %id,
        plants = summary.plants,
        harvests = summary.harvests,
        "Plant deleted"
    );
    Ok(Redirect::to("/"))
}
