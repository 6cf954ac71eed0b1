use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insurance {
    pub provider: String,
    pub premium: i32,
    pub deductible: i32,
}

#[derive(Deserialize)]
pub struct InsuranceUpdate {
    pub provider: Option<String>,
    pub premium: Option<i32>,
    pub deductible: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PetStoreError {
    pub code: i32,
    pub message: String,
}

pub type Db = Arc<RwLock<HashMap<i64, Insurance>>>;

type Failure = (StatusCode, Json<PetStoreError>);

pub fn app() -> Router {
    app_with(Db::default())
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route(
            "/owners/{owner_id}/insurance",
            get(get_insurance).patch(update_insurance),
        )
        .with_state(db)
}

/// Build a store pre-populated with `(owner_id, insurance)` pairs.
pub fn seeded(entries: impl IntoIterator<Item = (i64, Insurance)>) -> Db {
    Arc::new(RwLock::new(entries.into_iter().collect()))
}

pub async fn run(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

fn no_insurance(owner_id: i64) -> Failure {
    (
        StatusCode::NOT_FOUND,
        Json(PetStoreError {
            code: 404,
            message: format!("owner {owner_id} has no insurance"),
        }),
    )
}

async fn get_insurance(
    State(db): State<Db>,
    Path(owner_id): Path<i64>,
) -> Result<Json<Insurance>, Failure> {
    tracing::debug!(owner_id, "get insurance");
    let insurances = db.read().await;
    insurances
        .get(&owner_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| no_insurance(owner_id))
}

async fn update_insurance(
    State(db): State<Db>,
    Path(owner_id): Path<i64>,
    Json(input): Json<InsuranceUpdate>,
) -> Result<Json<Insurance>, Failure> {
    tracing::debug!(owner_id, "update insurance");
    let mut insurances = db.write().await;
    let insurance = insurances
        .get_mut(&owner_id)
        .ok_or_else(|| no_insurance(owner_id))?;
    if let Some(provider) = input.provider {
        insurance.provider = provider;
    }
    if let Some(premium) = input.premium {
        insurance.premium = premium;
    }
    if let Some(deductible) = input.deductible {
        insurance.deductible = deductible;
    }
    Ok(Json(insurance.clone()))
}
