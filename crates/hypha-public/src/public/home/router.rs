use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::promoted::PromotedRelation;
use super::repository::HomePageStore;
use super::service::HomePageService;
use crate::error::AppError;
use crate::public::pages::{PageCatalog, PageId, PageKind};

/// Optional evaluation date so clients can preview lists as of another day.
#[derive(Debug, Default, Deserialize)]
pub struct DateParams {
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl DateParams {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Debug, Deserialize)]
pub struct PromotedUpdateRequest {
    pub pages: Vec<PageId>,
}

#[derive(Debug, Serialize)]
pub struct PromotedUpdateResponse {
    pub kind: PageKind,
    pub promoted: Vec<PromotedRelation>,
}

/// Router builder exposing the homepage context and promotion endpoints.
pub fn home_router<S, C>(service: Arc<HomePageService<S, C>>) -> Router
where
    S: HomePageStore + 'static,
    C: PageCatalog + 'static,
{
    Router::new()
        .route("/api/v1/home", get(context_handler::<S, C>))
        .route("/api/v1/home/related/:kind", get(related_handler::<S, C>))
        .route("/api/v1/home/promoted/:kind", put(promoted_handler::<S, C>))
        .with_state(service)
}

pub(crate) async fn context_handler<S, C>(
    State(service): State<Arc<HomePageService<S, C>>>,
    Query(params): Query<DateParams>,
) -> Response
where
    S: HomePageStore + 'static,
    C: PageCatalog + 'static,
{
    match service.context(params.today()) {
        Ok(context) => (StatusCode::OK, Json(context)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn related_handler<S, C>(
    State(service): State<Arc<HomePageService<S, C>>>,
    Path(segment): Path<String>,
    Query(params): Query<DateParams>,
) -> Response
where
    S: HomePageStore + 'static,
    C: PageCatalog + 'static,
{
    let Some(kind) = PageKind::from_segment(&segment) else {
        return unknown_kind(&segment);
    };

    match service.related(kind, params.today()) {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn promoted_handler<S, C>(
    State(service): State<Arc<HomePageService<S, C>>>,
    Path(segment): Path<String>,
    Json(request): Json<PromotedUpdateRequest>,
) -> Response
where
    S: HomePageStore + 'static,
    C: PageCatalog + 'static,
{
    let Some(kind) = PageKind::from_segment(&segment) else {
        return unknown_kind(&segment);
    };

    match service.replace_promoted(kind, request.pages) {
        Ok(promoted) => {
            let body = PromotedUpdateResponse {
                kind,
                promoted: promoted.into(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => AppError::from(error).into_response(),
    }
}

fn unknown_kind(segment: &str) -> Response {
    let payload = json!({
        "error": format!("unknown page kind '{segment}'"),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}
