// src/handlers/asset.rs

use super::{check_list_params, ensure_employee, require_non_negative, require_text};
use crate::{
    errors::{AppError, AppResult},
    models::{
        Asset, AssetRequest, AssetRequestStatus, AssetStatus, ListParams, RegisterAssetRequest,
        SubmitAssetRequest, UpdateAssetRequest, UpdateAssetRequestRequest,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

// ─── Assets ───────────────────────────────────────────────────────────────────

/// Register a company asset
#[utoipa::path(
    post,
    path = "/api/v1/assets",
    request_body = RegisterAssetRequest,
    responses(
        (status = 201, description = "Asset registered", body = Asset),
        (status = 400, description = "Missing name or category"),
    ),
    tag = "Assets"
)]
pub async fn register_asset(
    State(state): State<AppState>,
    Json(body): Json<RegisterAssetRequest>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    require_text("name", Some(&body.name))?;
    require_text("category", Some(&body.category))?;
    if let Some(cost) = body.purchase_cost {
        require_non_negative("purchase_cost", cost)?;
    }

    let status = body.status.unwrap_or(if body.assigned_to.is_some() {
        AssetStatus::Assigned
    } else {
        AssetStatus::Available
    });
    let now = Utc::now();
    let asset = state
        .repo::<Asset>()
        .create(&Asset {
            id: String::new(),
            name: body.name,
            category: body.category,
            serial_number: body.serial_number,
            assigned_to: body.assigned_to,
            status,
            purchase_date: body.purchase_date,
            purchase_cost: body.purchase_cost,
            notes: body.notes,
            created_at: Some(now),
            updated_at: Some(now),
        })
        .await?;

    info!("Registered asset {} ({})", asset.id, asset.name);
    Ok((StatusCode::CREATED, Json(asset)))
}

/// List assets
#[utoipa::path(
    get,
    path = "/api/v1/assets",
    params(ListParams),
    responses(
        (status = 200, description = "Assets", body = Vec<Asset>),
        (status = 400, description = "Invalid sort field"),
    ),
    tag = "Assets"
)]
pub async fn list_assets(
    State(state): State<AppState>,
    Query(mut params): Query<ListParams>,
) -> AppResult<Json<Vec<Asset>>> {
    check_list_params(&params)?;
    // Assets are linked through assigned_to rather than employee_id.
    let assigned_to = params.employee_id.take();
    let mut query = params.to_query();
    if let Some(employee_id) = assigned_to {
        query = query.filter("assigned_to", employee_id);
    }

    Ok(Json(state.repo::<Asset>().list(&query).await?))
}

/// Get a single asset
#[utoipa::path(
    get,
    path = "/api/v1/assets/{asset_id}",
    params(("asset_id" = String, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset", body = Asset),
        (status = 404, description = "Asset not found"),
    ),
    tag = "Assets"
)]
pub async fn get_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> AppResult<Json<Asset>> {
    let asset = state
        .repo::<Asset>()
        .get(&asset_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", asset_id)))?;
    Ok(Json(asset))
}

#[derive(Serialize)]
struct AssetPatch<'a> {
    #[serde(flatten)]
    changes: &'a UpdateAssetRequest,
    updated_at: DateTime<Utc>,
}

/// Update an asset; status changes are plain field writes
#[utoipa::path(
    patch,
    path = "/api/v1/assets/{asset_id}",
    request_body = UpdateAssetRequest,
    params(("asset_id" = String, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset updated", body = Asset),
        (status = 404, description = "Asset not found"),
    ),
    tag = "Assets"
)]
pub async fn update_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    Json(body): Json<UpdateAssetRequest>,
) -> AppResult<Json<Asset>> {
    let asset = state
        .repo::<Asset>()
        .update(
            &asset_id,
            &AssetPatch {
                changes: &body,
                updated_at: Utc::now(),
            },
        )
        .await?;

    if let Some(status) = body.status {
        info!("Asset {} set to {:?}", asset_id, status);
    }
    Ok(Json(asset))
}

/// Delete an asset
#[utoipa::path(
    delete,
    path = "/api/v1/assets/{asset_id}",
    params(("asset_id" = String, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset deleted"),
        (status = 404, description = "Asset not found"),
    ),
    tag = "Assets"
)]
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.repo::<Asset>().delete(&asset_id).await? {
        return Err(AppError::NotFound(format!("Asset {} not found", asset_id)));
    }
    Ok(Json(serde_json::json!({ "message": "Asset deleted successfully" })))
}

// ─── Asset Requests ───────────────────────────────────────────────────────────

/// Ask for equipment
#[utoipa::path(
    post,
    path = "/api/v1/asset-requests",
    request_body = SubmitAssetRequest,
    responses(
        (status = 201, description = "Asset request submitted", body = AssetRequest),
        (status = 400, description = "Missing category or description"),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Assets"
)]
pub async fn submit_asset_request(
    State(state): State<AppState>,
    Json(body): Json<SubmitAssetRequest>,
) -> AppResult<(StatusCode, Json<AssetRequest>)> {
    require_text("category", Some(&body.category))?;
    require_text("description", Some(&body.description))?;
    ensure_employee(&state, &body.employee_id).await?;

    let now = Utc::now();
    let request = state
        .repo::<AssetRequest>()
        .create(&AssetRequest {
            id: String::new(),
            employee_id: body.employee_id,
            category: body.category,
            description: body.description,
            priority: body.priority,
            status: AssetRequestStatus::Pending,
            asset_id: None,
            created_at: Some(now),
            updated_at: Some(now),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// List asset requests, optionally for one employee
#[utoipa::path(
    get,
    path = "/api/v1/asset-requests",
    params(ListParams),
    responses(
        (status = 200, description = "Asset requests", body = Vec<AssetRequest>),
        (status = 400, description = "Invalid sort field"),
    ),
    tag = "Assets"
)]
pub async fn list_asset_requests(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<AssetRequest>>> {
    check_list_params(&params)?;
    Ok(Json(
        state
            .repo::<AssetRequest>()
            .list(&params.to_query())
            .await?,
    ))
}

#[derive(Serialize)]
struct AssetRequestPatch<'a> {
    #[serde(flatten)]
    changes: &'a UpdateAssetRequestRequest,
    updated_at: DateTime<Utc>,
}

/// Update the status, priority or fulfilling asset of a request
#[utoipa::path(
    patch,
    path = "/api/v1/asset-requests/{request_id}",
    request_body = UpdateAssetRequestRequest,
    params(("request_id" = String, Path, description = "Asset request ID")),
    responses(
        (status = 200, description = "Asset request updated", body = AssetRequest),
        (status = 404, description = "Asset request not found"),
    ),
    tag = "Assets"
)]
pub async fn update_asset_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Json(body): Json<UpdateAssetRequestRequest>,
) -> AppResult<Json<AssetRequest>> {
    let request = state
        .repo::<AssetRequest>()
        .update(
            &request_id,
            &AssetRequestPatch {
                changes: &body,
                updated_at: Utc::now(),
            },
        )
        .await?;
    Ok(Json(request))
}

/// Delete an asset request
#[utoipa::path(
    delete,
    path = "/api/v1/asset-requests/{request_id}",
    params(("request_id" = String, Path, description = "Asset request ID")),
    responses(
        (status = 200, description = "Asset request deleted"),
        (status = 404, description = "Asset request not found"),
    ),
    tag = "Assets"
)]
pub async fn delete_asset_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.repo::<AssetRequest>().delete(&request_id).await? {
        return Err(AppError::NotFound(format!(
            "Asset request {} not found",
            request_id
        )));
    }
    Ok(Json(serde_json::json!({ "message": "Asset request deleted successfully" })))
}
