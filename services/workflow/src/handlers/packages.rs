use axum::{Json, extract::Path};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use solara_domain::package::{
    Package, ServiceKind, custom_tan, package_by_id, packages, packages_by_kind,
};

use crate::error::WorkflowServiceError;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PackageResponse {
    pub id: String,
    pub name_en: String,
    pub name_he: String,
    pub kind: ServiceKind,
    pub sessions: u32,
    pub price: Decimal,
    pub currency: String,
}

impl From<&Package> for PackageResponse {
    fn from(p: &Package) -> Self {
        Self {
            id: p.id.clone(),
            name_en: p.name_en.clone(),
            name_he: p.name_he.clone(),
            kind: p.kind,
            sessions: p.sessions,
            price: p.price,
            currency: p.currency.clone(),
        }
    }
}

// ── GET /packages ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PackageListQuery {
    pub kind: Option<String>,
}

pub async fn get_packages(
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Vec<PackageResponse>>, WorkflowServiceError> {
    let query: PackageListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| WorkflowServiceError::MissingData)?
        .unwrap_or_default();

    let items: Vec<PackageResponse> = match query.kind.as_deref() {
        Some(kind) => {
            let kind =
                ServiceKind::from_kebab_case(kind).ok_or(WorkflowServiceError::MissingData)?;
            packages_by_kind(kind)
                .into_iter()
                .map(PackageResponse::from)
                .collect()
        }
        None => packages().iter().map(PackageResponse::from).collect(),
    };
    Ok(Json(items))
}

// ── GET /packages/custom-tan ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CustomTanQuery {
    pub sessions: u32,
}

pub async fn get_custom_tan(
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<PackageResponse>, WorkflowServiceError> {
    let query: CustomTanQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| WorkflowServiceError::MissingData)?
        .ok_or(WorkflowServiceError::MissingData)?;

    let package = custom_tan(query.sessions).ok_or(WorkflowServiceError::InvalidSessionCount)?;
    Ok(Json(PackageResponse::from(&package)))
}

// ── GET /packages/{id} ───────────────────────────────────────────────────────

pub async fn get_package(
    Path(id): Path<String>,
) -> Result<Json<PackageResponse>, WorkflowServiceError> {
    let package = package_by_id(&id).ok_or(WorkflowServiceError::PackageNotFound)?;
    Ok(Json(package.into()))
}
