use crate::domain::{OemCountDto, OemListPageDto, OemSpecDto};
use crate::error::ApiError;
use axum::Json;
use axum::extract::{Query, State};
use common::domain::catalog::{self, ListQuery, OemFacts, SearchCriteria};
use common::domain::{clean_text, integer_input};
use common::persistence::PgPool;
use common::persistence::models::OemSpec;
use common::persistence::schema::oem_spec;
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OemListParams {
    pub q: Option<String>,
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    pub year: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OemSearchParams {
    pub q: Option<String>,
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    pub year: Option<String>,
}

fn facts(spec: &OemSpec) -> OemFacts<'_> {
    OemFacts {
        manufacturer: &spec.manufacturer,
        model_name: &spec.model_name,
        year: spec.year,
    }
}

/// The catalog is bounded reference data; matching and ordering run over a
/// full snapshot.
async fn load_catalog(pool: &PgPool) -> Result<Vec<OemSpec>, ApiError> {
    let mut conn = pool.get().await?;
    Ok(oem_spec::table
        .order(oem_spec::id.asc())
        .select(OemSpec::as_select())
        .load(&mut conn)
        .await?)
}

#[utoipa::path(
    get,
    path = "/oem/list",
    tag = "oem catalog",
    responses(
        (status = 200, description = "Returns one page of matching catalog entries", body = OemListPageDto)
    )
)]
pub async fn list(
    State(pool): State<PgPool>,
    Query(params): Query<OemListParams>,
) -> Result<Json<OemListPageDto>, ApiError> {
    let query = ListQuery::new(
        params.q.as_deref(),
        params.manufacturer.as_deref(),
        params.model_name.as_deref(),
        params.year.as_deref(),
    );

    let specs = load_catalog(&pool).await?;
    let mut matched: Vec<&OemSpec> = specs.iter().filter(|s| query.matches(&facts(s))).collect();
    matched.sort_by(|a, b| catalog::catalog_order(&facts(a), &facts(b)));

    let total = matched.len();
    let window = catalog::page_window(
        integer_input(params.page.as_deref()),
        integer_input(params.limit.as_deref()),
    );
    let items = matched
        .into_iter()
        .skip(window.skip)
        .take(window.limit)
        .map(OemSpecDto::from)
        .collect();

    Ok(Json(OemListPageDto {
        items,
        page: window.page,
        limit: window.limit,
        total,
    }))
}

#[utoipa::path(
    get,
    path = "/oem/search",
    tag = "oem catalog",
    responses(
        (status = 200, description = "Returns the best matching catalog entry, or null when nothing matches", body = OemSpecDto)
    )
)]
pub async fn search(
    State(pool): State<PgPool>,
    Query(params): Query<OemSearchParams>,
) -> Result<Json<Option<OemSpecDto>>, ApiError> {
    let criteria = match clean_text(params.q.as_deref()) {
        Some(q) => SearchCriteria::from_free_text(&q),
        None => SearchCriteria::from_fields(
            params.manufacturer.as_deref(),
            params.model_name.as_deref(),
            params.year.as_deref(),
        ),
    };

    let specs = load_catalog(&pool).await?;
    let hit = specs.iter().find(|s| criteria.matches(&facts(s)));
    Ok(Json(hit.map(OemSpecDto::from)))
}

#[utoipa::path(
    get,
    path = "/oem/count",
    tag = "oem catalog",
    responses(
        (status = 200, description = "Returns the size of the catalog", body = OemCountDto)
    )
)]
pub async fn count(State(pool): State<PgPool>) -> Result<Json<OemCountDto>, ApiError> {
    let mut conn = pool.get().await?;
    let count = oem_spec::table.count().get_result(&mut conn).await?;
    Ok(Json(OemCountDto { count }))
}
