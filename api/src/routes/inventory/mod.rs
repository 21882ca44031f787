use crate::auth::AuthDealer;
use crate::domain::{
    BulkDeleteRequest, ListingDto, MAX_BULLET_POINTS, MAX_LISTING_IMAGES, MutationOutcomeDto,
    OemSpecDto, UpdateListingRequest,
};
use crate::error::{ApiError, ApiJson};
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use common::config::CONFIG;
use common::domain::filter::{ListingFacts, ListingFilter};
use common::domain::{clean_text, numeric_input};
use common::persistence::PgPool;
use common::persistence::models::{InventoryListing, ListingChanges, NewInventoryListing, OemSpec};
use common::persistence::schema::{inventory_listing, oem_spec};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

type PgConn = diesel_async::pooled_connection::deadpool::Object<diesel_async::AsyncPgConnection>;

/// Snapshot size for the public listing feed.
const LISTING_SNAPSHOT: i64 = 100;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryParams {
    pub color: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub max_kms: Option<String>,
    pub min_mileage: Option<String>,
    pub max_mileage: Option<String>,
}

impl InventoryParams {
    fn to_filter(&self) -> ListingFilter {
        ListingFilter {
            color: clean_text(self.color.as_deref()),
            min_price: numeric_input(self.min_price.as_deref()),
            max_price: numeric_input(self.max_price.as_deref()),
            max_kms: numeric_input(self.max_kms.as_deref()),
            min_mileage: numeric_input(self.min_mileage.as_deref()),
            max_mileage: numeric_input(self.max_mileage.as_deref()),
        }
    }
}

async fn ensure_spec_exists(conn: &mut PgConn, spec_id: i32) -> Result<(), ApiError> {
    let found: Option<i32> = oem_spec::table
        .find(spec_id)
        .select(oem_spec::id)
        .first(conn)
        .await
        .optional()?;
    found.map(|_| ()).ok_or(ApiError::SpecNotFound(spec_id))
}

async fn resolve_specs(
    conn: &mut PgConn,
    listings: &[InventoryListing],
) -> Result<HashMap<i32, OemSpec>, ApiError> {
    let spec_ids: Vec<i32> = listings.iter().filter_map(|l| l.oem_spec_id).collect();
    let specs: Vec<OemSpec> = oem_spec::table
        .filter(oem_spec::id.eq_any(spec_ids))
        .select(OemSpec::as_select())
        .load(conn)
        .await?;
    Ok(specs.into_iter().map(|s| (s.id, s)).collect())
}

async fn load_spec_dto(
    conn: &mut PgConn,
    spec_id: Option<i32>,
) -> Result<Option<OemSpecDto>, ApiError> {
    let Some(spec_id) = spec_id else {
        return Ok(None);
    };
    let spec: Option<OemSpec> = oem_spec::table
        .find(spec_id)
        .select(OemSpec::as_select())
        .first(conn)
        .await
        .optional()?;
    Ok(spec.as_ref().map(OemSpecDto::from))
}

#[utoipa::path(
    get,
    path = "/inventory",
    tag = "inventory",
    responses(
        (status = 200, description = "Returns listings passing every supplied filter", body = [ListingDto])
    )
)]
pub async fn list(
    State(pool): State<PgPool>,
    Query(params): Query<InventoryParams>,
) -> Result<Json<Vec<ListingDto>>, ApiError> {
    let filter = params.to_filter();
    let mut conn = pool.get().await?;

    let listings = inventory_listing::table
        .order(inventory_listing::id.asc())
        .limit(LISTING_SNAPSHOT)
        .select(InventoryListing::as_select())
        .load(&mut conn)
        .await?;
    let specs = resolve_specs(&mut conn, &listings).await?;

    let mut visible = Vec::new();
    for listing in listings {
        let spec = listing.oem_spec_id.and_then(|sid| specs.get(&sid));
        let keep = filter.matches(&ListingFacts {
            color: &listing.color,
            price: listing.price,
            kms_on_odometer: listing.kms_on_odometer,
            oem_mileage: spec.and_then(|s| s.mileage.as_deref()),
        });
        if keep {
            let spec_dto = spec.map(OemSpecDto::from);
            visible.push(ListingDto::new(listing, spec_dto));
        }
    }
    Ok(Json(visible))
}

#[utoipa::path(
    post,
    path = "/inventory",
    tag = "inventory",
    responses(
        (status = 200, description = "Creates a listing owned by the caller", body = ListingDto),
        (status = 400, description = "Malformed form data or unknown oem spec", body = crate::error::ErrorResponse)
    )
)]
pub async fn create(
    State(pool): State<PgPool>,
    AuthDealer(dealer_id): AuthDealer,
    mut multipart: Multipart,
) -> Result<Json<ListingDto>, ApiError> {
    let mut form = ListingForm::default();
    let mut images = Vec::new();
    tokio::fs::create_dir_all(&CONFIG.uploads.dir).await?;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == "images" {
            if images.len() == MAX_LISTING_IMAGES {
                return Err(ApiError::TooManyImages(MAX_LISTING_IMAGES));
            }
            let stored_name = stored_image_name(field.file_name());
            let bytes = field.bytes().await?;
            tokio::fs::write(
                std::path::Path::new(&CONFIG.uploads.dir).join(&stored_name),
                &bytes,
            )
            .await?;
            images.push(format!("/uploads/{stored_name}"));
        } else {
            let value = field.text().await?;
            form.set_field(&name, value);
        }
    }

    let new_listing = form.into_new_listing(dealer_id, images)?;
    let mut conn = pool.get().await?;
    if let Some(spec_id) = new_listing.oem_spec_id {
        ensure_spec_exists(&mut conn, spec_id).await?;
    }

    let listing: InventoryListing = diesel::insert_into(inventory_listing::table)
        .values(&new_listing)
        .returning(InventoryListing::as_returning())
        .get_result(&mut conn)
        .await?;
    debug!("dealer `{dealer_id}` created listing `{}`", listing.id);

    let spec_dto = load_spec_dto(&mut conn, listing.oem_spec_id).await?;
    Ok(Json(ListingDto::new(listing, spec_dto)))
}

#[utoipa::path(
    put,
    path = "/inventory/{id}",
    tag = "inventory",
    params(
        ("id" = i32, Path, description = "The listing id")
    ),
    responses(
        (status = 200, description = "Updates a listing owned by the caller", body = ListingDto),
        (status = 404, description = "No listing with this id in the caller's inventory", body = crate::error::ErrorResponse)
    )
)]
pub async fn update(
    State(pool): State<PgPool>,
    AuthDealer(dealer_id): AuthDealer,
    Path(listing_id): Path<i32>,
    ApiJson(body): ApiJson<UpdateListingRequest>,
) -> Result<Json<ListingDto>, ApiError> {
    let changes = ListingChanges {
        title: body.title,
        color: body.color,
        price: body.price,
        kms_on_odometer: body.kms_on_odometer,
        bullet_points: body.bullet_points.map(|mut b| {
            b.truncate(MAX_BULLET_POINTS);
            b
        }),
        major_scratches: body.major_scratches,
        original_paint: body.original_paint,
        accidents_reported: body.accidents_reported,
        previous_owners: body.previous_owners,
        registration_place: body.registration_place,
        oem_spec_id: body.oem_spec,
    };

    let mut conn = pool.get().await?;
    if let Some(spec_id) = changes.oem_spec_id {
        ensure_spec_exists(&mut conn, spec_id).await?;
    }

    // an id outside the caller's inventory is indistinguishable from a
    // missing one
    let listing: InventoryListing = if changes.is_noop() {
        inventory_listing::table
            .filter(inventory_listing::id.eq(listing_id))
            .filter(inventory_listing::dealer_id.eq(dealer_id))
            .select(InventoryListing::as_select())
            .first(&mut conn)
            .await
            .optional()?
    } else {
        diesel::update(
            inventory_listing::table
                .filter(inventory_listing::id.eq(listing_id))
                .filter(inventory_listing::dealer_id.eq(dealer_id)),
        )
        .set(&changes)
        .returning(InventoryListing::as_returning())
        .get_result(&mut conn)
        .await
        .optional()?
    }
    .ok_or(ApiError::ListingNotFound(listing_id))?;

    let spec_dto = load_spec_dto(&mut conn, listing.oem_spec_id).await?;
    Ok(Json(ListingDto::new(listing, spec_dto)))
}

#[utoipa::path(
    delete,
    path = "/inventory/{id}",
    tag = "inventory",
    params(
        ("id" = i32, Path, description = "The listing id")
    ),
    responses(
        (status = 200, description = "Deletes a listing owned by the caller", body = MutationOutcomeDto)
    )
)]
pub async fn remove(
    State(pool): State<PgPool>,
    AuthDealer(dealer_id): AuthDealer,
    Path(listing_id): Path<i32>,
) -> Result<Json<MutationOutcomeDto>, ApiError> {
    let mut conn = pool.get().await?;
    let k = diesel::delete(
        inventory_listing::table
            .filter(inventory_listing::id.eq(listing_id))
            .filter(inventory_listing::dealer_id.eq(dealer_id)),
    )
    .execute(&mut conn)
    .await?;
    debug!("dealer `{dealer_id}` deleted `{k}` listings");
    Ok(Json(MutationOutcomeDto { success: true }))
}

#[utoipa::path(
    post,
    path = "/inventory/bulk-delete",
    tag = "inventory",
    responses(
        (status = 200, description = "Deletes every listed id owned by the caller", body = MutationOutcomeDto)
    )
)]
pub async fn bulk_remove(
    State(pool): State<PgPool>,
    AuthDealer(dealer_id): AuthDealer,
    ApiJson(body): ApiJson<BulkDeleteRequest>,
) -> Result<Json<MutationOutcomeDto>, ApiError> {
    let mut conn = pool.get().await?;
    let k = diesel::delete(
        inventory_listing::table
            .filter(inventory_listing::id.eq_any(body.ids))
            .filter(inventory_listing::dealer_id.eq(dealer_id)),
    )
    .execute(&mut conn)
    .await?;
    debug!("dealer `{dealer_id}` bulk deleted `{k}` listings");
    Ok(Json(MutationOutcomeDto { success: true }))
}

/// Text fields of the multipart creation form, accumulated field by field.
#[derive(Default)]
pub struct ListingForm {
    title: Option<String>,
    price: Option<String>,
    color: Option<String>,
    kms_on_odometer: Option<String>,
    bullet_points: Vec<String>,
    major_scratches: Option<String>,
    original_paint: Option<String>,
    accidents_reported: Option<String>,
    previous_owners: Option<String>,
    registration_place: Option<String>,
    oem_spec: Option<String>,
}

impl ListingForm {
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "title" => self.title = Some(value),
            "price" => self.price = Some(value),
            "color" => self.color = Some(value),
            "kmsOnOdometer" => self.kms_on_odometer = Some(value),
            "bulletPoints" => self.bullet_points.push(value),
            "majorScratches" => self.major_scratches = Some(value),
            "originalPaint" => self.original_paint = Some(value),
            "accidentsReported" => self.accidents_reported = Some(value),
            "previousOwners" => self.previous_owners = Some(value),
            "registrationPlace" => self.registration_place = Some(value),
            "oemSpec" => self.oem_spec = Some(value),
            _ => {}
        }
    }

    pub fn into_new_listing(
        mut self,
        dealer_id: i32,
        images: Vec<String>,
    ) -> Result<NewInventoryListing, ApiError> {
        let title = clean_text(self.title.as_deref()).ok_or(ApiError::MissingField("title"))?;
        let color = clean_text(self.color.as_deref()).ok_or(ApiError::MissingField("color"))?;
        let price = required_number(self.price.as_deref(), "price")?;
        let kms_on_odometer = required_number(self.kms_on_odometer.as_deref(), "kmsOnOdometer")?;
        self.bullet_points.truncate(MAX_BULLET_POINTS);
        let oem_spec_id = match clean_text(self.oem_spec.as_deref()) {
            Some(raw) => Some(raw.parse().map_err(|_| ApiError::BadField("oemSpec"))?),
            None => None,
        };

        Ok(NewInventoryListing {
            dealer_id,
            title,
            color,
            price,
            kms_on_odometer,
            images,
            bullet_points: self.bullet_points,
            major_scratches: bool_field(self.major_scratches.as_deref()),
            original_paint: bool_field(self.original_paint.as_deref()),
            accidents_reported: integer_field(self.accidents_reported.as_deref()),
            previous_owners: integer_field(self.previous_owners.as_deref()),
            registration_place: clean_text(self.registration_place.as_deref()),
            oem_spec_id,
        })
    }
}

fn required_number(raw: Option<&str>, name: &'static str) -> Result<f64, ApiError> {
    let raw = clean_text(raw).ok_or(ApiError::MissingField(name))?;
    raw.parse().map_err(|_| ApiError::BadField(name))
}

fn bool_field(raw: Option<&str>) -> Option<bool> {
    match raw.map(str::trim) {
        Some("true") | Some("on") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        _ => None,
    }
}

fn integer_field(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|s| s.trim().parse().ok())
}

fn stored_image_name(original: Option<&str>) -> String {
    let ext = original
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, e)| e)
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();
    format!("{}{ext}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ListingForm {
        let mut form = ListingForm::default();
        form.set_field("title", "Honda City VX 2015".to_string());
        form.set_field("price", "450000".to_string());
        form.set_field("color", "White".to_string());
        form.set_field("kmsOnOdometer", "30500".to_string());
        form.set_field("bulletPoints", "Single owner".to_string());
        form.set_field("bulletPoints", "New tyres".to_string());
        form.set_field("oemSpec", "3".to_string());
        form
    }

    #[test]
    fn form_assembles_new_listing() {
        let listing = filled_form()
            .into_new_listing(7, vec!["/uploads/a.jpg".to_string()])
            .unwrap();
        assert_eq!(listing.dealer_id, 7);
        assert_eq!(listing.price, 450000.0);
        assert_eq!(listing.bullet_points, vec!["Single owner", "New tyres"]);
        assert_eq!(listing.oem_spec_id, Some(3));
        assert_eq!(listing.images, vec!["/uploads/a.jpg"]);
    }

    #[test]
    fn missing_title_is_rejected() {
        let mut form = filled_form();
        form.title = None;
        assert!(matches!(
            form.into_new_listing(7, vec![]),
            Err(ApiError::MissingField("title"))
        ));
    }

    #[test]
    fn unparseable_price_is_rejected() {
        let mut form = filled_form();
        form.set_field("price", "four lakhs".to_string());
        assert!(matches!(
            form.into_new_listing(7, vec![]),
            Err(ApiError::BadField("price"))
        ));
    }

    #[test]
    fn empty_oem_spec_means_no_reference() {
        let mut form = filled_form();
        form.set_field("oemSpec", "".to_string());
        let listing = form.into_new_listing(7, vec![]).unwrap();
        assert_eq!(listing.oem_spec_id, None);
    }

    #[test]
    fn bullet_points_are_capped() {
        let mut form = filled_form();
        for i in 0..10 {
            form.set_field("bulletPoints", format!("point {i}"));
        }
        let listing = form.into_new_listing(7, vec![]).unwrap();
        assert_eq!(listing.bullet_points.len(), MAX_BULLET_POINTS);
    }

    #[test]
    fn stored_image_name_keeps_only_plain_extensions() {
        assert!(stored_image_name(Some("car.JPG")).ends_with(".jpg"));
        assert!(!stored_image_name(Some("../../etc/passwd")).contains('/'));
        assert!(!stored_image_name(Some("noext")).contains('.'));
    }
}
