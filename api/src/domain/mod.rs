use common::persistence::models::{Dealer, InventoryListing, OemSpec};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MAX_LISTING_IMAGES: usize = 5;
pub const MAX_BULLET_POINTS: usize = 5;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OemSpecDto {
    pub id: i32,
    pub manufacturer: String,
    pub model_name: String,
    pub year: i32,
    pub list_price: Option<f64>,
    pub colors: Vec<String>,
    pub mileage: Option<String>,
    pub power_bhp: Option<f64>,
    pub max_speed: Option<f64>,
}

impl From<&OemSpec> for OemSpecDto {
    fn from(value: &OemSpec) -> Self {
        Self {
            id: value.id,
            manufacturer: value.manufacturer.clone(),
            model_name: value.model_name.clone(),
            year: value.year,
            list_price: value.list_price,
            colors: value.colors.clone(),
            mileage: value.mileage.clone(),
            power_bhp: value.power_bhp,
            max_speed: value.max_speed,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDto {
    pub id: i32,
    pub dealer_id: i32,
    pub title: String,
    pub color: String,
    pub price: f64,
    pub kms_on_odometer: f64,
    pub images: Vec<String>,
    pub bullet_points: Vec<String>,
    pub major_scratches: Option<bool>,
    pub original_paint: Option<bool>,
    pub accidents_reported: Option<i32>,
    pub previous_owners: Option<i32>,
    pub registration_place: Option<String>,
    pub oem_spec: Option<OemSpecDto>,
    #[schema(value_type = String, example = "2025-10-13T15:30:00")]
    pub created_at: chrono::NaiveDateTime,
    #[schema(value_type = String, example = "2025-10-13T15:30:00")]
    pub updated_at: chrono::NaiveDateTime,
}

impl ListingDto {
    pub fn new(listing: InventoryListing, oem_spec: Option<OemSpecDto>) -> Self {
        Self {
            id: listing.id,
            dealer_id: listing.dealer_id,
            title: listing.title,
            color: listing.color,
            price: listing.price,
            kms_on_odometer: listing.kms_on_odometer,
            images: listing.images,
            bullet_points: listing.bullet_points,
            major_scratches: listing.major_scratches,
            original_paint: listing.original_paint,
            accidents_reported: listing.accidents_reported,
            previous_owners: listing.previous_owners,
            registration_place: listing.registration_place,
            oem_spec,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct OemListPageDto {
    pub items: Vec<OemSpecDto>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

#[derive(Serialize, ToSchema)]
pub struct OemCountDto {
    pub count: i64,
}

#[derive(Serialize, ToSchema)]
pub struct MutationOutcomeDto {
    pub success: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct BulkDeleteRequest {
    pub ids: Vec<i32>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub kms_on_odometer: Option<f64>,
    pub bullet_points: Option<Vec<String>>,
    pub major_scratches: Option<bool>,
    pub original_paint: Option<bool>,
    pub accidents_reported: Option<i32>,
    pub previous_owners: Option<i32>,
    pub registration_place: Option<String>,
    pub oem_spec: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct DealerDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<Dealer> for DealerDto {
    fn from(value: Dealer) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponseDto {
    pub token: String,
    pub dealer: DealerDto,
}
