use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::persistence::schema::dealer)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Dealer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::persistence::schema::dealer)]
pub struct NewDealer {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::persistence::schema::oem_spec)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OemSpec {
    pub id: i32,
    pub manufacturer: String,
    pub model_name: String,
    pub year: i32,
    pub list_price: Option<f64>,
    pub colors: Vec<String>,
    pub mileage: Option<String>,
    pub power_bhp: Option<f64>,
    pub max_speed: Option<f64>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::persistence::schema::oem_spec)]
pub struct NewOemSpec {
    pub manufacturer: String,
    pub model_name: String,
    pub year: i32,
    pub list_price: Option<f64>,
    pub colors: Vec<String>,
    pub mileage: Option<String>,
    pub power_bhp: Option<f64>,
    pub max_speed: Option<f64>,
}

#[derive(Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = crate::persistence::schema::inventory_listing)]
#[diesel(belongs_to(Dealer))]
#[diesel(belongs_to(OemSpec))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InventoryListing {
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
    pub oem_spec_id: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::persistence::schema::inventory_listing)]
pub struct NewInventoryListing {
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
    pub oem_spec_id: Option<i32>,
}

/// Partial update; `None` fields are left untouched, omitted form fields
/// never overwrite stored values.
#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::persistence::schema::inventory_listing)]
pub struct ListingChanges {
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
    pub oem_spec_id: Option<i32>,
}

impl ListingChanges {
    pub fn is_noop(&self) -> bool {
        self.title.is_none()
            && self.color.is_none()
            && self.price.is_none()
            && self.kms_on_odometer.is_none()
            && self.bullet_points.is_none()
            && self.major_scratches.is_none()
            && self.original_paint.is_none()
            && self.accidents_reported.is_none()
            && self.previous_owners.is_none()
            && self.registration_place.is_none()
            && self.oem_spec_id.is_none()
    }
}
