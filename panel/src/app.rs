use common::domain::filter::{ListingFacts, ListingFilter};
use common::domain::{clean_text, numeric_input};
use leptos::prelude::*;
use leptos::server_fn::serde::{Deserialize, Serialize};
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/panel.css" />

        <Title text="Dealership Inventory" />

        <Router>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=InventoryPage />
                </Routes>
            </main>
        </Router>
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct OemCardDto {
    pub id: i32,
    pub manufacturer: String,
    pub model_name: String,
    pub year: i32,
    pub mileage: Option<String>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ListingCardDto {
    pub id: i32,
    pub title: String,
    pub color: String,
    pub price: f64,
    pub kms_on_odometer: f64,
    pub bullet_points: Vec<String>,
    pub oem_spec: Option<OemCardDto>,
}

#[server]
pub async fn fetch_inventory() -> Result<Vec<ListingCardDto>, ServerFnError> {
    use common::persistence::PG_POOL;
    use common::persistence::models::{InventoryListing, OemSpec};
    use common::persistence::schema::{inventory_listing, oem_spec};
    use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
    use diesel_async::RunQueryDsl;
    use std::collections::HashMap;

    let mut conn = PG_POOL.get().await?;
    let listings: Vec<InventoryListing> = inventory_listing::table
        .order(inventory_listing::id.asc())
        .limit(100)
        .select(InventoryListing::as_select())
        .load(&mut conn)
        .await?;

    let spec_ids: Vec<i32> = listings.iter().filter_map(|l| l.oem_spec_id).collect();
    let specs: Vec<OemSpec> = oem_spec::table
        .filter(oem_spec::id.eq_any(spec_ids))
        .select(OemSpec::as_select())
        .load(&mut conn)
        .await?;
    let by_id: HashMap<i32, OemSpec> = specs.into_iter().map(|s| (s.id, s)).collect();

    Ok(listings
        .into_iter()
        .map(|l| {
            let oem_spec = l
                .oem_spec_id
                .and_then(|sid| by_id.get(&sid))
                .map(|s| OemCardDto {
                    id: s.id,
                    manufacturer: s.manufacturer.clone(),
                    model_name: s.model_name.clone(),
                    year: s.year,
                    mileage: s.mileage.clone(),
                });
            ListingCardDto {
                id: l.id,
                title: l.title,
                color: l.color,
                price: l.price,
                kms_on_odometer: l.kms_on_odometer,
                bullet_points: l.bullet_points,
                oem_spec,
            }
        })
        .collect())
}

#[server]
pub async fn search_oem(q: String) -> Result<Vec<OemCardDto>, ServerFnError> {
    use common::domain::catalog::{ListQuery, OemFacts, catalog_order};
    use common::persistence::PG_POOL;
    use common::persistence::models::OemSpec;
    use common::persistence::schema::oem_spec;
    use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
    use diesel_async::RunQueryDsl;

    fn facts(spec: &OemSpec) -> OemFacts<'_> {
        OemFacts {
            manufacturer: &spec.manufacturer,
            model_name: &spec.model_name,
            year: spec.year,
        }
    }

    let query = ListQuery::new(Some(q.as_str()), None, None, None);
    let mut conn = PG_POOL.get().await?;
    let specs: Vec<OemSpec> = oem_spec::table
        .order(oem_spec::id.asc())
        .select(OemSpec::as_select())
        .load(&mut conn)
        .await?;

    let mut matched: Vec<&OemSpec> = specs.iter().filter(|s| query.matches(&facts(s))).collect();
    matched.sort_by(|a, b| catalog_order(&facts(a), &facts(b)));

    Ok(matched
        .into_iter()
        .take(20)
        .map(|s| OemCardDto {
            id: s.id,
            manufacturer: s.manufacturer.clone(),
            model_name: s.model_name.clone(),
            year: s.year,
            mileage: s.mileage.clone(),
        })
        .collect())
}

/// Renders the inventory with the filter form. The visible set is derived
/// client-side with the same `ListingFilter` the api applies server-side.
#[component]
fn InventoryPage() -> impl IntoView {
    let cars = OnceResource::new(fetch_inventory());

    let (color, set_color) = signal(String::new());
    let (max_price, set_max_price) = signal(String::new());
    let (max_kms, set_max_kms) = signal(String::new());
    let (min_mileage, set_min_mileage) = signal(String::new());
    let (max_mileage, set_max_mileage) = signal(String::new());

    let active_filter = Memo::new(move |_| ListingFilter {
        color: clean_text(Some(color.get().as_str())),
        min_price: None,
        max_price: numeric_input(Some(max_price.get().as_str())),
        max_kms: numeric_input(Some(max_kms.get().as_str())),
        min_mileage: numeric_input(Some(min_mileage.get().as_str())),
        max_mileage: numeric_input(Some(max_mileage.get().as_str())),
    });

    let clear = move |_| {
        set_color.set(String::new());
        set_max_price.set(String::new());
        set_max_kms.set(String::new());
        set_min_mileage.set(String::new());
        set_max_mileage.set(String::new());
    };

    view! {
        <h1>"Car Inventory"</h1>
        <div class="filters">
            <input
                placeholder="Filter by color"
                prop:value=color
                on:input:target=move |ev| set_color.set(ev.target().value())
            />
            <input
                placeholder="Maximum price"
                prop:value=max_price
                on:input:target=move |ev| set_max_price.set(ev.target().value())
            />
            <input
                placeholder="Maximum kilometers"
                prop:value=max_kms
                on:input:target=move |ev| set_max_kms.set(ev.target().value())
            />
            <input
                placeholder="Minimum mileage (kmpl)"
                prop:value=min_mileage
                on:input:target=move |ev| set_min_mileage.set(ev.target().value())
            />
            <input
                placeholder="Maximum mileage (kmpl)"
                prop:value=max_mileage
                on:input:target=move |ev| set_max_mileage.set(ev.target().value())
            />
            <button on:click=clear>"Clear Filters"</button>
        </div>
        <Suspense fallback=|| view! { <p>"Loading inventory..."</p> }>
            {move || match cars.get() {
                None => view! { <p>"Loading inventory..."</p> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="error">{format!("failed to fetch cars: {e}")}</p> }.into_any()
                }
                Some(Ok(cars)) => {
                    let filter = active_filter.get();
                    let visible: Vec<ListingCardDto> = cars
                        .into_iter()
                        .filter(|c| {
                            filter.matches(&ListingFacts {
                                color: &c.color,
                                price: c.price,
                                kms_on_odometer: c.kms_on_odometer,
                                oem_mileage: c
                                    .oem_spec
                                    .as_ref()
                                    .and_then(|s| s.mileage.as_deref()),
                            })
                        })
                        .collect();
                    view! {
                        <div>
                            <p class="count">{format!("{} cars", visible.len())}</p>
                            <ul class="cars">
                                {visible
                                .into_iter()
                                .map(|c| {
                                    let oem = c.oem_spec.as_ref().map(|s| {
                                        format!(
                                            "{} {} ({}) | {}",
                                            s.manufacturer,
                                            s.model_name,
                                            s.year,
                                            s.mileage.clone().unwrap_or_else(|| "-".to_string()),
                                        )
                                    });
                                    view! {
                                        <li>
                                            <strong>{c.title.clone()}</strong>
                                            <span>
                                                {format!(
                                                    " | {} | {} | {} km",
                                                    c.color,
                                                    c.price,
                                                    c.kms_on_odometer,
                                                )}
                                            </span>
                                            {oem.map(|o| view! { <span class="oem">{o}</span> })}
                                        </li>
                                    }
                                })
                                .collect_view()}
                            </ul>
                        </div>
                    }
                        .into_any()
                }
            }}
        </Suspense>
        <OemFinder />
    }
}

/// Free-text OEM catalog lookup, the picker used when attaching a factory
/// spec to a listing.
#[component]
fn OemFinder() -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let results = Resource::new(
        move || query.get(),
        |q| async move {
            if q.trim().is_empty() {
                Ok(Vec::new())
            } else {
                search_oem(q).await
            }
        },
    );

    view! {
        <div class="oem-finder">
            <h2>"OEM Catalog"</h2>
            <input
                placeholder="Search by manufacturer/model/year"
                prop:value=query
                on:input:target=move |ev| set_query.set(ev.target().value())
            />
            <Suspense fallback=|| view! { <p>"Searching..."</p> }>
                {move || match results.get() {
                    None => view! { <p>"Searching..."</p> }.into_any(),
                    Some(Err(e)) => {
                        view! { <p class="error">{format!("failed to load OEM specs: {e}")}</p> }
                            .into_any()
                    }
                    Some(Ok(specs)) => {
                        view! {
                            <ul>
                                {specs
                                    .into_iter()
                                    .map(|s| {
                                        view! {
                                            <li>
                                                {format!(
                                                    "{} {} ({}) | mileage {}",
                                                    s.manufacturer,
                                                    s.model_name,
                                                    s.year,
                                                    s.mileage.unwrap_or_else(|| "-".to_string()),
                                                )}
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                            .into_any()
                    }
                }}
            </Suspense>
        </div>
    }
}
