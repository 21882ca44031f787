use crate::domain::contains_ci;
use crate::domain::mileage::parse_mileage;

/// The filter-relevant view of a listing together with its resolved OEM
/// mileage text. Built by the api from diesel models and by the panel from
/// fetched cards; both feed the same `ListingFilter::matches`.
pub struct ListingFacts<'a> {
    pub color: &'a str,
    pub price: f64,
    pub kms_on_odometer: f64,
    pub oem_mileage: Option<&'a str>,
}

/// Inventory filter, AND across all supplied dimensions. Absent dimensions
/// are no-ops and all dimensions commute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub color: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub max_kms: Option<f64>,
    pub min_mileage: Option<f64>,
    pub max_mileage: Option<f64>,
}

impl ListingFilter {
    pub fn wants_mileage(&self) -> bool {
        self.min_mileage.is_some() || self.max_mileage.is_some()
    }

    pub fn matches(&self, listing: &ListingFacts) -> bool {
        if let Some(color) = &self.color {
            if !contains_ci(listing.color, color) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if listing.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if listing.price > max {
                return false;
            }
        }
        if let Some(max) = self.max_kms {
            if listing.kms_on_odometer > max {
                return false;
            }
        }
        if self.wants_mileage() {
            // a listing without a linked spec, or whose spec mileage text
            // holds no number, never passes a mileage bound
            let Some(mileage) = parse_mileage(listing.oem_mileage) else {
                return false;
            };
            if let Some(min) = self.min_mileage {
                if mileage < min {
                    return false;
                }
            }
            if let Some(max) = self.max_mileage {
                if mileage > max {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Listing {
        title: &'static str,
        color: &'static str,
        price: f64,
        kms: f64,
        oem_mileage: Option<&'static str>,
    }

    impl Listing {
        fn facts(&self) -> ListingFacts<'_> {
            ListingFacts {
                color: self.color,
                price: self.price,
                kms_on_odometer: self.kms,
                oem_mileage: self.oem_mileage,
            }
        }
    }

    fn lot() -> Vec<Listing> {
        vec![
            Listing {
                title: "L1",
                color: "White",
                price: 450000.0,
                kms: 30000.0,
                oem_mileage: Some("18 kmpl"),
            },
            Listing {
                title: "L2",
                color: "white pearl",
                price: 520000.0,
                kms: 45000.0,
                oem_mileage: None,
            },
            Listing {
                title: "L3",
                color: "Black",
                price: 390000.0,
                kms: 80000.0,
                oem_mileage: Some("N/A"),
            },
        ]
    }

    fn apply<'a>(listings: &'a [Listing], filter: &ListingFilter) -> Vec<&'a str> {
        listings
            .iter()
            .filter(|l| filter.matches(&l.facts()))
            .map(|l| l.title)
            .collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        assert_eq!(apply(&lot(), &ListingFilter::default()), vec!["L1", "L2", "L3"]);
    }

    #[test]
    fn color_is_case_insensitive_substring() {
        let filter = ListingFilter {
            color: Some("white".to_string()),
            ..Default::default()
        };
        assert_eq!(apply(&lot(), &filter), vec!["L1", "L2"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = ListingFilter {
            min_price: Some(450000.0),
            max_price: Some(520000.0),
            ..Default::default()
        };
        assert_eq!(apply(&lot(), &filter), vec!["L1", "L2"]);
    }

    #[test]
    fn max_kms_is_inclusive_upper_bound() {
        let filter = ListingFilter {
            max_kms: Some(45000.0),
            ..Default::default()
        };
        assert_eq!(apply(&lot(), &filter), vec!["L1", "L2"]);
    }

    #[test]
    fn missing_mileage_data_never_passes_a_mileage_bound() {
        // L2 has no linked spec, L3's spec mileage holds no number; a
        // generous bound still excludes both
        let filter = ListingFilter {
            min_mileage: Some(10.0),
            ..Default::default()
        };
        assert_eq!(apply(&lot(), &filter), vec!["L1"]);

        let filter = ListingFilter {
            max_mileage: Some(1000.0),
            ..Default::default()
        };
        assert_eq!(apply(&lot(), &filter), vec!["L1"]);
    }

    #[test]
    fn no_mileage_bound_skips_the_dimension() {
        let filter = ListingFilter {
            max_price: Some(600000.0),
            ..Default::default()
        };
        assert_eq!(apply(&lot(), &filter), vec!["L1", "L2", "L3"]);
    }

    #[test]
    fn mileage_bounds_are_inclusive() {
        let filter = ListingFilter {
            min_mileage: Some(18.0),
            max_mileage: Some(18.0),
            ..Default::default()
        };
        assert_eq!(apply(&lot(), &filter), vec!["L1"]);
    }

    #[test]
    fn dimensions_commute() {
        let listings = lot();

        let color_and_price = ListingFilter {
            color: Some("white".to_string()),
            max_price: Some(500000.0),
            ..Default::default()
        };
        let mileage_only = ListingFilter {
            min_mileage: Some(15.0),
            ..Default::default()
        };
        let sequential: Vec<&str> = listings
            .iter()
            .filter(|l| color_and_price.matches(&l.facts()))
            .filter(|l| mileage_only.matches(&l.facts()))
            .map(|l| l.title)
            .collect();

        let combined = ListingFilter {
            color: Some("white".to_string()),
            max_price: Some(500000.0),
            min_mileage: Some(15.0),
            ..Default::default()
        };
        assert_eq!(sequential, apply(&listings, &combined));
        assert_eq!(sequential, vec!["L1"]);
    }
}
