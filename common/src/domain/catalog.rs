use crate::domain::{clean_text, contains_ci};
use std::cmp::Ordering;

/// The catalog-relevant fields of an OEM record, borrowed from whatever
/// representation the caller holds (diesel model, DTO, form state).
pub struct OemFacts<'a> {
    pub manufacturer: &'a str,
    pub model_name: &'a str,
    pub year: i32,
}

/// Year constraint parsed from caller input. A year that was supplied but
/// does not parse as an integer matches no record at all, it must never
/// widen to "any" and never abort the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    Any,
    Exact(i32),
    Unmatchable,
}

impl YearFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match clean_text(raw) {
            None => Self::Any,
            Some(s) => s.parse().map(Self::Exact).unwrap_or(Self::Unmatchable),
        }
    }

    pub fn admits(self, year: i32) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(y) => y == year,
            Self::Unmatchable => false,
        }
    }
}

/// Multi-match catalog filter backing `GET /oem/list`.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub q: Option<String>,
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    pub year: YearFilter,
}

impl ListQuery {
    pub fn new(
        q: Option<&str>,
        manufacturer: Option<&str>,
        model_name: Option<&str>,
        year: Option<&str>,
    ) -> Self {
        Self {
            q: clean_text(q),
            manufacturer: clean_text(manufacturer),
            model_name: clean_text(model_name),
            year: YearFilter::parse(year),
        }
    }

    /// Free text matches manufacturer OR model name OR the exact year; the
    /// structured fields combine with AND instead.
    pub fn matches(&self, spec: &OemFacts) -> bool {
        if let Some(q) = &self.q {
            return contains_ci(spec.manufacturer, q)
                || contains_ci(spec.model_name, q)
                || YearFilter::parse(Some(q.as_str())).admits(spec.year);
        }
        self.manufacturer
            .as_deref()
            .is_none_or(|m| contains_ci(spec.manufacturer, m))
            && self
                .model_name
                .as_deref()
                .is_none_or(|m| contains_ci(spec.model_name, m))
            && self.year.admits(spec.year)
    }
}

/// Contractual catalog ordering: manufacturer ascending, model name
/// ascending, year descending.
pub fn catalog_order(a: &OemFacts, b: &OemFacts) -> Ordering {
    a.manufacturer
        .cmp(b.manufacturer)
        .then_with(|| a.model_name.cmp(b.model_name))
        .then_with(|| b.year.cmp(&a.year))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub limit: usize,
    pub skip: usize,
}

/// 1-indexed pagination, page defaults to 1 (and is floored at 1), limit
/// defaults to 50.
pub fn page_window(page: Option<usize>, limit: Option<usize>) -> PageWindow {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(50);
    PageWindow {
        page,
        limit,
        skip: (page - 1) * limit,
    }
}

/// Single-best-match criteria backing `GET /oem/search`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    pub year: YearFilter,
}

impl SearchCriteria {
    /// Splits free text on whitespace. A token of exactly four ASCII digits
    /// is taken as the year and every token equal to it is dropped; the
    /// first remaining token constrains the manufacturer, the second the
    /// model name. A manufacturer or model name that itself contains a
    /// four-digit run will be misread as a year; that behavior is part of
    /// the lookup contract.
    pub fn from_free_text(q: &str) -> Self {
        let tokens: Vec<&str> = q.split_whitespace().collect();
        let year_token = tokens
            .iter()
            .copied()
            .find(|t| t.len() == 4 && t.bytes().all(|b| b.is_ascii_digit()));
        let rest: Vec<&str> = tokens
            .iter()
            .copied()
            .filter(|t| Some(*t) != year_token)
            .collect();
        Self {
            manufacturer: rest.first().map(|s| (*s).to_string()),
            model_name: rest.get(1).map(|s| (*s).to_string()),
            year: match year_token.and_then(|t| t.parse().ok()) {
                Some(y) => YearFilter::Exact(y),
                None => YearFilter::Any,
            },
        }
    }

    pub fn from_fields(
        manufacturer: Option<&str>,
        model_name: Option<&str>,
        year: Option<&str>,
    ) -> Self {
        Self {
            manufacturer: clean_text(manufacturer),
            model_name: clean_text(model_name),
            year: YearFilter::parse(year),
        }
    }

    pub fn matches(&self, spec: &OemFacts) -> bool {
        self.manufacturer
            .as_deref()
            .is_none_or(|m| contains_ci(spec.manufacturer, m))
            && self
                .model_name
                .as_deref()
                .is_none_or(|m| contains_ci(spec.model_name, m))
            && self.year.admits(spec.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Spec {
        manufacturer: &'static str,
        model_name: &'static str,
        year: i32,
    }

    impl Spec {
        fn facts(&self) -> OemFacts<'_> {
            OemFacts {
                manufacturer: self.manufacturer,
                model_name: self.model_name,
                year: self.year,
            }
        }
    }

    fn catalog() -> Vec<Spec> {
        vec![
            Spec { manufacturer: "Maruti", model_name: "Swift", year: 2017 },
            Spec { manufacturer: "Honda", model_name: "City", year: 2015 },
            Spec { manufacturer: "Honda", model_name: "City", year: 2018 },
            Spec { manufacturer: "Honda", model_name: "Amaze", year: 2019 },
            Spec { manufacturer: "Hyundai", model_name: "i20", year: 2016 },
        ]
    }

    #[test]
    fn free_text_matches_manufacturer_or_model() {
        let query = ListQuery::new(Some("honda"), None, None, None);
        let matched: Vec<&str> = catalog()
            .iter()
            .filter(|s| query.matches(&s.facts()))
            .map(|s| s.manufacturer)
            .collect();
        assert_eq!(matched, vec!["Honda", "Honda", "Honda"]);
    }

    #[test]
    fn free_text_year_branch_requires_integer() {
        // "honda" is not integer-parseable, the year branch must be dead
        // rather than matching everything
        let query = ListQuery::new(Some("honda"), None, None, None);
        assert!(!query.matches(&OemFacts {
            manufacturer: "Maruti",
            model_name: "Swift",
            year: 2017,
        }));

        let query = ListQuery::new(Some("2017"), None, None, None);
        let matched = catalog().iter().filter(|s| query.matches(&s.facts())).count();
        assert_eq!(matched, 1);
    }

    #[test]
    fn structured_filters_combine_with_and() {
        let query = ListQuery::new(None, Some("honda"), Some("city"), Some("2015"));
        let matched: Vec<i32> = catalog()
            .iter()
            .filter(|s| query.matches(&s.facts()))
            .map(|s| s.year)
            .collect();
        assert_eq!(matched, vec![2015]);
    }

    #[test]
    fn unparseable_year_matches_nothing() {
        let query = ListQuery::new(None, None, None, Some("twenty15"));
        assert_eq!(catalog().iter().filter(|s| query.matches(&s.facts())).count(), 0);
    }

    #[test]
    fn blank_parameters_are_absent() {
        let query = ListQuery::new(Some("  "), Some(""), None, None);
        assert_eq!(
            catalog().iter().filter(|s| query.matches(&s.facts())).count(),
            catalog().len()
        );
    }

    #[test]
    fn sort_contract() {
        let mut specs = catalog();
        specs.sort_by(|a, b| catalog_order(&a.facts(), &b.facts()));
        let order: Vec<(&str, &str, i32)> = specs
            .iter()
            .map(|s| (s.manufacturer, s.model_name, s.year))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Honda", "Amaze", 2019),
                ("Honda", "City", 2018),
                ("Honda", "City", 2015),
                ("Hyundai", "i20", 2016),
                ("Maruti", "Swift", 2017),
            ]
        );
    }

    #[test]
    fn page_window_defaults_and_floor() {
        assert_eq!(page_window(None, None), PageWindow { page: 1, limit: 50, skip: 0 });
        assert_eq!(page_window(Some(3), Some(10)), PageWindow { page: 3, limit: 10, skip: 20 });
        assert_eq!(page_window(Some(0), Some(10)), PageWindow { page: 1, limit: 10, skip: 0 });
    }

    #[test]
    fn pagination_reconstructs_full_match_set() {
        let mut specs = catalog();
        specs.sort_by(|a, b| catalog_order(&a.facts(), &b.facts()));
        let total = specs.len();

        let limit = 2;
        let mut collected = Vec::new();
        let mut page = 1;
        loop {
            let window = page_window(Some(page), Some(limit));
            let slice: Vec<_> = specs.iter().skip(window.skip).take(window.limit).collect();
            if slice.is_empty() {
                break;
            }
            collected.extend(slice);
            page += 1;
        }
        assert_eq!(collected.len(), total);
        for (got, want) in collected.iter().zip(specs.iter()) {
            assert_eq!(got.year, want.year);
            assert_eq!(got.model_name, want.model_name);
        }
    }

    #[test]
    fn free_text_search_extracts_year() {
        let criteria = SearchCriteria::from_free_text("Honda City 2015");
        assert_eq!(criteria.manufacturer.as_deref(), Some("Honda"));
        assert_eq!(criteria.model_name.as_deref(), Some("City"));
        assert_eq!(criteria.year, YearFilter::Exact(2015));

        let hit = catalog().into_iter().find(|s| criteria.matches(&s.facts()));
        assert_eq!(hit.map(|s| s.year), Some(2015));
    }

    #[test]
    fn free_text_search_without_year_matches_any_year() {
        let criteria = SearchCriteria::from_free_text("Maruti Swift");
        assert_eq!(criteria.year, YearFilter::Any);
        assert!(criteria.matches(&OemFacts {
            manufacturer: "Maruti",
            model_name: "Swift",
            year: 2017,
        }));
    }

    #[test]
    fn year_token_removal_drops_every_copy() {
        let criteria = SearchCriteria::from_free_text("2015 City 2015");
        assert_eq!(criteria.manufacturer.as_deref(), Some("City"));
        assert_eq!(criteria.model_name, None);
        assert_eq!(criteria.year, YearFilter::Exact(2015));
    }

    #[test]
    fn four_digit_run_in_name_is_taken_as_year() {
        // quirky but contractual: "3500" reads as a model year
        let criteria = SearchCriteria::from_free_text("Rover 3500 V8");
        assert_eq!(criteria.manufacturer.as_deref(), Some("Rover"));
        assert_eq!(criteria.model_name.as_deref(), Some("V8"));
        assert_eq!(criteria.year, YearFilter::Exact(3500));
    }

    #[test]
    fn search_no_match_is_none() {
        let criteria = SearchCriteria::from_free_text("Tesla Model3");
        assert!(catalog().iter().find(|s| criteria.matches(&s.facts())).is_none());
    }
}
