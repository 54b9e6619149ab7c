//! Filter state driving the visible product list.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Whether a product category passes this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("category cannot be empty".to_string()),
            "all" => Ok(Self::All),
            name => Ok(Self::Named(name.to_string())),
        }
    }
}

/// Fixed price ranges, each a half-open interval `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriceBand {
    #[default]
    All,
    Under25,
    From25To50,
    From50To100,
    From100To500,
    Over500,
}

impl PriceBand {
    /// Lower (inclusive) and upper (exclusive) bounds; `None` means unbounded.
    #[must_use]
    pub fn bounds(self) -> (Option<Decimal>, Option<Decimal>) {
        let d = |n: i64| Some(Decimal::from(n));
        match self {
            Self::All => (None, None),
            Self::Under25 => (None, d(25)),
            Self::From25To50 => (d(25), d(50)),
            Self::From50To100 => (d(50), d(100)),
            Self::From100To500 => (d(100), d(500)),
            Self::Over500 => (d(500), None),
        }
    }

    /// Whether a price falls inside this band.
    #[must_use]
    pub fn contains(self, price: Decimal) -> bool {
        let (low, high) = self.bounds();
        low.is_none_or(|low| price >= low) && high.is_none_or(|high| price < high)
    }

    /// Human-readable label for the active-filter summary.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Prices",
            Self::Under25 => "Under $25",
            Self::From25To50 => "$25 - $50",
            Self::From50To100 => "$50 - $100",
            Self::From100To500 => "$100 - $500",
            Self::Over500 => "$500+",
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Under25 => write!(f, "0-25"),
            Self::From25To50 => write!(f, "25-50"),
            Self::From50To100 => write!(f, "50-100"),
            Self::From100To500 => write!(f, "100-500"),
            Self::Over500 => write!(f, "500+"),
        }
    }
}

impl FromStr for PriceBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            "0-25" => Ok(Self::Under25),
            "25-50" => Ok(Self::From25To50),
            "50-100" => Ok(Self::From50To100),
            "100-500" => Ok(Self::From100To500),
            "500+" => Ok(Self::Over500),
            _ => Err(format!("invalid price band: {s}")),
        }
    }
}

/// Ordering applied to the filtered products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Catalog order ("featured").
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    RatingDesc,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::PriceAsc => write!(f, "price-low"),
            Self::PriceDesc => write!(f, "price-high"),
            Self::NameAsc => write!(f, "name-asc"),
            Self::NameDesc => write!(f, "name-desc"),
            Self::RatingDesc => write!(f, "rating"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default" | "featured" => Ok(Self::Default),
            "price-low" => Ok(Self::PriceAsc),
            "price-high" => Ok(Self::PriceDesc),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            "rating" => Ok(Self::RatingDesc),
            _ => Err(format!("invalid sort key: {s}")),
        }
    }
}

/// Which part of the filter an active-filter chip refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Category,
    Price,
    Search,
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "category" => Ok(Self::Category),
            "price" => Ok(Self::Price),
            "search" => Ok(Self::Search),
            _ => Err(format!("invalid filter kind: {s}")),
        }
    }
}

/// A non-default filter currently narrowing the product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub kind: FilterKind,
    pub label: String,
}

/// Search, category, price band and sort key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_text: String,
    pub category: CategoryFilter,
    pub price_band: PriceBand,
    pub sort_key: SortKey,
}

impl FilterState {
    /// Search text as matched: trimmed and lowercased.
    #[must_use]
    pub fn search_needle(&self) -> String {
        self.search_text.trim().to_lowercase()
    }

    /// Filters that differ from their default, in display order.
    ///
    /// Sort order is not a filter and never appears here.
    #[must_use]
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut filters = Vec::new();

        if let CategoryFilter::Named(name) = &self.category {
            filters.push(ActiveFilter {
                kind: FilterKind::Category,
                label: name.clone(),
            });
        }

        if self.price_band != PriceBand::All {
            filters.push(ActiveFilter {
                kind: FilterKind::Price,
                label: self.price_band.label().to_string(),
            });
        }

        let search = self.search_text.trim();
        if !search.is_empty() {
            filters.push(ActiveFilter {
                kind: FilterKind::Search,
                label: search.to_string(),
            });
        }

        filters
    }

    /// Reset one filter to its default.
    pub fn clear(&mut self, kind: FilterKind) {
        match kind {
            FilterKind::Category => self.category = CategoryFilter::All,
            FilterKind::Price => self.price_band = PriceBand::All,
            FilterKind::Search => self.search_text.clear(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_bands_are_half_open() {
        let price = |cents: i64| Decimal::new(cents, 2);

        assert!(PriceBand::Under25.contains(Decimal::ZERO));
        assert!(PriceBand::Under25.contains(price(2499)));
        assert!(!PriceBand::Under25.contains(price(2500)));
        assert!(PriceBand::From25To50.contains(price(2500)));
        assert!(!PriceBand::From25To50.contains(price(5000)));
        assert!(PriceBand::From100To500.contains(price(49999)));
        assert!(!PriceBand::From100To500.contains(price(50000)));
        assert!(PriceBand::Over500.contains(price(50000)));
        assert!(PriceBand::All.contains(price(99_999_999)));
    }

    #[test]
    fn test_price_band_round_trips_through_str() {
        for band in [
            PriceBand::All,
            PriceBand::Under25,
            PriceBand::From25To50,
            PriceBand::From50To100,
            PriceBand::From100To500,
            PriceBand::Over500,
        ] {
            assert_eq!(band.to_string().parse::<PriceBand>().unwrap(), band);
        }
        assert!("1-2".parse::<PriceBand>().is_err());
    }

    #[test]
    fn test_sort_key_accepts_featured_alias() {
        assert_eq!("featured".parse::<SortKey>().unwrap(), SortKey::Default);
        assert_eq!("rating".parse::<SortKey>().unwrap(), SortKey::RatingDesc);
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "jewelery".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Named("jewelery".to_string())
        );
        assert!(" ".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_active_filters_and_clear() {
        let mut filter = FilterState {
            search_text: "  shirt ".to_string(),
            category: CategoryFilter::Named("men's clothing".to_string()),
            price_band: PriceBand::From25To50,
            sort_key: SortKey::PriceAsc,
        };

        let active = filter.active_filters();
        let labels: Vec<&str> = active.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["men's clothing", "$25 - $50", "shirt"]);

        filter.clear(FilterKind::Price);
        filter.clear(FilterKind::Search);
        assert_eq!(filter.active_filters().len(), 1);

        filter.clear(FilterKind::Category);
        assert!(filter.active_filters().is_empty());
        assert_eq!(filter.sort_key, SortKey::PriceAsc);
    }
}
