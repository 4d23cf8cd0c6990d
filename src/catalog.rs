//! Product listing: filtering, enrichment and sort orders for the farmer home screen.

use std::cmp::Ordering;

use crate::domain::{Category, Coordinates, Product, ProductStatus};
use crate::geo;

pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    Newest,
    PriceHighToLow,
    PriceLowToHigh,
    Distance,
    /// Best rated first, the home screen's initial order.
    #[default]
    Rating,
}

/// What the farmer asked to see.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<Category>,
    pub sort: SortBy,
    /// The viewer's own location, needed for distances.
    pub origin: Option<Coordinates>,
    /// Case-insensitive text matched against name and description.
    pub search: Option<String>,
}

impl ProductQuery {
    /// Only active products in the selected category that match the search
    /// text are listed.
    pub fn admits(&self, product: &Product) -> bool {
        product.status == ProductStatus::Active
            && self.category.map_or(true, |c| product.category == c)
            && self.matches_search(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();
        product.name.to_lowercase().contains(&needle) || product.description.to_lowercase().contains(&needle)
    }
}

/// A product with the vendor and review data the listing shows next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    pub product: Product,
    pub vendor_name: String,
    pub distance_km: Option<f64>,
    pub average_rating: f64,
}

impl ProductListing {
    pub fn distance_label(&self) -> Option<String> {
        self.distance_km.map(geo::format_distance)
    }
}

pub fn sort_listings(listings: &mut Vec<ProductListing>, sort: SortBy) {
    match sort {
        SortBy::Newest => listings.sort_by(|a, b| b.product.created_at.cmp(&a.product.created_at)),
        SortBy::PriceHighToLow => {
            listings.sort_by(|a, b| cmp_f64(b.product.price_per_unit, a.product.price_per_unit))
        }
        SortBy::PriceLowToHigh => {
            listings.sort_by(|a, b| cmp_f64(a.product.price_per_unit, b.product.price_per_unit))
        }
        SortBy::Rating => listings.sort_by(|a, b| cmp_f64(b.average_rating, a.average_rating)),
        SortBy::Distance => geo::sort_by_distance(listings, |l| l.distance_km),
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}
