use tracing::{debug, error, instrument};

use crate::app_system::AppError;
use crate::catalog::{sort_listings, ProductListing, ProductQuery, UNKNOWN_VENDOR};
use crate::clients::{ProductClient, ReviewClient, UserClient};
use crate::domain::{average_rating, Coordinates, Product, Review};
use crate::geo;

/// A product page: the listing plus every review.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub listing: ProductListing,
    pub reviews: Vec<Review>,
}

/// Read-side client for the farmer's product browsing.
///
/// Joins products with their vendor's user document and their reviews.
#[derive(Clone)]
pub struct CatalogClient {
    product_client: ProductClient,
    user_client: UserClient,
    review_client: ReviewClient,
}

impl CatalogClient {
    pub fn new(product_client: ProductClient, user_client: UserClient, review_client: ReviewClient) -> Self {
        Self {
            product_client,
            user_client,
            review_client,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> Result<Vec<ProductListing>, AppError> {
        let products = self.product_client.list_active().await?;
        let mut listings = Vec::with_capacity(products.len());
        for product in products.into_iter().filter(|p| query.admits(p)) {
            let reviews = self.review_client.list_for_product(product.id.clone()).await?;
            listings.push(self.enrich(product, &reviews, query.origin).await);
        }
        sort_listings(&mut listings, query.sort);
        debug!(count = listings.len(), "Listed products");
        Ok(listings)
    }

    #[instrument(skip(self))]
    pub async fn product_details(
        &self,
        product_id: String,
        origin: Option<Coordinates>,
    ) -> Result<ProductDetails, AppError> {
        let product = self.product_client.require_product(product_id.clone()).await?;
        let reviews = self.review_client.list_for_product(product_id).await?;
        let listing = self.enrich(product, &reviews, origin).await;
        Ok(ProductDetails { listing, reviews })
    }

    /// A vendor lookup failure only costs the name and distance.
    async fn enrich(&self, product: Product, reviews: &[Review], origin: Option<Coordinates>) -> ProductListing {
        let vendor = match self.user_client.get_user(product.vendor_id.clone()).await {
            Ok(vendor) => vendor,
            Err(e) => {
                error!(vendor_id = %product.vendor_id, error = %e, "Error fetching vendor");
                None
            }
        };
        let vendor_name = vendor
            .as_ref()
            .and_then(|v| v.business_name())
            .unwrap_or(UNKNOWN_VENDOR)
            .to_string();
        let distance_km = geo::distance_between(origin, vendor.as_ref().and_then(|v| v.location()));

        ProductListing {
            product,
            vendor_name,
            distance_km,
            average_rating: average_rating(reviews),
        }
    }
}
