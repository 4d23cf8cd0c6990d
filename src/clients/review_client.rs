use tracing::{debug, instrument};

use crate::actor_framework::{Query, ResourceClient};
use crate::domain::{average_rating, Review, ReviewCreate, MAX_RATING, MIN_RATING};
use crate::review_actor::ReviewError;

/// Client for interacting with the Review actor.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<Review>,
}

crate::impl_basic_client!(ReviewClient, Review, ReviewError, review);

impl ReviewClient {
    #[instrument(skip(self, params), fields(product_id = %params.product_id, rating = params.rating))]
    pub async fn create_review(&self, params: ReviewCreate) -> Result<String, ReviewError> {
        if !(MIN_RATING..=MAX_RATING).contains(&params.rating) {
            return Err(ReviewError::InvalidRating(params.rating));
        }
        debug!("Sending request");
        self.inner.create(params).await.map_err(ReviewError::from)
    }

    #[instrument(skip(self))]
    pub async fn list_for_product(&self, product_id: String) -> Result<Vec<Review>, ReviewError> {
        debug!("Sending request");
        let query = Query::new(format!("product_id == {}", product_id), move |r: &Review| {
            r.product_id == product_id
        });
        self.inner.list(query).await.map_err(ReviewError::from)
    }

    #[instrument(skip(self))]
    pub async fn average_for_product(&self, product_id: String) -> Result<f64, ReviewError> {
        let reviews = self.list_for_product(product_id).await?;
        Ok(average_rating(&reviews))
    }
}
