use chrono::Utc;

use super::error::ReviewError;
use crate::actor_framework::Entity;
use crate::domain::{Review, ReviewCreate, MAX_RATING, MIN_RATING};

impl Entity for Review {
    type Id = String;
    type CreateParams = ReviewCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: ReviewCreate) -> Result<Self, String> {
        if !(MIN_RATING..=MAX_RATING).contains(&params.rating) {
            return Err(ReviewError::InvalidRating(params.rating).to_string());
        }
        Ok(Self {
            id,
            product_id: params.product_id,
            order_id: params.order_id,
            farmer_id: params.farmer_id,
            rating: params.rating,
            text: params.text,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
