use crate::domain::ProductStatus;

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Moves a draft listing into the catalog.
    Publish,
    /// Pulls a listing back to draft.
    Unpublish,
}

/// Results from ProductActions.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    StatusChanged(ProductStatus),
}
