/// Custom actions for CartItem entities.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Changes the line quantity, within the snapshot bounds.
    SetQuantity(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    QuantityChanged(u32),
}
