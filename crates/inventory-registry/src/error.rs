use intent_parser::Color;
use thiserror::Error;

pub type Result<T, E = InventoryError> = core::result::Result<T, E>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("inventory exhausted for {0}")]
    Exhausted(Color),
    #[error("duplicate object name: {0}")]
    DuplicateName(String),
}
