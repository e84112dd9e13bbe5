use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Store(#[from] natter_core::StoreError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
