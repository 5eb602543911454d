use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("store error: {0}")]
    Store(#[from] vox_store::StoreError),
}
