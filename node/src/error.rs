use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("store error: {0}")]
    Store(#[from] vox_store::StoreError),

    #[error("verification error: {0}")]
    Verification(#[from] vox_verification::VerificationError),

    #[error("ledger error: {0}")]
    Ledger(#[from] vox_ballot::LedgerError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
