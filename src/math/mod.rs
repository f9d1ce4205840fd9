pub mod init;
pub mod transfer;

pub use init::WeightInit;
pub use transfer::pre_activation;
