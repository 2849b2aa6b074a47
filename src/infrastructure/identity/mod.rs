mod file_identity_store;

pub use file_identity_store::FileIdentityStore;
