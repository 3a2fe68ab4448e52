//! Embedding access: the gateway trait, the remote sidecar client, and the
//! precomputed per-image embedding store.

pub mod provider;
pub mod remote;
pub mod store;

pub use provider::TextEmbedder;
pub use remote::RemoteEmbedder;
pub use store::EmbeddingStore;
