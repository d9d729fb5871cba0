//! Stock image adapters.

mod mock_provider;
mod pexels_provider;
mod provider_chain;
mod unsplash_provider;

pub use mock_provider::MockImageProvider;
pub use pexels_provider::PexelsProvider;
pub use provider_chain::ImageProviderChain;
pub use unsplash_provider::UnsplashProvider;
