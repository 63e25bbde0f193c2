/// Network adapters for the build-tracking hub and content resolver
mod content_resolver_client;
mod koji_client;
pub mod xmlrpc;

pub use content_resolver_client::ContentResolverClient;
pub use koji_client::KojiClient;
