pub mod cart;
pub mod client;
pub mod order;
pub mod profile;

pub use cart::CartRepositoryHttp;
pub use client::StorefrontClient;
pub use order::OrderRepositoryHttp;
pub use profile::DeliveryAddressRepositoryHttp;
