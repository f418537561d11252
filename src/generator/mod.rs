//! Auxiliary outputs generated alongside the pages.

pub mod sitemap;
