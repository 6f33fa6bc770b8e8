//! A small HTTP service exposing CRUD over a single recipe collection,
//! backed by MongoDB. The router is built from an injected [`store::RecipeStore`]
//! so the whole HTTP surface is testable without a live database.

pub mod errors;
pub mod models;
pub mod routes;
pub mod store;
