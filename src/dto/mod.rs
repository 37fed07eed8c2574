//! DTO modules shared by the REST client, the engines and the push channel.

pub mod api;
pub mod push;
