mod config;
mod endpoints;
mod query;
mod request;
