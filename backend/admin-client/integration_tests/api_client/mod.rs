mod auth;
mod builders;
mod executor;
