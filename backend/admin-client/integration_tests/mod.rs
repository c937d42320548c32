mod api_client;
mod config;
mod credentials;
mod helpers;
