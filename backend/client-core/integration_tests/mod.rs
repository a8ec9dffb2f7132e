mod api_client;
mod auth_flow;
mod helpers;
mod oshi_group_api;
