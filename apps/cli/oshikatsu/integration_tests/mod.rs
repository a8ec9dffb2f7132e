mod auth;
mod groups;
mod helpers;
