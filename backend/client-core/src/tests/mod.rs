mod session;
mod support;
mod token_store;
mod workflow;
