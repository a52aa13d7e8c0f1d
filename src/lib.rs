pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod power;
pub mod prescription;
pub mod record;
pub mod render;
pub mod session;
pub mod store;
pub mod transpose;
pub mod validator;
// cmd and reports are binary modules (declared in main.rs).
