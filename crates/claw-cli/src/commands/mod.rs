//! Command implementations.

pub mod create;
pub mod login;
pub mod models;
pub mod new;

use claw_api::{ControllerApi, HttpControllerApi};
use claw_core::Config;
use std::sync::Arc;

pub fn controller(config: &Config) -> Arc<dyn ControllerApi> {
    Arc::new(HttpControllerApi::new(config.http()))
}
