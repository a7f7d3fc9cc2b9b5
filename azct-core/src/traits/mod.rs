//! Trait 定义模块

mod config_service;
mod resource_handler;

pub use config_service::{BrowserConfig, ConfigService, InMemoryConfigService, JsonConfigService};
pub use resource_handler::{
    Action, ActionCallback, ActionContext, ActionRequest, ResourceHandler,
};
