mod mapper;
mod service;

use std::sync::Arc;

use anyhow::Result;
use lhspring_core::prelude::*;
use lhspring_macros::Configuration;

use crate::mapper::UserMapper;
use crate::service::{RequestContext, UserServiceImpl};

#[derive(Configuration)]
#[component_scan("app_demo.mapper", "app_demo.service")]
struct SpringConfig;

fn main() -> Result<()> {
    let context = LhSpringApplication::new("AppDemo")
        .logging(LoggingConfig::from_env().level(LogLevel::Info))
        .run_with(&SpringConfig)?;

    let mut names = context.get_bean_names();
    names.sort();
    tracing::info!("Registered beans: {:?}", names);

    let user_mapper = context.get_bean_as::<UserMapper>("userMapper")?;
    let same_mapper = context.get_bean_as::<UserMapper>("userMapper")?;
    tracing::info!(
        "userMapper is a singleton: {}",
        Arc::ptr_eq(&user_mapper, &same_mapper)
    );

    let user_service = context.get_bean_as::<UserServiceImpl>("userService")?;
    if let Some(name) = user_mapper.find_by_id(1) {
        tracing::info!("{}", user_service.greet(name));
    }

    let first = context.get_bean_as::<RequestContext>("requestContext")?;
    let second = context.get_bean_as::<RequestContext>("requestContext")?;
    tracing::info!(
        "requestContext ids: {} and {}",
        first.request_id,
        second.request_id
    );

    match context.get_bean("orderMapper") {
        Err(ContainerError::NotFound(name)) => tracing::info!("No bean named '{}'", name),
        Err(e) => return Err(e.into()),
        Ok(_) => tracing::warn!("orderMapper should not be registered"),
    }

    Ok(())
}
