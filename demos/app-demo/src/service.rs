use std::sync::atomic::{AtomicU64, Ordering};

use lhspring_macros::Discoverable;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Default, Discoverable)]
#[component("userService")]
pub struct UserServiceImpl;

impl UserServiceImpl {
    pub fn greet(&self, name: &str) -> String {
        format!("Hello, {}!", name)
    }
}

/// 每次获取都会得到新的请求上下文
#[derive(Debug, Discoverable)]
#[component(name = "requestContext")]
#[scope("prototype")]
pub struct RequestContext {
    pub request_id: u64,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            request_id: NEXT_REQUEST_ID.fetch_add(1, Ordering::SeqCst),
        }
    }
}
