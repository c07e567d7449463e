use std::collections::HashMap;

use lhspring_macros::Discoverable;

/// 用户数据访问
#[derive(Debug, Discoverable)]
#[component]
pub struct UserMapper {
    users: HashMap<u32, String>,
}

impl Default for UserMapper {
    fn default() -> Self {
        let users = [(1, "alice"), (2, "bob")]
            .into_iter()
            .map(|(id, name)| (id, name.to_string()))
            .collect();
        tracing::info!("UserMapper created");
        Self { users }
    }
}

impl UserMapper {
    pub fn find_by_id(&self, id: u32) -> Option<&str> {
        self.users.get(&id).map(String::as_str)
    }
}

// 未标记为组件的辅助类型，扫描时被跳过
#[derive(Debug, Default, Discoverable)]
pub struct RowMapper;
