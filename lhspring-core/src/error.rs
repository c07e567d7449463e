use thiserror::Error;

/// 容器错误
///
/// 构造期错误（`Configuration`、`Discovery`、单例的 `Instantiation`）会让
/// 容器构造整体失败；调用期错误（`NotFound`、`TypeMismatch`、原型的
/// `Instantiation`）只影响当次调用，不会破坏已缓存的单例和定义注册表。
#[derive(Debug, Error)]
pub enum ContainerError {
    /// 配置中缺少扫描根路径，或路径列表为空
    #[error("Invalid container configuration: {0}")]
    Configuration(String),

    /// 扫描到的类无法被解析或读取标记
    #[error("Failed to introspect class '{type_name}': {reason}")]
    Discovery { type_name: String, reason: String },

    /// Bean 无法被解析或构造
    #[error("Failed to instantiate bean '{bean}' of type '{type_name}': {source}")]
    Instantiation {
        bean: String,
        type_name: String,
        #[source]
        source: anyhow::Error,
    },

    /// 容器中没有该名称的 Bean
    #[error("No bean named '{0}' is defined")]
    NotFound(String),

    /// Bean 存在但类型与请求不符
    #[error("Bean '{bean}' is not of the requested type '{expected}'")]
    TypeMismatch { bean: String, expected: String },
}

impl ContainerError {
    pub(crate) fn discovery(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Discovery {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// 错误种类本身是否意味着容器无法构造
    ///
    /// 只有 `Configuration` 和 `Discovery` 返回 true。`Instantiation` 取决于发生阶段：
    /// 单例预实例化时同样会中止构造，原型查询时只影响当次调用，因此这里返回 false
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Discovery { .. })
    }
}

/// 容器操作的统一返回类型
pub type ContainerResult<T> = std::result::Result<T, ContainerError>;

/// 应用层使用的返回类型，通过 `.context()` 附加上下文
pub use anyhow::Result;
