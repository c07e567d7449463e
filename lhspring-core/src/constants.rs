/// 框架常量定义
///
/// 宏生成的代码、配置读取和容器共用同一组标识符，避免各处硬编码

/// 作用域名称
pub const SCOPE_SINGLETON: &str = "singleton";
pub const SCOPE_PROTOTYPE: &str = "prototype";

/// Environment 中存放扫描根路径的配置键
///
/// 支持 TOML 数组（`base-packages = ["a", "b"]`）或逗号分隔字符串
pub const BASE_PACKAGES_KEY: &str = "component-scan.base-packages";

/// 是否打印 banner 的配置键，代码中的设置会被它覆盖
pub const BANNER_KEY: &str = "application.banner";

/// 默认配置文件
pub const DEFAULT_CONFIG_FILE: &str = "application.toml";

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "APP_";

/// Rust 路径分隔符，扫描根路径中的 `.` 会被替换为它
pub const PATH_SEPARATOR: &str = "::";
