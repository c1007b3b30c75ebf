//! Belle Reservation Server - 餐厅预订后端
//!
//! # 架构概述
//!
//! 本模块是预订后端的主入口，提供以下核心功能：
//!
//! - **预订生命周期** (`booking`): 可用性计算、状态机、变更引擎
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **后台任务** (`core/tasks`): 过期清扫定时器
//! - **通知** (`services/notification`): 客户邮件 (尽力而为)
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! belle-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── auth/          # 管理后台会话门禁
//! ├── booking/       # 预订领域逻辑
//! ├── services/      # 邮件通知、过期清扫
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! └── utils/         # 错误、日志、验证、时间工具
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{BackgroundTasks, Config, Server, ServerState, TaskKind, build_router};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____       ____
   / __ )___  / / /__
  / __  / _ \/ / / _ \
 / /_/ /  __/ / /  __/
/_____/\___/_/_/\___/
   ______      _      _
  / ____/_  __(_)____(_)___  ___
 / /   / / / / / ___/ / __ \/ _ \
/ /___/ /_/ / (__  ) / / / /  __/
\____/\__,_/_/____/_/_/ /_/\___/
    "#
    );
}
