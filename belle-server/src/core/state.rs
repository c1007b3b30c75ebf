use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::AdminSessions;
use crate::booking::StatusEngine;
use crate::core::Config;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::db::DbService;
use crate::services::{EmailNotifier, ExpirySweeper, ReservationNotifier};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 持有所有服务的共享引用，使用 Arc 实现浅拷贝。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | sessions | Arc<AdminSessions> | 管理后台会话 |
/// | notifier | Arc<dyn ReservationNotifier> | 邮件通知服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 管理后台会话存储
    pub sessions: Arc<AdminSessions>,
    /// 邮件通知服务
    pub notifier: Arc<dyn ReservationNotifier>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`Self::initialize`] 代替；测试场景直接传入
    /// 内存数据库和 mock 通知器。
    pub fn new(config: Config, db: Surreal<Db>, notifier: Arc<dyn ReservationNotifier>) -> Self {
        Self {
            config,
            db,
            sessions: Arc::new(AdminSessions::new()),
            notifier,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database)
    /// 3. 邮件通知服务
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_service = DbService::open(&config.database_dir())
            .await
            .expect("Failed to initialize database");

        let notifier: Arc<dyn ReservationNotifier> = Arc::new(EmailNotifier::new(config));

        Self::new(config.clone(), db_service.db, notifier)
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 构造状态变更引擎 (轻量，可按请求创建)
    pub fn status_engine(&self) -> StatusEngine {
        StatusEngine::new(self.db.clone(), self.notifier.clone())
    }

    /// 注册后台任务
    ///
    /// 必须在 HTTP 服务启动前调用。
    ///
    /// 注册的任务：
    /// - 过期清扫启动检查 (Warmup, 运行一次)
    /// - 过期清扫定时器 (Periodic, 按配置间隔)
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let sweeper = ExpirySweeper::new(self.db.clone(), self.config.sweep_interval());

        let startup_sweeper = sweeper.clone();
        tasks.spawn("expiry_sweep_startup", TaskKind::Warmup, async move {
            if let Err(err) = startup_sweeper.sweep_once().await {
                tracing::error!(error = %err, "Startup expiry sweep failed");
            }
        });

        let token = tasks.shutdown_token();
        tasks.spawn("expiry_sweeper", TaskKind::Periodic, async move {
            sweeper.run(token).await;
        });
    }
}
