use thiserror::Error;

/// 服务器启动/运行期错误
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// Server 的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
