//! Session GC - 过期会话回收
//!
//! 后台任务：按固定间隔扫描并关闭长时间无活动的阅读会话，
//! 避免内存中的会话表无限增长

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::SessionManagerPort;

/// Session GC 配置
#[derive(Debug, Clone)]
pub struct SessionGcConfig {
    /// 扫描间隔（秒）
    pub interval_secs: u64,
    /// 会话空闲过期时间（秒）
    pub session_expire_secs: u64,
}

/// Session GC 后台任务
pub struct SessionGc {
    config: SessionGcConfig,
    session_manager: Arc<dyn SessionManagerPort>,
}

impl SessionGc {
    pub fn new(config: SessionGcConfig, session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self {
            config,
            session_manager,
        }
    }

    /// 运行 GC 循环（tokio::spawn 使用）
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.interval_secs));
        // 第一个 tick 立即返回，跳过
        ticker.tick().await;

        tracing::info!(
            interval_secs = self.config.interval_secs,
            session_expire_secs = self.config.session_expire_secs,
            "Session GC started"
        );

        loop {
            ticker.tick().await;
            self.sweep();
        }
    }

    /// 执行一轮回收，返回关闭的会话数
    pub fn sweep(&self) -> usize {
        let expired = self
            .session_manager
            .get_expired_sessions(self.config.session_expire_secs);
        let mut closed = 0;

        for session_id in expired {
            match self.session_manager.close(&session_id) {
                Ok(()) => closed += 1,
                Err(e) => {
                    tracing::warn!(session_id = %session_id, error = %e, "Failed to close expired session");
                }
            }
        }

        if closed > 0 {
            tracing::info!(closed = closed, "Expired sessions reclaimed");
        }

        closed
    }
}
