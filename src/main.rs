//! Narra - AI 小说生成与朗读系统
//!
//! 架构:
//! - Domain: chapter, genre
//! - Application: commands, queries, ports, gateway
//! - Infrastructure: http, memory, adapters, gc

use std::sync::Arc;

use narra::application::NovelGateway;
use narra::config::{load_config, print_config};
use narra::infrastructure::adapters::{
    HttpLlmClient, HttpLlmClientConfig, HttpTtsClient, HttpTtsClientConfig,
};
use narra::infrastructure::http::{AppState, HttpServer, ServerConfig};
use narra::infrastructure::memory::{InMemoryNovelCache, InMemorySessionManager};
use narra::infrastructure::{SessionGc, SessionGcConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},narra={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Narra - AI 小说生成与朗读系统");
    print_config(&config);

    // 从环境变量加载 LLM 凭证
    let api_key = config.llm.load_api_key();
    if api_key.is_none() {
        tracing::warn!(
            env = %config.llm.api_key_env,
            "LLM API key not set, generation requests will fail"
        );
    }

    // 创建 HTTP LLM 客户端
    let llm_config = HttpLlmClientConfig {
        base_url: config.llm.base_url.clone(),
        model: config.llm.model.clone(),
        api_key,
        timeout_secs: config.llm.timeout_secs,
        max_retries: config.llm.max_retries,
    };
    let text_generator = Arc::new(HttpLlmClient::new(llm_config)?);

    // 创建 HTTP TTS 客户端
    let tts_config = HttpTtsClientConfig {
        base_url: config.tts.url.clone(),
        timeout_secs: config.tts.timeout_secs,
    };
    let tts_engine = Arc::new(HttpTtsClient::new(tts_config)?);

    // 创建内存 Session 管理器与小说缓存
    let session_manager = Arc::new(InMemorySessionManager::new());
    let novel_cache = Arc::new(InMemoryNovelCache::new());

    // 生成网关（缓存 + 文本生成引擎编排）
    let gateway = Arc::new(NovelGateway::new(text_generator, novel_cache.clone()));

    // 启动过期会话 GC
    if config.gc.enabled {
        let gc_config = SessionGcConfig {
            interval_secs: config.gc.interval_secs,
            session_expire_secs: config.gc.session_expire_secs,
        };
        let gc = SessionGc::new(gc_config, session_manager.clone());
        tokio::spawn(gc.run());
    }

    // 创建 HTTP 服务器
    let static_dir = config
        .server
        .static_files
        .enabled
        .then(|| config.server.static_files.dir.clone());
    let server_config =
        ServerConfig::new(&config.server.host, config.server.port).with_static_dir(static_dir);
    let state = AppState::new(
        session_manager,
        novel_cache,
        tts_engine,
        gateway,
        config.generation.min_chapters,
        config.generation.max_chapters,
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
