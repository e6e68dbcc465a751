//! Tracing setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// 安装 stderr 上的 fmt subscriber，`RUST_LOG` 控制级别，默认 `warn`。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
