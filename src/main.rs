use anyhow::Result;
use log::debug;
use mcp_alertmanager_launcher::config::LOG_ENV;
use mcp_alertmanager_launcher::runtime::RealRuntime;
use std::ffi::OsString;

/// mcp-alertmanager - launcher for the prebuilt platform binary
///
/// Every argument is passed through untouched; the launcher has no flags of
/// its own. Set MCP_ALERTMANAGER_LAUNCHER_LOG (e.g. "debug") to see how the
/// binary was resolved. Diagnostics go to stderr only.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, "warn")).init();
    debug!("mcp-alertmanager launcher {}", env!("CARGO_PKG_VERSION"));

    let code = mcp_alertmanager_launcher::run(RealRuntime, forwarded_args(std::env::args_os())).await?;
    std::process::exit(code);
}

/// Everything after the program name, in order.
fn forwarded_args<I: IntoIterator<Item = OsString>>(argv: I) -> Vec<OsString> {
    argv.into_iter().skip(1).collect()
}
