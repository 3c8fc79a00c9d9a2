//! Server launch commands.

use console::style;

use crate::config::Settings;
use crate::server;

pub async fn cmd_serve_inference(
    mut settings: Settings,
    bind: Option<String>,
) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        settings.inference_bind = resolve_bind(&bind, 7861);
    }

    println!(
        "{} Starting inference server at http://{}",
        style("→").cyan(),
        settings.inference_bind
    );
    println!("  Press Ctrl+C to stop");

    server::serve_inference(&settings).await
}

pub async fn cmd_serve_api(mut settings: Settings, bind: Option<String>) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        settings.api_bind = resolve_bind(&bind, 7862);
    }

    println!(
        "{} Starting API server at http://{}",
        style("→").cyan(),
        settings.api_bind
    );
    println!("  Press Ctrl+C to stop");

    server::serve_api(&settings).await
}

pub async fn cmd_serve_ui(mut settings: Settings, bind: Option<String>) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        settings.ui_bind = resolve_bind(&bind, 7860);
    }

    println!(
        "{} Starting review UI at http://{}",
        style("→").cyan(),
        settings.ui_bind
    );
    println!("  Press Ctrl+C to stop");

    server::serve_ui(&settings).await
}

pub async fn cmd_serve_all(settings: Settings) -> anyhow::Result<()> {
    println!(
        "{} Starting review UI at http://{}",
        style("→").cyan(),
        settings.ui_bind
    );
    println!(
        "{} Starting API server at http://{}",
        style("→").cyan(),
        settings.api_bind
    );
    println!(
        "{} Starting inference server at http://{}",
        style("→").cyan(),
        settings.inference_bind
    );
    println!("  Press Ctrl+C to stop");

    server::serve_all(&settings).await
}

/// Resolve a bind address that can be:
/// - Just a port: "7999" -> 127.0.0.1:7999
/// - Just a host: "0.0.0.0" -> 0.0.0.0:<default_port>
/// - Host and port: "0.0.0.0:9000" -> 0.0.0.0:9000
fn resolve_bind(bind: &str, default_port: u16) -> String {
    if let Ok(port) = bind.parse::<u16>() {
        return format!("127.0.0.1:{}", port);
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if port_str.parse::<u16>().is_ok() {
            return format!("{}:{}", host, port_str);
        }
    }

    format!("{}:{}", bind, default_port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bind() {
        assert_eq!(resolve_bind("7999", 7860), "127.0.0.1:7999");
        assert_eq!(resolve_bind("0.0.0.0", 7860), "0.0.0.0:7860");
        assert_eq!(resolve_bind("0.0.0.0:9000", 7860), "0.0.0.0:9000");
        assert_eq!(resolve_bind("localhost", 7861), "localhost:7861");
    }
}
