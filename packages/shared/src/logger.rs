//! Logging setup utilities for the Sanmoku room server.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for the given binary.
///
/// Both the library crates (`sanmoku_server`, `sanmoku_shared`) and the binary
/// itself log at `default_log_level`; `tower_http` follows the same level so
/// request traces show up alongside room events.
pub fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "sanmoku_server={level},sanmoku_shared={level},{bin}={level},tower_http={level}",
        level = default_log_level,
        bin = binary_name.replace('-', "_"),
    )
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "sanmoku-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use sanmoku_shared::logger::setup_logger;
///
/// setup_logger("sanmoku-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("Logger initialized for '{}'", binary_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_normalizes_binary_name() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに変換される
        // given (前提条件):
        let binary_name = "sanmoku-server";

        // when (操作):
        let directive = default_directive(binary_name, "debug");

        // then (期待する結果):
        assert!(directive.contains("sanmoku_server=debug"));
        assert!(!directive.contains("sanmoku-server"));
    }

    #[test]
    fn test_default_directive_is_a_valid_filter() {
        // テスト項目: 生成したディレクティブが EnvFilter として解釈できる
        // given (前提条件):
        let directive = default_directive("sanmoku-server", "info");

        // when (操作):
        let result = EnvFilter::try_new(&directive);

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
