use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

/// Most verbose level forwarded from the domain crates
fn max_tracing_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Route `tracing` events from the domain crates to the browser console.
/// Must run once, before the app is rendered.
pub fn init_tracing() {
    // SystemTime is unavailable on wasm32; the console does not render ANSI
    let console_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(max_tracing_level());

    tracing_subscriber::registry().with(console_layer).init();
}

/// Component-tagged logging to the browser console
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        gloo::console::debug!(Self::format(component, message));
    }

    pub fn info_with_component(component: &str, message: &str) {
        gloo::console::info!(Self::format(component, message));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        gloo::console::warn!(Self::format(component, message));
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(Self::format(component, message));
    }

    fn format(component: &str, message: &str) -> String {
        format!("[{}] {}", component, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_warnings_reach_the_console() {
        // Persistence failures are logged with warn!, transitions with info!
        assert!(max_tracing_level() >= LevelFilter::WARN);
        assert!(max_tracing_level() >= LevelFilter::INFO);
    }

    #[test]
    fn test_format_prefixes_component() {
        assert_eq!(Logger::format("api", "created"), "[api] created");
    }
}
