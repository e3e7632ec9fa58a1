use tracing::{debug, error, info, warn};

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_request_processed(endpoint: &str, status: u16, duration_ms: u64) {
    info!("Request processed: {} - Status: {} - Duration: {}ms",
          endpoint, status, duration_ms);
}

pub fn log_webhook_ignored(kind: &str) {
    debug!("Webhook ignored: kind '{}' is not inbox_forward_created", kind);
}

pub fn log_webhook_processed(bucket: u64, subscribed: usize) {
    info!("📬 Inbox forward processed: bucket {} - {} people subscribed", bucket, subscribed);
}

pub fn log_basecamp_api_error(endpoint: &str, error: &str) {
    error!("Basecamp API error: {} - Error: {}", endpoint, error);
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 Basecamp inbox relay starting on port {}", port);
}

pub fn log_server_ready(port: u16) {
    info!("✅ Server ready and listening on http://0.0.0.0:{}", port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
