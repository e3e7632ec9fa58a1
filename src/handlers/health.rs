use crate::utils::logging::log_health_check;

pub async fn health_check() -> &'static str {
    log_health_check();

    "ok"
}
