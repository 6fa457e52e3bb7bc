use thiserror::Error;

pub mod types;
pub mod utils;
pub mod song_detail;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned status {0}")]
    Upstream(u16),
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn upstream_error_names_status() {
        assert_eq!(CoreError::Upstream(503).to_string(), "upstream returned status 503");
    }
}
