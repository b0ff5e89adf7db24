use std::env;
use std::time::Duration;

use crate::ai::chat::ResetPolicy;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub llm_api_hostname: String,
    pub request_timeout: Duration,
    pub reset_policy: ResetPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        let llm_api_hostname = env::var("DOMAINBOT_LLM_HOST")
            .unwrap_or_else(|_| "http://localhost:11434".to_string());
        let timeout_secs = env::var("DOMAINBOT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(60 * 10);
        let clear_on_reset = env::var("DOMAINBOT_CLEAR_ON_RESET")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Self {
            llm_api_hostname,
            request_timeout: Duration::from_secs(timeout_secs),
            reset_policy: if clear_on_reset {
                ResetPolicy::ClearTranscript
            } else {
                ResetPolicy::KeepTranscript
            },
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 3] = [
        "DOMAINBOT_LLM_HOST",
        "DOMAINBOT_TIMEOUT_SECS",
        "DOMAINBOT_CLEAR_ON_RESET",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = AppConfig::default();
        assert_eq!(config.llm_api_hostname, "http://localhost:11434");
        assert_eq!(config.request_timeout, Duration::from_secs(600));
        assert_eq!(config.reset_policy, ResetPolicy::KeepTranscript);
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        unsafe {
            env::set_var("DOMAINBOT_LLM_HOST", "http://gpu-box:11434");
            env::set_var("DOMAINBOT_TIMEOUT_SECS", "30");
            env::set_var("DOMAINBOT_CLEAR_ON_RESET", "True");
        }
        let config = AppConfig::default();
        clear_env();

        assert_eq!(config.llm_api_hostname, "http://gpu-box:11434");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.reset_policy, ResetPolicy::ClearTranscript);
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_falls_back() {
        clear_env();
        unsafe { env::set_var("DOMAINBOT_TIMEOUT_SECS", "soon") };
        let config = AppConfig::default();
        clear_env();

        assert_eq!(config.request_timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" yes "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }
}
