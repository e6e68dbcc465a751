use crate::client::{ApiClient, ClientConfig, ClientInner, HttpOptions};
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// 离开作用域时恢复被覆盖的环境变量，`f` 内断言 panic 时同样生效。
struct EnvRestore {
    backup: Vec<(String, Option<String>)>,
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in &self.backup {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

pub fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let _restore = EnvRestore {
        backup: vars
            .iter()
            .map(|(key, _)| ((*key).to_string(), std::env::var(key).ok()))
            .collect(),
    };
    for (key, value) in vars {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
    f();
}

pub fn test_client_inner_with_base(base_url: &str, api_version: &str) -> ClientInner {
    let http_options = HttpOptions {
        base_url: Some(base_url.to_string()),
        api_version: Some(api_version.to_string()),
        ..Default::default()
    };
    let config = ClientConfig {
        api_key: "test-key".into(),
        http_options,
    };
    let api_client = ApiClient::new(&config);
    ClientInner {
        http: reqwest::Client::new(),
        config,
        api_client,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_env_restores_after_panic() {
        const KEY: &str = "GENAI_QUICKSTART_TEST_RESTORE";
        let result = std::panic::catch_unwind(|| {
            with_env(&[(KEY, Some("during"))], || panic!("assertion failed"));
        });
        assert!(result.is_err());
        assert!(std::env::var(KEY).is_err());

        with_env(&[(KEY, Some("after"))], || {
            assert_eq!(std::env::var(KEY).as_deref(), Ok("after"));
        });
        assert!(std::env::var(KEY).is_err());
    }
}
