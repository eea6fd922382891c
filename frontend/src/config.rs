use futures::future::{FutureExt, LocalBoxFuture, Shared};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, sync::OnceLock, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

const ENV_GLOBAL: &str = "__CLAIMS_CONSOLE_ENV";
const CONFIG_GLOBAL: &str = "__CLAIMS_CONSOLE_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub poll_interval_secs: Option<u64>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static POLL_INTERVAL: OnceLock<Duration> = OnceLock::new();

type SharedInit = Shared<LocalBoxFuture<'static, ()>>;

/// Hands every caller the same in-flight future, so the work runs once.
#[derive(Default)]
struct InitOnce {
    slot: RefCell<Option<SharedInit>>,
}

impl InitOnce {
    fn run(&self, start: impl FnOnce() -> LocalBoxFuture<'static, ()>) -> SharedInit {
        self.slot
            .borrow_mut()
            .get_or_insert_with(|| start().shared())
            .clone()
    }
}

thread_local! {
    static INIT: InitOnce = InitOnce::default();
}

fn read_global(name: &str, keys: &[&str]) -> Option<String> {
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    keys.iter().find_map(|key| {
        js_sys::Reflect::get(&any, &(*key).into())
            .ok()
            .and_then(|value| value.as_string())
    })
}

// env.js (`window.__CLAIMS_CONSOLE_ENV`) takes precedence over an inline
// `window.__CLAIMS_CONSOLE_CONFIG`.
fn snapshot_from_globals() -> Option<String> {
    read_global(ENV_GLOBAL, &["API_BASE_URL", "api_base_url"])
        .or_else(|| read_global(CONFIG_GLOBAL, &["api_base_url", "API_BASE_URL"]))
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = web_sys::window()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn resolve_poll_interval(secs: Option<u64>) -> Duration {
    match secs {
        Some(secs) if secs > 0 => Duration::from_secs(secs),
        _ => Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
    }
}

pub fn resolve_base_url(from_globals: Option<String>, from_file: Option<String>) -> String {
    from_globals
        .as_deref()
        .and_then(normalize_base_url)
        .or_else(|| from_file.as_deref().and_then(normalize_base_url))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

async fn load() {
    let file_config = fetch_runtime_config().await.unwrap_or_default();
    let _ = POLL_INTERVAL.set(resolve_poll_interval(file_config.poll_interval_secs));
    let base_url = resolve_base_url(snapshot_from_globals(), file_config.api_base_url);
    log::info!("API base URL: {}", base_url);
    let _ = API_BASE_URL.set(base_url);
}

/// Loads `config.json` and the window globals once per page load.
/// Concurrent callers share one fetch.
pub async fn init() {
    INIT.with(|once| once.run(|| load().boxed_local())).await
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    init().await;
    API_BASE_URL
        .get()
        .cloned()
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

pub fn poll_interval() -> Duration {
    POLL_INTERVAL
        .get()
        .copied()
        .unwrap_or_else(|| resolve_poll_interval(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_prefers_globals_then_file_then_default() {
        assert_eq!(
            resolve_base_url(Some("https://env/api/".into()), Some("https://file/api".into())),
            "https://env/api"
        );
        assert_eq!(
            resolve_base_url(Some("   ".into()), Some("https://file/api".into())),
            "https://file/api"
        );
        assert_eq!(resolve_base_url(None, None), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn poll_interval_defaults_to_thirty_seconds() {
        assert_eq!(resolve_poll_interval(None), Duration::from_secs(30));
        assert_eq!(resolve_poll_interval(Some(0)), Duration::from_secs(30));
        assert_eq!(resolve_poll_interval(Some(5)), Duration::from_secs(5));
    }

    #[test]
    fn init_once_shares_one_run_between_callers() {
        use std::{cell::Cell, rc::Rc};

        let once = InitOnce::default();
        let runs = Rc::new(Cell::new(0));
        let start = |runs: Rc<Cell<u32>>| {
            move || {
                async move {
                    runs.set(runs.get() + 1);
                }
                .boxed_local()
            }
        };

        let first = once.run(start(runs.clone()));
        let second = once.run(start(runs.clone()));
        futures::executor::block_on(async {
            futures::join!(first, second);
        });
        futures::executor::block_on(once.run(start(runs.clone())));

        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn runtime_config_fields_are_optional() {
        let cfg: RuntimeConfig = serde_json::from_str(r#"{"poll_interval_secs": 10}"#).unwrap();
        assert!(cfg.api_base_url.is_none());
        assert_eq!(cfg.poll_interval_secs, Some(10));
    }
}
