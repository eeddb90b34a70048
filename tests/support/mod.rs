//! Shared fixtures: a scripted oracle and an environment sandbox.

#![allow(dead_code)]

use async_trait::async_trait;
use mfg_copilot::error::{ApiError, ProviderError};
use mfg_copilot::provider::{
    CompletionOptions, ModelProviderClient, ProviderClientResolver, ProviderConfig,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Troubleshoot reply with every schema key, wrapped the way models do it.
pub const TROUBLESHOOT_REPLY: &str = r#"Sure! Here is the analysis:
```json
{
  "summary": "Motor overheats after bearing change.",
  "probable_causes": [{"cause": "Bearing preload too high", "likelihood": "high", "why": "New batch"}],
  "diagnostic_steps": [{"step": "Measure current draw", "tool": "Clamp meter", "expected_result": "Within nameplate"}],
  "actions": {"immediate": ["Stop line"], "short_term": ["Swap bearing"], "long_term": ["Supplier audit"]},
  "risks_and_safety": ["Lockout/tagout before inspection"],
  "assumptions": ["Load unchanged"]
}
```
Hope that helps!"#;

/// Oracle replying with scripted text or failing with a provider error.
pub struct ScriptedClient {
    reply: Result<String, u16>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ModelProviderClient for ScriptedClient {
    async fn complete(
        &self,
        prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(429) => Err(ProviderError::QuotaExceeded {
                provider: "scripted".to_string(),
                message: "Quota exceeded for generate_content".to_string(),
            }),
            Err(status) => Err(ProviderError::Api {
                provider: "scripted".to_string(),
                status: *status,
                body: "boom".to_string(),
            }),
        }
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Resolver handing out one shared scripted client and counting requests.
pub struct ScriptedResolver {
    pub client: Arc<ScriptedClient>,
    pub created: AtomicUsize,
}

impl ScriptedResolver {
    pub fn new(client: ScriptedClient) -> Arc<Self> {
        Arc::new(Self {
            client: Arc::new(client),
            created: AtomicUsize::new(0),
        })
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ProviderClientResolver for ScriptedResolver {
    fn create_client(
        &self,
        _config: &ProviderConfig,
    ) -> Result<Arc<dyn ModelProviderClient>, ApiError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(self.client.clone())
    }
}

/// Restores the sandboxed variables on drop, so a panicking test body does
/// not leak its environment into later tests.
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    pub fn capture(names: &[&'static str]) -> Self {
        Self {
            saved: names
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with XDG_CONFIG_HOME pointed inside `temp_dir` and no provider
/// credentials in the environment.
pub fn with_xdg_env<F: FnOnce()>(temp_dir: &TempDir, f: F) {
    let _guard = EnvGuard::capture(&["XDG_CONFIG_HOME", "GEMINI_API_KEY"]);
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path().join("xdg"));
    std::env::remove_var("GEMINI_API_KEY");
    f();
}

pub fn workdir(temp_dir: &TempDir) -> std::path::PathBuf {
    let dir = temp_dir.path().join("work");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}
