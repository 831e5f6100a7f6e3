use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_platter_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("PLATTER_CONFIG_PATH", "/tmp/platter-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/platter-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("platter")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("platter")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 60
repeat = true

[controls]
seek_seconds = 9
volume_step = 10

[ui]
header_text = "hello"
idle_text = "nothing yet"

[library]
music_dir = "/srv/music"
extensions = ["mp3", "flac"]
recursive = false
include_hidden = true
follow_links = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PLATTER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("PLATTER__PLAYBACK__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.volume, 60);
    assert!(s.playback.repeat);
    assert!(!s.playback.shuffle);
    assert_eq!(s.controls.seek_seconds, 9);
    assert_eq!(s.controls.volume_step, 10);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.idle_text, "nothing yet");
    assert_eq!(
        s.library.music_dir.as_deref(),
        Some(std::path::Path::new("/srv/music"))
    );
    assert_eq!(
        s.library.extensions,
        vec!["mp3".to_string(), "flac".to_string()]
    );
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 60
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PLATTER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("PLATTER__PLAYBACK__VOLUME", "15");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.volume, 15);
}

#[test]
fn validate_rejects_conflicting_and_out_of_range_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.playback.volume = 150;
    assert!(s.validate().is_err());
    s.playback.volume = 25;

    s.playback.repeat = true;
    s.playback.shuffle = true;
    assert!(s.validate().is_err());
    s.playback.shuffle = false;

    s.controls.volume_step = 0;
    assert!(s.validate().is_err());
    s.controls.volume_step = 5;

    s.library.extensions.clear();
    assert!(s.validate().is_err());
}
