//! 主题偏好状态
//!
//! 三个状态：`light` / `dark` / `system`。`system` 在应用时向环境取一次
//! 明暗偏好，之后不再持续跟随。

use crate::error::AppResult;
use crate::infrastructure::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// 主题偏好在持久化存储中的固定键
pub const THEME_KEY: &str = "cv-ui-theme";

/// 用户选择的主题偏好
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            "system" => Some(ThemePreference::System),
            _ => None,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 实际渲染的明暗状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Appearance::Light => f.write_str("light"),
            Appearance::Dark => f.write_str("dark"),
        }
    }
}

/// 平台环境的明暗偏好来源
pub trait AmbientAppearance: Send + Sync {
    fn current(&self) -> Appearance;
}

/// 固定值，测试和无法探测的环境使用
pub struct FixedAppearance(pub Appearance);

impl AmbientAppearance for FixedAppearance {
    fn current(&self) -> Appearance {
        self.0
    }
}

/// 按终端的 `COLORFGBG` 约定探测（`前景;背景`，背景色号 0-6 或 8 视为深色）
///
/// 变量不存在时视为浅色。
pub struct TerminalAppearance;

impl AmbientAppearance for TerminalAppearance {
    fn current(&self) -> Appearance {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| appearance_from_colorfgbg(&v))
            .unwrap_or(Appearance::Light)
    }
}

fn appearance_from_colorfgbg(value: &str) -> Option<Appearance> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(if bg <= 6 || bg == 8 {
        Appearance::Dark
    } else {
        Appearance::Light
    })
}

/// 主题偏好状态容器
pub struct ThemeState {
    store: Arc<dyn KeyValueStore>,
    ambient: Box<dyn AmbientAppearance>,
    preference: ThemePreference,
    applied: Appearance,
}

impl ThemeState {
    /// 从存储恢复偏好并立即应用
    ///
    /// 存储中没有值或值无法识别时使用 `default`。
    pub fn load(
        store: Arc<dyn KeyValueStore>,
        ambient: Box<dyn AmbientAppearance>,
        default: ThemePreference,
    ) -> AppResult<Self> {
        let preference = match store.get(THEME_KEY)? {
            Some(raw) => ThemePreference::parse(&raw).unwrap_or_else(|| {
                warn!("⚠️ 无法识别的主题偏好 '{}'，使用默认值 {}", raw, default);
                default
            }),
            None => default,
        };

        let applied = resolve(preference, ambient.as_ref());
        Ok(Self {
            store,
            ambient,
            preference,
            applied,
        })
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// 当前实际渲染的明暗状态
    pub fn appearance(&self) -> Appearance {
        self.applied
    }

    /// 切换偏好：先持久化，再应用
    pub fn set(&mut self, preference: ThemePreference) -> AppResult<Appearance> {
        self.store.set(THEME_KEY, preference.as_str())?;
        self.preference = preference;
        self.applied = resolve(preference, self.ambient.as_ref());
        debug!("主题切换为 {} (渲染: {})", preference, self.applied);
        Ok(self.applied)
    }
}

fn resolve(preference: ThemePreference, ambient: &dyn AmbientAppearance) -> Appearance {
    match preference {
        ThemePreference::Light => Appearance::Light,
        ThemePreference::Dark => Appearance::Dark,
        ThemePreference::System => ambient.current(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;

    fn load(store: &Arc<dyn KeyValueStore>, ambient: Appearance) -> ThemeState {
        ThemeState::load(
            store.clone(),
            Box::new(FixedAppearance(ambient)),
            ThemePreference::System,
        )
        .unwrap()
    }

    #[test]
    fn test_dark_survives_reload() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let mut theme = load(&store, Appearance::Light);
        assert_eq!(theme.set(ThemePreference::Dark).unwrap(), Appearance::Dark);

        let reloaded = load(&store, Appearance::Light);
        assert_eq!(reloaded.preference(), ThemePreference::Dark);
        assert_eq!(reloaded.appearance(), Appearance::Dark);
    }

    #[test]
    fn test_system_follows_ambient_at_application() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let theme = load(&store, Appearance::Dark);
        assert_eq!(theme.preference(), ThemePreference::System);
        assert_eq!(theme.appearance(), Appearance::Dark);
    }

    #[test]
    fn test_unknown_stored_value_falls_back_to_default() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(THEME_KEY, "sepia").unwrap();

        let theme = load(&store, Appearance::Light);
        assert_eq!(theme.preference(), ThemePreference::System);
    }

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(appearance_from_colorfgbg("15;0"), Some(Appearance::Dark));
        assert_eq!(appearance_from_colorfgbg("0;15"), Some(Appearance::Light));
        assert_eq!(appearance_from_colorfgbg("15;default;0"), Some(Appearance::Dark));
        assert_eq!(appearance_from_colorfgbg("garbage"), None);
    }
}
