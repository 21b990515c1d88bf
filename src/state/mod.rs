pub mod session;
pub mod theme;

pub use session::{SessionState, TOKEN_KEY};
pub use theme::{
    AmbientAppearance, Appearance, FixedAppearance, TerminalAppearance, ThemePreference,
    ThemeState, THEME_KEY,
};
