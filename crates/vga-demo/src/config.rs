//! Window configuration.

/// How the demo window is set up.
pub struct RunnerConfig {
    /// Window title.
    pub title: String,
    /// Integer scale factor for sharp pixels.
    pub scale: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            title: "VGA mode 13h".to_string(),
            scale: 3,
        }
    }
}
