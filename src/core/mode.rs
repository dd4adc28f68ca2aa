//! Build mode configuration for production/development builds.

/// Build mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    /// Whether minification is on when neither config nor CLI says otherwise.
    pub minify_default: bool,
}

impl BuildMode {
    /// Production mode: minified output.
    pub const PRODUCTION: Self = Self {
        minify_default: true,
    };

    /// Development mode: fast builds, readable output.
    pub const DEVELOPMENT: Self = Self {
        minify_default: false,
    };

    /// Check if this is development mode.
    #[inline]
    pub const fn is_dev(&self) -> bool {
        !self.minify_default
    }

    /// Resolve the effective minify setting.
    ///
    /// An explicit `build.minify` (already merged with any CLI override)
    /// wins over the mode default.
    #[inline]
    pub const fn effective_minify(&self, configured: Option<bool>) -> bool {
        match configured {
            Some(v) => v,
            None => self.minify_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults() {
        assert!(BuildMode::PRODUCTION.minify_default);
        assert!(!BuildMode::DEVELOPMENT.minify_default);
        assert!(BuildMode::DEVELOPMENT.is_dev());
        assert!(!BuildMode::PRODUCTION.is_dev());
    }

    #[test]
    fn test_effective_minify_uses_mode_default() {
        assert!(BuildMode::PRODUCTION.effective_minify(None));
        assert!(!BuildMode::DEVELOPMENT.effective_minify(None));
    }

    #[test]
    fn test_effective_minify_config_wins() {
        assert!(!BuildMode::PRODUCTION.effective_minify(Some(false)));
        assert!(BuildMode::DEVELOPMENT.effective_minify(Some(true)));
    }
}
