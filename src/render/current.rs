//! Per-thread scope for the page being rendered.
//!
//! Tera functions only see their call arguments, so page-relative behavior
//! (the `image(relative=true)` form) reads the active page from here.

use std::cell::RefCell;
use std::path::PathBuf;

/// Location of the page currently being rendered on this thread.
#[derive(Debug, Clone)]
pub struct PageScope {
    /// Directory containing the page source file.
    pub source_dir: PathBuf,
    /// Directory the page's artifacts are written to.
    pub output_dir: PathBuf,
    /// Site-absolute URL prefix of the page (its permalink).
    pub url_base: String,
}

thread_local! {
    static CURRENT: RefCell<Option<PageScope>> = const { RefCell::new(None) };
}

/// Run `f` with `scope` installed as this thread's current page.
///
/// `f` must render on the calling thread; the scope is invisible to work
/// handed off elsewhere.
pub fn with_page<F, R>(scope: PageScope, f: F) -> R
where
    F: FnOnce() -> R,
{
    CURRENT.with(|slot| *slot.borrow_mut() = Some(scope));
    let result = f();
    CURRENT.with(|slot| *slot.borrow_mut() = None);
    result
}

/// The page currently being rendered on this thread, if any.
pub fn page() -> Option<PageScope> {
    CURRENT.with(|slot| slot.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_is_visible_only_inside_with_page() {
        assert!(page().is_none());

        let scope = PageScope {
            source_dir: PathBuf::from("/content/posts"),
            output_dir: PathBuf::from("/public/posts/hello"),
            url_base: "/posts/hello/".to_string(),
        };

        let seen = with_page(scope, || page().map(|p| p.url_base));
        assert_eq!(seen.as_deref(), Some("/posts/hello/"));

        assert!(page().is_none());
    }
}
