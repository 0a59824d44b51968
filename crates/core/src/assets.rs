//! Static/media URI resolution for document rendering.
//!
//! Documents reference images by the URI a browser would use
//! (`/static/img/logo.png`, `/media/animals/rex.jpg`). The PDF renderer needs
//! a filesystem path instead. [`AssetResolver`] maps the configured URL
//! prefixes onto their root directories and returns the first candidate that
//! exists on disk.

use std::path::{Component, Path, PathBuf};

/// Lookup from an embedded asset URI to a file on disk.
///
/// Renderers take `&impl AssetLocator` so tests can substitute a fixed map.
pub trait AssetLocator {
    /// Return the path of an existing file for `uri`, or `None`.
    fn locate(&self, uri: &str) -> Option<PathBuf>;

    /// Renderer-style callback: the resolved path as a string, or `uri`
    /// unchanged when nothing matched.
    ///
    /// The second argument is the renderer's context hint (e.g. the
    /// referencing element); it does not affect resolution.
    fn link_callback(&self, uri: &str, _rel: &str) -> String {
        match self.locate(uri) {
            Some(path) => path.to_string_lossy().into_owned(),
            None => uri.to_string(),
        }
    }
}

/// Resolves URIs under a static prefix (several roots, tried in order) and a
/// media prefix (single root).
#[derive(Debug, Clone)]
pub struct AssetResolver {
    static_url: String,
    static_dirs: Vec<PathBuf>,
    media_url: String,
    media_root: PathBuf,
}

impl AssetResolver {
    pub fn new(
        static_url: impl Into<String>,
        static_dirs: Vec<PathBuf>,
        media_url: impl Into<String>,
        media_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            static_url: static_url.into(),
            static_dirs,
            media_url: media_url.into(),
            media_root: media_root.into(),
        }
    }

    pub fn static_url(&self) -> &str {
        &self.static_url
    }

    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    /// Strip `prefix` from `uri` and return the remainder as a relative path.
    ///
    /// Returns `None` for an empty prefix, a non-matching URI, an empty
    /// remainder, or a remainder that would leave the root (`..`, absolute).
    fn relative_part<'a>(uri: &'a str, prefix: &str) -> Option<&'a Path> {
        if prefix.is_empty() {
            return None;
        }
        let rest = uri.strip_prefix(prefix)?;
        if rest.is_empty() {
            return None;
        }
        let rel = Path::new(rest);
        let contained = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        contained.then_some(rel)
    }
}

impl AssetLocator for AssetResolver {
    fn locate(&self, uri: &str) -> Option<PathBuf> {
        if let Some(rel) = Self::relative_part(uri, &self.static_url) {
            let found = self
                .static_dirs
                .iter()
                .map(|dir| dir.join(rel))
                .find(|candidate| candidate.is_file());
            if found.is_some() {
                return found;
            }
        }

        if let Some(rel) = Self::relative_part(uri, &self.media_url) {
            let candidate = self.media_root.join(rel);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Roots {
        _tmp: TempDir,
        static_a: PathBuf,
        static_b: PathBuf,
        media: PathBuf,
    }

    fn roots() -> Roots {
        let tmp = tempfile::tempdir().unwrap();
        let static_a = tmp.path().join("static_a");
        let static_b = tmp.path().join("static_b");
        let media = tmp.path().join("media");
        for dir in [&static_a, &static_b, &media] {
            fs::create_dir_all(dir.join("img")).unwrap();
        }
        Roots {
            _tmp: tmp,
            static_a,
            static_b,
            media,
        }
    }

    fn resolver(r: &Roots) -> AssetResolver {
        AssetResolver::new(
            "/static/",
            vec![r.static_a.clone(), r.static_b.clone()],
            "/media/",
            r.media.clone(),
        )
    }

    #[test]
    fn static_uri_resolves_to_first_existing_root() {
        let r = roots();
        fs::write(r.static_b.join("img/logo.png"), b"b").unwrap();
        let res = resolver(&r);
        assert_eq!(
            res.locate("/static/img/logo.png"),
            Some(r.static_b.join("img/logo.png"))
        );

        // Once the first root has it, the first root wins.
        fs::write(r.static_a.join("img/logo.png"), b"a").unwrap();
        assert_eq!(
            res.locate("/static/img/logo.png"),
            Some(r.static_a.join("img/logo.png"))
        );
    }

    #[test]
    fn media_uri_resolves_under_media_root() {
        let r = roots();
        fs::write(r.media.join("img/rex.jpg"), b"x").unwrap();
        let res = resolver(&r);
        assert_eq!(
            res.locate("/media/img/rex.jpg"),
            Some(r.media.join("img/rex.jpg"))
        );
    }

    #[test]
    fn missing_file_passes_uri_through() {
        let r = roots();
        let res = resolver(&r);
        assert_eq!(res.locate("/static/img/nope.png"), None);
        assert_eq!(
            res.link_callback("/static/img/nope.png", "img"),
            "/static/img/nope.png"
        );
    }

    #[test]
    fn unrelated_uri_passes_through() {
        let r = roots();
        let res = resolver(&r);
        for uri in ["https://cdn.example.com/a.png", "img/logo.png", "data:image/png;base64,AA"] {
            assert_eq!(res.link_callback(uri, ""), uri);
        }
    }

    #[test]
    fn directories_are_not_files() {
        let r = roots();
        let res = resolver(&r);
        assert_eq!(res.locate("/static/img"), None);
        assert_eq!(res.locate("/static/"), None);
    }

    #[test]
    fn traversal_outside_roots_is_rejected() {
        let r = roots();
        fs::write(r.static_a.join("secret.txt"), b"s").unwrap();
        let res = AssetResolver::new(
            "/static/",
            vec![r.static_a.join("img")],
            "/media/",
            r.media.clone(),
        );
        assert_eq!(res.locate("/static/../secret.txt"), None);
        let abs = r.static_a.join("secret.txt");
        let uri = format!("/static/{}", abs.display());
        assert_eq!(res.locate(&uri), None);
    }

    #[test]
    fn static_miss_falls_through_to_media() {
        let r = roots();
        fs::write(r.media.join("img/shared.png"), b"m").unwrap();
        // Static and media share a prefix: the static roots are searched
        // first, then the media root.
        let res = AssetResolver::new("/assets/", vec![r.static_a.clone()], "/assets/", r.media.clone());
        assert_eq!(
            res.locate("/assets/img/shared.png"),
            Some(r.media.join("img/shared.png"))
        );
    }

    #[test]
    fn empty_prefix_never_matches() {
        let r = roots();
        fs::write(r.static_a.join("img/logo.png"), b"a").unwrap();
        let res = AssetResolver::new("", vec![r.static_a.clone()], "", r.media.clone());
        assert_eq!(res.locate("img/logo.png"), None);
    }

    #[test]
    fn callback_returns_path_string_on_hit() {
        let r = roots();
        fs::write(r.static_a.join("img/logo.png"), b"a").unwrap();
        let res = resolver(&r);
        let expected = r.static_a.join("img/logo.png");
        assert_eq!(
            res.link_callback("/static/img/logo.png", "img"),
            expected.to_string_lossy()
        );
    }
}
