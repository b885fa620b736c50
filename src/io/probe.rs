use std::path::{Path, PathBuf};

/// Error type for background probing
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("background not found: {0}")]
    NotFound(PathBuf),
    #[error("could not read background {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not decode background {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Checks that a card's background asset can actually load, before the card
/// is committed to the store.
pub trait BackgroundProbe {
    fn probe(&self, uri: &str) -> Result<(), ProbeError>;
}

/// Probe that accepts every background without looking at it. For callers
/// that want the id immediately and accept the risk of a broken background.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl BackgroundProbe for AcceptAll {
    fn probe(&self, _uri: &str) -> Result<(), ProbeError> {
        Ok(())
    }
}

/// Filesystem probe: file-backed URIs must exist and decode as an image.
///
/// Remote (`http`/`https`) and object (`blob:`, `data:`) URIs cannot be
/// verified without a network stack and pass unchanged.
#[derive(Debug)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    /// `root` anchors root-relative URIs like `/images/bg.png`.
    pub fn new(root: impl Into<PathBuf>) -> FsProbe {
        FsProbe { root: root.into() }
    }

    /// Probe relative to the current directory.
    pub fn current_dir() -> FsProbe {
        FsProbe::new(Path::new("."))
    }

    fn resolve(&self, uri: &str) -> PathBuf {
        if let Some(path) = uri.strip_prefix("file://") {
            return PathBuf::from(path);
        }
        if let Some(rest) = uri.strip_prefix('/') {
            return self.root.join(rest);
        }
        self.root.join(uri)
    }
}

impl BackgroundProbe for FsProbe {
    fn probe(&self, uri: &str) -> Result<(), ProbeError> {
        let unverifiable = ["http://", "https://", "blob:", "data:"];
        if unverifiable.iter().any(|scheme| uri.starts_with(scheme)) {
            return Ok(());
        }

        let path = self.resolve(uri);
        if !path.exists() {
            return Err(ProbeError::NotFound(path));
        }
        let reader = image::ImageReader::open(&path)
            .map_err(|source| ProbeError::Read {
                path: path.clone(),
                source,
            })?
            .with_guessed_format()
            .map_err(|source| ProbeError::Read {
                path: path.clone(),
                source,
            })?;
        // Decoding the header is enough to know the asset will load.
        reader
            .into_dimensions()
            .map_err(|source| ProbeError::Decode { path, source })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn remote_and_object_uris_pass() {
        let dir = TempDir::new().unwrap();
        let probe = FsProbe::new(dir.path());
        assert!(probe.probe("https://example.com/bg.png").is_ok());
        assert!(probe.probe("http://example.com/bg.png").is_ok());
        assert!(probe.probe("blob:http://localhost/abc-123").is_ok());
        assert!(probe.probe("data:image/png;base64,AAAA").is_ok());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let probe = FsProbe::new(dir.path());
        assert!(matches!(
            probe.probe("/images/missing.png"),
            Err(ProbeError::NotFound(_))
        ));
    }

    #[test]
    fn valid_image_passes() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("images")).unwrap();
        image::RgbImage::new(4, 4)
            .save(dir.path().join("images/bg.png"))
            .unwrap();

        let probe = FsProbe::new(dir.path());
        assert!(probe.probe("/images/bg.png").is_ok());
        assert!(probe.probe("images/bg.png").is_ok());
    }

    #[test]
    fn non_image_file_fails_to_decode() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bg.png"), "not an image").unwrap();

        let probe = FsProbe::new(dir.path());
        assert!(matches!(
            probe.probe("/bg.png"),
            Err(ProbeError::Decode { .. })
        ));
    }
}
