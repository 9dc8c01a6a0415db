use crate::utils::error::{Result, TestkitError};
use std::env;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

pub const RESOURCE_DIR_ENV: &str = "TESTKIT_RESOURCES";

/// Resolves a resource name to an open byte stream.
pub trait ResourceLoader: Send + Sync {
    fn open(&self, name: &str) -> Result<Box<dyn Read>>;
}

/// Resolves names against an ordered list of root directories.
#[derive(Debug, Clone)]
pub struct DirLoader {
    roots: Vec<PathBuf>,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    fn from_env() -> Self {
        if let Ok(dir) = env::var(RESOURCE_DIR_ENV) {
            return Self::new(dir);
        }
        match env::var("CARGO_MANIFEST_DIR") {
            Ok(manifest) => Self::new(Path::new(&manifest).join("resources")).with_root("resources"),
            Err(_) => Self::new("resources"),
        }
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(name))
            .find(|path| path.is_file())
    }
}

impl ResourceLoader for DirLoader {
    fn open(&self, name: &str) -> Result<Box<dyn Read>> {
        let path = self
            .resolve(name)
            .ok_or_else(|| TestkitError::ResourceNotFoundError {
                name: name.to_string(),
            })?;
        debug!(path = %path.display(), "opening resource");
        let file = File::open(&path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

static DEFAULT_LOADER: LazyLock<DirLoader> = LazyLock::new(DirLoader::from_env);

/// Opens the named resource, hands the stream to `operation` and drops it on
/// every exit path before returning.
pub fn with_resource_stream<R>(
    loader: Option<&dyn ResourceLoader>,
    name: &str,
    operation: impl FnOnce(&mut dyn Read) -> R,
) -> Result<R> {
    if name.is_empty() {
        return Err(TestkitError::InvalidArgumentError {
            message: "resource name is empty".to_string(),
        });
    }
    let loader = loader.unwrap_or(&*DEFAULT_LOADER);
    let mut stream = loader.open(name)?;
    Ok(operation(&mut *stream))
}

pub fn with_resource_stream_and<U, R>(
    loader: Option<&dyn ResourceLoader>,
    name: &str,
    supplier: impl FnOnce() -> U,
    operation: impl FnOnce(&mut dyn Read, U) -> R,
) -> Result<R> {
    with_resource_stream(loader, name, |stream| operation(stream, supplier()))
}

pub fn use_resource_stream(
    loader: Option<&dyn ResourceLoader>,
    name: &str,
    operation: impl FnOnce(&mut dyn Read),
) -> Result<()> {
    with_resource_stream(loader, name, |stream| operation(stream))
}

pub fn use_resource_stream_and<U>(
    loader: Option<&dyn ResourceLoader>,
    name: &str,
    supplier: impl FnOnce() -> U,
    operation: impl FnOnce(&mut dyn Read, U),
) -> Result<()> {
    with_resource_stream_and(loader, name, supplier, |stream, extra| {
        operation(stream, extra);
    })
}
