/// Somewhere to keep one encoded snapshot, see [`encode()`](crate::encode).
///
/// The game does not know the medium. Failures are passed through to the caller
/// without being interpreted.
pub trait Storage {
    fn save(&mut self, encoded: &str) -> std::io::Result<()>;
    fn load(&self) -> std::io::Result<String>;
}

/// Keeps the snapshot in memory. Loading before anything was saved fails with
/// [`std::io::ErrorKind::NotFound`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn save(&mut self, encoded: &str) -> std::io::Result<()> {
        self.contents = Some(String::from(encoded));
        Ok(())
    }

    fn load(&self) -> std::io::Result<String> {
        self.contents.clone().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no game has been saved")
        })
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn save(&mut self, encoded: &str) -> std::io::Result<()> {
        (**self).save(encoded)
    }

    fn load(&self) -> std::io::Result<String> {
        (**self).load()
    }
}
