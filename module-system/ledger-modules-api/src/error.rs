/// General error type in the Module System.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Custom error thrown by a module.
    #[error(transparent)]
    ModuleError(#[from] anyhow::Error),
}

impl Error {
    /// Returns the module error as `E` if that is what the module raised.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        match self {
            Error::ModuleError(err) => err.downcast_ref::<E>(),
        }
    }
}
