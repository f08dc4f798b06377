use crate::{
    config::ImportOptions, gltf_import, rv_error::RvError, skeleton::Skeleton,
};
use log::{debug, error, info};
use parking_lot::Mutex;
use std::{
    path::PathBuf,
    sync::Arc,
    thread::{self, JoinHandle},
};

type Slot = Arc<Mutex<Option<Result<Skeleton, RvError>>>>;

/// Loads a skeleton on a worker thread. The frame loop calls `poll` once
/// per frame and gets the result exactly once.
pub struct AssetLoader {
    slot: Slot,
    handle: Option<JoinHandle<()>>,
    done: bool,
}

impl AssetLoader {
    /// Starts loading a glTF file
    #[must_use]
    pub fn spawn(path: PathBuf, options: ImportOptions) -> Self {
        Self::spawn_with(move || gltf_import::load_skeleton(&path, &options))
    }

    /// Starts any skeleton producing job
    pub fn spawn_with<F>(job: F) -> Self
    where
        F: FnOnce() -> Result<Skeleton, RvError> + Send + 'static,
    {
        let slot: Slot = Arc::new(Mutex::new(None));
        let worker_slot = Arc::clone(&slot);
        let handle = thread::spawn(move || {
            let result = job();
            debug!("loader finished ok={}", result.is_ok());
            *worker_slot.lock() = Some(result);
        });
        info!("asset loader started");
        Self {
            slot,
            handle: Some(handle),
            done: false,
        }
    }

    /// Takes the result if loading has finished. A worker that panicked
    /// reports `RvError::LoaderFailed`.
    pub fn poll(&mut self) -> Option<Result<Skeleton, RvError>> {
        if self.done {
            return None;
        }
        // The slot is written before the thread ends, so a finished thread
        // with an empty slot has failed
        let finished = self.handle.as_ref().map_or(true, JoinHandle::is_finished);
        let taken = self.slot.lock().take();
        let result = match taken {
            Some(result) => result,
            None if finished => {
                error!("loader thread ended without a result");
                Err(RvError::LoaderFailed)
            }
            None => return None,
        };
        self.done = true;
        self.join();
        Some(result)
    }

    /// Blocks until the result is available
    pub fn wait(&mut self) -> Option<Result<Skeleton, RvError>> {
        self.join();
        self.poll()
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("loader thread panicked");
            }
        }
    }
}
