use tokio::task::JoinHandle;

/// Something that releases a link, task or registration exactly once.
pub trait Disposable: Send {
    fn dispose(self: Box<Self>);
}

/// Releases everything it holds together, newest first.
///
/// Adding to an already disposed bag disposes the item immediately so that a
/// late registration cannot outlive its owner.
#[derive(Default)]
pub struct DisposableBag {
    items: Vec<Box<dyn Disposable>>,
    disposed: bool,
}

impl DisposableBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: impl Disposable + 'static) {
        let item: Box<dyn Disposable> = Box::new(item);
        if self.disposed {
            item.dispose();
        } else {
            self.items.push(item);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        while let Some(item) = self.items.pop() {
            item.dispose();
        }
    }
}

impl Drop for DisposableBag {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Aborts a spawned transform task when disposed.
pub struct AbortOnDispose(JoinHandle<()>);

impl AbortOnDispose {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self(handle)
    }
}

impl Disposable for AbortOnDispose {
    fn dispose(self: Box<Self>) {
        self.0.abort();
    }
}

/// Runs a closure when disposed.
pub struct DisposeAction(Box<dyn FnOnce() + Send>);

impl DisposeAction {
    pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(action))
    }
}

impl Disposable for DisposeAction {
    fn dispose(self: Box<Self>) {
        (self.0)();
    }
}
