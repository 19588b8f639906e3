//! Engine binding for a single voice
//!
//! The synthesis engine exposes one register/unregister pair per voice.
//! `VoiceBinding` is that pair; the catalog never talks to the engine any
//! other way.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;

/// Opaque handle returned by the engine for a loaded voice
///
/// Bindings over native libraries typically store a pointer here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineHandle(NonZeroUsize);

impl EngineHandle {
    /// Wrap a raw engine value; zero means "no voice" and yields `None`
    pub fn new(raw: usize) -> Option<Self> {
        NonZeroUsize::new(raw).map(Self)
    }

    /// The raw value originally handed out by the engine
    pub fn raw(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Register/unregister pair for one voice
///
/// Implemented per engine binding. Failures are the binding's business:
/// a failed registration returns `None` and logs whatever it needs to.
pub trait VoiceBinding {
    /// Load the voice into the engine, reading voice data from `voxdir`
    fn register(&mut self, voxdir: &Path) -> Option<EngineHandle>;

    /// Release a handle previously returned by `register`
    fn unregister(&mut self, handle: EngineHandle);
}

/// Adapts a pair of closures into a `VoiceBinding`
pub struct FnBinding<R, U> {
    register: R,
    unregister: U,
}

impl<R, U> FnBinding<R, U>
where
    R: FnMut(&Path) -> Option<EngineHandle>,
    U: FnMut(EngineHandle),
{
    pub fn new(register: R, unregister: U) -> Self {
        Self {
            register,
            unregister,
        }
    }
}

impl<R, U> VoiceBinding for FnBinding<R, U>
where
    R: FnMut(&Path) -> Option<EngineHandle>,
    U: FnMut(EngineHandle),
{
    fn register(&mut self, voxdir: &Path) -> Option<EngineHandle> {
        (self.register)(voxdir)
    }

    fn unregister(&mut self, handle: EngineHandle) {
        (self.unregister)(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_null_handle() {
        assert!(EngineHandle::new(0).is_none());
        assert_eq!(EngineHandle::new(42).map(EngineHandle::raw), Some(42));
    }

    #[test]
    fn test_fn_binding_forwards() {
        let unregistered = Rc::new(Cell::new(0));
        let seen = Rc::clone(&unregistered);

        let mut binding = FnBinding::new(
            |dir: &Path| {
                assert_eq!(dir, Path::new("/voices"));
                EngineHandle::new(7)
            },
            move |h: EngineHandle| seen.set(h.raw()),
        );

        let handle = binding.register(Path::new("/voices")).unwrap();
        binding.unregister(handle);
        assert_eq!(unregistered.get(), 7);
    }
}
