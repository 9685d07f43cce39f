//! The one capability both pipelines depend on: a synchronous call to something
//! outside the process that either returns output or fails.
//!
//! The benchmark runner launches child processes through it and the sentiment
//! classifier talks to the text-generation backend through it, so tests can swap
//! either side for an in-memory fake.

use crate::errors::CallError;

pub trait ExternalCall<Req: ?Sized> {
    type Output;

    /// Perform the call, blocking until it completes or fails.
    ///
    /// # Errors
    /// Returns a [`CallError`] describing why no output was produced.
    fn call(&self, request: &Req) -> Result<Self::Output, CallError>;
}

impl<Req: ?Sized, T: ExternalCall<Req> + ?Sized> ExternalCall<Req> for &T {
    type Output = T::Output;

    fn call(&self, request: &Req) -> Result<Self::Output, CallError> {
        (**self).call(request)
    }
}
