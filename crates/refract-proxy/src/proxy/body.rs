//! Completion-signaling body wrapper.
//!
//! The logger contract is "fire once, after the client response has been
//! fully sent, without delaying it". Wrapping the client-bound body lets the
//! dispatcher learn when hyper has drained the last frame: the wrapper sends
//! on a oneshot channel at end-of-stream, and a detached task waiting on the
//! receiver invokes the logger. If the client disconnects mid-write the
//! sender is dropped unsent and the logger never fires.

use hyper::body::{Body, Frame, SizeHint};
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::sync::oneshot;

pub struct SignalBody<B> {
    inner: B,
    done: Option<oneshot::Sender<()>>,
}

impl<B> SignalBody<B> {
    pub fn new(inner: B, done: oneshot::Sender<()>) -> Self {
        Self {
            inner,
            done: Some(done),
        }
    }
}

impl<B> Body for SignalBody<B>
where
    B: Body + Unpin,
{
    type Data = B::Data;
    type Error = B::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let frame = ready!(Pin::new(&mut self.inner).poll_frame(cx));
        if frame.is_none() {
            if let Some(done) = self.done.take() {
                let _ = done.send(());
            }
        }
        Poll::Ready(frame)
    }

    fn is_end_stream(&self) -> bool {
        // Stay "not ended" until the signal is sent so the final poll that
        // observes end-of-stream (and fires it) is guaranteed to happen.
        self.done.is_none() && self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}
