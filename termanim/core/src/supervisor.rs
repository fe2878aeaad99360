//! Supervisor
//!
//! Runs a unit of work while a render loop animates next to it, and
//! guarantees the animation is stopped and erased before control returns.
//!
//! # Strategies
//!
//! ```text
//! Direct work (blocking closure)
//!   caller thread:  [ work() ................ ] stop ── join ── return
//!   render thread:  [ sleep | draw | sleep | draw | erase ]
//!
//! Cooperative work (future)
//!   one task:       join!( work.await ; cancel ,  render loop )
//! ```
//!
//! Both strategies share the same rules:
//!
//! - the work's value (including any `Result` it returns) is handed back
//!   unchanged
//! - a panic in the work stops the animation, erases it, then resumes
//!   unwinding
//! - no animation output is written after `run` returns
//! - a failed terminal write ends the animation but not the work; the run
//!   reports [`AnimateError::Render`], carrying the work's outcome, once the
//!   work has finished

use std::future::Future;
use std::io::Write;
use std::panic;
use std::thread;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, Instrument, Span};

use crate::error::{AnimateError, ConfigurationError};
use crate::render::RenderLoop;
use crate::signal::StopSignal;
use crate::source::FrameSource;

/// Cadence used when none is configured
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(100);

/// Name given to the render thread
const RENDER_THREAD_NAME: &str = "termanim-render";

/// The work to supervise: a blocking closure or a future
pub enum WorkUnit<F, Fut> {
    /// Runs to completion on the calling thread
    Direct(F),
    /// Polled alongside the render loop on one task
    Cooperative(Fut),
}

impl<F, R> WorkUnit<F, std::future::Ready<R>>
where
    F: FnOnce() -> R,
{
    /// Wrap a blocking closure
    pub fn direct(work: F) -> Self {
        Self::Direct(work)
    }
}

impl<Fut: Future> WorkUnit<fn() -> Fut::Output, Fut> {
    /// Wrap a future
    pub fn cooperative(work: Fut) -> Self {
        Self::Cooperative(work)
    }
}

/// Runs work under an animation
#[derive(Clone, Debug)]
pub struct Supervisor {
    cadence: Duration,
    message: Option<String>,
    span: Span,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self {
            cadence: DEFAULT_CADENCE,
            message: None,
            span: Span::none(),
        }
    }
}

impl Supervisor {
    /// Create a supervisor that draws one frame per `cadence`
    pub fn new(cadence: Duration) -> Result<Self, ConfigurationError> {
        Self::default().with_cadence(cadence)
    }

    /// Change the delay between frames, keeping everything else
    pub fn with_cadence(mut self, cadence: Duration) -> Result<Self, ConfigurationError> {
        if cadence.is_zero() {
            return Err(ConfigurationError::NonPositiveCadence);
        }
        self.cadence = cadence;
        Ok(self)
    }

    /// Show `message` after every frame
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.message = (!message.is_empty()).then_some(message);
        self
    }

    /// Record render loop events under `span`
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Delay between frames
    #[must_use]
    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    /// Message shown after every frame
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Run `work`, picking the strategy from its kind.
    ///
    /// Cooperative work is driven on a private current-thread runtime with
    /// every driver the build has compiled in. This must not be called from
    /// inside an async context; use
    /// [`Supervisor::run_cooperative`] there.
    pub fn run<S, W, F, Fut, R>(
        &self,
        source: &mut S,
        out: &mut W,
        work: WorkUnit<F, Fut>,
    ) -> Result<R, AnimateError<R>>
    where
        S: FrameSource + ?Sized,
        W: Write + Send + ?Sized,
        F: FnOnce() -> R,
        Fut: Future<Output = R>,
    {
        match work {
            WorkUnit::Direct(work) => self.run_blocking(source, out, work),
            WorkUnit::Cooperative(work) => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(AnimateError::<R>::Runtime)?;
                runtime.block_on(self.run_cooperative(source, out, work))
            }
        }
    }

    /// Run blocking `work` on this thread while a render thread animates
    pub fn run_blocking<S, W, F, R>(
        &self,
        source: &mut S,
        out: &mut W,
        work: F,
    ) -> Result<R, AnimateError<R>>
    where
        S: FrameSource + ?Sized,
        W: Write + Send + ?Sized,
        F: FnOnce() -> R,
    {
        let signal = StopSignal::new();
        let render = RenderLoop::new(source, out, self.cadence).with_message(self.message());
        let span = &self.span;

        thread::scope(|scope| -> Result<R, AnimateError<R>> {
            let handle = thread::Builder::new()
                .name(RENDER_THREAD_NAME.to_string())
                .spawn_scoped(scope, || span.in_scope(|| render.run_blocking(&signal)))
                .map_err(AnimateError::<R>::Spawn)?;

            let outcome = {
                let _stop = signal.stop_on_drop();
                work()
            };

            match handle.join() {
                Ok(Ok(stats)) => {
                    debug!(frames = stats.frames_drawn, "Animation finished");
                    Ok(outcome)
                }
                Ok(Err(error)) => Err(AnimateError::Render {
                    source: error,
                    outcome,
                }),
                Err(payload) => panic::resume_unwind(payload),
            }
        })
    }

    /// Await `work` while the render loop animates on the same task.
    ///
    /// Needs a Tokio runtime with the time driver enabled, plus whatever
    /// drivers `work` itself uses.
    pub async fn run_cooperative<S, W, Fut, R>(
        &self,
        source: &mut S,
        out: &mut W,
        work: Fut,
    ) -> Result<R, AnimateError<R>>
    where
        S: FrameSource + ?Sized,
        W: Write + ?Sized,
        Fut: Future<Output = R>,
    {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let render = RenderLoop::new(source, out, self.cadence)
            .with_message(self.message())
            .run_cooperative(cancel_rx)
            .instrument(self.span.clone());
        let work = async move {
            let outcome = work.await;
            // The loop is gone already if it failed to write.
            let _ = cancel_tx.send(());
            outcome
        };

        let (outcome, rendered) = tokio::join!(work, render);
        match rendered {
            Ok(stats) => {
                debug!(frames = stats.frames_drawn, "Animation finished");
                Ok(outcome)
            }
            Err(error) => Err(AnimateError::Render {
                source: error,
                outcome,
            }),
        }
    }
}
