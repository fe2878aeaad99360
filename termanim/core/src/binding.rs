//! Work Binding
//!
//! Wrappers that attach an animation (or start/end messages) to a piece of
//! work, so callers invoke the wrapped work exactly as they would the
//! original.
//!
//! ```text
//! Annotate ─wrap─▶ Animate ─wrap─▶ work      ok: messages around the animation
//! Animate  ─wrap─▶ Annotate ─wrap─▶ work     rejected: prints inside the animation
//! Animate  ─wrap─▶ Animate  ─wrap─▶ work     rejected: two loops on one terminal
//! ```
//!
//! Blocking work implements [`Work`], futures implement [`AsyncWork`]; the
//! animated wrapper picks the thread-backed or cooperative strategy from
//! which trait the inner work implements.

use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use tracing::warn;

use crate::config::AnimationConfig;
use crate::error::{AnimateError, CompositionError, ConfigurationError};
use crate::source::{Arrow, FrameSource};
use crate::supervisor::{Supervisor, WorkUnit};

/// What wrappers a piece of work already carries
pub trait Binding {
    /// Whether an animation is already attached
    fn is_animated(&self) -> bool {
        false
    }

    /// Whether start/end messages are already attached
    fn is_annotated(&self) -> bool {
        false
    }
}

/// Blocking work that can be called repeatedly
pub trait Work: Binding {
    /// Value produced by one call
    type Output;

    /// Run the work once
    fn call(&mut self) -> Self::Output;
}

/// Cooperative work that can be awaited repeatedly
pub trait AsyncWork: Binding {
    /// Value produced by one call
    type Output;

    /// Start one run of the work
    fn call_async(&mut self) -> impl Future<Output = Self::Output>;
}

/// A bare closure
#[derive(Clone, Debug)]
pub struct Plain<F>(F);

/// Bind a blocking closure
pub fn work<F, R>(f: F) -> Plain<F>
where
    F: FnMut() -> R,
{
    Plain(f)
}

impl<F> Binding for Plain<F> {}

impl<F, R> Work for Plain<F>
where
    F: FnMut() -> R,
{
    type Output = R;

    fn call(&mut self) -> R {
        (self.0)()
    }
}

/// A closure producing a future
#[derive(Clone, Debug)]
pub struct Cooperative<F>(F);

/// Bind a closure that returns a future
pub fn task<F, Fut>(f: F) -> Cooperative<F>
where
    F: FnMut() -> Fut,
    Fut: Future,
{
    Cooperative(f)
}

impl<F> Binding for Cooperative<F> {}

impl<F, Fut> AsyncWork for Cooperative<F>
where
    F: FnMut() -> Fut,
    Fut: Future,
{
    type Output = Fut::Output;

    fn call_async(&mut self) -> impl Future<Output = Fut::Output> {
        (self.0)()
    }
}

// =============================================================================
// Animate
// =============================================================================

/// Builder for animated work
///
/// The default draws a width-5 arrow on stdout every 100ms with no message.
pub struct Animate {
    supervisor: Supervisor,
    source: Box<dyn FrameSource>,
    out: Box<dyn Write + Send>,
}

impl Default for Animate {
    fn default() -> Self {
        Self {
            supervisor: Supervisor::default(),
            source: Box::new(Arrow::default()),
            out: Box::new(io::stdout()),
        }
    }
}

impl std::fmt::Debug for Animate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animate")
            .field("supervisor", &self.supervisor)
            .field("source", &self.source.name())
            .finish_non_exhaustive()
    }
}

impl Animate {
    /// Arrow animation with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Animation described by `config`, validated now
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter.
    pub fn from_config(config: &AnimationConfig) -> Result<Self, ConfigurationError> {
        Ok(Self {
            supervisor: config.supervisor()?,
            source: config.build_source()?,
            out: Box::new(io::stdout()),
        })
    }

    /// Draw frames from `source`
    #[must_use]
    pub fn with_source(mut self, source: impl FrameSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Draw one frame per `cadence`
    ///
    /// # Errors
    ///
    /// Returns an error if `cadence` is zero.
    pub fn with_cadence(mut self, cadence: Duration) -> Result<Self, ConfigurationError> {
        self.supervisor = self.supervisor.with_cadence(cadence)?;
        Ok(self)
    }

    /// Show `message` after every frame
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.supervisor = self.supervisor.with_message(message);
        self
    }

    /// Record render events under `span`
    #[must_use]
    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.supervisor = self.supervisor.with_span(span);
        self
    }

    /// Write frames to `out` instead of stdout
    #[must_use]
    pub fn with_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Attach the animation to `inner`
    ///
    /// # Errors
    ///
    /// Refuses work that is already annotated (the messages would be drawn
    /// over) or already animated.
    pub fn wrap<W: Binding>(self, inner: W) -> Result<Animated<W>, CompositionError> {
        if inner.is_annotated() {
            return Err(CompositionError::AnnotationInsideAnimation);
        }
        if inner.is_animated() {
            return Err(CompositionError::NestedAnimation);
        }
        Ok(Animated {
            inner,
            supervisor: self.supervisor,
            source: self.source,
            out: self.out,
        })
    }
}

/// Work that animates while it runs
pub struct Animated<W> {
    inner: W,
    supervisor: Supervisor,
    source: Box<dyn FrameSource>,
    out: Box<dyn Write + Send>,
}

impl<W> Animated<W> {
    /// The wrapped work
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// Unwrap, dropping the animation
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: AsyncWork> Animated<W> {
    /// Run cooperative work to completion from blocking code, on a private
    /// scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheduler cannot start or a frame cannot be
    /// written.
    pub fn call_blocking(&mut self) -> Result<W::Output, AnimateError<W::Output>> {
        let Self {
            inner,
            supervisor,
            source,
            out,
        } = self;
        supervisor.run(source, out, WorkUnit::cooperative(inner.call_async()))
    }
}

impl<W: Binding> Binding for Animated<W> {
    fn is_animated(&self) -> bool {
        true
    }

    fn is_annotated(&self) -> bool {
        self.inner.is_annotated()
    }
}

impl<W: Work> Work for Animated<W> {
    type Output = Result<W::Output, AnimateError<W::Output>>;

    fn call(&mut self) -> Self::Output {
        let Self {
            inner,
            supervisor,
            source,
            out,
        } = self;
        supervisor.run(source, out, WorkUnit::direct(|| inner.call()))
    }
}

impl<W: AsyncWork> AsyncWork for Animated<W> {
    type Output = Result<W::Output, AnimateError<W::Output>>;

    fn call_async(&mut self) -> impl Future<Output = Self::Output> {
        let Self {
            inner,
            supervisor,
            source,
            out,
        } = self;
        async move { supervisor.run_cooperative(source, out, inner.call_async()).await }
    }
}

// =============================================================================
// Annotate
// =============================================================================

/// Builder for work that prints a message before and/or after it runs
pub struct Annotate {
    start_msg: Option<String>,
    end_msg: Option<String>,
    start_no_newline: bool,
    out: Box<dyn Write + Send>,
}

impl Default for Annotate {
    fn default() -> Self {
        Self {
            start_msg: None,
            end_msg: None,
            start_no_newline: false,
            out: Box::new(io::stdout()),
        }
    }
}

impl std::fmt::Debug for Annotate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotate")
            .field("start_msg", &self.start_msg)
            .field("end_msg", &self.end_msg)
            .field("start_no_newline", &self.start_no_newline)
            .finish_non_exhaustive()
    }
}

impl Annotate {
    /// No messages yet; add at least one before wrapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Print `message` before the work runs
    #[must_use]
    pub fn start_msg(mut self, message: impl Into<String>) -> Self {
        self.start_msg = Some(message.into());
        self
    }

    /// Print `message` after the work returns
    #[must_use]
    pub fn end_msg(mut self, message: impl Into<String>) -> Self {
        self.end_msg = Some(message.into());
        self
    }

    /// Leave the cursor right after the start message, so an animation is
    /// drawn on the same line.
    ///
    /// Nothing is written after the message; include a trailing space in it
    /// if the animation should not touch the text.
    #[must_use]
    pub fn start_no_newline(mut self, no_newline: bool) -> Self {
        self.start_no_newline = no_newline;
        self
    }

    /// Write messages to `out` instead of stdout
    #[must_use]
    pub fn with_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Attach the messages to `inner`
    ///
    /// # Errors
    ///
    /// Returns an error if neither message was given.
    pub fn wrap<W: Binding>(self, inner: W) -> Result<Annotated<W>, ConfigurationError> {
        if self.start_msg.is_none() && self.end_msg.is_none() {
            return Err(ConfigurationError::EmptyAnnotation);
        }
        Ok(Annotated {
            inner,
            annotate: self,
        })
    }
}

/// Work framed by start/end messages
pub struct Annotated<W> {
    inner: W,
    annotate: Annotate,
}

impl<W> Annotated<W> {
    /// The wrapped work
    pub fn inner(&self) -> &W {
        &self.inner
    }

    fn print_start(&mut self) {
        let Annotate {
            start_msg,
            start_no_newline,
            out,
            ..
        } = &mut self.annotate;
        if let Some(message) = start_msg {
            let end = if *start_no_newline { "" } else { "\n" };
            print_message(out, message, end);
        }
    }

    fn print_end(&mut self) {
        let Annotate { end_msg, out, .. } = &mut self.annotate;
        if let Some(message) = end_msg {
            print_message(out, message, "\n");
        }
    }
}

fn print_message(out: &mut (dyn Write + Send), message: &str, end: &str) {
    let written = out
        .write_all(message.as_bytes())
        .and_then(|()| out.write_all(end.as_bytes()))
        .and_then(|()| out.flush());
    if let Err(e) = written {
        warn!(error = %e, "Failed to write annotation");
    }
}

impl<W: Binding> Binding for Annotated<W> {
    fn is_animated(&self) -> bool {
        self.inner.is_animated()
    }

    fn is_annotated(&self) -> bool {
        true
    }
}

impl<W: Work> Work for Annotated<W> {
    type Output = W::Output;

    fn call(&mut self) -> W::Output {
        self.print_start();
        let outcome = self.inner.call();
        self.print_end();
        outcome
    }
}

impl<W: AsyncWork> AsyncWork for Annotated<W> {
    type Output = W::Output;

    fn call_async(&mut self) -> impl Future<Output = W::Output> {
        async move {
            self.print_start();
            let outcome = self.inner.call_async().await;
            self.print_end();
            outcome
        }
    }
}
