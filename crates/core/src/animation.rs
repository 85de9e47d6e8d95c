//! Timer-driven animations on a message element.

use std::time::Duration;

use chat_widget_view::ElementRef;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::Instrument;

use crate::config::RevealMode;

const MAX_DOTS: usize = 3;

/// A running dot-pulse animation.
///
/// The animation keeps going until [`Loader::stop`] is called or the handle
/// is dropped.
#[derive(Debug)]
pub struct Loader {
    task: Option<JoinHandle<()>>,
}

impl Loader {
    /// Clears `element` and starts appending one dot per `period`, going
    /// back to an empty text after three dots.
    ///
    /// Must be called within a tokio runtime.
    pub fn start(element: ElementRef, period: Duration) -> Self {
        element.set_text_content("");
        let task = tokio::spawn(
            async move {
                let mut ticker = ticker(period);
                loop {
                    ticker.tick().await;
                    let dots = element.text_content().chars().count();
                    if dots >= MAX_DOTS {
                        element.set_text_content("");
                    } else {
                        element.append_text(".");
                    }
                }
            }
            .instrument(trace_span!("loader")),
        );
        Self { task: Some(task) }
    }

    /// Stops the animation.
    ///
    /// Once this returns, the element is not touched by the loader anymore.
    pub async fn stop(mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        task.abort();
        // The task is either cancelled or had already panicked, nothing
        // to report in both cases.
        task.await.ok();
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// Appends `text` to `element` one character per `period`, left to right.
///
/// Completes after the last character is written; an empty text completes
/// right away without touching the element.
pub async fn type_text(
    element: ElementRef,
    text: &str,
    period: Duration,
    mode: RevealMode,
) {
    let mut ticker = ticker(period);
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        ticker.tick().await;
        let ch = ch.encode_utf8(&mut buf);
        match mode {
            RevealMode::Text => element.append_text(ch),
            RevealMode::Markup => element.append_markup(ch),
        }
    }
    trace!("typed {} characters", text.chars().count());
}

/// An interval whose first tick is one period away, like a DOM timer.
fn ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chat_widget_test_view::{TestElement, TestView};
    use chat_widget_view::{Avatars, MessageId, Speaker, ViewHost, render_turn};
    use tokio::time::sleep;

    use super::*;

    const PERIOD: Duration = Duration::from_millis(300);
    const TYPING: Duration = Duration::from_millis(20);

    /// Renders a bot placeholder and returns it both as the widget sees it
    /// and as the fake records it.
    fn placeholder(view: &TestView) -> (ElementRef, Arc<TestElement>) {
        let id = MessageId::from_parts(0, 0);
        let turn =
            render_turn(Speaker::Bot(id.clone()), " ", &Avatars::default());
        view.query_selector("#container").unwrap().append_turn(&turn);
        (
            view.element_by_id(id.as_str()).unwrap(),
            view.element(id.as_str()).unwrap(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_loader_cycles_dots() {
        let view = TestView::new();
        let (element, recorded) = placeholder(&view);

        let loader = Loader::start(element, PERIOD);
        assert_eq!(recorded.text(), "");

        sleep(PERIOD * 9 + PERIOD / 2).await;
        loader.stop().await;

        assert_eq!(
            recorded.history(),
            ["", ".", "..", "...", "", ".", "..", "...", "", "."]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_loader_stops() {
        let view = TestView::new();
        let (element, recorded) = placeholder(&view);

        let loader = Loader::start(element, PERIOD);
        sleep(PERIOD * 2 + PERIOD / 6).await;
        loader.stop().await;
        assert_eq!(recorded.text(), "..");

        sleep(Duration::from_secs(10)).await;
        assert_eq!(recorded.text(), "..");
    }

    #[tokio::test(start_paused = true)]
    async fn test_loader_stops_on_drop() {
        let view = TestView::new();
        let (element, recorded) = placeholder(&view);

        let loader = Loader::start(element, PERIOD);
        sleep(PERIOD + PERIOD / 6).await;
        drop(loader);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(recorded.text(), ".");
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_text() {
        let view = TestView::new();
        let (element, recorded) = placeholder(&view);
        element.set_text_content("");

        let started = Instant::now();
        type_text(element, "héllo", TYPING, RevealMode::Text).await;
        assert_eq!(started.elapsed(), TYPING * 5);
        assert_eq!(
            recorded.history(),
            ["", "h", "hé", "hél", "héll", "héllo"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_text_modes() {
        let view = TestView::new();
        let (element, recorded) = placeholder(&view);

        element.set_text_content("");
        type_text(Arc::clone(&element), "<b>", TYPING, RevealMode::Text).await;
        assert_eq!(recorded.markup(), "&lt;b&gt;");

        element.set_text_content("");
        type_text(element, "<b>", TYPING, RevealMode::Markup).await;
        assert_eq!(recorded.markup(), "<b>");
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_empty_text() {
        let view = TestView::new();
        let (element, recorded) = placeholder(&view);

        type_text(element, "", TYPING, RevealMode::Text).await;
        assert!(recorded.history().is_empty());
        assert_eq!(recorded.text(), " ");
    }
}
