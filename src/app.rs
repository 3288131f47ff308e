//! Application orchestration layer
//!
//! Runs the frame loop: each tracked frame is classified, the key driver is updated, and the
//! HUD is redrawn before the next frame is awaited. Nothing overlaps; the loop is the only
//! owner of the driver, the tracker and the renderer.

use crate::config::Config;
use crate::error::Result;
use crate::gesture::classify_hand;
use crate::input::ControlAction;
use crate::keys::{KeyDriver, KeyInjector};
use crate::render::{HudRenderer, HudState};
use crate::tracking::HandTracker;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Why the frame loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Exit key pressed in the HUD
    UserExit,
    /// Interrupt signal received
    Interrupted,
    /// The tracker stopped delivering frames
    SourceClosed,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExitReason::UserExit => "exit key pressed",
            ExitReason::Interrupted => "interrupted",
            ExitReason::SourceClosed => "tracker stopped delivering frames",
        };
        f.write_str(text)
    }
}

/// Application orchestrator - wires tracker, classifier, key driver and HUD together
pub struct Application<I: KeyInjector> {
    config: Config,
    tracker: Box<dyn HandTracker>,
    driver: KeyDriver<I>,
    renderer: Box<dyn HudRenderer>,
}

impl<I: KeyInjector> Application<I> {
    pub fn new(
        config: Config,
        tracker: Box<dyn HandTracker>,
        injector: I,
        renderer: Box<dyn HudRenderer>,
    ) -> Self {
        Self {
            config,
            tracker,
            driver: KeyDriver::new(injector),
            renderer,
        }
    }

    pub fn driver(&self) -> &KeyDriver<I> {
        &self.driver
    }

    /// Run until the exit key, Ctrl-C, the end of the frame stream, or an error.
    pub async fn run(&mut self) -> Result<ExitReason> {
        self.run_until(async {
            if tokio::signal::ctrl_c().await.is_err() {
                log::warn!("cannot listen for Ctrl-C; use the exit key instead");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run until `shutdown` resolves or the loop ends on its own.
    ///
    /// Whatever ends the loop, the held key is released and the display restored before
    /// returning. Errors from the loop take precedence over cleanup errors.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<ExitReason>
    where
        F: Future<Output = ()>,
    {
        if let Err(err) = self.renderer.initialize() {
            if let Err(cleanup_err) = self.renderer.cleanup() {
                log::warn!("display cleanup failed after init error: {}", cleanup_err);
            }
            return Err(err);
        }

        let outcome = self.frame_loop(shutdown).await;
        let released = self.driver.release_all();
        let cleaned = self.renderer.cleanup();

        if outcome.is_err() {
            if let Err(err) = &released {
                log::warn!("key release failed during shutdown: {}", err);
            }
            if let Err(err) = &cleaned {
                log::warn!("display cleanup failed during shutdown: {}", err);
            }
        }

        let reason = outcome?;
        released?;
        cleaned?;

        log::info!("stopped: {}", reason);
        Ok(reason)
    }

    async fn frame_loop<F>(&mut self, shutdown: F) -> Result<ExitReason>
    where
        F: Future<Output = ()>,
    {
        let (width, height) = self.renderer.get_terminal_size()?;
        let mut hud = HudState::new(self.tracker.describe(), self.config.bounds, width, height);
        self.renderer.render(&hud)?;

        tokio::pin!(shutdown);

        loop {
            let frame = tokio::select! {
                biased;
                _ = &mut shutdown => return Ok(ExitReason::Interrupted),
                frame = self.tracker.next_frame() => frame?,
            };

            // Acquisition failure is final
            let Some(frame) = frame else {
                return Ok(ExitReason::SourceClosed);
            };

            let direction = classify_hand(frame.hand.as_ref(), &self.config.bounds);
            if direction != hud.direction {
                log::debug!("command {} -> {}", hud.direction, direction);
            }
            self.driver.set_state(direction.key())?;

            hud.record_frame(frame.hand, direction, self.driver.current_key());
            self.renderer.render(&hud)?;

            for action in self.renderer.handle_input(Duration::ZERO)? {
                match action {
                    ControlAction::Quit => return Ok(ExitReason::UserExit),
                    ControlAction::Resize { width, height } => {
                        hud.update_terminal_size(width, height);
                    }
                    ControlAction::NoAction | ControlAction::InvalidInput => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PalmpadError;
    use crate::gesture::{Direction, LANDMARK_COUNT};
    use crate::keys::{DirectionKey, DryRunInjector, KeyEvent};
    use crate::render::ui::MockHudRenderer;
    use crate::tracking::LineTracker;
    use std::io::Cursor;
    use std::rc::Rc;

    fn hand_line(x: f32, y: f32) -> String {
        let landmark = format!(r#"{{"x":{},"y":{}}}"#, x, y);
        format!(
            r#"{{"hands":[{{"landmarks":[{}]}}]}}"#,
            vec![landmark; LANDMARK_COUNT].join(",")
        )
    }

    fn no_hand_line() -> String {
        r#"{"hands":[]}"#.to_string()
    }

    fn app(lines: &[String], renderer: MockHudRenderer) -> Application<DryRunInjector> {
        let data = lines.join("\n").into_bytes();
        let tracker = LineTracker::from_reader(Cursor::new(data), false, "test");
        Application::new(
            Config::default(),
            Box::new(tracker),
            DryRunInjector::new(),
            Box::new(renderer),
        )
    }

    #[tokio::test]
    async fn test_session_until_stream_ends() {
        let renderer = MockHudRenderer::new();
        let log = Rc::clone(&renderer.log);
        let mut app = app(
            &[
                hand_line(0.1, 0.5),
                hand_line(0.1, 0.5),
                hand_line(0.5, 0.9),
                no_hand_line(),
            ],
            renderer,
        );

        let reason = app.run_until(std::future::pending()).await.unwrap();
        assert_eq!(reason, ExitReason::SourceClosed);

        assert_eq!(
            app.driver().injector().events(),
            &[
                KeyEvent::Press(DirectionKey::Left),
                KeyEvent::Release(DirectionKey::Left),
                KeyEvent::Press(DirectionKey::Down),
                KeyEvent::Release(DirectionKey::Down),
            ]
        );

        let log = log.borrow();
        // Initial blank HUD plus one render per frame
        assert_eq!(
            log.rendered,
            vec![
                Direction::Neutral,
                Direction::Left,
                Direction::Left,
                Direction::Down,
                Direction::Neutral,
            ]
        );
        assert_eq!(log.cleanup_count, 1);
        assert!(!log.is_initialized);
    }

    #[tokio::test]
    async fn test_exit_key_releases_held_key() {
        let renderer = MockHudRenderer::new().script(vec![vec![], vec![ControlAction::Quit]]);
        let log = Rc::clone(&renderer.log);
        let mut app = app(
            &[hand_line(0.5, 0.1), hand_line(0.5, 0.1), hand_line(0.9, 0.5)],
            renderer,
        );

        let reason = app.run_until(std::future::pending()).await.unwrap();
        assert_eq!(reason, ExitReason::UserExit);

        // Third frame never processed; Up released on the way out
        assert_eq!(
            app.driver().injector().events(),
            &[
                KeyEvent::Press(DirectionKey::Up),
                KeyEvent::Release(DirectionKey::Up),
            ]
        );
        assert_eq!(app.driver().current_key(), None);
        assert_eq!(log.borrow().cleanup_count, 1);
    }

    #[tokio::test]
    async fn test_shutdown_signal_stops_before_next_frame() {
        let mut app = app(&[hand_line(0.1, 0.5)], MockHudRenderer::new());

        let reason = app.run_until(async {}).await.unwrap();
        assert_eq!(reason, ExitReason::Interrupted);
        assert!(app.driver().injector().events().is_empty());
    }

    #[tokio::test]
    async fn test_decode_error_still_releases_and_cleans_up() {
        let renderer = MockHudRenderer::new();
        let log = Rc::clone(&renderer.log);
        let mut app = app(&[hand_line(0.9, 0.5), "garbage".to_string()], renderer);

        let err = app.run_until(std::future::pending()).await.unwrap_err();
        assert!(matches!(err, PalmpadError::FrameDecode { line: 2, .. }));

        assert_eq!(
            app.driver().injector().events(),
            &[
                KeyEvent::Press(DirectionKey::Right),
                KeyEvent::Release(DirectionKey::Right),
            ]
        );
        assert_eq!(log.borrow().cleanup_count, 1);
    }

    #[tokio::test]
    async fn test_init_failure_still_cleans_up() {
        let renderer = MockHudRenderer::new()
            .fail_initialize()
            .fail_cleanup();
        let log = Rc::clone(&renderer.log);
        let mut app = app(&[hand_line(0.1, 0.5)], renderer);

        // The init error wins over the cleanup error
        let err = app.run_until(std::future::pending()).await.unwrap_err();
        match err {
            PalmpadError::UIError { message } => assert_eq!(message, "initialize failed"),
            other => panic!("expected UIError, got {:?}", other),
        }

        let log = log.borrow();
        assert_eq!(log.cleanup_count, 1);
        assert!(log.rendered.is_empty());
        assert!(app.driver().injector().events().is_empty());
    }

    #[tokio::test]
    async fn test_resize_does_not_stop_loop() {
        let renderer = MockHudRenderer::new().script(vec![vec![ControlAction::Resize {
            width: 120,
            height: 40,
        }]]);
        let mut app = app(&[no_hand_line(), no_hand_line()], renderer);

        let reason = app.run_until(std::future::pending()).await.unwrap();
        assert_eq!(reason, ExitReason::SourceClosed);
    }

    #[test]
    fn test_exit_reason_display() {
        assert_eq!(ExitReason::UserExit.to_string(), "exit key pressed");
        assert_eq!(
            ExitReason::SourceClosed.to_string(),
            "tracker stopped delivering frames"
        );
    }
}
