//! Line-delimited frame reader over a tracker process or a recorded session.

use crate::config::Config;
use crate::error::{PalmpadError, Result};
use crate::tracking::protocol::{decode_line, Decoded};
use crate::tracking::{HandTracker, TrackedFrame};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};

/// Reads one [`TrackedFrame`] per line from any buffered async reader.
pub struct LineTracker<R> {
    lines: Lines<R>,
    source: String,
    mirror: bool,
    frame_interval: Option<Duration>,
    line_number: u64,
    frames_read: u64,
    finished: bool,
    // Killed on drop
    child: Option<Child>,
}

impl<R: AsyncBufRead + Unpin + Send> LineTracker<R> {
    pub fn from_reader(reader: R, mirror: bool, source: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            source: source.into(),
            mirror,
            frame_interval: None,
            line_number: 0,
            frames_read: 0,
            finished: false,
            child: None,
        }
    }

    /// Pace frames, used when replaying a recording at camera speed.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    fn finish(&mut self, reason: &str) {
        self.finished = true;
        log::info!("{}: {} after {} frames", self.source, reason, self.frames_read);

        if let Some(child) = self.child.as_mut() {
            if let Ok(Some(status)) = child.try_wait() {
                log::info!("tracker exited with {}", status);
            }
        }
    }
}

impl LineTracker<BufReader<ChildStdout>> {
    /// Start the configured tracker on the configured camera and read its stdout.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: &Config) -> Result<Self> {
        let program = &config.tracker.program;
        let mut child = Command::new(program)
            .args(config.tracker.args(config.camera_index))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PalmpadError::tracker_spawn(program.as_str(), e))?;

        let stdout = child.stdout.take().ok_or_else(|| {
            PalmpadError::tracker(
                "tracker stdout was not captured",
                std::io::Error::new(std::io::ErrorKind::BrokenPipe, "missing stdout"),
            )
        })?;

        // Tracker diagnostics would corrupt the HUD; route them through the logger instead.
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    log::debug!(target: "palmpad::tracker", "{}", line);
                }
            });
        }

        log::info!(
            "started tracker `{}` on camera {}",
            program,
            config.camera_index
        );

        let source = format!("{} (camera {})", program, config.camera_index);
        let mut tracker = Self::from_reader(BufReader::new(stdout), config.mirror, source);
        tracker.child = Some(child);
        Ok(tracker)
    }
}

impl LineTracker<BufReader<File>> {
    /// Replay a recorded session at `config.replay_fps`.
    pub async fn open_replay(path: &Path, config: &Config) -> Result<Self> {
        let interval = Duration::try_from_secs_f32(1.0 / config.replay_fps).map_err(|_| {
            PalmpadError::config(format!(
                "replay_fps {} does not give a usable frame interval",
                config.replay_fps
            ))
        })?;

        let file = File::open(path).await.map_err(|e| {
            PalmpadError::file_error(format!("failed to open replay {}", path.display()), e)
        })?;

        Ok(
            Self::from_reader(BufReader::new(file), config.mirror, path.display().to_string())
                .with_frame_interval(interval),
        )
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> HandTracker for LineTracker<R> {
    async fn next_frame(&mut self) -> Result<Option<TrackedFrame>> {
        if self.finished {
            return Ok(None);
        }

        if let Some(interval) = self.frame_interval {
            if self.frames_read > 0 {
                tokio::time::sleep(interval).await;
            }
        }

        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(|e| PalmpadError::tracker("failed to read tracker output", e))?;

            let Some(line) = line else {
                self.finish("stream ended");
                return Ok(None);
            };
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match decode_line(trimmed, self.line_number, self.mirror)? {
                Decoded::Frame(frame) => {
                    self.frames_read += 1;
                    return Ok(Some(frame));
                }
                Decoded::AcquisitionFailed => {
                    self.finish("frame acquisition failed");
                    return Ok(None);
                }
            }
        }
    }

    fn describe(&self) -> String {
        self.source.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerConfig;
    use crate::gesture::{NormalizedPoint, LANDMARK_COUNT};
    use std::io::Cursor;

    fn hand_line(x: f32, y: f32) -> String {
        let landmark = format!(r#"{{"x":{},"y":{}}}"#, x, y);
        format!(
            r#"{{"hands":[{{"landmarks":[{}]}}]}}"#,
            vec![landmark; LANDMARK_COUNT].join(",")
        )
    }

    fn tracker(data: impl Into<String>) -> LineTracker<Cursor<Vec<u8>>> {
        LineTracker::from_reader(Cursor::new(data.into().into_bytes()), false, "test")
    }

    #[tokio::test]
    async fn test_reads_frames_then_ends() {
        let mut tracker = tracker(format!("{}\n\n{{\"hands\":[]}}\n", hand_line(0.2, 0.5)));

        let first = tracker.next_frame().await.unwrap().unwrap();
        assert_eq!(first.hand.unwrap().palm(), NormalizedPoint::new(0.2, 0.5));

        // Blank line skipped
        let second = tracker.next_frame().await.unwrap().unwrap();
        assert!(second.hand.is_none());

        assert!(tracker.next_frame().await.unwrap().is_none());
        assert!(tracker.next_frame().await.unwrap().is_none());
        assert_eq!(tracker.frames_read(), 2);
    }

    #[tokio::test]
    async fn test_acquisition_failure_stops_stream() {
        let mut tracker = tracker("{\"hands\":[]}\n{\"ok\":false}\n{\"hands\":[]}\n");

        assert!(tracker.next_frame().await.unwrap().is_some());
        assert!(tracker.next_frame().await.unwrap().is_none());
        // Not retried, even though more lines follow
        assert!(tracker.next_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_decode_error_carries_line_number() {
        let mut tracker = tracker("{\"hands\":[]}\n\n{broken\n");

        assert!(tracker.next_frame().await.unwrap().is_some());
        match tracker.next_frame().await {
            Err(PalmpadError::FrameDecode { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected FrameDecode, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_replay_rejects_unusable_fps() {
        let file = tempfile::NamedTempFile::new().expect("create temp file");

        // 1/0 is infinite and 1/1e-20 overflows a Duration
        for fps in [0.0, 1e-20, -5.0] {
            let config = Config {
                replay_fps: fps,
                ..Config::default()
            };
            match LineTracker::open_replay(file.path(), &config).await {
                Err(PalmpadError::ConfigError { message }) => {
                    assert!(message.contains("replay_fps"), "{}", message)
                }
                Err(other) => panic!("expected ConfigError, got {:?}", other),
                Ok(_) => panic!("replay_fps {} accepted", fps),
            }
        }
    }

    #[tokio::test]
    async fn test_replay_paces_frames() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        std::io::Write::write_all(&mut file, b"{\"hands\":[]}\n{\"hands\":[]}\n").unwrap();

        let config = Config {
            replay_fps: crate::config::MAX_REPLAY_FPS,
            ..Config::default()
        };
        let mut tracker = LineTracker::open_replay(file.path(), &config).await.unwrap();
        assert_eq!(tracker.frame_interval, Some(Duration::from_millis(1)));

        assert!(tracker.next_frame().await.unwrap().is_some());
        assert!(tracker.next_frame().await.unwrap().is_some());
        assert!(tracker.next_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_tracker_program() {
        let config = Config {
            tracker: TrackerConfig {
                program: "palmpad-tracker-that-does-not-exist".to_string(),
                ..TrackerConfig::default()
            },
            ..Config::default()
        };

        match LineTracker::spawn(&config) {
            Err(PalmpadError::TrackerSpawn { program, .. }) => {
                assert_eq!(program, "palmpad-tracker-that-does-not-exist")
            }
            Err(other) => panic!("expected TrackerSpawn, got {:?}", other),
            Ok(_) => panic!("spawn should fail"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawned_tracker_output_is_decoded() {
        // `echo` prints its arguments, which is not a frame
        let config = Config {
            tracker: TrackerConfig {
                program: "echo".to_string(),
                ..TrackerConfig::default()
            },
            ..Config::default()
        };

        let mut tracker = LineTracker::spawn(&config).unwrap();
        assert_eq!(tracker.describe(), "echo (camera 0)");
        assert!(matches!(
            tracker.next_frame().await,
            Err(PalmpadError::FrameDecode { line: 1, .. })
        ));
    }
}
