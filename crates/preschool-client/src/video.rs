//! State of the video screen.

use preschool_shared::constants::{EMULATOR_HOST_ALIAS, LOOPBACK_HOSTNAME};
use tracing::warn;

use crate::config::Platform;

/// What the video screen receives: one URL, plus what it derives from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRoute {
    playback_url: String,
    file_name: String,
}

impl VideoRoute {
    pub fn new(url: &str, platform: Platform) -> Self {
        Self {
            playback_url: playback_url(url, platform),
            file_name: file_name(url).to_string(),
        }
    }

    /// URL handed to the player.
    pub fn playback_url(&self) -> &str {
        &self.playback_url
    }

    /// Shown in the screen header.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Playback failures are only logged; the screen stays as it is.
    pub fn report_playback_error(&self, error: &dyn std::fmt::Display) {
        warn!(url = %self.playback_url, error = %error, "Video playback error");
    }
}

// An Android emulator reaches the host's loopback through a fixed alias.
fn playback_url(url: &str, platform: Platform) -> String {
    if platform == Platform::Android && url.contains(LOOPBACK_HOSTNAME) {
        url.replacen(LOOPBACK_HOSTNAME, EMULATOR_HOST_ALIAS, 1)
    } else {
        url.to_string()
    }
}

fn file_name(url: &str) -> &str {
    url.split('/').filter(|s| !s.is_empty()).last().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_android_rewrites_localhost() {
        let route = VideoRoute::new("http://localhost:5000/videos/lesson1.mp4", Platform::Android);
        assert_eq!(route.playback_url(), "http://10.0.2.2:5000/videos/lesson1.mp4");
    }

    #[test]
    fn test_other_platforms_keep_url() {
        for platform in [Platform::Ios, Platform::Desktop] {
            let route = VideoRoute::new("http://localhost:5000/videos/lesson1.mp4", platform);
            assert_eq!(route.playback_url(), "http://localhost:5000/videos/lesson1.mp4");
        }
    }

    #[test]
    fn test_file_name() {
        let route = VideoRoute::new("https://10.0.2.2:5000/videos/lesson1.mp4/", Platform::Android);
        assert_eq!(route.file_name(), "lesson1.mp4");
        assert_eq!(VideoRoute::new("https://lesson1.mp4", Platform::Ios).file_name(), "lesson1.mp4");
        assert_eq!(VideoRoute::new("", Platform::Android).file_name(), "");
    }

    #[test]
    fn test_playback_error_is_logged_as_warning() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        let route = VideoRoute::new("http://localhost:5000/videos/lesson1.mp4", Platform::Android);
        tracing::subscriber::with_default(subscriber, || {
            route.report_playback_error(&"decoder init failed");
        });

        let output = logs.contents();
        assert!(output.contains("WARN"), "log was {output:?}");
        assert!(output.contains("Video playback error"));
        assert!(output.contains("decoder init failed"));
        assert!(output.contains("http://10.0.2.2:5000/videos/lesson1.mp4"));
    }
}
