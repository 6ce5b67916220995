//! Home screen state: the ad carousel and the side drawer.

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::ClientError;

/// Time each carousel slide stays up.
pub const CAROUSEL_PERIOD: Duration = Duration::from_secs(3);

/// Drawer width; the closed drawer sits at `-DRAWER_WIDTH`.
pub const DRAWER_WIDTH: f32 = 280.0;

pub const DRAWER_ANIMATION: Duration = Duration::from_millis(300);

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// Round-robin index over a fixed number of slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Result<Self, ClientError> {
        if len == 0 {
            return Err(ClientError::EmptyCarousel);
        }
        Ok(Self { len, index: 0 })
    }

    pub fn current(&self) -> usize {
        self.index
    }

    /// Step to the next slide, wrapping to the first.
    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    /// Advance every `period` on the runtime. The receiver sees each new
    /// index; the task stops once every receiver is dropped.
    pub fn spawn_auto_advance(mut self, period: Duration) -> (watch::Receiver<usize>, JoinHandle<()>) {
        let (tx, rx) = watch::channel(self.index);
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                ticker.tick().await;
                let index = self.advance();
                if tx.send(index).is_err() {
                    debug!("Carousel has no viewers, stopping auto-advance");
                    break;
                }
            }
        });
        (rx, handle)
    }
}

// ---------------------------------------------------------------------------
// Drawer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct Slide {
    from: f32,
    to: f32,
    started: Instant,
}

/// Side drawer sliding between `-DRAWER_WIDTH` (hidden) and `0` (shown).
///
/// Opening flags the drawer open right away so the overlay shows during the
/// slide-in; closing keeps it open until the slide-out has finished.
#[derive(Debug, Clone)]
pub struct Drawer {
    open: bool,
    resting: f32,
    slide: Option<Slide>,
}

impl Default for Drawer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawer {
    pub fn new() -> Self {
        Self {
            open: false,
            resting: -DRAWER_WIDTH,
            slide: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_animating(&self) -> bool {
        self.slide.is_some()
    }

    pub fn open(&mut self, now: Instant) {
        self.open = true;
        self.slide_to(0.0, now);
    }

    pub fn close(&mut self, now: Instant) {
        self.slide_to(-DRAWER_WIDTH, now);
    }

    /// Horizontal offset at `now`, linearly interpolated while sliding.
    pub fn offset_at(&self, now: Instant) -> f32 {
        match self.slide {
            None => self.resting,
            Some(slide) => {
                let elapsed = now.saturating_duration_since(slide.started);
                let t = (elapsed.as_secs_f32() / DRAWER_ANIMATION.as_secs_f32()).min(1.0);
                slide.from + (slide.to - slide.from) * t
            }
        }
    }

    /// Settle a finished slide. Call on every frame.
    pub fn tick(&mut self, now: Instant) {
        let Some(slide) = self.slide else {
            return;
        };
        if now.saturating_duration_since(slide.started) < DRAWER_ANIMATION {
            return;
        }
        self.resting = slide.to;
        self.slide = None;
        if slide.to < 0.0 {
            self.open = false;
        }
    }

    fn slide_to(&mut self, to: f32, now: Instant) {
        let from = self.offset_at(now);
        self.slide = Some(Slide {
            from,
            to,
            started: now,
        });
    }
}
