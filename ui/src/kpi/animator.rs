//! Quadratic ease-out interpolation for KPI tiles.
//!
//! [`KpiRun::tick`] is pure: it takes a clock reading and returns the text to
//! show plus whether the run is finished. [`animate`] drives it from display
//! refresh callbacks and writes each frame to a [`KpiTarget`].

use crate::core::config::KpiConfig;
use crate::core::format::{format_fixed, format_grouped, Grouping};
use crate::core::timing;

/// Something that can display a KPI string (a signal, a DOM node, a test sink).
pub trait KpiTarget {
    fn set_text(&mut self, text: String);
}

impl KpiTarget for Vec<String> {
    fn set_text(&mut self, text: String) {
        self.push(text);
    }
}

impl<T: KpiTarget + ?Sized> KpiTarget for &mut T {
    fn set_text(&mut self, text: String) {
        (**self).set_text(text);
    }
}

/// `1 - (1 - p)^2`, decelerating into the final value.
pub fn ease_out_quad(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p) * (1.0 - p)
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiAnimation {
    pub start: f64,
    pub end: f64,
    pub duration_ms: f64,
    pub prefix: String,
    pub suffix: String,
    pub postfix: String,
    pub decimals: u32,
    pub grouping: Grouping,
}

impl KpiAnimation {
    pub fn from_config(config: &KpiConfig, grouping: Grouping) -> Self {
        Self {
            start: config.start,
            end: config.end,
            duration_ms: config.duration_ms,
            prefix: config.prefix.clone(),
            suffix: config.suffix.clone(),
            postfix: config.postfix.clone(),
            decimals: config.decimals,
            grouping,
        }
    }

    /// `clamp(elapsed / duration, 0, 1)`; a non-positive duration is already done.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 || elapsed_ms.is_nan() {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Interpolated value; exactly `end` once progress reaches 1.
    pub fn value_at(&self, elapsed_ms: f64) -> f64 {
        let p = self.progress(elapsed_ms);
        if p >= 1.0 {
            self.end
        } else {
            self.start + (self.end - self.start) * ease_out_quad(p)
        }
    }

    pub fn render(&self, value: f64) -> String {
        let number = if self.decimals > 0 {
            format_fixed(value, self.decimals as usize)
        } else {
            format_grouped(value, self.grouping)
        };
        format!("{}{number}{}{}", self.prefix, self.suffix, self.postfix)
    }

    pub fn frame(&self, elapsed_ms: f64) -> KpiFrame {
        KpiFrame {
            text: self.render(self.value_at(elapsed_ms)),
            done: self.progress(elapsed_ms) >= 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiFrame {
    pub text: String,
    pub done: bool,
}

/// One in-flight animation anchored at a start time.
#[derive(Debug, Clone)]
pub struct KpiRun {
    animation: KpiAnimation,
    started_ms: f64,
}

impl KpiRun {
    pub fn new(animation: KpiAnimation, started_ms: f64) -> Self {
        Self {
            animation,
            started_ms,
        }
    }

    pub fn tick(&self, now_ms: f64) -> KpiFrame {
        self.animation.frame(now_ms - self.started_ms)
    }
}

/// Animate `animation` into `target`, one step per display refresh.
///
/// A missing target makes this a no-op. There is no cancellation: the run
/// always finishes, and a second run on the same target simply overwrites it.
pub async fn animate<T: KpiTarget>(animation: KpiAnimation, target: Option<T>) {
    let Some(mut target) = target else {
        tracing::debug!("kpi target missing; skipping animation");
        return;
    };

    let run = KpiRun::new(animation, timing::now_ms());
    loop {
        timing::next_frame().await;
        let frame = run.tick(timing::now_ms());
        target.set_text(frame.text);
        if frame.done {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animation(start: f64, end: f64, duration_ms: f64, decimals: u32) -> KpiAnimation {
        KpiAnimation {
            start,
            end,
            duration_ms,
            prefix: String::new(),
            suffix: String::new(),
            postfix: String::new(),
            decimals,
            grouping: Grouping::Western,
        }
    }

    #[test]
    fn easing_curve_shape() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(0.5), 0.75);
        // Decelerates: first half covers more distance than the second.
        assert!(ease_out_quad(0.5) - ease_out_quad(0.0) > ease_out_quad(1.0) - ease_out_quad(0.5));
    }

    #[test]
    fn final_frame_is_exact() {
        for (start, end) in [(0.0, 28.2), (3.0, 4.8), (-10.0, 6000.0), (0.1, 0.3)] {
            let anim = animation(start, end, 1200.0, 1);
            assert_eq!(anim.value_at(1200.0), end);
            assert_eq!(anim.value_at(5000.0), end);
            assert!(anim.frame(1200.0).done);
        }
    }

    #[test]
    fn intermediate_frames_follow_the_curve() {
        let anim = animation(0.0, 100.0, 1000.0, 0);
        assert_eq!(anim.value_at(0.0), 0.0);
        assert_eq!(anim.value_at(500.0), 75.0);
        assert!(!anim.frame(500.0).done);
        assert_eq!(anim.value_at(-50.0), 0.0);
    }

    #[test]
    fn zero_duration_jumps_to_end() {
        let anim = animation(0.0, 8.0, 0.0, 0);
        let frame = anim.frame(0.0);
        assert_eq!(frame.text, "8");
        assert!(frame.done);
    }

    #[test]
    fn formatting_matches_tile_conventions() {
        let mut dbt = animation(0.0, 6000.0, 1500.0, 0);
        dbt.prefix = "₹".into();
        dbt.postfix = " Cr".into();
        assert_eq!(dbt.frame(1500.0).text, "₹6,000 Cr");

        let mut records = animation(0.0, 4.8, 1500.0, 0);
        records.suffix = "M+".into();
        assert_eq!(records.frame(1500.0).text, "5M+");

        let ifi = animation(0.0, 28.2, 1200.0, 1);
        assert_eq!(ifi.frame(1200.0).text, "28.2");
    }

    #[test]
    fn run_ticks_relative_to_start() {
        let run = KpiRun::new(animation(0.0, 100.0, 1000.0, 0), 10_000.0);
        assert_eq!(run.tick(10_500.0).text, "75");
        let last = run.tick(11_000.0);
        assert_eq!(last.text, "100");
        assert!(last.done);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn driver_writes_frames_until_exact_end() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let mut sink = Vec::new();
        runtime.block_on(animate(animation(0.0, 28.2, 80.0, 1), Some(&mut sink)));

        assert!(!sink.is_empty());
        assert_eq!(sink.last().map(String::as_str), Some("28.2"));
        let values: Vec<f64> = sink.iter().map(|text| text.parse().unwrap()).collect();
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn missing_target_does_nothing() {
        futures::executor::block_on(animate::<Vec<String>>(animation(0.0, 1.0, 10.0, 0), None));
    }
}
