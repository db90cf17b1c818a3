//! Headline number tiles that count up when the dashboard opens.

mod animator;
pub use animator::{animate, ease_out_quad, KpiAnimation, KpiFrame, KpiRun, KpiTarget};

mod view;
pub use view::KpiStrip;
