use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("budget_coach=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Rounds a monetary value to cents. Applied once, when a value is finalized
/// for display or export; intermediate sums accumulate unrounded.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a signed amount as dollars, e.g. `-$6.25` or `$11.50`.
pub fn dollars(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${:.2}", sign, value.abs())
}
