//! Structured logging macros.
//!
//! Every line carries a `component` field (`authority`, `reserve`,
//! `exchange`, `host`) so log pipelines can split streams without parsing
//! messages.

/// Helper to create structured log entries with consistent formatting.
#[macro_export]
macro_rules! log_event {
    (info, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (error, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a shift (mint or burn) with the standard asset and amount fields.
#[macro_export]
macro_rules! log_shift_event {
    ($level:ident, $component:expr, $msg:expr, $asset:expr, $amount:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            asset = %$asset,
            amount = %$amount,
            $($($field)*,)?
            $msg
        )
    };
}
