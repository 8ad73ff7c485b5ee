//! Tracing hooks.
//!
//! No subscriber is installed here; wire one up in the binary layer. Without
//! the `tracing` feature every hook compiles to a no-op.

use lazyq_core::types::ValueKind;

#[cfg(feature = "tracing")]
pub(crate) fn typed_callback_bound(
    operator: &'static str,
    param: &'static str,
    element: Option<ValueKind>,
    warn: bool,
) {
    let element = element.map(ValueKind::name).unwrap_or("unbound");
    if warn {
        tracing::warn!(operator, param, element, "typed callback bound (slow path)");
    } else {
        tracing::debug!(operator, param, element, "typed callback bound");
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn typed_callback_bound(
    _operator: &'static str,
    _param: &'static str,
    _element: Option<ValueKind>,
    _warn: bool,
) {}

#[cfg(feature = "tracing")]
pub(crate) fn channel_closed(sent: usize, disconnected: bool) {
    if disconnected {
        tracing::debug!(sent, "to_channel: receiver disconnected");
    }
    tracing::trace!(sent, "to_channel: closed");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn channel_closed(_sent: usize, _disconnected: bool) {}

#[cfg(feature = "tracing")]
pub(crate) fn slice_grown(operator: &'static str, old_capacity: usize, new_capacity: usize) {
    tracing::trace!(operator, old_capacity, new_capacity, "slice grow");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn slice_grown(_operator: &'static str, _old_capacity: usize, _new_capacity: usize) {}
