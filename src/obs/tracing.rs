// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Why an item was left out of a product aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemSkip {
	/// Item endpoint answered with a non-success status.
	Unavailable,
	/// Item lookup failed (transport or decode).
	Failed,
}
impl ItemSkip {
	/// Returns a stable label suitable for event fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ItemSkip::Unavailable => "unavailable",
			ItemSkip::Failed => "failed",
		}
	}
}

/// A span builder used by marketplace calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("meli_broker.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs an item dropped from a product aggregate.
pub fn record_item_skipped(item_id: &str, reason: ItemSkip, detail: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(item_id, reason = reason.as_str(), %detail, "Skipping item.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (item_id, reason, detail);
	}
}

/// Logs a request that ended in an error response.
pub fn record_request_failure(route: &'static str, status: u16, detail: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		if status >= 500 {
			tracing::error!(route, status, %detail, "Request failed.");
		} else {
			tracing::debug!(route, status, %detail, "Request rejected.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (route, status, detail);
	}
}
