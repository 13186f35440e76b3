//! # Eventline
//!
//! Incremental decoding of Server-Sent Events streams.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eventline::prelude::*;
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let file = tokio::fs::File::open("events.txt").await?;
//!     let filter = EventTypeFilter::state();
//!
//!     let mut events = decode_reader(file, DecoderConfig::default());
//!     while let Some(event) = events.next().await {
//!         let event = event?;
//!         if filter.matches(&event) {
//!             let record: EspEvent = decode_json_case_insensitive(&event)?;
//!             println!("{}", record);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`eventline-decoder`**: line framing, field parsing, event dispatch,
//!   async and blocking front-ends
//! - **`eventline-payload`**: JSON decoding of event `data` into typed records

pub use eventline_decoder as decoder;
#[cfg(feature = "payload")]
pub use eventline_payload as payload;

pub mod prelude;
