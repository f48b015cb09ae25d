//! # Gateway Client
//!
//! The [`Gateway`] facade. A gateway is bound to exactly one backend for its
//! lifetime and exposes a single operation, [`Gateway::send`], which turns a
//! conversation into reply text.
//!
//! ```rust,no_run
//! use gateway_client::{Gateway, GatewayOptions};
//! use gateway_config::GatewayConfig;
//! use gateway_core::{ChatMessage, GenerationOverrides};
//!
//! # async fn example() -> Result<(), gateway_core::GatewayError> {
//! let config = GatewayConfig::from_env()?;
//! let gateway = Gateway::from_config(&config, GatewayOptions::default())?;
//!
//! let reply = gateway
//!     .send(
//!         &[ChatMessage::system("Reply in one line."), ChatMessage::user("Hello!")],
//!         GenerationOverrides::none(),
//!     )
//!     .await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod gateway;

pub use gateway::{Gateway, GatewayOptions};
