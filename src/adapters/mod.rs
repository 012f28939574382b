//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                 | Connects to                 |
//! |------------|----------------------------|-----------------------------|
//! | `board`    | every station port         | sensor + panel + delay      |
//! | `log_sink` | EventSink                  | `log` facade                |
//! | `sim`      | I2c, panel ports, DelayNs  | host simulation             |

pub mod board;
pub mod log_sink;
pub mod sim;
