//! # srms-core
//!
//! Types shared by every SRMS crate:
//!
//! - [`Role`] and [`ClearanceLevel`], the closed identity vocabulary returned by `sp_Login`
//! - [`Session`], the immutable record of an authenticated user
//! - [`SqlValue`], positional procedure parameters and result cells
//! - [`SrmsConfig`], the YAML configuration loaded by the binary

pub mod config;
pub mod role;
pub mod session;
pub mod value;

pub use config::{ConfigError, LoggingConfig, ShellConfig, SrmsConfig, UpstreamConfig};
pub use role::{ClearanceLevel, Role, RoleParseError};
pub use session::Session;
pub use value::{NullType, SqlValue};
