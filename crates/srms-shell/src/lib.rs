//! # srms-shell
//!
//! Everything between the login prompt and the procedure gateway:
//!
//! - [`login`] turns credentials into a [`Session`](srms_core::Session)
//! - [`navigation`] is the fixed role -> views table
//! - [`Navigator`] owns the session, the gateway and the content [`Panel`],
//!   and renders one view at a time
//! - [`views`] holds the per-view handlers
//! - [`render`] draws panels as terminal text
//!
//! ## Error tiers
//!
//! | Tier | Variant | Effect |
//! |------|---------|--------|
//! | Connectivity | [`ShellError::Connectivity`] | session halts |
//! | Procedure failure | [`ShellError::Procedure`] | message shown, session continues |
//! | Local validation | [`ShellError::Validation`] | message shown, no call made |

pub mod error;
pub mod forms;
pub mod login;
pub mod navigation;
pub mod navigator;
pub mod panel;
pub mod render;
pub mod views;

pub use error::{LoginError, ShellError};
pub use forms::{FormId, FormValues};
pub use login::login;
pub use navigation::{navigation, ViewId};
pub use navigator::Navigator;
pub use panel::{Action, Card, FieldKind, FieldSpec, FormSpec, Notice, NoticeKind, Panel, Table, Widget};
pub use render::Renderer;
