//! View-facing services built on the transport layer.

pub mod list_view;
